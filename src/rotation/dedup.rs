use crate::types::{ImageDims, RotationalSymmetry};
use log::debug;

/// Remove rotations with nearby centres and similar radii.
///
/// Two rotations are duplicates when their centres differ by less than
/// `W / s` horizontally and `H / s` vertically and their radii by less than
/// `max(W / s, H / s)`. The one with the higher `mean_depth` is removed (the
/// later one on ties), so coarser-level evidence wins. Single pass over all
/// pairs `i < j`.
pub fn deduplicate_rotations(
    rotations: Vec<RotationalSymmetry>,
    dims: ImageDims,
    sensitivity: f32,
) -> Vec<RotationalSymmetry> {
    let max_dx = dims.width / sensitivity;
    let max_dy = dims.height / sensitivity;
    let max_dr = max_dx.max(max_dy);

    let mut keep = vec![true; rotations.len()];
    for i in 0..rotations.len() {
        for j in (i + 1)..rotations.len() {
            if !keep[i] {
                break;
            }
            if !keep[j] {
                continue;
            }
            let (a, b) = (&rotations[i], &rotations[j]);
            let duplicate = (a.center[0] - b.center[0]).abs() < max_dx
                && (a.center[1] - b.center[1]).abs() < max_dy
                && (a.radius - b.radius).abs() < max_dr;
            if duplicate {
                let deeper = if a.mean_depth > b.mean_depth { i } else { j };
                keep[deeper] = false;
            }
        }
    }

    let total = rotations.len();
    let kept: Vec<RotationalSymmetry> = rotations
        .into_iter()
        .zip(keep)
        .filter_map(|(rot, keep)| keep.then_some(rot))
        .collect();
    debug!(
        "deduplicate_rotations sensitivity={:.2}: kept {}/{}",
        sensitivity,
        kept.len(),
        total
    );
    kept
}

/// Gray RGB image textured on one side of `x = width / 2` and mirrored onto
/// the other.
pub fn mirrored_rgb(width: usize, height: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let half = width / 2;
    let mut img = vec![0u8; width * height * 3];
    for y in 0..height {
        for x in 0..width {
            let xm = if x < half { half - 1 - x } else { x - half };
            let val = ((xm * 37 + y * 11) % 200) as u8 + 20;
            let i = (y * width + x) * 3;
            img[i..i + 3].copy_from_slice(&[val, val, val]);
        }
    }
    img
}

/// Uniform RGB image split into a dark left half and a bright right half.
pub fn two_tone_rgb(width: usize, height: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = vec![0u8; width * height * 3];
    for y in 0..height {
        for x in 0..width {
            let val = if x < width / 2 { 30u8 } else { 220u8 };
            let i = (y * width + x) * 3;
            img[i..i + 3].copy_from_slice(&[val, val, val]);
        }
    }
    img
}

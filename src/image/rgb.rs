/// Borrowed 8-bit RGB view (interleaved, 3 bytes per pixel).
///
/// Sub-views share the parent buffer; `stride` stays the parent's row pitch
/// in bytes, so cropping never copies pixels.
#[derive(Clone, Copy, Debug)]
pub struct ImageRgb8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageRgb8<'a> {
    pub const CHANNELS: usize = 3;

    /// Tightly packed view over `data` (`stride = 3 * w`).
    pub fn packed(w: usize, h: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride: w * Self::CHANNELS,
            data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        let i = y * self.stride + x * Self::CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Rec. 601 luma in `[0, 255]`.
    #[inline]
    pub fn luma(&self, x: usize, y: usize) -> f32 {
        let [r, g, b] = self.get(x, y);
        0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
    }

    /// Crop `[x0, x1) × [y0, y1)`, clamped to the view bounds.
    ///
    /// Empty ranges yield a zero-sized view.
    pub fn crop(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> ImageRgb8<'a> {
        let x1 = x1.min(self.w);
        let y1 = y1.min(self.h);
        let x0 = x0.min(x1);
        let y0 = y0.min(y1);
        let w = x1 - x0;
        let h = y1 - y0;
        if w == 0 || h == 0 {
            return ImageRgb8 {
                w,
                h,
                stride: self.stride,
                data: &[],
            };
        }
        let start = y0 * self.stride + x0 * Self::CHANNELS;
        ImageRgb8 {
            w,
            h,
            stride: self.stride,
            data: &self.data[start..],
        }
    }
}

/// Rectangle of the framebuffer that rendering output maps onto, in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ViewportRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ViewportRect {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport covering a whole `width` x `height` framebuffer.
    #[inline]
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Zero-area viewports (e.g. a minimized window) are skipped when drawing.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersects the viewport with a `width` x `height` render target.
    pub fn clamped_to(self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }

    /// `(x, y, w, h)` as expected by `wgpu::RenderPass::set_viewport`.
    pub fn as_f32(self) -> (f32, f32, f32, f32) {
        (self.x as f32, self.y as f32, self.width as f32, self.height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_starts_at_origin() {
        assert_eq!(ViewportRect::full(640, 480), ViewportRect::new(0, 0, 640, 480));
    }

    #[test]
    fn clamped_to_smaller_target() {
        let vp = ViewportRect::full(800, 600).clamped_to(640, 480);
        assert_eq!(vp, ViewportRect::full(640, 480));
    }

    #[test]
    fn clamped_offset_outside_target_is_empty() {
        let vp = ViewportRect::new(700, 0, 100, 100).clamped_to(640, 480);
        assert!(vp.is_empty());
    }
}

//! Per-frame context
//!
//! Everything a frame update needs is carried here explicitly instead of
//! living in globals. The page runtime owns one instance for its lifetime,
//! refreshes it from host events, and passes it into each update.

/// Viewport size in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Pointer position, instant and lagged
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub instant_x: f32,
    pub instant_y: f32,
    pub lagged_x: f32,
    pub lagged_y: f32,
}

impl PointerState {
    /// Move the lagged position toward the instant one by `factor` on each axis
    pub fn smooth(&mut self, factor: f32) {
        self.lagged_x += (self.instant_x - self.lagged_x) * factor;
        self.lagged_y += (self.instant_y - self.lagged_y) * factor;
    }

    /// Distance between the lagged and instant positions
    pub fn lag(&self) -> f32 {
        let dx = self.instant_x - self.lagged_x;
        let dy = self.instant_y - self.lagged_y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// State handed to every per-frame update
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameContext {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Current vertical scroll offset
    pub scroll_y: f32,
    pub viewport: Viewport,
    pub pointer: PointerState,
    /// Frames run so far
    pub frame: u64,
}

impl FrameContext {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    /// Start a new frame
    pub fn begin_frame(&mut self, dt: f32) {
        self.dt = dt.max(0.0);
        self.frame += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_moves_fraction_of_gap() {
        let mut p = PointerState {
            instant_x: 100.0,
            instant_y: -50.0,
            ..Default::default()
        };
        p.smooth(0.12);
        assert!((p.lagged_x - 12.0).abs() < 1e-5);
        assert!((p.lagged_y + 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_negative_dt_clamped() {
        let mut ctx = FrameContext::new(Viewport::default());
        ctx.begin_frame(-1.0);
        assert_eq!(ctx.dt, 0.0);
        assert_eq!(ctx.frame, 1);
    }
}

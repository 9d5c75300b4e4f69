//! Viewport-derived inputs: scroll progress and normalized pointer position.
//!
//! Both are raw samples. Smoothing, where wanted, happens downstream in the
//! camera rig.

use crate::constants::SCROLL_EPSILON;

/// Snapshot of the browser measurements that progress is derived from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    /// Scrollable distance; zero or negative when the page fits the viewport.
    #[inline]
    pub fn scrollable(&self) -> f64 {
        self.document_height - self.viewport_height
    }
}

/// Normalized scroll position in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct ScrollProgress(f32);

impl ScrollProgress {
    pub const START: ScrollProgress = ScrollProgress(0.0);
    pub const END: ScrollProgress = ScrollProgress(1.0);

    /// Clamps into [0, 1]; NaN maps to 0.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::START;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn from_metrics(m: &ScrollMetrics) -> Self {
        let range = m.scrollable();
        if !(range > SCROLL_EPSILON) || !m.scroll_y.is_finite() {
            return Self::START;
        }
        let p = m.scroll_y / range.max(SCROLL_EPSILON);
        Self::new(p.clamp(0.0, 1.0) as f32)
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }
}

/// Pointer position in normalized device coordinates: x right, y up, both in
/// [-1, 1]. The centre of the window is the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    pub fn from_client(client_x: f64, client_y: f64, width: f64, height: f64) -> Self {
        if !(width > 0.0 && height > 0.0) {
            return Self::default();
        }
        let x = (client_x / width) * 2.0 - 1.0;
        let y = -(client_y / height) * 2.0 + 1.0;
        Self {
            x: (x as f32).clamp(-1.0, 1.0),
            y: (y as f32).clamp(-1.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_progress_is_start() {
        assert_eq!(ScrollProgress::new(f32::NAN), ScrollProgress::START);
    }

    #[test]
    fn pointer_centre_is_origin() {
        let p = PointerPosition::from_client(400.0, 300.0, 800.0, 600.0);
        assert_eq!(p, PointerPosition { x: 0.0, y: 0.0 });
    }

    #[test]
    fn pointer_top_left_is_minus_one_plus_one() {
        let p = PointerPosition::from_client(0.0, 0.0, 800.0, 600.0);
        assert_eq!(p, PointerPosition { x: -1.0, y: 1.0 });
    }

    #[test]
    fn pointer_with_zero_window_stays_centred() {
        let p = PointerPosition::from_client(10.0, 10.0, 0.0, 0.0);
        assert_eq!(p, PointerPosition::default());
    }
}

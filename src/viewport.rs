use serde::{Deserialize, Serialize};

use crate::constants::{MAX_ZOOM, MIN_ZOOM, ZOOM_BASELINE, ZOOM_STEP};
use crate::geometry::ProjectedPoint;

/// Zoom is a percentage of `baseline`; buttons move it by `step` inside `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    pub baseline: f64,
    pub step: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            baseline: ZOOM_BASELINE,
            step: ZOOM_STEP,
            min: MIN_ZOOM,
            max: MAX_ZOOM,
        }
    }
}

/// User-controlled pan and zoom on top of the projection.
///
/// Only gesture handlers change this; incoming data never does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
    #[serde(default)]
    pub config: ZoomConfig,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl ViewportState {
    #[must_use]
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: config.baseline,
            config,
        }
    }

    /// Multiplier applied to projected coordinates
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.zoom / self.config.baseline
    }

    #[must_use]
    pub fn zoom_in(self) -> Self {
        Self {
            zoom: (self.zoom + self.config.step).min(self.config.max),
            ..self
        }
    }

    #[must_use]
    pub fn zoom_out(self) -> Self {
        Self {
            zoom: (self.zoom - self.config.step).max(self.config.min),
            ..self
        }
    }

    #[must_use]
    pub fn reset(self) -> Self {
        Self::new(self.config)
    }

    /// Pan is never clamped; panning away from the network is undone by `reset`
    #[must_use]
    pub fn pan(self, dx: f64, dy: f64) -> Self {
        Self {
            pan_x: self.pan_x + dx,
            pan_y: self.pan_y + dy,
            ..self
        }
    }

    /// `projected * (zoom / baseline) + pan`
    #[must_use]
    pub fn to_screen(&self, point: ProjectedPoint) -> ProjectedPoint {
        let scale = self.scale();
        ProjectedPoint {
            x: point.x * scale + self.pan_x,
            y: point.y * scale + self.pan_y,
        }
    }

    /// Inverse of [`Self::to_screen`], used for hit testing
    #[must_use]
    pub fn to_world(&self, point: ProjectedPoint) -> ProjectedPoint {
        let scale = self.scale();
        ProjectedPoint {
            x: (point.x - self.pan_x) / scale,
            y: (point.y - self.pan_y) / scale,
        }
    }

    /// Rounded percentage for the zoom indicator
    #[must_use]
    pub fn zoom_label(&self) -> String {
        format!("Zoom: {}%", self.zoom.round())
    }
}

/// Drag-to-pan bookkeeping.
///
/// Pointer-down anchors the drag, each move pans by the delta since the previous
/// position, pointer-up or leaving the surface ends it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanGesture {
    last_pos: Option<(f64, f64)>,
    /// Distance covered since the last `begin`, kept after `end`
    travel: f64,
}

impl PanGesture {
    pub fn begin(&mut self, x: f64, y: f64) {
        self.last_pos = Some((x, y));
        self.travel = 0.0;
    }

    /// Apply pointer motion; returns the viewport unchanged when no drag is active
    #[must_use]
    pub fn drag_to(&mut self, x: f64, y: f64, viewport: ViewportState) -> ViewportState {
        let Some((last_x, last_y)) = self.last_pos else {
            return viewport;
        };
        self.last_pos = Some((x, y));
        let (dx, dy) = (x - last_x, y - last_y);
        self.travel += (dx * dx + dy * dy).sqrt();
        viewport.pan(dx, dy)
    }

    pub fn end(&mut self) {
        self.last_pos = None;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.last_pos.is_some()
    }

    #[must_use]
    pub fn travel(&self) -> f64 {
        self.travel
    }
}

/// Letter-boxes the logical canvas into a surface of arbitrary pixel size,
/// centred, preserving aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceFit {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl SurfaceFit {
    #[must_use]
    pub fn new(surface: (f64, f64), logical: (f64, f64)) -> Self {
        let (surface_w, surface_h) = surface;
        let (logical_w, logical_h) = logical;
        if surface_w <= 0.0 || surface_h <= 0.0 || logical_w <= 0.0 || logical_h <= 0.0 {
            return Self { scale: 1.0, offset_x: 0.0, offset_y: 0.0 };
        }

        let scale = (surface_w / logical_w).min(surface_h / logical_h);
        Self {
            scale,
            offset_x: (surface_w - logical_w * scale) / 2.0,
            offset_y: (surface_h - logical_h * scale) / 2.0,
        }
    }

    /// Pixel position on the surface → logical canvas units
    #[must_use]
    pub fn to_logical(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.offset_x) / self.scale, (y - self.offset_y) / self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_baseline() {
        let viewport = ViewportState::default();
        assert_eq!(viewport.zoom, 50.0);
        assert_eq!(viewport.scale(), 1.0);
        assert_eq!((viewport.pan_x, viewport.pan_y), (0.0, 0.0));
    }

    #[test]
    fn test_zoom_out_floors_at_min() {
        let mut viewport = ViewportState::default();
        for _ in 0..4 {
            viewport = viewport.zoom_out();
        }
        assert_eq!(viewport.zoom, 20.0);
        viewport = viewport.zoom_out();
        assert_eq!(viewport.zoom, 20.0);
    }

    #[test]
    fn test_zoom_in_caps_at_max() {
        let mut viewport = ViewportState::default();
        for _ in 0..20 {
            viewport = viewport.zoom_in();
            assert!(viewport.zoom <= 100.0);
        }
        assert_eq!(viewport.zoom, 100.0);
        assert_eq!(viewport.zoom_in(), viewport);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let viewport = ViewportState::default().zoom_in().zoom_in().pan(-340.0, 1200.5);
        let reset = viewport.reset();
        assert_eq!(reset.zoom, 50.0);
        assert_eq!((reset.pan_x, reset.pan_y), (0.0, 0.0));
        assert_eq!(reset.reset(), reset);
    }

    #[test]
    fn test_pan_is_unbounded() {
        let viewport = ViewportState::default().pan(1e6, -1e6);
        assert_eq!((viewport.pan_x, viewport.pan_y), (1e6, -1e6));
    }

    #[test]
    fn test_screen_world_roundtrip() {
        let viewport = ViewportState::default().zoom_in().zoom_in().pan(30.0, -12.0);
        let point = ProjectedPoint::new(400.0, 300.0);
        let screen = viewport.to_screen(point);
        assert_eq!(screen, ProjectedPoint::new(400.0 * 1.4 + 30.0, 300.0 * 1.4 - 12.0));
        let back = viewport.to_world(screen);
        assert!((back.x - point.x).abs() < 1e-9);
        assert!((back.y - point.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_label() {
        assert_eq!(ViewportState::default().zoom_label(), "Zoom: 50%");
        assert_eq!(ViewportState::default().zoom_out().zoom_label(), "Zoom: 40%");
    }

    #[test]
    fn test_pan_gesture_ignores_motion_while_idle() {
        let mut gesture = PanGesture::default();
        let viewport = ViewportState::default();
        assert_eq!(gesture.drag_to(50.0, 50.0, viewport), viewport);
        assert!(!gesture.is_dragging());
    }

    #[test]
    fn test_pan_gesture_accumulates_deltas() {
        let mut gesture = PanGesture::default();
        let mut viewport = ViewportState::default();

        gesture.begin(10.0, 10.0);
        viewport = gesture.drag_to(15.0, 20.0, viewport);
        viewport = gesture.drag_to(25.0, 18.0, viewport);
        assert_eq!((viewport.pan_x, viewport.pan_y), (15.0, 8.0));

        gesture.end();
        viewport = gesture.drag_to(100.0, 100.0, viewport);
        assert_eq!((viewport.pan_x, viewport.pan_y), (15.0, 8.0));
    }

    #[test]
    fn test_pan_gesture_travel() {
        let mut gesture = PanGesture::default();
        let viewport = ViewportState::default();
        gesture.begin(0.0, 0.0);
        let _ = gesture.drag_to(3.0, 4.0, viewport);
        gesture.end();
        assert_eq!(gesture.travel(), 5.0);

        gesture.begin(1.0, 1.0);
        assert_eq!(gesture.travel(), 0.0);
    }

    #[test]
    fn test_surface_fit_letterboxes() {
        let fit = SurfaceFit::new((1600.0, 600.0), (800.0, 600.0));
        assert_eq!(fit.scale, 1.0);
        assert_eq!(fit.offset_x, 400.0);
        assert_eq!(fit.offset_y, 0.0);
        assert_eq!(fit.to_logical(400.0, 0.0), (0.0, 0.0));

        let fit = SurfaceFit::new((400.0, 300.0), (800.0, 600.0));
        assert_eq!(fit.scale, 0.5);
        assert_eq!(fit.to_logical(200.0, 150.0), (400.0, 300.0));
    }

    #[test]
    fn test_surface_fit_degenerate_surface() {
        let fit = SurfaceFit::new((0.0, 0.0), (800.0, 600.0));
        assert_eq!(fit.scale, 1.0);
    }
}

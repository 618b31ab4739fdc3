use crate::geometry::ProjectedPoint;
use crate::hit_detection::find_marker_at_position;
use crate::interaction::{InteractionState, PointerEvent, TrainMarker};
use crate::viewport::{PanGesture, ViewportState, ZoomConfig};

/// A press that travels further than this is a drag, not a click
pub const CLICK_SLOP: f64 = 3.0;

/// View state owned by the gesture handlers: pan/zoom, hover/selection and the
/// drag in progress. Data refreshes never touch it.
///
/// Pointer coordinates are logical canvas units (already passed through
/// [`crate::viewport::SurfaceFit`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewControls {
    pub viewport: ViewportState,
    pub interaction: InteractionState,
    gesture: PanGesture,
}

impl ViewControls {
    #[must_use]
    pub fn new(zoom: ZoomConfig) -> Self {
        Self {
            viewport: ViewportState::new(zoom),
            ..Self::default()
        }
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.gesture.begin(x, y);
    }

    /// Pan if a drag is active and refresh the hovered marker.
    ///
    /// Returns whether anything visible changed.
    pub fn pointer_move(&mut self, x: f64, y: f64, markers: &[TrainMarker<'_>]) -> bool {
        let before = self.viewport;
        self.viewport = self.gesture.drag_to(x, y, self.viewport);
        let hit = find_marker_at_position(markers, self.viewport.to_world(ProjectedPoint::new(x, y)));
        let hover_changed = self.interaction.pointer_over(hit);
        hover_changed || before != self.viewport
    }

    pub fn pointer_up(&mut self) {
        self.gesture.end();
    }

    pub fn pointer_leave_surface(&mut self) {
        self.gesture.end();
        self.interaction.apply(PointerEvent::LeaveSurface);
    }

    /// Select or deselect whatever is under the pointer. Clicks that end a drag
    /// are ignored.
    pub fn click(&mut self, x: f64, y: f64, markers: &[TrainMarker<'_>]) {
        if self.gesture.travel() > CLICK_SLOP {
            return;
        }
        let hit = find_marker_at_position(markers, self.viewport.to_world(ProjectedPoint::new(x, y)));
        self.interaction.click(hit);
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    pub fn zoom_in(&mut self) {
        self.viewport = self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport = self.viewport.zoom_out();
    }

    pub fn reset(&mut self) {
        self.viewport = self.viewport.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::layout_markers;
    use crate::locator::LocatedTrain;
    use crate::models::TrainSnapshot;

    fn located(id: &str, x: f64, y: f64) -> LocatedTrain {
        LocatedTrain {
            train: TrainSnapshot {
                id: id.to_string(),
                kind: "Express".to_string(),
                section_id: "S1".to_string(),
                position_m: 0.0,
                status: "On time".to_string(),
                max_speed_kmh: 160.0,
                destination: "STN_B".to_string(),
            },
            progress: 0.0,
            lat: 0.0,
            lng: 0.0,
            point: ProjectedPoint::new(x, y),
        }
    }

    #[test]
    fn test_click_on_marker_toggles_selection() {
        let trains = vec![located("T1", 100.0, 100.0)];
        let mut controls = ViewControls::default();

        let markers = layout_markers(&trains, &controls.interaction);
        controls.pointer_down(100.0, 100.0);
        controls.pointer_up();
        controls.click(100.0, 100.0, &markers);
        assert_eq!(controls.interaction.selected_id.as_deref(), Some("T1"));

        let markers = layout_markers(&trains, &controls.interaction);
        controls.pointer_down(100.0, 100.0);
        controls.pointer_up();
        controls.click(100.0, 100.0, &markers);
        assert_eq!(controls.interaction.selected_id, None);
    }

    #[test]
    fn test_background_click_clears_selection() {
        let trains = vec![located("T1", 100.0, 100.0)];
        let mut controls = ViewControls::default();
        controls.interaction.click_entity("T1");

        let markers = layout_markers(&trains, &controls.interaction);
        controls.click(400.0, 400.0, &markers);
        assert_eq!(controls.interaction.selected_id, None);
    }

    #[test]
    fn test_drag_pans_and_suppresses_click() {
        let trains = vec![located("T1", 100.0, 100.0)];
        let mut controls = ViewControls::default();
        controls.interaction.click_entity("T1");

        let markers = layout_markers(&trains, &controls.interaction);
        controls.pointer_down(300.0, 300.0);
        assert!(controls.pointer_move(340.0, 320.0, &markers));
        controls.pointer_up();
        controls.click(340.0, 320.0, &markers);

        assert_eq!((controls.viewport.pan_x, controls.viewport.pan_y), (40.0, 20.0));
        assert_eq!(controls.interaction.selected_id.as_deref(), Some("T1"));
    }

    #[test]
    fn test_hover_follows_pan_and_zoom() {
        let trains = vec![located("T1", 100.0, 100.0)];
        let mut controls = ViewControls::default();
        controls.zoom_in();
        controls.zoom_in();
        controls.viewport = controls.viewport.pan(10.0, 10.0);

        let markers = layout_markers(&trains, &controls.interaction);
        // 100 * 1.4 + 10
        assert!(controls.pointer_move(150.0, 150.0, &markers));
        assert_eq!(controls.interaction.hovered_id.as_deref(), Some("T1"));

        assert!(controls.pointer_move(400.0, 400.0, &markers));
        assert_eq!(controls.interaction.hovered_id, None);
    }

    #[test]
    fn test_leaving_surface_ends_drag_and_hover() {
        let trains = vec![located("T1", 100.0, 100.0)];
        let mut controls = ViewControls::default();
        let markers = layout_markers(&trains, &controls.interaction);

        controls.pointer_down(100.0, 100.0);
        let _ = controls.pointer_move(100.0, 100.0, &markers);
        assert!(controls.is_dragging());
        controls.pointer_leave_surface();

        assert!(!controls.is_dragging());
        assert_eq!(controls.interaction.hovered_id, None);
        assert!(!controls.pointer_move(500.0, 500.0, &markers));
    }

    #[test]
    fn test_zoom_buttons_and_reset() {
        let mut controls = ViewControls::default();
        controls.zoom_out();
        controls.zoom_out();
        assert_eq!(controls.viewport.zoom, 30.0);
        controls.reset();
        assert_eq!(controls.viewport, ViewportState::default());
    }
}

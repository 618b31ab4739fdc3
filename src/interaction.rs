//! Hover/selection state machine and the draw order it implies.
//!
//! ```text
//!              enter(h)                      click(s)
//!     Idle ─────────────> Hovering(h) ─────────────────> SelectedAndHovering(s, h)
//!      ^  <─────────────       │        <─────────────           │
//!      │     leave(h)          │          click(s) / bg           │ leave(h)
//!      │                       v                                  v
//!      └──────────────── Selected(s) <───────────────────────────┘
//!         click(s) / bg
//! ```
//!
//! `hovered_id` and `selected_id` are independent fields; the phase is derived.

use serde::{Deserialize, Serialize};

use crate::constants::COINCIDENT_EPSILON;
use crate::geometry::ProjectedPoint;
use crate::locator::LocatedTrain;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionState {
    pub hovered_id: Option<String>,
    pub selected_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionPhase<'a> {
    Idle,
    Hovering(&'a str),
    Selected(&'a str),
    SelectedAndHovering { selected: &'a str, hovered: &'a str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerEvent {
    Enter(String),
    Leave(String),
    ClickEntity(String),
    ClickBackground,
    /// Pointer left the whole render surface
    LeaveSurface,
}

impl InteractionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> InteractionPhase<'_> {
        match (self.selected_id.as_deref(), self.hovered_id.as_deref()) {
            (None, None) => InteractionPhase::Idle,
            (None, Some(hovered)) => InteractionPhase::Hovering(hovered),
            (Some(selected), None) => InteractionPhase::Selected(selected),
            (Some(selected), Some(hovered)) => InteractionPhase::SelectedAndHovering { selected, hovered },
        }
    }

    pub fn apply(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Enter(id) => self.pointer_enter(&id),
            PointerEvent::Leave(id) => self.pointer_leave(&id),
            PointerEvent::ClickEntity(id) => self.click_entity(&id),
            PointerEvent::ClickBackground => self.click_background(),
            PointerEvent::LeaveSurface => self.hovered_id = None,
        }
    }

    /// Hover follows the pointer regardless of selection
    pub fn pointer_enter(&mut self, id: &str) {
        self.hovered_id = Some(id.to_string());
    }

    /// Stale leave events for an id that is no longer hovered are ignored
    pub fn pointer_leave(&mut self, id: &str) {
        if self.hovered_id.as_deref() == Some(id) {
            self.hovered_id = None;
        }
    }

    /// Toggle selection. Callers must not also dispatch `click_background` for
    /// the same click.
    pub fn click_entity(&mut self, id: &str) {
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        } else {
            self.selected_id = Some(id.to_string());
        }
    }

    pub fn click_background(&mut self) {
        self.selected_id = None;
    }

    /// Translate the result of a hit test on pointer motion into leave/enter events.
    ///
    /// Returns whether the hovered id changed.
    pub fn pointer_over(&mut self, hit: Option<&str>) -> bool {
        if self.hovered_id.as_deref() == hit {
            return false;
        }
        if let Some(previous) = self.hovered_id.clone() {
            self.apply(PointerEvent::Leave(previous));
        }
        if let Some(id) = hit {
            self.apply(PointerEvent::Enter(id.to_string()));
        }
        true
    }

    /// Dispatch a click depending on whether it landed on an entity
    pub fn click(&mut self, hit: Option<&str>) {
        match hit {
            Some(id) => self.apply(PointerEvent::ClickEntity(id.to_string())),
            None => self.apply(PointerEvent::ClickBackground),
        }
    }

    #[must_use]
    pub fn highlight_of(&self, id: &str) -> Highlight {
        if self.selected_id.as_deref() == Some(id) {
            Highlight::Selected
        } else if self.hovered_id.as_deref() == Some(id) {
            Highlight::Hovered
        } else {
            Highlight::None
        }
    }
}

/// How a marker is emphasised. Ordered by stacking precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Highlight {
    None,
    Hovered,
    Selected,
}

impl Highlight {
    #[must_use]
    pub fn radius(self) -> f64 {
        match self {
            Self::None => 8.0,
            Self::Hovered => 10.0,
            Self::Selected => 12.0,
        }
    }

    #[must_use]
    pub fn outline_width(self) -> f64 {
        match self {
            Self::None | Self::Hovered => 3.0,
            Self::Selected => 4.0,
        }
    }

    /// Radius and opacity of the emphasis ring, if any
    #[must_use]
    pub fn ring(self) -> Option<(f64, f64)> {
        match self {
            Self::None => None,
            Self::Hovered => Some((14.0, 0.6)),
            Self::Selected => Some((16.0, 0.8)),
        }
    }

    #[must_use]
    pub fn label_font_size(self) -> f64 {
        if self == Self::Selected {
            12.0
        } else {
            10.0
        }
    }
}

/// Indices of `ids` in draw order: untouched entities keep input order, then the
/// hovered entity, then the selected one on top.
#[must_use]
pub fn render_order<'a>(ids: impl IntoIterator<Item = &'a str>, state: &InteractionState) -> Vec<usize> {
    let mut keyed: Vec<(Highlight, usize)> = ids
        .into_iter()
        .enumerate()
        .map(|(index, id)| (state.highlight_of(id), index))
        .collect();
    // Stable, so equal highlights keep their input order
    keyed.sort_by_key(|(highlight, _)| *highlight);
    keyed.into_iter().map(|(_, index)| index).collect()
}

/// Micro-offset for the marker at render-order position `order`
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn jitter_offset(order: usize) -> (f64, f64) {
    let dx = ((order % 3) as f64 - 1.0) * 2.0;
    let dy = (order / 3) as f64 * 2.0;
    (dx, dy)
}

/// A train ready to draw: final world position, emphasis and stacking slot.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainMarker<'a> {
    pub located: &'a LocatedTrain,
    pub point: ProjectedPoint,
    pub highlight: Highlight,
    /// Position in draw order (0 = bottom)
    pub order: usize,
}

impl TrainMarker<'_> {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.located.train.id
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.highlight.radius()
    }
}

/// Sort trains into draw order and separate co-located markers.
///
/// Markers within [`COINCIDENT_EPSILON`] of another marker get the jitter of their
/// render-order slot, so a given ordered list always renders identically.
#[must_use]
pub fn layout_markers<'a>(trains: &'a [LocatedTrain], state: &InteractionState) -> Vec<TrainMarker<'a>> {
    let order = render_order(trains.iter().map(|t| t.train.id.as_str()), state);

    order
        .iter()
        .enumerate()
        .map(|(slot, &index)| {
            let located = &trains[index];
            let crowded = trains.iter().enumerate().any(|(other, candidate)| {
                other != index && candidate.point.distance(located.point) <= COINCIDENT_EPSILON
            });
            let point = if crowded {
                let (dx, dy) = jitter_offset(slot);
                located.point.offset(dx, dy)
            } else {
                located.point
            };

            TrainMarker {
                located,
                point,
                highlight: state.highlight_of(&located.train.id),
                order: slot,
            }
        })
        .collect()
}

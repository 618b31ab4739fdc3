//! Frame composition: one consistent scene plus view state in, a flat list of
//! drawing commands out. The canvas backend only executes these.

use crate::controls::ViewControls;
use crate::geometry::ProjectedPoint;
use crate::interaction::{layout_markers, Highlight, TrainMarker};
use crate::models::{DataState, Topology};
use crate::scene::Scene;

pub const BACKGROUND_COLOR: &str = "#fefefe";
pub const GRID_COLOR: &str = "#f8fafc";
pub const GRID_SPACING: f64 = 40.0;
const GRID_LINE_WIDTH: f64 = 1.0;

pub const TRACK_COLOR: &str = "#d1d5db";
const TRACK_ALPHA: f64 = 0.8;
pub const BYPASS_DASH: [f64; 2] = [8.0, 4.0];
const SECTION_LABEL_COLOR: &str = "#6b7280";
const SECTION_LABEL_FONT: &str = "500 11px sans-serif";
const SECTION_LABEL_RISE: f64 = 8.0;

pub const STATION_COLOR: &str = "#3b82f6";
const STATION_RADIUS: f64 = 10.0;
const STATION_INNER_RADIUS: f64 = 4.0;
const STATION_NAME_COLOR: &str = "#1f2937";
const STATION_NAME_FONT: &str = "600 12px sans-serif";
const STATION_NAME_DROP: f64 = 28.0;
const STATION_ID_COLOR: &str = "#6b7280";
const STATION_ID_FONT: &str = "10px sans-serif";
const STATION_ID_DROP: f64 = 42.0;

const OUTLINE_COLOR: &str = "#ffffff";
const RING_WIDTH: f64 = 2.0;
const MARKER_LABEL_COLOR: &str = "#1f2937";
const MARKER_LABEL_RISE: f64 = 15.0;
const ICON_STROKE_WIDTH: f64 = 1.5;
/// Three short strokes drawn over each marker, relative to its centre
const ICON_STROKES: [((f64, f64), (f64, f64)); 3] = [
    ((-3.0, 1.0), (3.0, 1.0)),
    ((-2.0, -2.0), (2.0, -2.0)),
    ((-3.0, 2.0), (3.0, 2.0)),
];

pub const LOADING_TEXT: &str = "Loading network topology...";
pub const NO_DATA_TEXT: &str = "No network data available";
pub const TRAINS_LOADING_TEXT: &str = "Loading train data...";
pub const NO_TRAIN_DATA_TEXT: &str = "No train data available";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
}

/// One drawing instruction in logical canvas units.
///
/// Everything between `PushTransform` and `PopTransform` is in projected space;
/// text is centred on its position.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
        color: &'static str,
    },
    Grid {
        width: f64,
        height: f64,
        spacing: f64,
        color: &'static str,
        line_width: f64,
    },
    PushTransform {
        translate_x: f64,
        translate_y: f64,
        scale: f64,
    },
    PopTransform,
    Line {
        from: ProjectedPoint,
        to: ProjectedPoint,
        stroke: Stroke,
        alpha: f64,
        dash: Option<[f64; 2]>,
    },
    Circle {
        center: ProjectedPoint,
        radius: f64,
        fill: Option<&'static str>,
        stroke: Option<Stroke>,
        alpha: f64,
    },
    Text {
        position: ProjectedPoint,
        text: String,
        font: String,
        color: &'static str,
    },
    /// Centred status message shown instead of the map
    Placeholder { text: &'static str },
    /// Status banner drawn on top of the map, outside the viewport transform
    StatusOverlay { text: &'static str },
}

/// Compose one frame.
///
/// Loading and unavailable topologies (or ones with no stations or no sections)
/// produce only a background and a placeholder. A ready topology is drawn even
/// while the train feed is loading or down, with a status overlay on top; a
/// successful poll with zero trains gets no overlay.
#[must_use]
pub fn compose_frame(scene: &Scene, view: &ViewControls, now_ms: f64) -> Vec<DrawCommand> {
    let projector = scene.projector();
    let (width, height) = (projector.width, projector.height);
    let mut commands = vec![DrawCommand::Clear { width, height, color: BACKGROUND_COLOR }];

    let topology = match scene.topology() {
        DataState::Loading => {
            commands.push(DrawCommand::Placeholder { text: LOADING_TEXT });
            return commands;
        }
        DataState::Ready(topology) if !topology.is_empty() => topology,
        DataState::Ready(_) | DataState::Unavailable => {
            commands.push(DrawCommand::Placeholder { text: NO_DATA_TEXT });
            return commands;
        }
    };

    commands.push(DrawCommand::Grid {
        width,
        height,
        spacing: GRID_SPACING,
        color: GRID_COLOR,
        line_width: GRID_LINE_WIDTH,
    });

    let viewport = view.viewport;
    commands.push(DrawCommand::PushTransform {
        translate_x: viewport.pan_x,
        translate_y: viewport.pan_y,
        scale: viewport.scale(),
    });

    draw_sections(&mut commands, topology, scene);
    draw_stations(&mut commands, topology, scene);

    let smoothed = scene.smoothed(now_ms);
    let markers = layout_markers(&smoothed, &view.interaction);
    draw_markers(&mut commands, &markers);

    commands.push(DrawCommand::PopTransform);

    match scene.trains() {
        DataState::Loading => commands.push(DrawCommand::StatusOverlay { text: TRAINS_LOADING_TEXT }),
        DataState::Unavailable => commands.push(DrawCommand::StatusOverlay { text: NO_TRAIN_DATA_TEXT }),
        DataState::Ready(_) => {}
    }
    commands
}

fn draw_sections(commands: &mut Vec<DrawCommand>, topology: &Topology, scene: &Scene) {
    let projector = scene.projector();
    for (section, start, end) in topology.sections() {
        let from = projector.project(start.lat, start.lng);
        let to = projector.project(end.lat, end.lng);

        commands.push(DrawCommand::Line {
            from,
            to,
            stroke: Stroke {
                color: TRACK_COLOR,
                width: section.category().stroke_width(),
            },
            alpha: TRACK_ALPHA,
            dash: section.is_bypass.then_some(BYPASS_DASH),
        });

        let mid = from.midpoint(to);
        commands.push(DrawCommand::Text {
            position: mid.offset(0.0, -SECTION_LABEL_RISE),
            text: section.id.clone(),
            font: SECTION_LABEL_FONT.to_string(),
            color: SECTION_LABEL_COLOR,
        });
    }
}

fn draw_stations(commands: &mut Vec<DrawCommand>, topology: &Topology, scene: &Scene) {
    let projector = scene.projector();
    for station in topology.stations() {
        let center = projector.project(station.lat, station.lng);

        commands.push(DrawCommand::Circle {
            center,
            radius: STATION_RADIUS,
            fill: Some(STATION_COLOR),
            stroke: Some(Stroke { color: OUTLINE_COLOR, width: 3.0 }),
            alpha: 1.0,
        });
        commands.push(DrawCommand::Circle {
            center,
            radius: STATION_INNER_RADIUS,
            fill: Some(OUTLINE_COLOR),
            stroke: None,
            alpha: 1.0,
        });
        commands.push(DrawCommand::Text {
            position: center.offset(0.0, STATION_NAME_DROP),
            text: station.name.clone(),
            font: STATION_NAME_FONT.to_string(),
            color: STATION_NAME_COLOR,
        });
        commands.push(DrawCommand::Text {
            position: center.offset(0.0, STATION_ID_DROP),
            text: station.id.clone(),
            font: STATION_ID_FONT.to_string(),
            color: STATION_ID_COLOR,
        });
    }
}

fn draw_markers(commands: &mut Vec<DrawCommand>, markers: &[TrainMarker<'_>]) {
    for marker in markers {
        let color = marker.located.train.status_color();
        let highlight = marker.highlight;

        commands.push(DrawCommand::Circle {
            center: marker.point,
            radius: highlight.radius(),
            fill: Some(color),
            stroke: Some(Stroke { color: OUTLINE_COLOR, width: highlight.outline_width() }),
            alpha: 1.0,
        });

        for (from, to) in ICON_STROKES {
            commands.push(DrawCommand::Line {
                from: marker.point.offset(from.0, from.1),
                to: marker.point.offset(to.0, to.1),
                stroke: Stroke { color: OUTLINE_COLOR, width: ICON_STROKE_WIDTH },
                alpha: 1.0,
                dash: None,
            });
        }

        let weight = if highlight == Highlight::Selected { "bold " } else { "" };
        commands.push(DrawCommand::Text {
            position: marker.point.offset(0.0, -MARKER_LABEL_RISE),
            text: marker.id().to_string(),
            font: format!("{weight}{}px sans-serif", highlight.label_font_size()),
            color: MARKER_LABEL_COLOR,
        });

        if let Some((radius, alpha)) = highlight.ring() {
            commands.push(DrawCommand::Circle {
                center: marker.point,
                radius,
                fill: None,
                stroke: Some(Stroke { color, width: RING_WIDTH }),
                alpha,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::wire::{CurrentLocation, SectionRecord, TrainBundle, TrainRecord};
    use crate::models::{NetworkConfig, TrainData};

    fn section(id: &str, start: &str, end: &str, capacity: u32, is_bypass: bool) -> SectionRecord {
        SectionRecord {
            id: id.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            length_km: Some(10.0),
            capacity: Some(capacity),
            max_speed_kmh: None,
            track_type: None,
            is_bypass: Some(is_bypass),
        }
    }

    fn config() -> NetworkConfig {
        NetworkConfig {
            stations: vec!["STN_A".to_string(), "STN_B".to_string(), "STN_C".to_string()],
            sections: vec![
                section("S1", "STN_A", "STN_B", 1, false),
                section("S2", "STN_B", "STN_C", 2, false),
                section("S3", "STN_A", "STN_C", 3, true),
            ],
            timestamp: None,
        }
    }

    fn bundle(id: &str, section_id: &str, position_m: f64) -> TrainBundle {
        TrainBundle {
            train: Some(TrainRecord {
                train_id: Some(id.to_string()),
                kind: Some("Local".to_string()),
                max_speed_kmh: None,
                destination_station: None,
                status: Some("Delayed".to_string()),
                current_location: Some(CurrentLocation {
                    section_id: Some(section_id.to_string()),
                    position_m: Some(position_m),
                }),
            }),
            section: None,
        }
    }

    fn ready_scene(trains: Vec<TrainBundle>) -> Scene {
        let mut scene = Scene::default();
        scene.writer().replace_topology(Ok(config()), 0.0);
        scene.writer().replace_trains(Ok(TrainData { payload: trains, timestamp: None }), 0.0);
        scene
    }

    fn lines(commands: &[DrawCommand]) -> Vec<(f64, Option<[f64; 2]>)> {
        commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Line { stroke, dash, .. } if stroke.color == TRACK_COLOR => Some((stroke.width, *dash)),
                _ => None,
            })
            .collect()
    }

    fn texts(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_loading_placeholder() {
        let commands = compose_frame(&Scene::default(), &ViewControls::default(), 0.0);
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1], DrawCommand::Placeholder { text: LOADING_TEXT });
    }

    #[test]
    fn test_unavailable_placeholder() {
        let mut scene = Scene::default();
        scene.writer().replace_topology(Err("Request failed: offline".to_string()), 0.0);
        let commands = compose_frame(&scene, &ViewControls::default(), 0.0);
        assert_eq!(commands.last(), Some(&DrawCommand::Placeholder { text: NO_DATA_TEXT }));
    }

    #[test]
    fn test_topology_without_sections_is_no_data() {
        let mut scene = Scene::default();
        let config = NetworkConfig {
            stations: vec!["STN_A".to_string()],
            sections: Vec::new(),
            timestamp: None,
        };
        scene.writer().replace_topology(Ok(config), 0.0);
        let commands = compose_frame(&scene, &ViewControls::default(), 0.0);
        assert_eq!(commands.last(), Some(&DrawCommand::Placeholder { text: NO_DATA_TEXT }));
    }

    #[test]
    fn test_zero_trains_still_draws_network() {
        let scene = ready_scene(Vec::new());
        let commands = compose_frame(&scene, &ViewControls::default(), 0.0);
        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Placeholder { .. })));
        assert_eq!(lines(&commands).len(), 3);
        assert!(texts(&commands).contains(&"STN A"));
        assert_eq!(commands.last(), Some(&DrawCommand::PopTransform));
    }

    #[test]
    fn test_train_feed_down_differs_from_zero_trains() {
        let mut down = Scene::default();
        down.writer().replace_topology(Ok(config()), 0.0);
        down.writer().replace_trains(Err("Request failed: offline".to_string()), 0.0);
        let empty = ready_scene(Vec::new());

        let down_frame = compose_frame(&down, &ViewControls::default(), 0.0);
        let empty_frame = compose_frame(&empty, &ViewControls::default(), 0.0);
        assert_ne!(down_frame, empty_frame);
        assert_eq!(down_frame.last(), Some(&DrawCommand::StatusOverlay { text: NO_TRAIN_DATA_TEXT }));

        // The network itself is still drawn under the overlay
        assert_eq!(lines(&down_frame), lines(&empty_frame));
        assert!(texts(&down_frame).contains(&"STN A"));
    }

    #[test]
    fn test_train_feed_loading_overlay() {
        let mut scene = Scene::default();
        scene.writer().replace_topology(Ok(config()), 0.0);
        let commands = compose_frame(&scene, &ViewControls::default(), 0.0);
        assert_eq!(commands.last(), Some(&DrawCommand::StatusOverlay { text: TRAINS_LOADING_TEXT }));
        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Placeholder { .. })));
    }

    #[test]
    fn test_track_widths_and_bypass_dash() {
        let scene = ready_scene(Vec::new());
        let commands = compose_frame(&scene, &ViewControls::default(), 0.0);
        assert_eq!(
            lines(&commands),
            vec![(2.0, None), (4.0, None), (6.0, Some(BYPASS_DASH))]
        );
    }

    #[test]
    fn test_viewport_becomes_transform() {
        let scene = ready_scene(Vec::new());
        let mut view = ViewControls::default();
        view.zoom_in();
        view.viewport = view.viewport.pan(12.0, -4.0);
        let commands = compose_frame(&scene, &view, 0.0);
        assert!(commands.contains(&DrawCommand::PushTransform {
            translate_x: 12.0,
            translate_y: -4.0,
            scale: 60.0 / 50.0,
        }));
    }

    #[test]
    fn test_selected_marker_drawn_last() {
        let scene = ready_scene(vec![
            bundle("T1", "S1", 1000.0),
            bundle("T2", "S2", 1000.0),
            bundle("T3", "S3", 1000.0),
        ]);
        let mut view = ViewControls::default();
        view.interaction.click_entity("T1");
        view.interaction.pointer_enter("T2");

        let commands = compose_frame(&scene, &view, 0.0);
        let labels: Vec<&str> = texts(&commands)
            .into_iter()
            .filter(|text| text.starts_with('T'))
            .collect();
        assert_eq!(labels, vec!["T3", "T2", "T1"]);

        let rings: Vec<f64> = commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Circle { fill: None, radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(rings, vec![14.0, 16.0]);
    }

    #[test]
    fn test_unresolvable_train_is_not_drawn() {
        let scene = ready_scene(vec![bundle("T1", "S99", 5.0)]);
        let commands = compose_frame(&scene, &ViewControls::default(), 0.0);
        assert!(!texts(&commands).contains(&"T1"));
    }

    #[test]
    fn test_marker_uses_status_colour() {
        let scene = ready_scene(vec![bundle("T1", "S1", 0.0)]);
        let commands = compose_frame(&scene, &ViewControls::default(), 0.0);
        assert!(commands.iter().any(|command| matches!(
            command,
            DrawCommand::Circle { fill: Some(color), radius, .. } if *color == "#f59e0b" && *radius == 8.0
        )));
    }
}

use leptos::*;
use crate::models::{
    TrackCategory, STATUS_DELAYED_COLOR, STATUS_ON_TIME_COLOR, STATUS_STOPPED_COLOR,
};
use crate::render::{STATION_COLOR, TRACK_COLOR};

const MARKERS: [(&str, &str); 4] = [
    ("City Stations", STATION_COLOR),
    ("On Time", STATUS_ON_TIME_COLOR),
    ("Delayed", STATUS_DELAYED_COLOR),
    ("Stopped/Waiting", STATUS_STOPPED_COLOR),
];

const TRACKS: [TrackCategory; 3] = [TrackCategory::Single, TrackCategory::Double, TrackCategory::Triple];

fn track_swatch(width: f64, dashed: bool) -> String {
    let style = if dashed { "dashed" } else { "solid" };
    format!("border-top: {width}px {style} {TRACK_COLOR}; width: 24px;")
}

#[component]
#[must_use]
pub fn Legend() -> impl IntoView {
    view! {
        <div class="legend">
            <div class="legend-title">"Legend"</div>
            {MARKERS.iter().map(|(label, color)| view! {
                <div class="legend-item">
                    <span class="legend-dot" style=format!("background: {color};")></span>
                    <span>{*label}</span>
                </div>
            }).collect_view()}
            {TRACKS.iter().map(|category| view! {
                <div class="legend-item">
                    <span class="legend-line" style=track_swatch(category.stroke_width(), false)></span>
                    <span>{category.label()}</span>
                </div>
            }).collect_view()}
            <div class="legend-item">
                <span class="legend-line" style=track_swatch(TrackCategory::Single.stroke_width(), true)></span>
                <span>"Bypass Route"</span>
            </div>
            <div class="legend-footer">"Hover for quick info • Click for details"</div>
        </div>
    }
}

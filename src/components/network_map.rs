use leptos::*;
use gloo_timers::future::TimeoutFuture;
use crate::api::{fetch_network_config, fetch_train_data};
use crate::components::legend::Legend;
use crate::components::map_canvas::MapCanvas;
use crate::components::map_controls::MapControls;
use crate::components::train_panels::{TrainDetailPanel, TrainTooltip};
use crate::controls::ViewControls;
use crate::models::MapSettings;
use crate::scene::Scene;

/// Milliseconds on the page's monotonic clock
#[must_use]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map_or(0.0, |performance| performance.now())
}

/// Topology once at start, then again every `topology_refresh_ms`.
///
/// Only the scene's write signal is handed over; view controls stay out of reach.
fn spawn_topology_refresh(api_base: String, refresh_ms: u32, set_scene: WriteSignal<Scene>) {
    spawn_local(async move {
        loop {
            let result = fetch_network_config(&api_base).await;
            set_scene.update(|scene| scene.writer().replace_topology(result, now_ms()));
            TimeoutFuture::new(refresh_ms).await;
        }
    });
}

fn spawn_train_polling(api_base: String, poll_ms: u32, set_scene: WriteSignal<Scene>) {
    spawn_local(async move {
        loop {
            let result = fetch_train_data(&api_base).await;
            set_scene.update(|scene| scene.writer().replace_trains(result, now_ms()));
            TimeoutFuture::new(poll_ms).await;
        }
    });
}

#[component]
#[must_use]
pub fn NetworkMap() -> impl IntoView {
    let settings = MapSettings::load();
    crate::log!("Map settings: {:?}", settings);

    let (scene, set_scene) = create_signal(Scene::new(&settings));
    let controls = create_rw_signal(ViewControls::new(settings.zoom));

    spawn_topology_refresh(settings.api_base.clone(), settings.topology_refresh_ms, set_scene);
    spawn_train_polling(settings.api_base.clone(), settings.poll_interval_ms, set_scene);

    view! {
        <div class="network-map">
            <MapCanvas scene=scene controls=controls />
            <MapControls controls=controls />
            <Legend />
            <TrainTooltip scene=scene controls=controls />
            <TrainDetailPanel scene=scene controls=controls />
        </div>
    }
}

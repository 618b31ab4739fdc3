use leptos::*;
use crate::controls::ViewControls;

#[component]
#[must_use]
pub fn MapControls(controls: RwSignal<ViewControls>) -> impl IntoView {
    let zoom_label = move || controls.with(|view| view.viewport.zoom_label());

    view! {
        <div class="map-controls">
            <div class="map-controls-title">"Map Controls"</div>
            <div class="map-controls-buttons">
                <button
                    class="map-control-button"
                    title="Zoom In"
                    on:click=move |_| controls.update(ViewControls::zoom_in)
                >
                    <i class="fa-solid fa-magnifying-glass-plus"></i>
                </button>
                <button
                    class="map-control-button"
                    title="Zoom Out"
                    on:click=move |_| controls.update(ViewControls::zoom_out)
                >
                    <i class="fa-solid fa-magnifying-glass-minus"></i>
                </button>
                <button
                    class="map-control-button"
                    title="Reset View"
                    on:click=move |_| controls.update(ViewControls::reset)
                >
                    <i class="fa-solid fa-arrows-rotate"></i>
                </button>
            </div>
            <div class="zoom-indicator">{zoom_label}</div>
        </div>
    }
}

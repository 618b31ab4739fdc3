use leptos::*;
use crate::controls::ViewControls;
use crate::scene::Scene;

/// Everything the hover tooltip and the detail panel show for one train
#[derive(Debug, Clone, PartialEq)]
struct TrainDetails {
    id: String,
    display_name: String,
    kind: String,
    status: String,
    status_color: &'static str,
    destination: String,
    section_id: String,
    section_length_km: Option<f64>,
    max_speed_kmh: f64,
    progress_percent: f64,
}

impl TrainDetails {
    fn from_scene(scene: &Scene, id: &str) -> Option<Self> {
        let located = scene.located_train(id)?;
        let train = &located.train;
        let section_length_km = scene
            .topology()
            .ready()
            .and_then(|topology| topology.section(&train.section_id))
            .map(|section| section.length_km);

        Some(Self {
            id: train.id.clone(),
            display_name: train.display_name(),
            kind: train.kind.clone(),
            status: train.status.clone(),
            status_color: train.status_color(),
            destination: train.destination.clone(),
            section_id: train.section_id.clone(),
            section_length_km,
            max_speed_kmh: train.max_speed_kmh,
            progress_percent: located.progress * 100.0,
        })
    }
}

/// Id the tooltip follows: the hovered train, unless it is also the selected one
fn tooltip_target(view: &ViewControls) -> Option<String> {
    let hovered = view.interaction.hovered_id.as_ref()?;
    if view.interaction.selected_id.as_ref() == Some(hovered) {
        return None;
    }
    Some(hovered.clone())
}

#[component]
#[must_use]
pub fn TrainTooltip(scene: ReadSignal<Scene>, controls: RwSignal<ViewControls>) -> impl IntoView {
    let details = create_memo(move |_| {
        let id = controls.with(tooltip_target)?;
        scene.with(|scene| TrainDetails::from_scene(scene, &id))
    });

    move || {
        details.get().map(|train| {
            let section_length = train
                .section_length_km
                .map(|length| view! {
                    <div class="tooltip-row">
                        <span class="tooltip-label">"Section Length:"</span>
                        <span>{format!("{length:.1} km")}</span>
                    </div>
                });

            view! {
                <div class="train-tooltip">
                    <div class="tooltip-header">
                        <span class="tooltip-id">{train.id}</span>
                        <span class="tooltip-kind">{train.kind}</span>
                    </div>
                    <div class="tooltip-row">
                        <span class="tooltip-label">"Current Section:"</span>
                        <span>{train.section_id}</span>
                    </div>
                    <div class="tooltip-row">
                        <span class="tooltip-label">"Destination:"</span>
                        <span>{train.destination}</span>
                    </div>
                    <div class="tooltip-row">
                        <span class="tooltip-label">"Status:"</span>
                        <span>
                            <span class="status-dot" style=format!("background: {};", train.status_color)></span>
                            {train.status}
                        </span>
                    </div>
                    <div class="tooltip-row">
                        <span class="tooltip-label">"Max Speed:"</span>
                        <span>{format!("{:.0} km/h", train.max_speed_kmh)}</span>
                    </div>
                    {section_length}
                </div>
            }
        })
    }
}

#[component]
#[must_use]
pub fn TrainDetailPanel(scene: ReadSignal<Scene>, controls: RwSignal<ViewControls>) -> impl IntoView {
    let details = create_memo(move |_| {
        let id = controls.with(|view| view.interaction.selected_id.clone())?;
        scene.with(|scene| TrainDetails::from_scene(scene, &id))
    });

    let close = move |_| controls.update(|view| view.interaction.click_background());

    move || {
        details.get().map(|train| view! {
            <div class="train-detail-panel">
                <div class="detail-header">
                    <span class="status-dot" style=format!("background: {};", train.status_color)></span>
                    <h3>{train.display_name}</h3>
                    <button class="detail-close" title="Close" on:click=close>
                        <i class="fa-solid fa-xmark"></i>
                    </button>
                </div>
                <dl class="detail-fields">
                    <dt>"Train ID"</dt>
                    <dd>{train.id}</dd>
                    <dt>"Status"</dt>
                    <dd>
                        <span class="status-badge" style=format!("background: {};", train.status_color)>
                            {train.status}
                        </span>
                    </dd>
                    <dt>"Speed"</dt>
                    <dd>{format!("{:.0} km/h", train.max_speed_kmh)}</dd>
                    <dt>"Destination"</dt>
                    <dd>{train.destination}</dd>
                    <dt>"Section"</dt>
                    <dd>{train.section_id}</dd>
                    <dt>"Progress"</dt>
                    <dd>{format!("{:.0}%", train.progress_percent)}</dd>
                </dl>
            </div>
        })
    }
}

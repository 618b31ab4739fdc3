pub mod canvas_backend;

use leptos::*;
use leptos_use::{use_raf_fn, utils::Pausable};
use web_sys::MouseEvent;
use wasm_bindgen::{JsCast, closure::Closure};
use crate::components::network_map::now_ms;
use crate::controls::ViewControls;
use crate::interaction::layout_markers;
use crate::render::compose_frame;
use crate::scene::Scene;
use crate::viewport::SurfaceFit;

/// Pointer position in logical canvas units, undoing the letter-box fit
fn logical_pointer(canvas: &web_sys::HtmlCanvasElement, ev: &MouseEvent, logical: (f64, f64)) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    let fit = SurfaceFit::new((rect.width(), rect.height()), logical);
    fit.to_logical(f64::from(ev.client_x()) - rect.left(), f64::from(ev.client_y()) - rect.top())
}

fn setup_render_effect(
    canvas_ref: NodeRef<html::Canvas>,
    scene: ReadSignal<Scene>,
    controls: RwSignal<ViewControls>,
    frame_clock: ReadSignal<f64>,
) {
    let (render_requested, set_render_requested) = create_signal(false);

    create_effect(move |_| {
        // Track all dependencies
        scene.track();
        controls.track();
        frame_clock.track();

        if render_requested.get_untracked() {
            return;
        }
        let Some(window) = web_sys::window() else { return };
        set_render_requested.set(true);

        let callback = Closure::once(move || {
            set_render_requested.set(false);

            let Some(canvas) = canvas_ref.get_untracked() else { return };
            let canvas_elem: &web_sys::HtmlCanvasElement = &canvas;

            // Browser dimensions are always non-negative
            #[allow(clippy::cast_sign_loss)]
            let container_width = canvas_elem.client_width() as u32;
            #[allow(clippy::cast_sign_loss)]
            let container_height = canvas_elem.client_height() as u32;
            if container_width > 0 && container_height > 0 {
                canvas_elem.set_width(container_width);
                canvas_elem.set_height(container_height);
            }

            let surface = (f64::from(canvas_elem.width()), f64::from(canvas_elem.height()));
            let commands = scene.with_untracked(|scene| {
                controls.with_untracked(|view| compose_frame(scene, view, now_ms()))
            });
            let logical = scene.with_untracked(|scene| (scene.projector().width, scene.projector().height));

            let Ok(Some(context)) = canvas_elem.get_context("2d") else {
                leptos::logging::warn!("Failed to get 2D context");
                return;
            };
            let Ok(ctx) = context.dyn_into::<web_sys::CanvasRenderingContext2d>() else {
                leptos::logging::warn!("Failed to cast to 2D rendering context");
                return;
            };

            canvas_backend::execute(&ctx, &commands, surface, SurfaceFit::new(surface, logical));
        });

        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
        callback.forget();
    });
}

/// Keeps a frame clock ticking while any marker is gliding, and idle otherwise
fn setup_transition_clock(scene: ReadSignal<Scene>) -> ReadSignal<f64> {
    let (frame_clock, set_frame_clock) = create_signal(0.0);

    let Pausable { pause, resume, .. } = use_raf_fn(move |_| {
        set_frame_clock.set(now_ms());
    });

    create_effect(move |_| {
        frame_clock.track();
        if scene.with(|scene| scene.is_animating(now_ms())) {
            resume();
        } else {
            pause();
        }
    });

    frame_clock
}

#[component]
#[must_use]
pub fn MapCanvas(scene: ReadSignal<Scene>, controls: RwSignal<ViewControls>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    let frame_clock = setup_transition_clock(scene);
    setup_render_effect(canvas_ref, scene, controls, frame_clock);

    let logical_size = move || scene.with_untracked(|scene| (scene.projector().width, scene.projector().height));

    let handle_mouse_down = move |ev: MouseEvent| {
        let Some(canvas) = canvas_ref.get_untracked() else { return };
        let (x, y) = logical_pointer(&canvas, &ev, logical_size());
        controls.update(|view| view.pointer_down(x, y));
    };

    let handle_mouse_move = move |ev: MouseEvent| {
        let Some(canvas) = canvas_ref.get_untracked() else { return };
        let (x, y) = logical_pointer(&canvas, &ev, logical_size());
        let smoothed = scene.with_untracked(|scene| scene.smoothed(now_ms()));

        let mut view = controls.get_untracked();
        let markers = layout_markers(&smoothed, &view.interaction);
        if view.pointer_move(x, y, &markers) {
            controls.set(view);
        }
    };

    let handle_mouse_up = move |_ev: MouseEvent| {
        controls.update(ViewControls::pointer_up);
    };

    let handle_mouse_leave = move |_ev: MouseEvent| {
        controls.update(ViewControls::pointer_leave_surface);
    };

    let handle_click = move |ev: MouseEvent| {
        let Some(canvas) = canvas_ref.get_untracked() else { return };
        let (x, y) = logical_pointer(&canvas, &ev, logical_size());
        let smoothed = scene.with_untracked(|scene| scene.smoothed(now_ms()));

        controls.update(|view| {
            let markers = layout_markers(&smoothed, &view.interaction);
            view.click(x, y, &markers);
        });
    };

    let cursor = move || {
        let view = controls.get();
        if view.is_dragging() {
            "cursor: grabbing;"
        } else if view.interaction.hovered_id.is_some() {
            "cursor: pointer;"
        } else {
            "cursor: grab;"
        }
    };

    view! {
        <canvas
            class="map-canvas"
            node_ref=canvas_ref
            on:mousedown=handle_mouse_down
            on:mousemove=handle_mouse_move
            on:mouseup=handle_mouse_up
            on:mouseleave=handle_mouse_leave
            on:click=handle_click
            style=cursor
        ></canvas>
    }
}

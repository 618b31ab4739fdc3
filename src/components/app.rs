use leptos::*;
use leptos_meta::*;
use crate::components::network_map::NetworkMap;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/style.css"/>
        <Title text="Network Map"/>

        <div class="app">
            <NetworkMap />
        </div>
    }
}

//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"Verificador de busca em lote • " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
        </footer>
    }
}

//! Hero section component

use leptos::*;

use crate::config::DEFAULT_SEARCH_TERM;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h2>"Extração de Coluna do Excel e Busca por \"" {DEFAULT_SEARCH_TERM} "\""</h2>
            <p class="subtitle">
                "Envie uma planilha com URLs na primeira coluna e termos de busca na segunda. "
                "Cada site é verificado pelo servidor e os resultados aparecem abaixo em tempo real."
            </p>
        </div>
    }
}

//! Live results table, loop counter and report button.
//!
//! The table body is rebuilt from scratch on every snapshot, in array
//! order. Row building is kept as a pure step ([`render_rows`]) so the
//! status-to-class mapping stays deterministic and testable.

use leptos::*;

use crate::services::report::generate_report;
use crate::status::{ContentStatus, SearchBarStatus};
use crate::types::ResultRecord;

/// One table cell: text plus its optional status class.
#[derive(Clone, Debug, PartialEq)]
pub struct CellView {
    pub text: String,
    pub class: Option<&'static str>,
}

/// One fully resolved table row.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedRow {
    /// 1-based position in the snapshot.
    pub index: usize,
    pub url: String,
    pub sheet: String,
    pub search_bar: CellView,
    pub content: CellView,
    pub progress: String,
}

/// Resolve a snapshot into table rows, in array order.
pub fn render_rows(results: &[ResultRecord]) -> Vec<RenderedRow> {
    results
        .iter()
        .enumerate()
        .map(|(i, result)| RenderedRow {
            index: i + 1,
            url: result.url.clone(),
            sheet: result.worksheet_number.clone().unwrap_or_default(),
            search_bar: CellView {
                text: result.status_search_bar.clone(),
                class: SearchBarStatus::parse(&result.status_search_bar).css_class(),
            },
            content: CellView {
                text: result.status_content_search.clone(),
                class: ContentStatus::parse(&result.status_content_search).css_class(),
            },
            progress: result.progress.clone(),
        })
        .collect()
}

#[component]
pub fn ResultsSection(
    results: ReadSignal<Vec<ResultRecord>>,
    table_visible: ReadSignal<bool>,
    loop_counter: ReadSignal<Option<u32>>,
    /// Backend-global error reported with the completed snapshot.
    run_error: ReadSignal<Option<String>>,
) -> impl IntoView {
    let on_report = move |_| {
        if let Err(err) = generate_report() {
            log::error!("{}", err);
        }
    };

    view! {
        <div id="results">
            <Show
                when=move || run_error.get().is_some()
                fallback=|| view! { }
            >
                <p class="error">
                    "Erro durante o processamento: "
                    {move || run_error.get().unwrap_or_default()}
                </p>
            </Show>

            <h3>"Resultados da Busca"</h3>
            <p id="loopCounter">
                {move || loop_counter.get().map(|n| format!("Loop número: {}", n))}
            </p>

            <Show
                when=move || table_visible.get()
                fallback=|| view! { }
            >
                <table id="resultsTable">
                    <thead>
                        <tr>
                            <th>"#"</th>
                            <th>"URL/Site"</th>
                            <th>"Planilha"</th>
                            <th>"Campo de Busca"</th>
                            <th>"Busca do Termo"</th>
                            <th>"Progresso"</th>
                        </tr>
                    </thead>
                    <tbody id="resultsBody">
                        {move || {
                            render_rows(&results.get())
                                .into_iter()
                                .map(row_view)
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </Show>

            <button type="button" id="reportButton" on:click=on_report>
                "Gerar Relatório"
            </button>
        </div>
    }
}

fn row_view(row: RenderedRow) -> impl IntoView {
    view! {
        <tr>
            <td>{row.index}</td>
            <td>{row.url}</td>
            <td>{row.sheet}</td>
            <td class=row.search_bar.class>{row.search_bar.text}</td>
            <td class=row.content.class>{row.content.text}</td>
            <td>{row.progress}</td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_results() -> Vec<ResultRecord> {
        vec![
            ResultRecord {
                url: "http://a.com".into(),
                worksheet_number: Some("Sheet - 1".into()),
                status: "Busca realizada".into(),
                status_search_bar: "Campo de busca encontrado".into(),
                status_content_search: "Termo encontrado".into(),
                progress: "(1 de 2)".into(),
                number_of_loops: Some(1),
            },
            ResultRecord {
                url: "http://b.com".into(),
                status_search_bar: "Processando...".into(),
                status_content_search: "Processando...".into(),
                progress: "(2 de 2)".into(),
                ..ResultRecord::default()
            },
        ]
    }

    #[test]
    fn rows_follow_array_order_with_one_based_index() {
        let rows = render_rows(&sample_results());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].url, "http://a.com");
        assert_eq!(rows[0].sheet, "Sheet - 1");
        assert_eq!(rows[1].index, 2);
        assert_eq!(rows[1].sheet, "");
    }

    #[test]
    fn cells_carry_status_classes() {
        let rows = render_rows(&sample_results());
        assert_eq!(rows[0].search_bar.class, Some("success"));
        assert_eq!(rows[0].content.class, Some("success"));
        assert_eq!(rows[1].search_bar.class, Some("processing"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let results = sample_results();
        assert_eq!(render_rows(&results), render_rows(&results));
    }
}

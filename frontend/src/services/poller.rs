//! Progress polling controller.
//!
//! One [`spawn_poller`] call owns one polling run: it is created by the
//! upload flow right after a successful submit and keeps hitting the
//! progress endpoint until the backend reports completion, the failure
//! budget runs out, or [`PollerHandle::cancel`] is called because a new
//! upload superseded the run (or the page is being torn down).
//!
//! Two guards keep a run well-behaved:
//!
//! - failed polls back off exponentially up to a cap and abandon the
//!   run after a bounded number of consecutive failures, surfacing a
//!   terminal error instead of retrying forever;
//! - every tick carries a monotonic sequence number and a response is
//!   applied only if nothing newer has been applied, so a slow reply
//!   can never overwrite a fresher table.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::{spawn_local, SignalSet, WriteSignal};

use crate::config::{MAX_POLL_FAILURES, POLL_BACKOFF_CAP_MS, POLL_INTERVAL_MS};
use crate::services::api;
use crate::status::{SearchBarStatus, Summary};
use crate::types::{PollSnapshot, ResultRecord, StatusLine};

/// Signals the poller writes into on every applied tick.
#[derive(Clone, Copy)]
pub struct PollerCtx {
    pub set_results: WriteSignal<Vec<ResultRecord>>,
    pub set_progress_text: WriteSignal<String>,
    pub set_loop_counter: WriteSignal<Option<u32>>,
    pub set_status: WriteSignal<Option<StatusLine>>,
    pub set_run_error: WriteSignal<Option<String>>,
    pub set_loading: WriteSignal<bool>,
}

/// Tuning knobs of one polling run.
#[derive(Clone, Copy, Debug)]
pub struct PollerConfig {
    pub interval_ms: u32,
    pub backoff_cap_ms: u32,
    pub max_failures: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_ms: POLL_INTERVAL_MS,
            backoff_cap_ms: POLL_BACKOFF_CAP_MS,
            max_failures: MAX_POLL_FAILURES,
        }
    }
}

/// Cancellation handle shared between the run and its owner.
#[derive(Clone, Default)]
pub struct PollerHandle {
    cancelled: Rc<Cell<bool>>,
}

impl PollerHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Start polling for the run of `submitted` sites.
pub fn spawn_poller(ctx: PollerCtx, submitted: usize, config: PollerConfig) -> PollerHandle {
    let handle = PollerHandle::default();
    let task_handle = handle.clone();
    spawn_local(async move {
        run(ctx, submitted, config, task_handle).await;
    });
    handle
}

async fn run(ctx: PollerCtx, submitted: usize, config: PollerConfig, handle: PollerHandle) {
    let mut backoff = Backoff::new(config.interval_ms, config.backoff_cap_ms);
    let mut gate = SeqGate::default();
    let mut failures = 0u32;

    loop {
        TimeoutFuture::new(backoff.delay_ms()).await;
        if handle.is_cancelled() {
            return;
        }

        let seq = gate.issue();
        match api::fetch_progress().await {
            Ok(snapshot) => {
                if handle.is_cancelled() {
                    return;
                }
                if !gate.try_apply(seq) {
                    // Overtaken by a newer response.
                    continue;
                }
                failures = 0;
                backoff.on_success();
                if apply_snapshot(&ctx, submitted, snapshot) {
                    handle.cancel();
                    log::info!("Processamento concluído, polling encerrado");
                    return;
                }
            }
            Err(err) => {
                if handle.is_cancelled() {
                    return;
                }
                failures += 1;
                log::warn!(
                    "Falha ao verificar progresso ({}/{}): {}",
                    failures,
                    config.max_failures,
                    err
                );
                if failures >= config.max_failures {
                    ctx.set_loading.set(false);
                    ctx.set_status.set(Some(StatusLine::error(format!(
                        "Servidor não respondeu após {} tentativas. \
                         Envie o arquivo novamente para reiniciar.",
                        failures
                    ))));
                    handle.cancel();
                    return;
                }
                backoff.on_failure();
            }
        }
    }
}

/// Push one snapshot into the UI. Returns whether the run completed.
fn apply_snapshot(ctx: &PollerCtx, submitted: usize, snapshot: PollSnapshot) -> bool {
    let processed = processed_count(&snapshot.results);
    let loops = snapshot.results.first().and_then(|r| r.number_of_loops);

    ctx.set_progress_text.set(progress_line(processed, submitted, loops));
    ctx.set_loop_counter.set(loops);

    if snapshot.complete {
        let summary = Summary::tally(snapshot.results.iter().map(|r| r.status.as_str()));
        ctx.set_loading.set(false);
        ctx.set_status
            .set(Some(StatusLine::success(summary.headline(snapshot.status_search_bar.len()))));
        ctx.set_run_error.set(snapshot.error.clone());
    }
    let complete = snapshot.complete;
    ctx.set_results.set(snapshot.results);
    complete
}

/// Sites whose search-bar phase is past "Processando...".
fn processed_count(results: &[ResultRecord]) -> usize {
    results
        .iter()
        .filter(|r| SearchBarStatus::parse(&r.status_search_bar) != SearchBarStatus::Processing)
        .count()
}

fn progress_line(processed: usize, submitted: usize, loops: Option<u32>) -> String {
    match loops {
        Some(n) => format!("{} de {} sites processados - Loop numero: {}", processed, submitted, n),
        None => format!("{} de {} sites processados", processed, submitted),
    }
}

/// Exponential backoff over the polling delay.
///
/// Successful ticks keep the base cadence; each failure doubles the
/// delay until the cap.
struct Backoff {
    base_ms: u32,
    cap_ms: u32,
    current_ms: u32,
}

impl Backoff {
    fn new(base_ms: u32, cap_ms: u32) -> Self {
        Self { base_ms, cap_ms, current_ms: base_ms }
    }

    fn delay_ms(&self) -> u32 {
        self.current_ms
    }

    fn on_success(&mut self) {
        self.current_ms = self.base_ms;
    }

    fn on_failure(&mut self) {
        self.current_ms = self.current_ms.saturating_mul(2).min(self.cap_ms);
    }
}

/// Monotonic tick numbering; stale responses are dropped, never
/// applied over fresher ones.
#[derive(Default)]
struct SeqGate {
    next: u64,
    applied: u64,
}

impl SeqGate {
    fn issue(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    fn try_apply(&mut self, seq: u64) -> bool {
        if seq > self.applied {
            self.applied = seq;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_bar(status_search_bar: &str) -> ResultRecord {
        ResultRecord {
            status_search_bar: status_search_bar.to_string(),
            ..ResultRecord::default()
        }
    }

    #[test]
    fn processed_counts_everything_past_processing() {
        let results = vec![
            result_with_bar("Campo de busca encontrado"),
            result_with_bar("Processando..."),
            result_with_bar("Timeout: Tempo limite de 30s excedido"),
            result_with_bar("algo inesperado"),
        ];
        assert_eq!(processed_count(&results), 3);
    }

    #[test]
    fn progress_line_includes_loop_when_reported() {
        assert_eq!(progress_line(2, 5, None), "2 de 5 sites processados");
        assert_eq!(
            progress_line(2, 5, Some(3)),
            "2 de 5 sites processados - Loop numero: 3"
        );
    }

    #[test]
    fn backoff_doubles_to_cap_and_resets_on_success() {
        let mut backoff = Backoff::new(1_000, 30_000);
        let mut observed = Vec::new();
        for _ in 0..7 {
            observed.push(backoff.delay_ms());
            backoff.on_failure();
        }
        assert_eq!(
            observed,
            vec![1_000, 2_000, 4_000, 8_000, 16_000, 30_000, 30_000]
        );

        backoff.on_success();
        assert_eq!(backoff.delay_ms(), 1_000);
    }

    #[test]
    fn seq_gate_discards_overtaken_responses() {
        let mut gate = SeqGate::default();
        let first = gate.issue();
        let second = gate.issue();

        assert!(gate.try_apply(second));
        assert!(!gate.try_apply(first));

        let third = gate.issue();
        assert!(gate.try_apply(third));
    }
}

use std::sync::OnceLock;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder (once per process) and register all
/// application metrics. Returns a `PrometheusHandle` whose `render()` method
/// produces the text/plain Prometheus scrape payload.
pub fn init_metrics() -> PrometheusHandle {
    HANDLE
        .get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            if metrics::set_global_recorder(recorder).is_err() {
                tracing::warn!("A global metrics recorder was already installed");
            }

            // Pre-register counters so they appear even before the first increment.
            counter!("bets_placed_total").absolute(0);
            counter!("bets_cancelled_total").absolute(0);
            counter!("bet_window_rejections_total").absolute(0);
            counter!("results_recorded_total").absolute(0);
            counter!("bets_settled_total").absolute(0);
            counter!("resettlements_total").absolute(0);

            histogram!("settlement_latency_seconds").record(0.0);

            handle
        })
        .clone()
}

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounterVec,
    pub http_request_duration_seconds: HistogramVec,
    /// Upstream LLM calls by `outcome` (`ok` or a provider error label).
    pub llm_requests_total: IntCounterVec,
    /// Dish-detail cache lookups by `result` (`hit` or `miss`).
    pub recipe_cache_lookups_total: IntCounterVec,
}

static METRICS: OnceLock<Metrics> = OnceLock::new();

impl Metrics {
    fn build() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "path", "status"],
        )?;
        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            ),
            &["method", "path", "status"],
        )?;
        let llm_requests_total = IntCounterVec::new(
            Opts::new("llm_requests_total", "Generative text API calls by outcome"),
            &["outcome"],
        )?;
        let recipe_cache_lookups_total = IntCounterVec::new(
            Opts::new(
                "recipe_cache_lookups_total",
                "Dish detail cache lookups by result",
            ),
            &["result"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(llm_requests_total.clone()))?;
        registry.register(Box::new(recipe_cache_lookups_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            llm_requests_total,
            recipe_cache_lookups_total,
        })
    }
}

/// Create the process-wide registry. Repeated calls are no-ops.
pub fn init_metrics() {
    if METRICS.get().is_some() {
        return;
    }

    match Metrics::build() {
        Ok(metrics) => {
            let _ = METRICS.set(metrics);
        }
        Err(e) => tracing::error!(error = %e, "Failed to initialize metrics"),
    }
}

pub fn metrics() -> Option<&'static Metrics> {
    METRICS.get()
}

pub fn record_llm_request(outcome: &str) {
    if let Some(m) = metrics() {
        m.llm_requests_total.with_label_values(&[outcome]).inc();
    }
}

pub fn record_cache_lookup(result: &str) {
    if let Some(m) = metrics() {
        m.recipe_cache_lookups_total.with_label_values(&[result]).inc();
    }
}

/// Render all metrics in the Prometheus text format.
pub fn get_metrics() -> String {
    let Some(m) = metrics() else {
        tracing::error!("Metrics registry not initialized");
        return "# Metrics registry not initialized\n".to_string();
    };

    let mut buffer = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&m.registry.gather(), &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return format!("# Failed to encode metrics: {}\n", e);
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!("Failed to convert metrics to UTF-8: {}", e);
        format!("# Failed to convert metrics to UTF-8: {}\n", e)
    })
}

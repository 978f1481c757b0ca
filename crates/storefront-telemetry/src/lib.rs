//! Tracing setup for the storefront client.
//!
//! [`init_tracing`] installs the process-wide subscriber: an `EnvFilter`
//! (default `info`, override with `RUST_LOG`) feeding a stderr `fmt`
//! layer. Built with the `telemetry` feature, it also exports spans over
//! OTLP when the standard OTel environment variables ask for it:
//!
//! ```bash
//! # Minimal: enables OTLP export to localhost:4317
//! OTEL_EXPORTER_OTLP_ENDPOINT=http://localhost:4317
//!
//! # Full control
//! OTEL_SERVICE_NAME=storefront \
//! OTEL_EXPORTER_OTLP_ENDPOINT=http://collector:4317 \
//! OTEL_TRACES_EXPORTER=otlp
//! ```
//!
//! Set `OTEL_SDK_DISABLED=true` to explicitly disable even when the endpoint is set.
//!
//! [`trace_headers`] yields the W3C `traceparent`/`tracestate` pair for the
//! current span so the API client can stitch browser-side and backend
//! traces together.

#[cfg(feature = "telemetry")]
mod otel;

#[cfg(feature = "telemetry")]
pub use otel::{OtelGuard, otel_layer};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("failed to build OTLP exporter: {0}")]
    Exporter(String),
    #[error("failed to start OTel runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Check whether OTel export should be enabled, reading the process env.
pub fn otel_enabled() -> bool {
    otel_enabled_with(|key| std::env::var(key).ok())
}

/// Check whether OTel export should be enabled.
///
/// Returns `true` when:
/// - `OTEL_SDK_DISABLED` is NOT `"true"`
/// - AND `OTEL_EXPORTER_OTLP_ENDPOINT` is set, or `OTEL_TRACES_EXPORTER`
///   is set to anything other than `"none"`
pub fn otel_enabled_with(lookup: impl Fn(&str) -> Option<String>) -> bool {
    // Explicit disable takes priority
    if lookup("OTEL_SDK_DISABLED")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
    {
        return false;
    }

    if lookup("OTEL_EXPORTER_OTLP_ENDPOINT").is_some() {
        return true;
    }

    match lookup("OTEL_TRACES_EXPORTER") {
        Some(exporter) => !exporter.eq_ignore_ascii_case("none"),
        None => false,
    }
}

/// Keeps exporters alive. Hold it for the lifetime of the application.
#[must_use = "dropping the guard flushes and stops span export"]
pub struct TracingGuard {
    #[cfg(feature = "telemetry")]
    _otel: Option<OtelGuard>,
}

impl std::fmt::Debug for TracingGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TracingGuard").finish_non_exhaustive()
    }
}

/// Install the global subscriber. A second call is a no-op.
#[cfg(feature = "telemetry")]
pub fn init_tracing(service_name: &str) -> TracingGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr));

    let (layer, guard) = if otel_enabled() {
        match otel::otel_layer(service_name) {
            Ok((layer, guard)) => (Some(layer), Some(guard)),
            Err(e) => {
                eprintln!("OTel export disabled: {e}");
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    if registry.with(layer).try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    TracingGuard { _otel: guard }
}

/// Install the global subscriber. A second call is a no-op.
#[cfg(not(feature = "telemetry"))]
pub fn init_tracing(service_name: &str) -> TracingGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(service = service_name, "tracing initialized");
    }
    TracingGuard {}
}

/// Subscriber for tests: captured by the test harness, `debug` by default.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
}

/// W3C trace context headers for the current span.
///
/// Empty when OTel is not compiled in or no span context is active.
pub fn trace_headers() -> Vec<(&'static str, String)> {
    #[cfg(feature = "telemetry")]
    {
        let (traceparent, tracestate) = otel::inject_trace_context_impl();
        let mut headers = Vec::with_capacity(2);
        if !traceparent.is_empty() {
            headers.push(("traceparent", traceparent));
            if !tracestate.is_empty() {
                headers.push(("tracestate", tracestate));
            }
        }
        headers
    }
    #[cfg(not(feature = "telemetry"))]
    {
        Vec::new()
    }
}

/// Sampling rate for a span, by name prefix.
///
/// | Prefix        | Rate | Rationale                                  |
/// |---------------|------|--------------------------------------------|
/// | `auth.*`      | 100% | Login/reset flows, low volume, high value  |
/// | `cms.*`       | 100% | Content fetches, low volume                |
/// | `api.*`       | 10%  | Every outgoing request                     |
/// | `analytics.*` |  1%  | One per page view, highest volume          |
/// | other         | 10%  | Default for unclassified spans             |
///
/// Error spans are always sampled; that check lives in the sampler.
pub fn sample_rate(span_name: &str) -> f64 {
    if span_name.starts_with("auth") || span_name.starts_with("cms") {
        1.0
    } else if span_name.starts_with("analytics") {
        0.01
    } else {
        // api.* and anything unclassified
        0.1
    }
}

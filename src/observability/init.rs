//! Tracing initialization and subscriber setup.

use super::tracer;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "cinelist-otlp.json";

/// Where spans are exported for `config`.
#[must_use]
pub fn trace_file_path(config: &Config) -> PathBuf {
    config
        .trace_file
        .as_deref()
        .map_or_else(|| paths::data_dir().join(TRACE_FILE_NAME), paths::expand_tilde)
}

/// Installs the global subscriber exporting spans to the trace file.
///
/// The filter comes from `config.trace_level` (default `info`). If the trace
/// directory cannot be created nothing is installed. Only the first call in a
/// process takes effect.
///
/// # Example
///
/// ```no_run
/// use cinelist::observability::init_tracing;
/// use cinelist::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let trace_file = trace_file_path(config);
    if let Some(dir) = trace_file.parent() {
        if std::fs::create_dir_all(dir).is_err() {
            return;
        }
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", "cinelist"),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(trace_file, resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer("cinelist"));
    opentelemetry::global::set_tracer_provider(provider);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_trace_file_wins() {
        let config = Config {
            trace_file: Some("/tmp/cinelist/spans.json".to_string()),
            ..Config::default()
        };
        assert_eq!(trace_file_path(&config), PathBuf::from("/tmp/cinelist/spans.json"));
    }

    #[test]
    fn default_trace_file_lives_in_the_data_dir() {
        let path = trace_file_path(&Config::default());
        assert_eq!(path, paths::data_dir().join(TRACE_FILE_NAME));
    }
}

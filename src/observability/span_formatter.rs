//! Compact JSON span formatting.
//!
//! Each finished span becomes one flat JSON object, written as one line:
//!
//! ```json
//! {"service":"cinelist","traceId":"…","spanId":"…","parentSpanId":null,
//!  "name":"get_items","startUnixNano":"…","durationMicros":412,
//!  "attributes":{"page":2,"stream":"Popular"},"events":[],"status":"unset"}
//! ```

use opentelemetry::trace::{SpanId, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Map, Value as JsonValue};
use std::time::{SystemTime, UNIX_EPOCH};

const SERVICE_NAME_KEY: &str = "service.name";

/// Formats spans as JSON lines tagged with the service name.
pub struct SpanFormatter {
    service: String,
}

impl SpanFormatter {
    /// Takes the service name from the resource, defaulting to `cinelist`.
    #[must_use]
    pub fn new(resource: &Resource) -> Self {
        let service = resource
            .iter()
            .find(|(key, _)| key.as_str() == SERVICE_NAME_KEY)
            .map_or_else(|| "cinelist".to_string(), |(_, value)| value.to_string());
        Self { service }
    }

    /// One JSON object per span, in batch order.
    #[must_use]
    pub fn format_batch(&self, batch: &[SpanData]) -> Vec<JsonValue> {
        batch.iter().map(|span| self.format_span(span)).collect()
    }

    fn format_span(&self, span: &SpanData) -> JsonValue {
        let parent = (span.parent_span_id != SpanId::INVALID)
            .then(|| format!("{:016x}", span.parent_span_id));
        let duration = span
            .end_time
            .duration_since(span.start_time)
            .unwrap_or_default();
        let events: Vec<JsonValue> = span
            .events
            .iter()
            .map(|event| {
                json!({
                    "name": event.name,
                    "unixNano": unix_nanos(event.timestamp),
                    "attributes": attributes_object(&event.attributes),
                })
            })
            .collect();

        json!({
            "service": self.service,
            "traceId": format!("{:032x}", span.span_context.trace_id()),
            "spanId": format!("{:016x}", span.span_context.span_id()),
            "parentSpanId": parent,
            "name": span.name,
            "startUnixNano": unix_nanos(span.start_time),
            "durationMicros": u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
            "attributes": attributes_object(&span.attributes),
            "events": events,
            "status": status_value(&span.status),
        })
    }
}

/// Nanoseconds since the epoch, as a string to survive JSON number limits.
fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
        .to_string()
}

fn attributes_object(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(array) => json!(array.to_string()),
    }
}

fn status_value(status: &Status) -> JsonValue {
    match status {
        Status::Unset => json!("unset"),
        Status::Ok => json!("ok"),
        Status::Error { description } => json!({ "error": description.to_string() }),
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter")
            .field("service", &self.service)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_become_a_flat_object() {
        let attributes = [
            KeyValue::new("page", 2_i64),
            KeyValue::new("stream", "Popular"),
            KeyValue::new("with_reload", false),
        ];
        assert_eq!(
            attributes_object(&attributes),
            json!({ "page": 2, "stream": "Popular", "with_reload": false })
        );
    }

    #[test]
    fn status_is_readable() {
        assert_eq!(status_value(&Status::Unset), json!("unset"));
        assert_eq!(
            status_value(&Status::error("request failed")),
            json!({ "error": "request failed" })
        );
    }

    #[test]
    fn service_name_comes_from_the_resource() {
        let resource = Resource::new(vec![KeyValue::new(SERVICE_NAME_KEY, "catalog-ui")]);
        assert_eq!(SpanFormatter::new(&resource).service, "catalog-ui");
        assert_eq!(SpanFormatter::new(&Resource::empty()).service, "cinelist");
    }
}

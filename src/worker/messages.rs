//! Fetch plans exchanged between the aggregator and whoever runs the I/O.
//!
//! [`ListAggregator::begin_fetch`](crate::app::ListAggregator::begin_fetch)
//! decides what to fetch and returns a [`FetchPlan`]. A remote plan carries a
//! [`PageRequest`] that is executed against a catalog client, possibly on
//! another thread, and handed back to
//! [`ListAggregator::complete_fetch`](crate::app::ListAggregator::complete_fetch)
//! with the result. The request also carries the trace context of the span
//! that planned it so both halves end up in one trace.

use crate::app::modes::StreamKind;

/// Distributed tracing context for linking a completion to its plan.
///
/// Captures the current trace and span IDs from OpenTelemetry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID as a hex string.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled,
    /// which is always the case when tracing was never initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        span_context.is_valid().then(|| Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds an OpenTelemetry context with this remote parent.
    #[must_use]
    pub fn to_otel_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;
        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// One planned page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Stream the page is merged into.
    pub stream: StreamKind,

    /// 1-based page index.
    pub page: u32,

    /// Search query; `None` for the popular stream.
    pub query: Option<String>,

    /// A reload page replaces the stream's contents.
    pub with_reload: bool,

    /// Stream generation at planning time. A mismatch on completion marks the
    /// response as stale.
    pub generation: u64,

    pub trace_context: Option<TraceContext>,
}

/// What a `get_items` call resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Nothing was fetched: the stream is exhausted or past its page cap.
    Skipped,

    /// A page was merged.
    Appended {
        /// Items the page contained.
        returned: usize,
        /// Items that were not already in the stream.
        added: usize,
    },

    /// The fetch failed; the error went to the notice sink.
    Failed,

    /// The response arrived after its stream was reset and was dropped.
    Stale,
}

impl PageOutcome {
    /// `true` when new items became visible.
    #[must_use]
    pub const fn added_items(self) -> bool {
        matches!(self, Self::Appended { added, .. } if added > 0)
    }
}

/// Result of planning a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPlan {
    /// Nothing to do.
    Skip,

    /// Served from local data; already merged.
    Local(PageOutcome),

    /// Needs a catalog call.
    Remote(PageRequest),
}

//! Async execution of the aggregator's fetch plans.
//!
//! # Architecture
//!
//! - `messages`: Fetch plans, page requests and outcomes, with trace context
//!   propagation from planning to completion
//! - `handler`: [`Browser`], the async driver a UI layer uses

pub mod handler;
pub mod messages;

pub use handler::Browser;
pub use messages::{FetchPlan, PageOutcome, PageRequest, TraceContext};

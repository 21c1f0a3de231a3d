//! Notices reported to the UI layer.
//!
//! The aggregator never returns errors from list or detail operations. It
//! pushes a [`Notice`] into the caller's [`NoticeSink`] instead and signals
//! "no data" through its return value, so "nothing loaded" and "something
//! went wrong" stay independent.
//!
//! # Example
//!
//! ```rust
//! use cinelist::app::{Notice, NoticeSink};
//! use std::sync::mpsc;
//!
//! let (mut tx, rx) = mpsc::channel::<Notice>();
//! tx.notify(Notice::ConnectivityLost);
//! assert!(matches!(rx.try_recv(), Ok(Notice::ConnectivityLost)));
//! ```

use crate::domain::CinelistError;
use std::sync::mpsc::Sender;

/// Something the user should be told about.
#[derive(Debug)]
pub enum Notice {
    /// Search switched to filtering the locally loaded popular items.
    ConnectivityLost,

    /// An operation failed and produced no data.
    Failed(CinelistError),
}

/// Receiver of [`Notice`]s.
pub trait NoticeSink: Send {
    fn notify(&mut self, notice: Notice);
}

impl NoticeSink for Sender<Notice> {
    fn notify(&mut self, notice: Notice) {
        if self.send(notice).is_err() {
            tracing::debug!("notice receiver dropped");
        }
    }
}

/// Sink that only logs. Used when the caller does not listen for notices.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NoticeSink for LogSink {
    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::ConnectivityLost => tracing::info!("connectivity lost, searching offline"),
            Notice::Failed(error) => tracing::warn!(error = %error, "operation failed"),
        }
    }
}

//! User-facing notifications for failed cart operations.

use std::sync::Arc;

use parking_lot::Mutex;
use rocket_commerce::CartError;
use serde::Serialize;

/// The cart operation a notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

/// A transient error message shown to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// Stock cannot cover the requested quantity.
    OutOfStock,
    /// Adding failed for any other reason.
    AddFailed,
    /// Removing failed.
    RemoveFailed,
    /// Changing the quantity failed for any other reason.
    UpdateFailed,
}

impl Notice {
    /// Message text.
    pub fn message(&self) -> &'static str {
        match self {
            Notice::OutOfStock => "requested quantity out of stock",
            Notice::AddFailed => "error adding product",
            Notice::RemoveFailed => "error removing product",
            Notice::UpdateFailed => "error changing product quantity",
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Map a failed operation to the notice shown for it.
///
/// Stock rejections get their own message on add and quantity change; every
/// other failure kind collapses into the operation's generic message.
pub fn notice_for(operation: Operation, err: &CartError) -> Notice {
    match (operation, err) {
        (Operation::Add | Operation::UpdateAmount, CartError::StockExceeded { .. }) => {
            Notice::OutOfStock
        }
        (Operation::Add, _) => Notice::AddFailed,
        (Operation::Remove, _) => Notice::RemoveFailed,
        (Operation::UpdateAmount, _) => Notice::UpdateFailed,
    }
}

/// Presents notices to the shopper.
pub trait Notifier: Send + Sync {
    /// Show an error notice.
    fn error(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn error(&self, notice: Notice) {
        (**self).error(notice)
    }
}

/// Emits notices as `warn` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, notice: Notice) {
        tracing::warn!(notice = ?notice, "{}", notice.message());
    }
}

/// Keeps every notice it is given.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    /// Drain the notices received so far.
    pub fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock())
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

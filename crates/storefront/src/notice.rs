//! User-facing notices for rejected cart operations.
//!
//! Cart operations never fail outward: a rejected operation leaves the cart
//! untouched, produces one [`Notice`] and hands it to the store's
//! [`Notifier`]. What the shopper sees is up to the notifier (a toast, a log
//! line, a test recorder).

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// A message shown to the shopper when an operation is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// The requested quantity exceeds the available stock.
    OutOfStock,
    /// Adding a product failed (unknown product or service error).
    AdditionFailed,
    /// Removing a product failed (not in the cart or storage error).
    RemovalFailed,
    /// Changing a quantity failed (not in the cart, invalid amount or service error).
    QuantityUpdateFailed,
}

impl Notice {
    /// Text shown to the shopper.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::OutOfStock => "Requested quantity is out of stock",
            Self::AdditionFailed => "Error adding product",
            Self::RemovalFailed => "Error removing product",
            Self::QuantityUpdateFailed => "Error updating product quantity",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Cart operation a notice was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl Operation {
    /// Notice for a failure that is not a stock shortage.
    #[must_use]
    pub const fn failure_notice(self) -> Notice {
        match self {
            Self::Add => Notice::AdditionFailed,
            Self::Remove => Notice::RemovalFailed,
            Self::UpdateAmount => Notice::QuantityUpdateFailed,
        }
    }
}

/// Receives notices raised by the cart store.
pub trait Notifier: Send + Sync {
    /// Deliver a notice to the shopper.
    fn notify(&self, notice: Notice);
}

/// Emits notices as `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        tracing::warn!(notice = ?notice, "{}", notice.message());
    }
}

/// Keeps every notice, oldest first.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl NoticeLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the notices received so far.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recent notice.
    #[must_use]
    pub fn last(&self) -> Option<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

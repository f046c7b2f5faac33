//! Stock snapshots from the stock service.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Available quantity for a product at the time it was fetched.
///
/// Not owned by the cart; it is fetched fresh before every quantity increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    /// Product the snapshot belongs to.
    pub id: ProductId,
    /// Units available.
    pub amount: u32,
}

impl StockEntry {
    /// Whether any unit is available.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.amount > 0
    }

    /// Whether `requested` units can be held in a cart.
    #[must_use]
    pub const fn covers(&self, requested: u32) -> bool {
        requested <= self.amount
    }
}

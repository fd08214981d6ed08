use super::order::Sku;

/// Outcome of an inventory check for a whole order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Available,
    /// The first line item that cannot be covered by current stock.
    Insufficient {
        sku: Sku,
        requested: u32,
        available: u32,
    },
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

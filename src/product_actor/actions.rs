/// Custom actions for Product entities.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Takes units out of stock for an order being placed.
    ///
    /// # Errors
    /// Fails if the requested amount exceeds available stock or the product is inactive.
    ReserveStock(u32),
    /// Puts units back, e.g. when an order is cancelled or placement fails halfway.
    ReleaseStock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    CheckStock(u32),
    /// Stock left after the reservation.
    ReserveStock(u32),
    /// Stock after the units were returned.
    ReleaseStock(u32),
}

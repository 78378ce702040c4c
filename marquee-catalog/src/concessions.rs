use serde::{Deserialize, Serialize};

/// A sellable add-on item (combo, snack, drink) priced per unit.
///
/// Prices are integer minor units; the booking layer never does float math
/// on money.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concession {
    pub id: String,
    pub name: String,
    pub unit_price: i64,
}

//! Melon catalog record.

use ubermelon_core::{MelonId, Price};

/// A melon offered for sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Melon {
    /// Catalog key, used in URLs and as the cart key.
    pub id: MelonId,
    /// Variety, e.g. "Crenshaw".
    pub melon_type: String,
    /// Name shown to shoppers.
    pub common_name: String,
    /// Unit price.
    pub price: Price,
    /// Product photo.
    pub image_url: String,
    /// Rind colour.
    pub color: String,
    /// Whether the variety is seedless.
    pub seedless: bool,
}

/// One line of an order, created in the same batch as the order itself and
/// immutable afterwards. `unit_price` is snapshotted at checkout: later
/// catalog price changes do not affect it.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: f64,
}

/// A line item before it has been assigned an id.
#[derive(Debug, Clone)]
pub struct LineItemDraft {
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: f64,
}

/// A line item joined with the denormalized product projection the tracking
/// view displays (name and image only).
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemView {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub quantity: u32,
    pub unit_price: f64,
}

impl LineItemView {
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Checks that the sum of line totals matches the order's recorded total.
/// This is a reconciliation property, not a runtime guarantee.
pub fn reconciles_with_total(items: &[LineItem], total_amount: f64) -> bool {
    let sum: f64 = items
        .iter()
        .map(|item| item.quantity as f64 * item.unit_price)
        .sum();
    (sum - total_amount).abs() < 1e-6
}

use crate::model::MenuItem;
use serde::{Deserialize, Serialize};

/// A menu item as selected by the customer, priced at the time it was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub item: MenuItem,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
    #[serde(default)]
    pub selected_extras: Vec<String>,
    pub total_price: f64,
}

impl CartItem {
    /// Prices `quantity` units of `item` with the chosen size and extras.
    pub fn new(item: MenuItem, quantity: u32, size: Option<String>, extras: Vec<String>) -> Self {
        let total_price = item.unit_price(size.as_deref(), &extras) * f64::from(quantity);
        Self {
            item,
            quantity,
            selected_size: size,
            selected_extras: extras,
            total_price,
        }
    }

    /// Changes the quantity, keeping the per-unit price the line was added at.
    pub fn set_quantity(&mut self, quantity: u32) {
        let unit = if self.quantity == 0 {
            0.0
        } else {
            self.total_price / f64::from(self.quantity)
        };
        self.quantity = quantity;
        self.total_price = unit * f64::from(quantity);
    }
}

/// Ordered cart lines. Adding the same item twice yields two lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, line: CartItem) {
        self.lines.push(line);
    }

    /// Sets the quantity of the line at `index`; zero or less removes it.
    ///
    /// Returns `false`, leaving the cart unchanged, when there is no such line or the
    /// quantity does not fit a `u32`.
    pub fn update_quantity(&mut self, index: usize, quantity: i64) -> bool {
        if index >= self.lines.len() {
            return false;
        }
        if quantity <= 0 {
            self.lines.remove(index);
            return true;
        }
        match u32::try_from(quantity) {
            Ok(quantity) => {
                self.lines[index].set_quantity(quantity);
                true
            }
            Err(_) => false,
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<CartItem> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line totals.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(|line| line.total_price).sum()
    }

    /// Number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

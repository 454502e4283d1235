use serde::{Deserialize, Serialize};

/// A size a menu item can be ordered in.
///
/// When `price` is set (and non-zero) it replaces the base price; otherwise `price_modifier`
/// is added to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeOption {
    pub name: String,
    #[serde(default)]
    pub price_modifier: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// A paid add-on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraOption {
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemOptions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<SizeOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<ExtraOption>,
}

/// Catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    /// Price of the large size, for items sold in two sizes.
    #[serde(default, rename = "priceL", skip_serializing_if = "Option::is_none")]
    pub price_large: Option<f64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub options: ItemOptions,
}

impl MenuItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        category: impl Into<String>,
        subcategory: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            price_large: None,
            category: category.into(),
            subcategory: subcategory.into(),
            options: ItemOptions::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a regular and a large size priced absolutely, and records the large price.
    pub fn with_two_sizes(mut self, regular: &str, large: &str, large_price: f64) -> Self {
        self.price_large = Some(large_price);
        self.options.sizes = vec![
            SizeOption {
                name: regular.to_string(),
                price_modifier: 0.0,
                price: Some(self.price),
            },
            SizeOption {
                name: large.to_string(),
                price_modifier: large_price - self.price,
                price: Some(large_price),
            },
        ];
        self
    }

    pub fn with_extra(mut self, name: impl Into<String>, price: f64) -> Self {
        self.options.extras.push(ExtraOption {
            name: name.into(),
            price,
        });
        self
    }

    /// Price of one unit with the given size and extras.
    ///
    /// Sizes and extras that the item does not offer are ignored.
    pub fn unit_price(&self, size: Option<&str>, extras: &[String]) -> f64 {
        let mut price = self.price;

        let chosen_size =
            size.and_then(|name| self.options.sizes.iter().find(|s| s.name == name));
        if let Some(size) = chosen_size {
            price = match size.price {
                Some(absolute) if absolute != 0.0 => absolute,
                _ => price + size.price_modifier,
            };
        }

        for name in extras {
            if let Some(extra) = self.options.extras.iter().find(|e| &e.name == name) {
                price += extra.price;
            }
        }

        price
    }
}

/// The restaurant's catalog.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items of a category, optionally narrowed to one subcategory, in catalog order.
    pub fn section<'a>(
        &'a self,
        category: &'a str,
        subcategory: Option<&'a str>,
    ) -> impl Iterator<Item = &'a MenuItem> + 'a {
        self.items.iter().filter(move |item| {
            item.category == category && subcategory.map_or(true, |sub| item.subcategory == sub)
        })
    }

    /// Distinct subcategories of a category, in first-seen order.
    pub fn subcategories(&self, category: &str) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in self.items.iter().filter(|item| item.category == category) {
            if !seen.contains(&item.subcategory.as_str()) {
                seen.push(&item.subcategory);
            }
        }
        seen
    }

    /// A small catalog used by the demo binary and the tests.
    pub fn sample() -> Self {
        Self::new(vec![
            MenuItem::new("smash", "Smash Burger", 350.0, "sale", "burgers")
                .with_description("Double steak haché, cheddar, oignons")
                .with_extra("Cheddar", 100.0)
                .with_extra("Bacon", 150.0),
            MenuItem::new("classica", "Classica", 500.0, "sale", "pizzas-tomate")
                .with_description("Pizza tomate, mozzarella, basilic")
                .with_two_sizes("Moyenne", "Large", 1100.0),
            MenuItem::new("mapoutine", "Mapoutine", 700.0, "sale", "pizzas-tomate")
                .with_description("Pizza spécialité de la maison")
                .with_two_sizes("Moyenne", "Large", 1400.0),
            MenuItem::new("frites", "Frites", 200.0, "sale", "accompagnements"),
            MenuItem::new("tiramisu", "Tiramisu", 450.0, "sucre", "desserts"),
            MenuItem::new("citronnade", "Citronnade", 250.0, "boissons", "fraiches"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_size_price_replaces_base() {
        let menu = Menu::sample();
        let pizza = menu.find("classica").unwrap();
        assert_eq!(pizza.unit_price(Some("Large"), &[]), 1100.0);
        assert_eq!(pizza.unit_price(Some("Moyenne"), &[]), 500.0);
        assert_eq!(pizza.price_large, Some(1100.0));
    }

    #[test]
    fn modifier_applies_without_absolute_price() {
        let mut item = MenuItem::new("x", "X", 300.0, "sale", "pates");
        item.options.sizes.push(SizeOption {
            name: "XL".into(),
            price_modifier: 120.0,
            price: None,
        });
        assert_eq!(item.unit_price(Some("XL"), &[]), 420.0);
    }

    #[test]
    fn unknown_size_and_extras_are_ignored() {
        let menu = Menu::sample();
        let burger = menu.find("smash").unwrap();
        let extras = vec!["Bacon".to_string(), "Truffe".to_string()];
        assert_eq!(burger.unit_price(Some("Géant"), &extras), 500.0);
    }

    #[test]
    fn sections_follow_catalog_order() {
        let menu = Menu::sample();
        let pizzas: Vec<&str> = menu
            .section("sale", Some("pizzas-tomate"))
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(pizzas, vec!["classica", "mapoutine"]);
        assert_eq!(
            menu.subcategories("sale"),
            vec!["burgers", "pizzas-tomate", "accompagnements"]
        );
    }
}

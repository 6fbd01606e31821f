//! Shopping list consolidation.
//!
//! Turns the ingredient lines of every recipe in a user's cart into one
//! quantity per (ingredient name, measurement unit) and renders it as a
//! plain text document.

use std::collections::BTreeMap;

use serde::Serialize;

/// One ingredient line drawn from a recipe in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl IngredientLine {
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>, amount: i32) -> Self {
        Self {
            name: name.into(),
            measurement_unit: measurement_unit.into(),
            amount,
        }
    }
}

/// Consolidated quantity of one (name, unit) group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub total_amount: i64,
}

/// Shopping list ordered by ingredient name, then unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    /// Group lines by (name, unit) and sum their amounts.
    ///
    /// Same name with a different unit is a separate group; no unit
    /// conversion happens. Names compare case-sensitively as stored.
    pub fn aggregate<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = IngredientLine>,
    {
        let mut groups: BTreeMap<(String, String), i64> = BTreeMap::new();
        for line in lines {
            *groups.entry((line.name, line.measurement_unit)).or_insert(0) += line.amount as i64;
        }

        let items = groups
            .into_iter()
            .map(|((name, measurement_unit), total_amount)| ShoppingListItem {
                name,
                measurement_unit,
                total_amount,
            })
            .collect();

        Self { items }
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ShoppingListItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// One `"{name} ({unit}) — {total}"` line per group, newline terminated.
    pub fn render_text(&self) -> String {
        self.items
            .iter()
            .map(|item| {
                format!(
                    "{} ({}) — {}\n",
                    item.name, item.measurement_unit, item.total_amount
                )
            })
            .collect()
    }
}

//! Groups list items by category and prices them.
//!
//! Two views exist and price differently:
//!
//! * in progress: only open items count, each at its unit price (quantity ignored);
//! * completed: every item passed in counts at `unit_price * quantity`.

use std::collections::HashMap;
use std::fmt::Write as _;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{catalog::CategoryLookup, models::ListItem};

pub const CURRENCY_SYMBOL: &str = "₺";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PricingView {
    InProgress,
    Completed,
}

impl PricingView {
    // Validated prices and quantities stay far below `Decimal::MAX`; saturation only
    // matters for rows written around validation.
    fn line_total(self, item: &ListItem) -> Decimal {
        match self {
            PricingView::InProgress if item.is_completed => Decimal::ZERO,
            PricingView::InProgress => item.unit_price,
            PricingView::Completed => item
                .unit_price
                .saturating_mul(Decimal::from(item.quantity)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategorySummary {
    pub category_id: String,
    pub category_name: String,
    pub category_icon: String,
    pub category_color: String,
    pub items: Vec<ListItem>,
    #[schema(value_type = String)]
    pub total_price: Decimal,
    pub completed_items: usize,
    pub item_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ListSummary {
    pub view: PricingView,
    pub categories: Vec<CategorySummary>,
    #[schema(value_type = String)]
    pub total_price: Decimal,
    pub completed_count: usize,
    pub item_count: usize,
}

/// Insertion-ordered groups keyed by category id.
#[derive(Debug)]
pub struct CategoryGroups<V> {
    index: HashMap<String, usize>,
    groups: Vec<V>,
}

impl<V> Default for CategoryGroups<V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }
}

impl<V> CategoryGroups<V> {
    /// Group for `key`, created with `init` the first time the key is seen.
    pub fn entry(&mut self, key: &str, init: impl FnOnce() -> V) -> &mut V {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.groups.push(init());
                let slot = self.groups.len() - 1;
                self.index.insert(key.to_string(), slot);
                slot
            }
        };
        &mut self.groups[slot]
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&slot| &self.groups[slot])
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in first-seen order.
    pub fn into_values(self) -> Vec<V> {
        self.groups
    }
}

/// In-progress view of a list.
pub fn summarize(items: &[ListItem], catalog: &impl CategoryLookup) -> ListSummary {
    summarize_with(items, catalog, PricingView::InProgress)
}

/// "Shopping done" view. Callers pass the completed subset, see [`completed_items`].
pub fn summarize_completed(items: &[ListItem], catalog: &impl CategoryLookup) -> ListSummary {
    summarize_with(items, catalog, PricingView::Completed)
}

pub fn summarize_with(
    items: &[ListItem],
    catalog: &impl CategoryLookup,
    view: PricingView,
) -> ListSummary {
    let mut groups: CategoryGroups<CategorySummary> = CategoryGroups::default();
    let mut total_price = Decimal::ZERO;
    let mut completed_count = 0;

    for item in items {
        let group = groups.entry(&item.category_id, || {
            let display = catalog.display(&item.category_id);
            CategorySummary {
                category_id: item.category_id.clone(),
                category_name: item.category_name.clone(),
                category_icon: display.icon.to_string(),
                category_color: display.color.to_string(),
                items: Vec::new(),
                total_price: Decimal::ZERO,
                completed_items: 0,
                item_count: 0,
            }
        });

        let line = view.line_total(item);
        group.items.push(item.clone());
        group.item_count += 1;
        group.total_price = group.total_price.saturating_add(line);
        total_price = total_price.saturating_add(line);
        if item.is_completed {
            group.completed_items += 1;
            completed_count += 1;
        }
    }

    ListSummary {
        view,
        categories: groups.into_values(),
        total_price,
        completed_count,
        item_count: items.len(),
    }
}

pub fn completed_items(items: &[ListItem]) -> Vec<ListItem> {
    items.iter().filter(|i| i.is_completed).cloned().collect()
}

/// Plain-text trip summary suitable for sharing.
pub fn share_text(list_title: &str, summary: &ListSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{list_title} - Shopping summary");
    out.push('\n');
    for category in &summary.categories {
        let _ = writeln!(
            out,
            "{} ({} items)",
            category.category_name, category.item_count
        );
        for item in &category.items {
            let _ = writeln!(out, "   • {} - {}", item.title, money(item.unit_price));
        }
        let _ = writeln!(out, "   Category total: {}", money(category.total_price));
        out.push('\n');
    }
    let _ = write!(out, "Total spent: {}", money(summary.total_price));
    out
}

fn money(amount: Decimal) -> String {
    format!("{CURRENCY_SYMBOL}{:.2}", amount.round_dp(2))
}

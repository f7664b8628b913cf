//! Merchant-based categorization rules
//!
//! An ordered list of (predicate, category) rules evaluated first-match-wins,
//! used by import sources that have no native category column. Chase exports
//! do carry a category, which is mapped through a lookup table instead.

/// A single categorization rule.
///
/// Matches when any merchant keyword appears in the merchant name (an empty
/// keyword list imposes no merchant requirement) and, if set, the type
/// keyword appears in the source transaction type. Keywords are lowercase;
/// inputs are lowercased before matching.
pub struct CategoryRule {
    merchant_any: &'static [&'static str],
    type_contains: Option<&'static str>,
    pub category: &'static str,
}

impl CategoryRule {
    fn matches(&self, merchant: &str, source_type: &str) -> bool {
        let merchant_ok = self.merchant_any.is_empty()
            || self.merchant_any.iter().any(|kw| merchant.contains(kw));
        let type_ok = self
            .type_contains
            .map_or(true, |kw| source_type.contains(kw));
        merchant_ok && type_ok
    }
}

const fn merchant(keywords: &'static [&'static str], category: &'static str) -> CategoryRule {
    CategoryRule {
        merchant_any: keywords,
        type_contains: None,
        category,
    }
}

/// Ordered rule list; the first matching rule wins
pub const MERCHANT_RULES: &[CategoryRule] = &[
    // Music / streaming subscriptions
    merchant(&["spotify", "netflix", "hulu", "bandcamp", "patreon"], "Entertainment"),
    CategoryRule {
        merchant_any: &["apple"],
        type_contains: Some("preapproved"),
        category: "Entertainment",
    },
    // Gaming
    merchant(&["valve", "steam", "nintendo", "green man gaming"], "Entertainment"),
    CategoryRule {
        merchant_any: &["microsoft"],
        type_contains: Some("preapproved"),
        category: "Entertainment",
    },
    // Shopping
    merchant(&["target", "amazon"], "Shopping"),
    // Travel
    merchant(&["southwest", "airline", "hotel", "airbnb"], "Travel"),
    // Tickets / events
    merchant(&["axs", "ticketmaster"], "Entertainment"),
    // Government / fees
    merchant(&["colorado interactive"], "Bills & Utilities"),
    // Fallbacks on the source transaction type
    CategoryRule {
        merchant_any: &[],
        type_contains: Some("preapproved payment"),
        category: "Subscriptions",
    },
    CategoryRule {
        merchant_any: &[],
        type_contains: Some("express checkout"),
        category: "Shopping",
    },
];

/// Categorize by merchant name and source transaction type.
///
/// Falls back to `"Other"` when no rule matches.
pub fn categorize_merchant(merchant: &str, source_type: &str) -> &'static str {
    let merchant = merchant.to_lowercase();
    let source_type = source_type.to_lowercase();

    MERCHANT_RULES
        .iter()
        .find(|rule| rule.matches(&merchant, &source_type))
        .map(|rule| rule.category)
        .unwrap_or("Other")
}

/// Chase source categories mapped to canonical labels
const CHASE_CATEGORY_MAP: &[(&str, &str)] = &[
    ("Food & Drink", "Food & Dining"),
    ("Groceries", "Groceries"),
    ("Shopping", "Shopping"),
    ("Gas", "Gas & Fuel"),
    ("Travel", "Travel"),
    ("Entertainment", "Entertainment"),
    ("Bills & Utilities", "Bills & Utilities"),
    ("Health & Wellness", "Health & Medical"),
    ("Personal", "Personal Care"),
    ("Education", "Education"),
    ("Fees & Adjustments", "Fees & Adjustments"),
];

/// Map a Chase category to its canonical label; unmatched values pass through
/// unchanged.
pub fn map_chase_category(source: &str) -> String {
    CHASE_CATEGORY_MAP
        .iter()
        .find(|(from, _)| *from == source)
        .map(|(_, to)| to.to_string())
        .unwrap_or_else(|| source.to_string())
}

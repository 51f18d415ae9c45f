//! Static UI descriptors shipped inside the bundle
//!
//! Only the category filter depends on the record set; every other filter
//! and every sort option is fixed.

use crate::model::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_SORT: &str = "recommended";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl FilterOption {
    fn fixed(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            icon: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    pub id: String,
    pub label: String,
    /// Record field the filter applies to
    pub field: String,
    pub multi_select: bool,
    pub options: Vec<FilterOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRule {
    pub field: String,
    pub direction: SortDirection,
    /// Missing and `false` values sort after present `true` values
    #[serde(default)]
    pub nulls_last: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub id: String,
    pub label: String,
    pub rules: Vec<SortRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    pub filters: Vec<FilterDescriptor>,
    pub sort_options: Vec<SortOption>,
    pub default_sort: String,
    pub items_per_page: u32,
}

/// Category filter restricted to categories referenced by at least one record
///
/// Options follow category-store order. Referenced ids missing from the
/// store are not listed.
pub fn category_filter(categories: &[Category], used: &BTreeSet<&str>) -> FilterDescriptor {
    FilterDescriptor {
        id: "category".to_string(),
        label: "Category".to_string(),
        field: "categories".to_string(),
        multi_select: true,
        options: categories
            .iter()
            .filter(|c| used.contains(c.id.as_str()))
            .map(|c| FilterOption {
                id: c.id.clone(),
                label: c.name.clone(),
                icon: c.icon.clone(),
            })
            .collect(),
    }
}

fn publisher_filter() -> FilterDescriptor {
    FilterDescriptor {
        id: "publisher".to_string(),
        label: "Publisher".to_string(),
        field: "publisher".to_string(),
        multi_select: true,
        options: vec![
            FilterOption::fixed("official", "Official"),
            FilterOption::fixed("verified", "Verified"),
            FilterOption::fixed("community", "Community"),
        ],
    }
}

fn transport_filter() -> FilterDescriptor {
    FilterDescriptor {
        id: "transport".to_string(),
        label: "Transport".to_string(),
        field: "transport.type".to_string(),
        multi_select: true,
        options: vec![
            FilterOption::fixed("stdio", "Local (stdio)"),
            FilterOption::fixed("http", "Remote (HTTP)"),
        ],
    }
}

fn auth_filter() -> FilterDescriptor {
    FilterDescriptor {
        id: "auth".to_string(),
        label: "Authentication".to_string(),
        field: "transport.auth.type".to_string(),
        multi_select: true,
        options: vec![
            FilterOption::fixed("none", "No authentication"),
            FilterOption::fixed("api_key", "API key"),
            FilterOption::fixed("oauth", "OAuth"),
        ],
    }
}

fn rule(field: &str, direction: SortDirection, nulls_last: bool) -> SortRule {
    SortRule {
        field: field.to_string(),
        direction,
        nulls_last,
    }
}

/// Fixed sort options: recommended, name ascending, name descending
pub fn sort_options() -> Vec<SortOption> {
    vec![
        SortOption {
            id: DEFAULT_SORT.to_string(),
            label: "Recommended".to_string(),
            rules: vec![
                rule("publisher.official", SortDirection::Desc, true),
                rule("publisher.verified", SortDirection::Desc, true),
                rule("name", SortDirection::Asc, false),
            ],
        },
        SortOption {
            id: "name_asc".to_string(),
            label: "Name (A-Z)".to_string(),
            rules: vec![rule("name", SortDirection::Asc, false)],
        },
        SortOption {
            id: "name_desc".to_string(),
            label: "Name (Z-A)".to_string(),
            rules: vec![rule("name", SortDirection::Desc, false)],
        },
    ]
}

/// Build the UI block for a record set
pub fn build_ui(categories: &[Category], used: &BTreeSet<&str>, items_per_page: u32) -> UiConfig {
    UiConfig {
        filters: vec![
            category_filter(categories, used),
            publisher_filter(),
            transport_filter(),
            auth_filter(),
        ],
        sort_options: sort_options(),
        default_sort: DEFAULT_SORT.to_string(),
        items_per_page,
    }
}

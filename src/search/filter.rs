//! Filter Compilation
//!
//! Renders a [`FilterSet`] in Algolia's `filters` syntax, e.g.
//! `stars >= 4 AND price <= 50 AND (category:"Kitchen" OR category:"Garden")`.

use crate::translation::types::FilterSet;

const ATTR_STARS: &str = "stars";
const ATTR_PRICE: &str = "price";
const ATTR_CATEGORY: &str = "category";

/// Compiles a filter set into a single filter expression.
///
/// Clauses appear in a fixed order (rating floor, price floor, price ceiling, categories)
/// joined with `AND`. Zero and non-finite bounds are not restrictive and are skipped.
/// Returns `None` when nothing is left so the caller can omit the parameter.
pub fn compile_filters(filters: &FilterSet) -> Option<String> {
    let mut clauses: Vec<String> = Vec::new();

    if let Some(min_stars) = meaningful(filters.min_stars) {
        clauses.push(format!("{} >= {}", ATTR_STARS, min_stars));
    }
    if let Some(min_price) = meaningful(filters.min_price) {
        clauses.push(format!("{} >= {}", ATTR_PRICE, min_price));
    }
    if let Some(max_price) = meaningful(filters.max_price) {
        clauses.push(format!("{} <= {}", ATTR_PRICE, max_price));
    }
    if let Some(group) = filters.categories.as_deref().and_then(category_group) {
        clauses.push(group);
    }

    if clauses.is_empty() {
        None
    } else {
        Some(clauses.join(" AND "))
    }
}

fn meaningful(bound: Option<f64>) -> Option<f64> {
    bound.filter(|value| value.is_finite() && *value != 0.0)
}

/// `(category:"A" OR category:"B")`, or `None` if no category survives trimming.
fn category_group(categories: &[String]) -> Option<String> {
    let terms: Vec<String> = categories
        .iter()
        .map(|category| category.trim())
        .filter(|category| !category.is_empty())
        .map(|category| format!("{}:\"{}\"", ATTR_CATEGORY, escape_quoted(category)))
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(format!("({})", terms.join(" OR ")))
    }
}

fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

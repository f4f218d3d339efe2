//! Translation Data Types
//!
//! The shapes produced by query normalization and consumed by the filter compiler.

use serde::{Deserialize, Deserializer, Serialize};

/// Structured constraints extracted from a query.
///
/// Field names match the JSON keys the language model is instructed to emit.
/// Decoding is lenient: a numeric bound may arrive as a number or a numeric string, and
/// `categories` may be a single string. A value that cannot be read drops only that
/// field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_stars: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_price: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_price: Option<f64>,

    #[serde(
        default,
        deserialize_with = "string_or_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub categories: Option<Vec<String>>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self.min_stars.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.categories.is_none()
    }
}

/// The JSON object the model is asked to return.
#[derive(Debug, Deserialize)]
pub struct ModelOutput {
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    /// Anything other than a JSON object reads as no filters.
    #[serde(default, deserialize_with = "object_or_none")]
    pub filters: Option<FilterSet>,
}

/// Result of normalizing one raw query: provider-ready keywords plus filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedQuery {
    pub keywords: String,
    pub filters: FilterSet,
}

impl NormalizedQuery {
    /// The untranslated query with no filters. Used for short queries and on fallback.
    pub fn literal(raw_query: &str) -> Self {
        Self {
            keywords: raw_query.to_string(),
            filters: FilterSet::default(),
        }
    }
}

fn object_or_none<'de, D>(deserializer: D) -> Result<Option<FilterSet>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .filter(serde_json::Value::is_object)
        .and_then(|value| serde_json::from_value(value).ok()))
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }))
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        serde_json::Value::String(s) => Some(vec![s]),
        serde_json::Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }))
}

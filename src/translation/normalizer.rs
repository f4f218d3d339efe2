use super::client::QueryTranslator;
use super::types::{ModelOutput, NormalizedQuery};

/// Queries shorter than this (in characters, after trimming) are searched as typed.
pub const MIN_TRANSLATABLE_CHARS: usize = 2;

/// Returns true when the query is long enough to be worth a language-model call.
///
/// Empty and one-character queries are "browse" requests and skip translation.
pub fn needs_translation(raw_query: &str) -> bool {
    raw_query.trim().chars().count() >= MIN_TRANSLATABLE_CHARS
}

/// Converts a raw user query into keywords and filters.
///
/// Never fails: provider errors and unparseable replies fall back to
/// [`NormalizedQuery::literal`], logging a warning.
pub async fn normalize(translator: &dyn QueryTranslator, raw_query: &str) -> NormalizedQuery {
    if !needs_translation(raw_query) {
        return NormalizedQuery::literal(raw_query);
    }

    let reply = match translator.translate(raw_query).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(
                "Translation request failed, falling back to raw query: {:#}",
                err
            );
            return NormalizedQuery::literal(raw_query);
        }
    };

    match parse_model_output(raw_query, &reply) {
        Ok(normalized) => {
            tracing::debug!(
                "Normalized {:?} -> {:?} {:?}",
                raw_query,
                normalized.keywords,
                normalized.filters
            );
            normalized
        }
        Err(err) => {
            tracing::warn!(
                "Failed to parse translation reply, falling back to raw query: {}",
                err
            );
            NormalizedQuery::literal(raw_query)
        }
    }
}

/// Parses the model's reply text.
///
/// Keywords are joined with single spaces; an empty or missing keyword list keeps the raw
/// query. Missing filters mean no filters.
pub fn parse_model_output(
    raw_query: &str,
    reply: &str,
) -> Result<NormalizedQuery, serde_json::Error> {
    let output: ModelOutput = serde_json::from_str(reply.trim())?;

    let joined = output.keywords.unwrap_or_default().join(" ");
    let joined = joined.trim();
    let keywords = if joined.is_empty() {
        raw_query.to_string()
    } else {
        joined.to_string()
    };

    Ok(NormalizedQuery {
        keywords,
        filters: output.filters.unwrap_or_default(),
    })
}

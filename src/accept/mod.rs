//! Accept-family header parsing (RFC 9110 §12).
//!
//! `Accept`, `Accept-Charset`, `Accept-Encoding`, and `Accept-Language`
//! all share one shape: a comma-separated list of tokens, each with
//! optional `;name=value` parameters, ranked by a `q` weight. This
//! module parses that shape into a [`PreferenceList`]: an ordered map
//! from token to its parameters, sorted most-preferred first.
//!
//! Parsing is total. Any string yields a list; malformed stretches of
//! the input are dropped, never reported.
//!
//! ```
//! use httpv::parse_preferences;
//!
//! let prefs = parse_preferences("text/html;q=0.9, application/json");
//! assert_eq!(prefs.best().map(|(token, _)| token), Some("application/json"));
//! assert_eq!(prefs.quality("text/html"), Some(0.9));
//! ```
//!
//! Request handling tends to see the same handful of header strings
//! over and over; [`PreferenceCache`] memoizes parses behind a bounded
//! LRU map.

mod cache;
mod parser;

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

pub use cache::PreferenceCache;
pub use parser::parse_preferences;

/// Parameters attached to one preference token, in source order.
pub type Params = IndexMap<String, String>;

/// Name of the weight parameter from RFC 9110 §12.4.2.
const QUALITY_PARAM: &str = "q";

/// Weight assumed when `q` is missing or unreadable.
const DEFAULT_WEIGHT: f64 = 1.0;

/// Effective weight of one entry's parameter map.
///
/// The raw `q` string is kept verbatim in the map; this reads it as a
/// float, falling back to the default for absent, unparsable, or
/// non-finite values.
pub(crate) fn preference_weight(params: &Params) -> f64 {
    params
        .get(QUALITY_PARAM)
        .and_then(|raw| raw.parse::<f64>().ok())
        .filter(|weight| weight.is_finite())
        .unwrap_or(DEFAULT_WEIGHT)
}

/// An ordered set of preferences, most preferred first.
///
/// Entries with a higher `q` weight come first; entries of equal weight
/// keep the order the header listed them in. A token repeated in the
/// header keeps its first position but its last parameter map.
///
/// Two lists are equal only when they rank the same tokens in the same
/// order, each with the same parameters in the same order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct PreferenceList {
    entries: IndexMap<String, Params>,
}

impl PreferenceList {
    /// Number of distinct tokens in the list.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parameters for `token`, if the client listed it.
    pub fn get(&self, token: &str) -> Option<&Params> {
        self.entries.get(token)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Effective weight of `token`, or `None` when it was not listed.
    ///
    /// ```
    /// use httpv::parse_preferences;
    ///
    /// let prefs = parse_preferences("gzip, br;q=0.5");
    /// assert_eq!(prefs.quality("gzip"), Some(1.0));
    /// assert_eq!(prefs.quality("br"), Some(0.5));
    /// assert_eq!(prefs.quality("zstd"), None);
    /// ```
    pub fn quality(&self, token: &str) -> Option<f64> {
        self.entries.get(token).map(preference_weight)
    }

    /// The most preferred entry, if any.
    pub fn best(&self) -> Option<(&str, &Params)> {
        self.entries
            .first()
            .map(|(token, params)| (token.as_str(), params))
    }

    /// Entries in preference order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Params)> {
        self.entries
            .iter()
            .map(|(token, params)| (token.as_str(), params))
    }
}

// Entry order and parameter order carry meaning here, so equality walks
// both sequences instead of using the maps' order-insensitive comparison.
impl PartialEq for PreferenceList {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|((token, params), (other_token, other_params))| {
                    token == other_token && params.iter().eq(other_params.iter())
                })
    }
}

impl Eq for PreferenceList {}

impl fmt::Display for PreferenceList {
    /// Re-serializes the list as a header value, quoting parameter
    /// values that are not plain tokens.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, (token, params)) in self.entries.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            f.write_str(token)?;
            for (name, value) in params {
                if is_token(value) {
                    write!(f, ";{name}={value}")?;
                } else {
                    write!(f, ";{name}=\"{}\"", escape_quoted(value))?;
                }
            }
        }
        Ok(())
    }
}

/// `tchar` check from RFC 9110 §5.6.2.
fn is_token(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c))
}

fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_and_sizes() {
        let prefs = parse_preferences("text/html;q=0.9, application/json");
        assert_eq!(prefs.len(), 2);
        assert!(!prefs.is_empty());
        assert!(prefs.contains("text/html"));
        assert!(!prefs.contains("image/png"));
        assert_eq!(
            prefs.get("text/html").and_then(|p| p.get("q")).map(String::as_str),
            Some("0.9")
        );
    }

    #[test]
    fn best_follows_the_sort() {
        let prefs = parse_preferences("a;q=0.2, b;q=0.8, c;q=0.5");
        assert_eq!(prefs.best().map(|(token, _)| token), Some("b"));
        assert!(parse_preferences("").best().is_none());
    }

    #[test]
    fn equality_tracks_preference_order() {
        assert_eq!(parse_preferences("a, b"), parse_preferences("a, b"));
        // Same tokens, opposite ranking.
        assert_ne!(parse_preferences("a, b"), parse_preferences("b, a"));
        // Same parameters, opposite order.
        assert_ne!(
            parse_preferences("a;x=1;y=2"),
            parse_preferences("a;y=2;x=1")
        );
    }

    #[test]
    fn quality_reads_weights_with_defaults() {
        let prefs = parse_preferences("a, b;q=0.25, c;q=bogus");
        assert_eq!(prefs.quality("a"), Some(1.0));
        assert_eq!(prefs.quality("b"), Some(0.25));
        assert_eq!(prefs.quality("c"), Some(1.0));
        assert_eq!(prefs.quality("d"), None);
    }

    #[test]
    fn non_finite_weights_fall_back_to_default() {
        let prefs = parse_preferences("a;q=inf, b;q=NaN");
        assert_eq!(prefs.quality("a"), Some(1.0));
        assert_eq!(prefs.quality("b"), Some(1.0));
    }

    #[test]
    fn display_reserializes_in_preference_order() {
        let prefs = parse_preferences("a;q=0.5, b");
        assert_eq!(prefs.to_string(), "b, a;q=0.5");
    }

    #[test]
    fn display_quotes_non_token_values() {
        let prefs = parse_preferences("a;label=\"two words\";q=0.5");
        assert_eq!(prefs.to_string(), "a;label=\"two words\";q=0.5");

        let prefs = parse_preferences("a;note=\"say \\\"hi\\\"\"");
        assert_eq!(prefs.to_string(), "a;note=\"say \\\"hi\\\"\"");
    }

    #[test]
    fn serializes_as_a_plain_map() {
        let prefs = parse_preferences("text/html;q=0.9, application/json");
        assert_eq!(
            serde_json::to_value(&prefs).unwrap(),
            serde_json::json!({
                "application/json": {},
                "text/html": { "q": "0.9" }
            })
        );
    }
}

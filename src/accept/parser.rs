//! Character-level scanner for Accept-family header values.
//!
//! The grammar is small enough to scan in one pass: commas separate
//! entries, semicolons introduce parameters, `=` splits a parameter
//! name from its value, and double quotes shield a value so that it can
//! carry commas, semicolons, and spaces. Inside a quoted value a
//! backslash escapes the next character (RFC 9110 §5.6.4).
//!
//! The scanner holds one [`State`] at a time, so a character is always
//! interpreted against exactly one context. It never fails: text that
//! fits no rule for the current state is dropped, and whatever was
//! collected by the end of the input is flushed as a final entry.

use std::mem;

use indexmap::IndexMap;

use super::{Params, PreferenceList, preference_weight};

/// What the characters currently being read belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between entries; nothing collected yet.
    Start,
    /// Reading an entry token.
    Value,
    /// Reading a parameter name, after `;`.
    ParamName,
    /// Reading an unquoted parameter value, after `=`.
    ParamValue,
    /// Reading a parameter value between double quotes.
    QuotedParamValue,
}

struct Scanner {
    state: State,
    token: String,
    name: String,
    value: String,
    params: Params,
    items: Vec<(String, Params)>,
}

impl Scanner {
    fn new() -> Self {
        Self {
            state: State::Start,
            token: String::new(),
            name: String::new(),
            value: String::new(),
            params: Params::default(),
            items: Vec::new(),
        }
    }

    fn scan(mut self, header: &str) -> PreferenceList {
        let mut chars = header.chars();
        while let Some(ch) = chars.next() {
            match (self.state, ch) {
                // Quoted values first: everything is literal in them
                // except the closing quote and the escape.
                (State::QuotedParamValue, '\\') => {
                    if let Some(escaped) = chars.next() {
                        self.push_value(escaped);
                    }
                }
                (State::QuotedParamValue, '"') => self.state = State::ParamValue,
                (State::QuotedParamValue, c) => self.push_value(c),

                (_, ' ') => {}
                (_, ',') => self.finish_item(),
                (_, ';') => {
                    self.finish_param();
                    self.state = State::ParamName;
                }
                (State::ParamName, '=') => self.state = State::ParamValue,
                (State::ParamValue, '"') => self.state = State::QuotedParamValue,

                (State::Start, c) => {
                    self.token.push(c);
                    self.state = State::Value;
                }
                (State::Value, c) => self.token.push(c),
                (State::ParamName, c) => {
                    // A parameter needs an entry token to attach to.
                    if !self.token.is_empty() {
                        self.name.push(c);
                    }
                }
                (State::ParamValue, c) => self.push_value(c),
            }
        }
        self.finish_item();
        self.into_list()
    }

    /// Value characters only count once a parameter name exists.
    fn push_value(&mut self, c: char) {
        if !self.name.is_empty() {
            self.value.push(c);
        }
    }

    /// Commits the pending parameter, if it ever got a name. A name
    /// without `=value` keeps an empty value.
    fn finish_param(&mut self) {
        if !self.name.is_empty() {
            self.params
                .insert(mem::take(&mut self.name), mem::take(&mut self.value));
        }
    }

    /// Commits the pending entry, if it ever got a token.
    fn finish_item(&mut self) {
        self.finish_param();
        if !self.token.is_empty() {
            self.items
                .push((mem::take(&mut self.token), mem::take(&mut self.params)));
        }
        self.state = State::Start;
    }

    fn into_list(self) -> PreferenceList {
        let mut entries: IndexMap<String, Params> = IndexMap::with_capacity(self.items.len());
        for (token, params) in self.items {
            // A repeated token keeps its first position and takes the
            // later parameters.
            entries.insert(token, params);
        }
        entries.sort_by(|_, a, _, b| preference_weight(b).total_cmp(&preference_weight(a)));
        PreferenceList { entries }
    }
}

/// Parses an Accept-family header value into a [`PreferenceList`].
///
/// Entry tokens and parameter values are kept verbatim, including case;
/// sorting is by descending `q` weight with ties kept in header order.
/// The parser accepts any input and never fails.
///
/// # Examples
///
/// ```
/// use httpv::parse_preferences;
///
/// let prefs = parse_preferences("gzip;q=1.0, br;q=0.5, identity");
/// let order: Vec<&str> = prefs.iter().map(|(token, _)| token).collect();
/// assert_eq!(order, ["gzip", "identity", "br"]);
/// ```
pub fn parse_preferences(header: &str) -> PreferenceList {
    Scanner::new().scan(header)
}

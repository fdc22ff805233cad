//! Typed URI components.
//!
//! Each component of a [`Uri`](super::Uri) is wrapped in its own type so
//! that a value, once constructed, is known to be in canonical form:
//! percent-encoding applied against the right encode set, case folded
//! where RFC 3986 §6.2.2 says it is insignificant, and range checks done.
//!
//! Construction is fallible only where the grammar can actually be
//! violated: [`Scheme::new`] rejects text outside the scheme grammar and
//! [`Port::new`] rejects values outside `1..=65535`. The remaining
//! components normalize any input, so their constructors are total.

use std::fmt;

use super::UriError;
use super::encode::{self, normalize};

/// URI scheme, held lowercase. An empty scheme means "absent".
///
/// # Examples
///
/// ```
/// use httpv::uri::Scheme;
///
/// let scheme = Scheme::new("HTTPS").unwrap();
/// assert_eq!(scheme.as_str(), "https");
/// assert!(Scheme::new("ht tp").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Scheme(String);

impl Scheme {
    /// Validates `raw` against the RFC 3986 §3.1 scheme grammar
    /// (`ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`) and folds it to
    /// lowercase. The empty string is accepted as "no scheme".
    ///
    /// # Errors
    ///
    /// Returns [`UriError::InvalidComponent`] when `raw` is non-empty and
    /// does not match the grammar.
    pub fn new(raw: &str) -> Result<Self, UriError> {
        if raw.is_empty() {
            return Ok(Self(String::new()));
        }

        let mut chars = raw.chars();
        let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
        let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !first_ok || !rest_ok {
            return Err(UriError::invalid_component(
                "scheme",
                format!("`{raw}` is not a letter followed by letters, digits, `+`, `-`, or `.`"),
            ));
        }

        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The port a scheme implies when the authority names none.
    ///
    /// ```
    /// use httpv::uri::Scheme;
    ///
    /// assert_eq!(Scheme::new("https").unwrap().default_port(), Some(443));
    /// assert_eq!(Scheme::new("gopher").unwrap().default_port(), None);
    /// ```
    pub fn default_port(&self) -> Option<u16> {
        match self.0.as_str() {
            "http" => Some(80),
            "https" => Some(443),
            _ => None,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The `user[:password]` half of an authority.
///
/// Both parts are percent-encoded on construction, so a `:` or `@` in a
/// credential can never be confused with the authority delimiters.
///
/// # Examples
///
/// ```
/// use httpv::uri::UserInfo;
///
/// let info = UserInfo::new("alice", Some("p@ss:word"));
/// assert_eq!(info.to_string(), "alice:p%40ss%3Aword");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UserInfo {
    user: String,
    password: String,
}

impl UserInfo {
    pub fn new(user: &str, password: Option<&str>) -> Self {
        Self {
            user: normalize(user, encode::REG_NAME),
            password: normalize(password.unwrap_or(""), encode::REG_NAME),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// A userinfo with no user is treated as absent, password or not.
    pub fn is_empty(&self) -> bool {
        self.user.is_empty()
    }
}

impl fmt::Display for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user)?;
        if !self.password.is_empty() {
            write!(f, ":{}", self.password)?;
        }
        Ok(())
    }
}

/// Host, held lowercase. An empty host means "no authority".
///
/// Registered names are percent-encoded against the reg-name set. An
/// IPv6 literal (`[` .. `]`) is carried through with only its case
/// folded, since brackets and colons are structural there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Host(String);

impl Host {
    /// # Examples
    ///
    /// ```
    /// use httpv::uri::Host;
    ///
    /// assert_eq!(Host::new("API.Example.COM").as_str(), "api.example.com");
    /// assert_eq!(Host::new("[2001:DB8::1]").as_str(), "[2001:db8::1]");
    /// ```
    pub fn new(raw: &str) -> Self {
        if raw.starts_with('[') && raw.ends_with(']') {
            return Self(raw.to_ascii_lowercase());
        }
        Self(normalize(raw, encode::REG_NAME).to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A TCP port in `1..=65535`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Port(u16);

impl Port {
    /// # Errors
    ///
    /// Returns [`UriError::InvalidComponent`] for `0` and anything above
    /// `65535`.
    ///
    /// ```
    /// use httpv::uri::Port;
    ///
    /// assert!(Port::new(8080).is_ok());
    /// assert!(Port::new(0).is_err());
    /// assert!(Port::new(65536).is_err());
    /// ```
    pub fn new(value: u32) -> Result<Self, UriError> {
        if !(1..=65535).contains(&value) {
            return Err(UriError::invalid_component(
                "port",
                format!("{value} is outside 1..=65535"),
            ));
        }
        Ok(Self(value as u16))
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Percent-encoded path. Case and repeated slashes are preserved here;
/// presentation-time guards live on [`Uri`](super::Uri).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(String);

impl Path {
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw, encode::PATH))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Percent-encoded query, stored without its leading `?`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw, encode::QUERY))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Percent-encoded fragment, stored without its leading `#`. Shares the
/// query encode set per RFC 3986 §3.5.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Fragment(String);

impl Fragment {
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw, encode::QUERY))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

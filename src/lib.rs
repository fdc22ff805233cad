//! # httpv
//!
//! Typed parsing for HTTP values: Accept-family content negotiation and
//! RFC 3986 URI normalization.
//!
//! ## Quick Start
//!
//! ```rust
//! use httpv::{Uri, parse_preferences};
//!
//! // Rank what the client asked for, most preferred first.
//! let prefs = parse_preferences("text/html;q=0.9, application/json");
//! assert_eq!(prefs.best().map(|(token, _)| token), Some("application/json"));
//!
//! // Normalize a URI into its canonical form.
//! let uri = Uri::parse("HTTP://Example.COM:80/docs/a b")?;
//! assert_eq!(uri.to_string(), "http://example.com/docs/a%20b");
//! assert_eq!(uri.port(), None); // 80 is implied by http
//! # Ok::<(), httpv::UriError>(())
//! ```

// ── Core modules ──────────────────────────────────────────────────────────────
pub mod accept;
pub mod uri;

// ── Convenience re-exports ────────────────────────────────────────────────────
pub use accept::{Params, PreferenceCache, PreferenceList, parse_preferences};
pub use uri::{Uri, UriError};

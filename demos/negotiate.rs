//! End-to-end tour: rank an Accept header, reuse the cache, and
//! normalize a URI.
//!
//! Run with:
//!
//! ```text
//! RUST_LOG=trace cargo run --example negotiate
//! ```

use httpv::{PreferenceCache, Uri, parse_preferences};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let header = "text/html;q=0.9, application/json, */*;q=0.1";
    println!("Accept: {header}");
    let prefs = parse_preferences(header);
    for (token, params) in prefs.iter() {
        let quality = prefs.quality(token).unwrap_or(1.0);
        println!("  {token:<20} q={quality:<4} params={params:?}");
    }

    // The second lookup is served from the cache; run with
    // RUST_LOG=trace to watch the hit.
    let cache = PreferenceCache::default();
    cache.parse(header);
    cache.parse(header);

    let raw = "HTTP://alice@Example.COM:80/a b//c?q=rust lang#top";
    let uri = Uri::parse(raw).expect("demo URI parses");
    println!();
    println!("raw:        {raw}");
    println!("canonical:  {uri}");
    println!("scheme:     {}", uri.scheme());
    println!("authority:  {}", uri.authority());
    println!("path:       {}", uri.path());
    println!("target:     {}", uri.request_target());
}

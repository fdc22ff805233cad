//! Property tests for the preference parser: totality, determinism,
//! ordering, and cache agreement.

use httpv::{PreferenceCache, parse_preferences};
use proptest::prelude::*;

fn token_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{1,8}(/[a-z]{1,8})?").expect("token regex")
}

fn quoted_inner_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9 ,;=]{0,16}").expect("quoted value regex")
}

fn weight_text(tenths: u32) -> String {
    if tenths == 10 {
        "1.0".to_owned()
    } else {
        format!("0.{tenths}")
    }
}

proptest! {
    #[test]
    fn any_input_parses_without_panicking(header in any::<String>()) {
        let _ = parse_preferences(&header);
    }

    #[test]
    fn parsing_is_deterministic(header in any::<String>()) {
        prop_assert_eq!(parse_preferences(&header), parse_preferences(&header));
    }

    #[test]
    fn unweighted_entries_keep_header_order(
        tokens in proptest::collection::vec(token_strategy(), 1..6),
    ) {
        let header = tokens.join(", ");
        let parsed = parse_preferences(&header);

        // Duplicate tokens collapse onto their first position.
        let mut expected: Vec<&str> = Vec::new();
        for token in &tokens {
            if !expected.contains(&token.as_str()) {
                expected.push(token);
            }
        }

        let order: Vec<&str> = parsed.iter().map(|(token, _)| token).collect();
        prop_assert_eq!(order, expected);
    }

    #[test]
    fn entries_sort_by_descending_weight(
        tenths in proptest::collection::vec(0u32..=10, 1..8),
    ) {
        let header = tenths
            .iter()
            .enumerate()
            .map(|(i, w)| format!("token{i};q={}", weight_text(*w)))
            .collect::<Vec<_>>()
            .join(", ");
        let parsed = parse_preferences(&header);
        prop_assert_eq!(parsed.len(), tenths.len());

        let weights: Vec<f64> = parsed
            .iter()
            .map(|(token, _)| parsed.quality(token).unwrap())
            .collect();
        for pair in weights.windows(2) {
            prop_assert!(pair[0] >= pair[1], "weights out of order: {:?}", weights);
        }
    }

    #[test]
    fn quoted_values_come_back_verbatim(inner in quoted_inner_strategy()) {
        let header = format!("item;x=\"{inner}\"");
        let parsed = parse_preferences(&header);
        prop_assert_eq!(
            parsed
                .get("item")
                .and_then(|params| params.get("x"))
                .map(String::as_str),
            Some(inner.as_str())
        );
    }

    #[test]
    fn cached_and_direct_parses_agree(header in any::<String>()) {
        let cache = PreferenceCache::new(4);
        let cached = cache.parse(&header);
        prop_assert_eq!(&*cached, &parse_preferences(&header));
    }
}

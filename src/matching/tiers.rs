//! Tiered part-number matching.
//!
//! A query matches a catalog entry when any tier succeeds, checked in order:
//!
//! 1. **Exact**: normalized strings are equal
//! 2. **Target contains query**: query at least `min_contains_len` long
//! 3. **Query contains target**: target at least `min_contains_len` long
//! 4. **Prefix**: target starts with query, query at least `min_prefix_len` long
//! 5. **Series rules**: family-specific rules for short or numeric queries
//!
//! Series rules are an ordered table. The first rule whose query gate fires
//! decides the outcome; when no gate fires the entry is rejected.

use crate::matching::engine::MatchingConfig;

/// Which tier accepted a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Exact,
    TargetContainsQuery,
    QueryContainsTarget,
    Prefix,
    Series(&'static str),
}

impl MatchTier {
    /// Short name used in text and JSON output
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::TargetContainsQuery => "target_contains_query",
            Self::QueryContainsTarget => "query_contains_target",
            Self::Prefix => "prefix",
            Self::Series(name) => name,
        }
    }
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Series(name) => write!(f, "series:{name}"),
            other => write!(f, "{}", other.label()),
        }
    }
}

/// A family-specific matching rule
pub struct SeriesRule {
    /// Rule name, reported in [`MatchTier::Series`]
    pub name: &'static str,
    /// Does this rule apply to the (normalized) query?
    pub applies: fn(&str) -> bool,
    /// Does the (normalized) target belong to the family?
    pub accepts: fn(&str, &str) -> bool,
}

impl std::fmt::Debug for SeriesRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesRule").field("name", &self.name).finish()
    }
}

/// Built-in series rules in evaluation order
pub const SERIES_RULES: &[SeriesRule] = &[
    SeriesRule {
        name: "tlv73333",
        applies: |query| query.contains("73333"),
        accepts: |_, target| target.contains("TLV73333") || target.contains("73333"),
    },
    SeriesRule {
        name: "lm63635",
        applies: |query| query.contains("63635"),
        accepts: |_, target| target.contains("LM63635") || target.contains("63635"),
    },
    SeriesRule {
        name: "stm32",
        applies: |query| query.contains("STM32") || query.starts_with("STM"),
        accepts: |_, target| target.contains("STM32"),
    },
    SeriesRule {
        name: "lm4050",
        applies: |query| query.contains("4050") && query.starts_with("LM"),
        accepts: |_, target| target.contains("LM4050"),
    },
    SeriesRule {
        name: "numeric",
        applies: is_all_digits,
        accepts: is_contiguous_number_match,
    },
];

/// Matches normalized queries against normalized catalog part numbers
#[derive(Debug, Clone, Copy)]
pub struct TieredMatcher<'a> {
    config: &'a MatchingConfig,
    rules: &'a [SeriesRule],
}

impl<'a> TieredMatcher<'a> {
    /// Create a matcher using the built-in series rules
    #[must_use]
    pub fn new(config: &'a MatchingConfig) -> Self {
        Self {
            config,
            rules: SERIES_RULES,
        }
    }

    /// Create a matcher with a custom series rule table
    #[must_use]
    pub fn with_rules(config: &'a MatchingConfig, rules: &'a [SeriesRule]) -> Self {
        Self { config, rules }
    }

    /// Does `query` match `target`? Both must already be normalized.
    #[must_use]
    pub fn matches(&self, query: &str, target: &str) -> bool {
        self.matching_tier(query, target).is_some()
    }

    /// The first tier that accepts `query` against `target`, if any
    #[must_use]
    pub fn matching_tier(&self, query: &str, target: &str) -> Option<MatchTier> {
        if query.is_empty() || target.is_empty() {
            return None;
        }

        if query == target {
            return Some(MatchTier::Exact);
        }

        // Lengths are byte lengths; normalized strings are ASCII only
        if target.contains(query) && query.len() >= self.config.min_contains_len {
            return Some(MatchTier::TargetContainsQuery);
        }

        if query.contains(target) && target.len() >= self.config.min_contains_len {
            return Some(MatchTier::QueryContainsTarget);
        }

        if target.starts_with(query) && query.len() >= self.config.min_prefix_len {
            return Some(MatchTier::Prefix);
        }

        self.series_match(query, target)
    }

    fn series_match(&self, query: &str, target: &str) -> Option<MatchTier> {
        let rule = self.rules.iter().find(|rule| (rule.applies)(query))?;
        (rule.accepts)(query, target).then_some(MatchTier::Series(rule.name))
    }
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Is the first occurrence of `query` in `target` a letter-bounded number?
///
/// The character before the occurrence must be an uppercase letter, and the
/// character after it must be an uppercase letter or the end of the string.
/// `555` is accepted in `NE555` and `NE555P`, rejected in `5550` and `XX5550YY`.
#[must_use]
pub fn is_contiguous_number_match(query: &str, target: &str) -> bool {
    let Some(index) = target.find(query) else {
        return false;
    };

    let bytes = target.as_bytes();
    let before = index.checked_sub(1).map(|i| bytes[i]);
    let after = bytes.get(index + query.len()).copied();

    let before_ok = before.is_some_and(|b| b.is_ascii_uppercase());
    let after_ok = after.map_or(true, |b| b.is_ascii_uppercase());
    before_ok && after_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::normalize::normalize;

    #[test]
    fn test_rule_debug_names_rule() {
        assert_eq!(
            format!("{:?}", SERIES_RULES[2]),
            "SeriesRule { name: \"stm32\" }"
        );
    }

    fn tier(query: &str, target: &str) -> Option<MatchTier> {
        let config = MatchingConfig::default();
        TieredMatcher::new(&config).matching_tier(&normalize(query), &normalize(target))
    }

    #[test]
    fn test_exact_tier() {
        assert_eq!(tier("stm32f103c8t6", "STM32F103C8T6"), Some(MatchTier::Exact));
    }

    #[test]
    fn test_target_contains_query_requires_min_length() {
        assert_eq!(
            tier("73333PDBV", "TLV73333PDBVR"),
            Some(MatchTier::TargetContainsQuery)
        );
        // Three characters is below the containment floor and no series rule applies
        assert_eq!(tier("PDB", "TLV73333PDBVR"), None);
    }

    #[test]
    fn test_query_contains_target() {
        assert_eq!(
            tier("TLV73333PDBVR-extra", "TLV73333PDBVR"),
            Some(MatchTier::QueryContainsTarget)
        );
        let config = MatchingConfig::default();
        let matcher = TieredMatcher::new(&config);
        // Short catalog entries are not allowed to match longer queries
        assert!(!matcher.matches("XNE5", "NE5"));
    }

    #[test]
    fn test_prefix_tier_is_shadowed_by_containment() {
        // A prefix is also a substring, so with default thresholds tier 2 wins
        assert_eq!(
            tier("TLV70", "TLV70230QDBVRQ1"),
            Some(MatchTier::TargetContainsQuery)
        );

        let config = MatchingConfig {
            min_contains_len: 10,
            ..MatchingConfig::default()
        };
        let matcher = TieredMatcher::new(&config);
        assert_eq!(
            matcher.matching_tier("TLV70", "TLV70230QDBVRQ1"),
            Some(MatchTier::Prefix)
        );
        assert_eq!(matcher.matching_tier("TLV7", "TLV70230QDBVRQ1"), None);
    }

    #[test]
    fn test_lm4050_length_floor_and_series_rule() {
        let target = normalize("LM4050QAEM3X5.0/NOPB");

        // At the default floor a four-digit fragment is long enough to contain-match
        let config = MatchingConfig::default();
        let matcher = TieredMatcher::new(&config);
        assert_eq!(
            matcher.matching_tier("4050", &target),
            Some(MatchTier::TargetContainsQuery)
        );
        // Three digits fall below the floor, and "405" is followed by a digit
        assert_eq!(matcher.matching_tier("405", &target), None);

        // Raising the floor leaves only the letter-bounded numeric rule
        let config = MatchingConfig {
            min_contains_len: 5,
            ..MatchingConfig::default()
        };
        let matcher = TieredMatcher::new(&config);
        assert_eq!(
            matcher.matching_tier("4050", &target),
            Some(MatchTier::Series("numeric"))
        );

        let strict = MatchingConfig {
            min_contains_len: 10,
            min_prefix_len: 10,
            ..MatchingConfig::default()
        };
        let matcher = TieredMatcher::new(&strict);
        assert_eq!(
            matcher.matching_tier("LM4050", &target),
            Some(MatchTier::Series("lm4050"))
        );
        assert_eq!(matcher.matching_tier("LM4050", "LM2903AVQDRG4Q1"), None);
    }

    #[test]
    fn test_series_rules() {
        assert_eq!(
            tier("TLV73333-Q1X", "TLV73333PQDRVRQ1"),
            Some(MatchTier::Series("tlv73333"))
        );
        assert_eq!(
            tier("LM63635XX", "LM63635DQDRRRQ1"),
            Some(MatchTier::Series("lm63635"))
        );
        assert_eq!(tier("STM", "STM32F103C8T6"), Some(MatchTier::Series("stm32")));
        assert_eq!(
            tier("STM32F103ZET6", "STM32F103C8T6"),
            Some(MatchTier::Series("stm32"))
        );
        assert_eq!(tier("STM", "STM8S003F3P6"), None);
    }

    #[test]
    fn test_first_firing_rule_decides() {
        // The tlv73333 gate fires and rejects, so the lm63635 rule is never consulted
        assert_eq!(tier("7333363635", "LM63635Q"), None);
    }

    #[test]
    fn test_contiguous_number_guard() {
        assert_eq!(tier("555", "NE555"), Some(MatchTier::Series("numeric")));
        assert_eq!(tier("555", "NE555P"), Some(MatchTier::Series("numeric")));
        assert_eq!(tier("555", "XX5550YY"), None);
        assert_eq!(tier("555", "5550ABC"), None);
        assert_eq!(tier("555", "NE5550ABC"), None);
    }

    #[test]
    fn test_is_contiguous_number_match() {
        assert!(is_contiguous_number_match("555", "NE555"));
        assert!(!is_contiguous_number_match("555", "555NE"));
        assert!(!is_contiguous_number_match("555", "NE5550"));
        assert!(!is_contiguous_number_match("555", "NE"));
    }

    #[test]
    fn test_empty_query_never_matches() {
        let config = MatchingConfig::default();
        let matcher = TieredMatcher::new(&config);
        assert!(!matcher.matches("", "STM32F103C8T6"));
        assert!(!matcher.matches("", ""));
    }

    #[test]
    fn test_custom_rule_table() {
        const RULES: &[SeriesRule] = &[SeriesRule {
            name: "ne555",
            applies: |query| query == "555",
            accepts: |_, target| target.starts_with("NE555"),
        }];
        let config = MatchingConfig::default();
        let matcher = TieredMatcher::with_rules(&config, RULES);
        assert_eq!(
            matcher.matching_tier("555", "NE5550ABC"),
            Some(MatchTier::Series("ne555"))
        );
    }
}

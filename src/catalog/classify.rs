//! Replacement-type classification from free-text catalogue annotations.
//!
//! Catalogue rows carry two free-text columns, "notes" and "advantages",
//! written by field engineers. Whether a replacement is pin-to-pin is derived
//! from these with an ordered rule table; the first rule that fires wins.

use crate::core::types::ReplaceType;

/// Annotation fields of one catalogue row
#[derive(Debug, Clone, Copy)]
pub struct Annotations<'a> {
    pub notes: &'a str,
    pub advantages: &'a str,
}

impl Annotations<'_> {
    fn either_lower_contains(&self, needles: &[&str]) -> bool {
        let notes = self.notes.to_lowercase();
        let advantages = self.advantages.to_lowercase();
        needles
            .iter()
            .any(|needle| notes.contains(needle) || advantages.contains(needle))
    }
}

/// One classification rule
pub struct ClassificationRule {
    pub name: &'static str,
    pub fires: fn(&Annotations<'_>) -> bool,
    pub outcome: ReplaceType,
}

impl std::fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("name", &self.name)
            .field("outcome", &self.outcome)
            .finish()
    }
}

/// Explicit "not P2P" markers; checked before any positive marker
const NEGATED_P2P: &[&str] = &["非p2p", "非 p2p"];

/// Notes phrases that mark a P2P replacement with extra qualifiers
const P2P_COMPOUND_PHRASES: &[&str] = &["P2P，计划", "P2P，非车规", "P2P，车规", "P2P，参数"];

const PIN_TO_PIN_SPELLINGS: &[&str] = &["pin2pin", "pin to pin"];

/// Built-in rules in evaluation order
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "negated-p2p",
        fires: |a| a.either_lower_contains(NEGATED_P2P),
        outcome: ReplaceType::FunctionalEquivalent,
    },
    ClassificationRule {
        name: "p2p-marker",
        fires: |a| {
            a.notes == "P2P"
                || a.notes == "p2p"
                || a.notes.starts_with("P2P,")
                || a.notes.starts_with("P2P，")
                || P2P_COMPOUND_PHRASES.iter().any(|p| a.notes.contains(p))
                || a.advantages.to_lowercase().contains("p2p")
        },
        outcome: ReplaceType::PinToPin,
    },
    ClassificationRule {
        name: "pin-to-pin-spelling",
        fires: |a| a.either_lower_contains(PIN_TO_PIN_SPELLINGS),
        outcome: ReplaceType::PinToPin,
    },
];

/// Classify a replacement from its notes and advantages columns.
///
/// Falls back to [`ReplaceType::FunctionalEquivalent`] when no rule fires.
#[must_use]
pub fn classify(notes: &str, advantages: &str) -> ReplaceType {
    let annotations = Annotations { notes, advantages };
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| (rule.fires)(&annotations))
        .map_or(ReplaceType::FunctionalEquivalent, |rule| rule.outcome)
}

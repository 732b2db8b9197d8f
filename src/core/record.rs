use serde::{Deserialize, Serialize};

use crate::core::types::ReplaceType;

/// Function text used when a catalogue row does not describe the part
pub const UNSPECIFIED_FUNCTION: &str = "未描述";

/// A catalogued replacement for an original part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReferenceRecord {
    /// Manufacturer part number being replaced
    pub original_model: String,

    /// Manufacturer of the original part (may be empty)
    #[serde(default)]
    pub original_brand: String,

    /// Substitute part number
    pub replacement_model: String,

    /// Manufacturer of the substitute
    #[serde(default)]
    pub replacement_brand: String,

    /// Free-text function summary
    #[serde(default = "default_function")]
    pub function: String,

    pub replace_type: ReplaceType,
}

fn default_function() -> String {
    UNSPECIFIED_FUNCTION.to_string()
}

impl CrossReferenceRecord {
    /// Build a record, trimming every field.
    ///
    /// Returns `None` when either part number is empty after trimming; such
    /// rows never enter the catalog.
    pub fn new(
        original_model: impl AsRef<str>,
        replacement_model: impl AsRef<str>,
        replace_type: ReplaceType,
    ) -> Option<Self> {
        let original_model = original_model.as_ref().trim();
        let replacement_model = replacement_model.as_ref().trim();
        if original_model.is_empty() || replacement_model.is_empty() {
            return None;
        }

        Some(Self {
            original_model: original_model.to_string(),
            original_brand: String::new(),
            replacement_model: replacement_model.to_string(),
            replacement_brand: String::new(),
            function: default_function(),
            replace_type,
        })
    }

    #[must_use]
    pub fn with_original_brand(mut self, brand: impl AsRef<str>) -> Self {
        self.original_brand = brand.as_ref().trim().to_string();
        self
    }

    #[must_use]
    pub fn with_replacement_brand(mut self, brand: impl AsRef<str>) -> Self {
        self.replacement_brand = brand.as_ref().trim().to_string();
        self
    }

    /// Set the function text; blank input keeps the "unspecified" sentinel
    #[must_use]
    pub fn with_function(mut self, function: impl AsRef<str>) -> Self {
        let function = function.as_ref().trim();
        if !function.is_empty() {
            self.function = function.to_string();
        }
        self
    }

    /// True when both part numbers are non-empty after trimming
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.original_model.trim().is_empty() && !self.replacement_model.trim().is_empty()
    }

    /// Composite key used for result deduplication
    #[must_use]
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.original_model, &self.replacement_model)
    }
}

impl std::fmt::Display for CrossReferenceRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.original_model)?;
        if !self.original_brand.is_empty() {
            write!(f, " ({})", self.original_brand)?;
        }
        write!(f, " -> {}", self.replacement_model)?;
        if !self.replacement_brand.is_empty() {
            write!(f, " ({})", self.replacement_brand)?;
        }
        write!(f, " [{}]", self.replace_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_defaults() {
        let record = CrossReferenceRecord::new("  STM32F103C8T6 ", "GD32F103C8T6", ReplaceType::PinToPin)
            .unwrap()
            .with_replacement_brand(" GigaDevice ")
            .with_function("   ");

        assert_eq!(record.original_model, "STM32F103C8T6");
        assert_eq!(record.replacement_brand, "GigaDevice");
        assert_eq!(record.function, UNSPECIFIED_FUNCTION);
        assert!(record.original_brand.is_empty());
        assert!(record.is_valid());
    }

    #[test]
    fn test_new_rejects_blank_part_numbers() {
        assert!(CrossReferenceRecord::new("", "GD32F103C8T6", ReplaceType::PinToPin).is_none());
        assert!(CrossReferenceRecord::new("STM32F103C8T6", "  ", ReplaceType::PinToPin).is_none());
    }

    #[test]
    fn test_display() {
        let record = CrossReferenceRecord::new("TLV73333PDBVR", "TPL730F33-5TR", ReplaceType::PinToPin)
            .unwrap()
            .with_original_brand("TI")
            .with_replacement_brand("3peak");
        assert_eq!(
            record.to_string(),
            "TLV73333PDBVR (TI) -> TPL730F33-5TR (3peak) [P2P]"
        );
    }

    #[test]
    fn test_deserialize_missing_function_uses_sentinel() {
        let json = r#"{
            "original_model": "LM2903AVQDRG4Q1",
            "replacement_model": "LM2903AL1-SR",
            "replace_type": "pin_to_pin"
        }"#;
        let record: CrossReferenceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.function, UNSPECIFIED_FUNCTION);
        assert_eq!(record.dedup_key(), ("LM2903AVQDRG4Q1", "LM2903AL1-SR"));
    }
}

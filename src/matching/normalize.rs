//! Part-number normalization.

/// Normalize a part number for comparison.
///
/// Uppercases, drops whitespace, `-`, `_` and `/`, then strips every other
/// character that is not an ASCII letter or digit. The result only contains
/// `[A-Z0-9]`, so normalizing twice gives the same string.
///
/// # Examples
///
/// ```
/// use chip_xref::matching::normalize::normalize;
///
/// assert_eq!(normalize("stm32-F103"), "STM32F103");
/// assert_eq!(normalize("LM4050QAEM3X5.0/NOPB"), "LM4050QAEM3X50NOPB");
/// assert_eq!(normalize("TLV73333PDBVR SOT23-5"), "TLV73333PDBVRSOT235");
/// ```
#[must_use]
pub fn normalize(model: &str) -> String {
    model
        .to_uppercase()
        .chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '-' | '_' | '/')))
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

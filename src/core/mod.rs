//! Core data types for component cross-reference lookup.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`record::CrossReferenceRecord`]: One original part and one catalogued replacement
//! - [`types::ReplaceType`]: Whether the replacement is pin-to-pin or only functionally equivalent
//!
//! ## Part Numbers
//!
//! Part numbers arrive in many spellings. The same device may be written as
//! `STM32F103C8T6`, `stm32f103c8t6` or `STM32-F103C8T6`, and catalogue entries
//! often carry package suffixes such as `TLV73333PDBVR SOT23-5`. Records keep
//! the part numbers exactly as catalogued; matching always compares the
//! normalized form (see [`crate::matching::normalize`]).

pub mod record;
pub mod types;

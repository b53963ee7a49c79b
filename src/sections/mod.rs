//! Strength evaluation sections
//!
//! Each section scores one aspect of the password independently.

mod length;
mod variety;

pub use length::length_section;
pub use variety::{digit_section, special_section, uppercase_section};

/// Points awarded by a section, plus a hint when the maximum was not reached.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionScore {
    pub points: f64,
    pub reason: Option<String>,
}

/// Which sub-score a section fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Length,
    Digits,
    Special,
    Uppercase,
}

pub type SectionFn = fn(&secrecy::SecretString, &crate::config::ScoringConfig) -> SectionScore;

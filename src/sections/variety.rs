//! Character variety sections - digits, ASCII punctuation, uppercase letters.

use secrecy::{ExposeSecret, SecretString};

use super::SectionScore;
use crate::config::ScoringConfig;

fn class_score(count: usize, config: &ScoringConfig, what: &str) -> SectionScore {
    let counted = count.min(config.class_cap);
    let reason = (count < config.class_cap)
        .then(|| format!("Add at least {} {}", config.class_cap, what));

    SectionScore {
        points: counted as f64 * config.class_weight,
        reason,
    }
}

/// Numeric characters that are not letters: ASCII and other-script decimal
/// digits (`٣`, `७`) plus digit-like symbols (`²`, `①`). Letter-numbers such
/// as `Ⅻ` are excluded.
fn is_digit(c: char) -> bool {
    c.is_numeric() && !c.is_alphabetic()
}

/// Scores digits in any script.
pub fn digit_section(password: &SecretString, config: &ScoringConfig) -> SectionScore {
    let count = password
        .expose_secret()
        .chars()
        .filter(|&c| is_digit(c))
        .count();
    class_score(count, config, "digits")
}

/// Scores ASCII punctuation, the 32 symbols between `!` and `~` that are
/// neither letters nor digits.
pub fn special_section(password: &SecretString, config: &ScoringConfig) -> SectionScore {
    let count = password
        .expose_secret()
        .chars()
        .filter(|c| c.is_ascii_punctuation())
        .count();
    class_score(count, config, "special characters")
}

/// Scores uppercase letters, including non-ASCII ones.
pub fn uppercase_section(password: &SecretString, config: &ScoringConfig) -> SectionScore {
    let count = password
        .expose_secret()
        .chars()
        .filter(|c| c.is_uppercase())
        .count();
    class_score(count, config, "uppercase letters")
}

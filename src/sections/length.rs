//! Length section - scales linearly up to the target length.

use secrecy::{ExposeSecret, SecretString};

use super::SectionScore;
use crate::config::ScoringConfig;

/// Scores the password length, counted in characters.
///
/// Yields `min(len / target, 1) * weight`, so it saturates once the
/// password reaches `target_length`.
pub fn length_section(password: &SecretString, config: &ScoringConfig) -> SectionScore {
    let len = password.expose_secret().chars().count();

    // A zero target means any length already saturates.
    let ratio = if config.target_length == 0 {
        1.0
    } else {
        (len as f64 / config.target_length as f64).min(1.0)
    };

    let reason = (len < config.target_length).then(|| {
        format!(
            "Password should be at least {} characters",
            config.target_length
        )
    });

    SectionScore {
        points: ratio * config.length_weight,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[test]
    fn test_length_section_empty() {
        let result = length_section(&secret(""), &ScoringConfig::default());
        assert_eq!(result.points, 0.0);
        assert_eq!(
            result.reason,
            Some("Password should be at least 8 characters".to_string())
        );
    }

    #[test]
    fn test_length_section_scales_linearly() {
        let result = length_section(&secret("abcd"), &ScoringConfig::default());
        assert_eq!(result.points, 20.0);

        let result = length_section(&secret("abcdefg"), &ScoringConfig::default());
        assert_eq!(result.points, 35.0);
    }

    #[test]
    fn test_length_section_exactly_target() {
        let result = length_section(&secret("12345678"), &ScoringConfig::default());
        assert_eq!(result.points, 40.0);
        assert_eq!(result.reason, None);
    }

    #[test]
    fn test_length_section_saturates() {
        let result = length_section(&secret("a much longer passphrase"), &ScoringConfig::default());
        assert_eq!(result.points, 40.0);
    }

    #[test]
    fn test_length_section_counts_chars_not_bytes() {
        // 4 chars, 8 bytes
        let result = length_section(&secret("ééèè"), &ScoringConfig::default());
        assert_eq!(result.points, 20.0);
    }
}

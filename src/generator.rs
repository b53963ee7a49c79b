//! Random password generation over a fixed alphabet.
//!
//! Characters are drawn independently and uniformly, with replacement, from
//! the alphabet. The default random source is `rand::rng()`, a thread-local
//! CSPRNG reseeded from the OS.

use rand::Rng;
use secrecy::SecretString;
use thiserror::Error;

/// Length used when the caller has no preference.
pub const DEFAULT_LENGTH: usize = 12;
/// Smallest length a front-end should offer.
pub const MIN_UI_LENGTH: usize = 8;
/// Largest length a front-end should offer.
pub const MAX_UI_LENGTH: usize = 32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Password length must not be negative, got {0}")]
    InvalidLength(i64),
    #[error("Alphabet must contain at least one character")]
    EmptyAlphabet,
}

/// A non-empty set of distinct characters to sample from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Builds an alphabet, dropping duplicates so every distinct character
    /// keeps the same probability.
    ///
    /// # Errors
    ///
    /// Returns `EmptyAlphabet` if `chars` yields nothing.
    pub fn new(chars: impl IntoIterator<Item = char>) -> Result<Self, GeneratorError> {
        let mut unique = Vec::new();
        for c in chars {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }

        if unique.is_empty() {
            return Err(GeneratorError::EmptyAlphabet);
        }
        Ok(Self { chars: unique })
    }

    /// ASCII letters (lower then upper), digits and the 32 ASCII punctuation
    /// characters: 94 symbols.
    pub fn standard() -> Self {
        let chars = ('a'..='z')
            .chain('A'..='Z')
            .chain('0'..='9')
            .chain(('!'..='~').filter(char::is_ascii_punctuation))
            .collect();
        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        self.chars[rng.random_range(0..self.chars.len())]
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Generates passwords from a configurable alphabet.
#[derive(Debug, Clone, Default)]
pub struct PasswordGenerator {
    alphabet: Alphabet,
}

impl PasswordGenerator {
    pub fn new(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Generates a password of exactly `length` characters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLength` if `length` is negative.
    pub fn generate(&self, length: i64) -> Result<SecretString, GeneratorError> {
        self.generate_with_rng(length, &mut rand::rng())
    }

    /// Same as [`generate`](Self::generate) with a caller-supplied random
    /// source, e.g. a seeded `StdRng` for reproducible output.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        length: i64,
        rng: &mut R,
    ) -> Result<SecretString, GeneratorError> {
        let length = usize::try_from(length).map_err(|_| GeneratorError::InvalidLength(length))?;

        let password: String = (0..length).map(|_| self.alphabet.sample(&mut *rng)).collect();

        #[cfg(feature = "tracing")]
        tracing::debug!("Generated password of {} characters", length);

        Ok(SecretString::new(password.into()))
    }
}

/// Generates a password of `length` characters from the standard alphabet.
///
/// Short lengths can produce passwords that score `Weak`.
pub fn generate_password(length: i64) -> Result<SecretString, GeneratorError> {
    PasswordGenerator::default().generate(length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use secrecy::ExposeSecret;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_standard_alphabet() {
        let alphabet = Alphabet::standard();
        assert_eq!(alphabet.len(), 94);
        assert!(!alphabet.is_empty());
        assert!(alphabet.contains('a'));
        assert!(alphabet.contains('Z'));
        assert!(alphabet.contains('7'));
        assert!(alphabet.contains('~'));
        assert!(alphabet.contains('\\'));
        assert!(!alphabet.contains(' '));

        let distinct: HashSet<char> = alphabet.as_slice().iter().copied().collect();
        assert_eq!(distinct.len(), 94);
    }

    #[test]
    fn test_alphabet_rejects_empty() {
        assert_eq!(Alphabet::new("".chars()), Err(GeneratorError::EmptyAlphabet));
    }

    #[test]
    fn test_alphabet_dedupes() {
        let alphabet = Alphabet::new("aabbc".chars()).expect("non-empty");
        assert_eq!(alphabet.as_slice(), &['a', 'b', 'c']);
    }

    #[test]
    fn test_generate_exact_lengths() {
        let alphabet = Alphabet::standard();
        for n in [0, 1, 8, 32, 100] {
            let pwd = generate_password(n).expect("non-negative length");
            let pwd = pwd.expose_secret();
            assert_eq!(pwd.chars().count(), n as usize);
            assert!(pwd.chars().all(|c| alphabet.contains(c)), "{pwd}");
        }
    }

    #[test]
    fn test_generate_negative_length() {
        let result = generate_password(-1);
        assert!(matches!(result, Err(GeneratorError::InvalidLength(-1))));
    }

    #[test]
    fn test_generate_covers_alphabet() {
        // 94 * 200 draws: missing any symbol is astronomically unlikely
        let generator = PasswordGenerator::default();
        let pwd = generator.generate(94 * 200).expect("valid length");

        let mut counts: HashMap<char, usize> = HashMap::new();
        for c in pwd.expose_secret().chars() {
            *counts.entry(c).or_default() += 1;
        }

        assert_eq!(counts.len(), 94);
        // Expected 200 per symbol; allow a wide band
        assert!(counts.values().all(|&n| (80..=360).contains(&n)), "{counts:?}");
    }

    #[test]
    fn test_generate_rarely_collides() {
        let generator = PasswordGenerator::default();
        let drawn: HashSet<String> = (0..1000)
            .map(|_| {
                generator
                    .generate(12)
                    .expect("valid length")
                    .expose_secret()
                    .to_string()
            })
            .collect();
        assert_eq!(drawn.len(), 1000);
    }

    #[test]
    fn test_generate_with_seeded_rng_is_reproducible() {
        let generator = PasswordGenerator::default();
        let a = generator
            .generate_with_rng(16, &mut StdRng::seed_from_u64(42))
            .expect("valid length");
        let b = generator
            .generate_with_rng(16, &mut StdRng::seed_from_u64(42))
            .expect("valid length");
        assert_eq!(a.expose_secret(), b.expose_secret());
    }

    #[test]
    fn test_generate_custom_alphabet() {
        let generator = PasswordGenerator::new(Alphabet::new("01".chars()).expect("non-empty"));
        let pwd = generator.generate(64).expect("valid length");
        assert!(pwd.expose_secret().chars().all(|c| c == '0' || c == '1'));
    }
}

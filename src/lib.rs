//! Password hygiene library
//!
//! Three independent features:
//!
//! - heuristic strength scoring ([`score_password`])
//! - random password generation ([`generate_password`])
//! - breach lookup through the k-anonymity range API ([`BreachChecker`],
//!   [`check_breach`])
//!
//! # Features
//!
//! - `async` (default): Enables channel-based scoring and breach lookup with
//!   cancellation support
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! Read only by [`BreachConfig::from_env`]:
//!
//! - `PWD_HIBP_ENDPOINT`: Range API base URL
//!   (default: `https://api.pwnedpasswords.com/range/`)
//! - `PWD_HIBP_TIMEOUT_SECS`: Request timeout in seconds (default: `10`)
//! - `PWD_HIBP_ADD_PADDING`: Request padded responses (default: `false`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_hygiene::{BreachChecker, BreachConfig, BreachStatus, generate_password, score_password};
//! use secrecy::SecretString;
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//!
//! let score = score_password(&password);
//! println!("Strength: {} ({})", score.category, score.score);
//!
//! let generated = generate_password(16).expect("non-negative length");
//!
//! let checker = BreachChecker::new(BreachConfig::from_env()?)?;
//! match checker.check(&password) {
//!     BreachStatus::Breached(count) => println!("Seen {count} times, change it"),
//!     BreachStatus::NotBreached => println!("Not found in known breaches"),
//!     BreachStatus::LookupFailed(e) => println!("Could not check: {e}"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Internal modules
mod breach;
mod config;
mod generator;
mod scorer;
mod sections;
mod types;

// Public API
pub use breach::{
    check_breach, find_suffix, BreachChecker, BreachError, HashRange, HttpRangeFetcher,
    RangeFetcher, RangeResponse, PREFIX_LEN,
};
pub use config::{
    BreachConfig, ConfigError, ScoringConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, ENDPOINT_ENV,
    PADDING_ENV, TIMEOUT_ENV,
};
pub use generator::{
    generate_password, Alphabet, GeneratorError, PasswordGenerator, DEFAULT_LENGTH,
    MAX_UI_LENGTH, MIN_UI_LENGTH,
};
pub use scorer::{score_password, score_password_with};
pub use types::{BreachResult, BreachStatus, ScoreResult, StrengthCategory, SubScores};

#[cfg(feature = "async")]
pub use breach::{check_breach_tx, AsyncBreachChecker, AsyncHttpRangeFetcher, AsyncRangeFetcher};

#[cfg(feature = "async")]
pub use scorer::{score_password_cancellable, score_password_tx};

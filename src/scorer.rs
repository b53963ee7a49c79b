//! Password strength scorer - runs the sections and sums their points.

use secrecy::SecretString;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::config::ScoringConfig;
use crate::sections::{
    digit_section, length_section, special_section, uppercase_section, SectionFn, SectionKind,
};
use crate::types::{ScoreResult, SubScores};

const SECTIONS: [(SectionKind, SectionFn); 4] = [
    (SectionKind::Length, length_section),
    (SectionKind::Digits, digit_section),
    (SectionKind::Special, special_section),
    (SectionKind::Uppercase, uppercase_section),
];

/// Scores a password with the default weights and thresholds.
///
/// Total over every input: the empty string scores `0` and is `Weak`.
pub fn score_password(password: &SecretString) -> ScoreResult {
    score_password_with(password, &ScoringConfig::default())
}

/// Scores a password with custom weights and thresholds.
pub fn score_password_with(password: &SecretString, config: &ScoringConfig) -> ScoreResult {
    run_sections(password, config, || false).unwrap_or_else(|| empty_result(config))
}

/// Scores a password, checking `token` before each section.
///
/// # Returns
/// `None` if the token was cancelled before scoring finished.
#[cfg(feature = "async")]
pub fn score_password_cancellable(
    password: &SecretString,
    config: &ScoringConfig,
    token: Option<CancellationToken>,
) -> Option<ScoreResult> {
    run_sections(password, config, || {
        token.as_ref().is_some_and(|t| t.is_cancelled())
    })
}

/// Async version that sends the score via channel.
///
/// Nothing is sent when the token is cancelled.
#[cfg(feature = "async")]
pub async fn score_password_tx(
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<ScoreResult>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("scoring is about to start...");

    let Some(result) = score_password_cancellable(password, &ScoringConfig::default(), Some(token))
    else {
        #[cfg(feature = "tracing")]
        tracing::info!("Scoring cancelled");
        return;
    };

    if let Err(_e) = tx.send(result).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password score: {}", _e);
    }
}

fn run_sections(
    password: &SecretString,
    config: &ScoringConfig,
    is_cancelled: impl Fn() -> bool,
) -> Option<ScoreResult> {
    let mut breakdown = SubScores::default();
    let mut reasons = Vec::new();

    // Orchestrator: execute sections in sequence
    for (kind, section_fn) in SECTIONS {
        if is_cancelled() {
            return None;
        }

        let section = section_fn(password, config);
        let slot = match kind {
            SectionKind::Length => &mut breakdown.length,
            SectionKind::Digits => &mut breakdown.digits,
            SectionKind::Special => &mut breakdown.special,
            SectionKind::Uppercase => &mut breakdown.uppercase,
        };
        *slot = section.points;
        reasons.extend(section.reason);
    }

    let score = breakdown.total();
    Some(ScoreResult {
        category: config.category_for(score),
        score,
        breakdown,
        reasons,
    })
}

fn empty_result(config: &ScoringConfig) -> ScoreResult {
    ScoreResult {
        category: config.category_for(0.0),
        score: 0.0,
        breakdown: SubScores::default(),
        reasons: Vec::new(),
    }
}

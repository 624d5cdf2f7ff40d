//! # Value Objects
//!
//! Registry configuration and reputation arithmetic.

use serde::{Deserialize, Serialize};
use shared_types::Amount;

/// Bond debited on registration, in minor units.
pub const DEFAULT_BOND_AMOUNT: Amount = 20_000_000;

/// Reputation granted to a freshly registered indexer.
pub const INITIAL_REPUTATION: u16 = 500;

/// Upper bound of the reputation score.
pub const MAX_REPUTATION: u16 = 1000;

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Bond debited from the indexer on registration.
    pub bond_amount: Amount,
    /// Starting reputation.
    pub initial_reputation: u16,
    /// Reputation gained per successful submission.
    pub reputation_reward: u16,
    /// Reputation lost per failed submission.
    pub reputation_penalty: u16,
    /// Reputation ceiling.
    pub max_reputation: u16,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            bond_amount: DEFAULT_BOND_AMOUNT,
            initial_reputation: INITIAL_REPUTATION,
            reputation_reward: 5,
            reputation_penalty: 10,
            max_reputation: MAX_REPUTATION,
        }
    }
}

impl RegistryConfig {
    /// Effective reputation ceiling, never above [`MAX_REPUTATION`].
    pub fn reputation_ceiling(&self) -> u16 {
        self.max_reputation.min(MAX_REPUTATION)
    }

    /// Starting score, clamped to the ceiling.
    pub fn initial_score(&self) -> ReputationScore {
        ReputationScore(self.initial_reputation.min(self.reputation_ceiling()))
    }
}

/// Outcome fed into a reputation adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReputationOutcome {
    Success,
    Failure,
}

/// Reputation score clamped to `[0, max_reputation]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReputationScore(u16);

impl ReputationScore {
    pub const fn new(score: u16) -> Self {
        Self(score)
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    /// Apply an outcome with explicit clamping; never wraps.
    pub fn adjust(self, outcome: ReputationOutcome, config: &RegistryConfig) -> Self {
        let next = match outcome {
            ReputationOutcome::Success => self
                .0
                .saturating_add(config.reputation_reward)
                .min(config.reputation_ceiling()),
            ReputationOutcome::Failure => self.0.saturating_sub(config.reputation_penalty),
        };
        Self(next)
    }
}

//! # Types
//!
//! Shared data structures used across all modules of the CoDev protocol.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A `Project` is internally stored as two separate ledger entries:
//!
//! - [`ProjectConfig`]: written once at creation; never mutated.
//! - [`ProjectState`]: written on voter assignment and reward distribution.
//!
//! The public API exposes the reconstructed [`Project`] struct for convenience.
//!
//! ### Lifecycle as a two-state machine
//!
//! A project is either open (`rewarded == false`) or closed
//! (`rewarded == true`). The transition happens exactly once, inside a
//! successful `distribute_rewards`, and is one-way: a closed project rejects
//! every mutating entry point. There is no cancellation or refund path.
//!
//! ### Registration order is meaningful
//!
//! Contributions are kept in an insertion-ordered `Vec`. Score listings
//! follow that order, and the WinnerTakesAll tie-break ("first registered
//! contribution wins") falls out of it without relying on map iteration.

use soroban_sdk::{contracttype, Address, String, Vec};

/// Immutable project configuration, written once at creation.
///
/// Stored separately from mutable state so that the frequent writers
/// (voter assignment, distribution flag) touch only the small
/// [`ProjectState`] entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    /// Externally supplied unique identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Total reward pot, 18-decimal fixed-point units.
    pub total_reward: i128,
    /// Contributors' share of the pot in percent (0..=100); the rest goes
    /// to voters.
    pub contributors_percent: u32,
    /// Index into the registered reward-model directory.
    pub model_index: u32,
}

/// Mutable project state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectState {
    /// Assigned voter set; empty until `assign_voters`, settable exactly once.
    pub voters: Vec<Address>,
    /// Terminal flag, flipped by a successful `distribute_rewards`.
    pub rewarded: bool,
}

/// Full representation of a project.
///
/// Used as the public API return type; reconstructed internally from the
/// split `ProjectConfig` + `ProjectState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub total_reward: i128,
    pub contributors_percent: u32,
    pub model_index: u32,
    pub voters: Vec<Address>,
    pub rewarded: bool,
}

/// A submitted piece of work that can receive votes.
///
/// One record per (project, owner); re-submission updates `title` in place.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contribution {
    pub owner: Address,
    pub title: String,
}

/// A voter's single outstanding vote in a project.
///
/// The `amount` is staked into contract custody while the vote is active.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vote {
    pub voter: Address,
    pub votee: Address,
    pub amount: i128,
}

/// Derived per-votee score: the sum of all vote amounts targeting `owner`.
///
/// Never stored; recomputed from the live vote set on every read.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Score {
    pub owner: Address,
    pub value: i128,
}

/// The closed set of reward-splitting strategies.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ModelKind {
    /// Votee share proportional to score; voter share proportional to vote
    /// amount with a multiplier bonus for voters who backed a top-scored
    /// votee.
    Proportional,
    /// Voters' pool split equally per voting voter; votee side identical
    /// to `Proportional`.
    EvenVoter,
    /// The first-registered votee with the highest score takes the whole
    /// contributors' pool.
    WinnerTakesAll,
}

/// A registered reward model: strategy plus its tuning parameters.
///
/// The directory of models is append-only, so `model_index` references
/// stay stable for the life of the contract.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardModel {
    pub kind: ModelKind,
    pub name: String,
    /// Weight multiplier for voters whose votee holds the top score
    /// (Proportional only; 15 by convention).
    pub winner_mult: u32,
    /// Weight multiplier for every other voter (Proportional only; 10 by
    /// convention).
    pub base_mult: u32,
    /// Dust filter: a votee whose score is below `10^floor_exp` receives a
    /// zero contributor share. Its score still shows up in listings.
    pub floor_exp: u32,
}

/// The fixed value budget of a project, as handed to a reward model.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPot {
    pub total: i128,
    pub contributors_percent: u32,
}

/// One payout line of a computed split.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reward {
    pub to: Address,
    pub amount: i128,
}

/// The result of a reward computation.
///
/// `votee_rewards` is aligned with the project's contribution list
/// (registration order); `voter_rewards` with the vote list. The exact
/// reconciliation invariant holds:
/// `remainder + sum(votee_rewards) + sum(voter_rewards) == pot total`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardSplit {
    pub votee_rewards: Vec<Reward>,
    pub voter_rewards: Vec<Reward>,
    /// Unallocated truncation residue, kept in manager custody.
    pub remainder: i128,
}

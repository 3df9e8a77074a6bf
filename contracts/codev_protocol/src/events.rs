//! Typed contract events.
//!
//! Every state-changing entry point publishes one event with a short
//! symbol topic plus the project id, carrying the changed fields as a
//! `#[contracttype]` struct so off-chain indexers can decode them without
//! guessing at tuple layouts.
//!
//! | Topic     | Data                     |
//! |-----------|--------------------------|
//! | `created` | [`ProjectCreated`]       |
//! | `voters`  | [`VotersAssigned`]       |
//! | `contrib` | [`ContributionUpserted`] |
//! | `vote`    | [`VoteCast`]             |
//! | `unvote`  | [`VoteWithdrawn`]        |
//! | `reward`  | [`RewardsDistributed`]   |

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

/// A new project was created and its pot escrowed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCreated {
    pub project_id: u64,
    pub name: String,
    pub total_reward: i128,
    pub contributors_percent: u32,
    pub model_index: u32,
}

/// The one-shot voter set was assigned.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VotersAssigned {
    pub project_id: u64,
    pub count: u32,
}

/// A contribution was registered or its title updated.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionUpserted {
    pub project_id: u64,
    pub owner: Address,
    /// `true` when an existing record was updated rather than appended.
    pub updated: bool,
}

/// A vote was cast; `replaced` marks a re-cast that displaced an earlier
/// vote (whose stake was refunded in the same call).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCast {
    pub project_id: u64,
    pub voter: Address,
    pub votee: Address,
    pub amount: i128,
    pub replaced: bool,
}

/// A vote was withdrawn and its stake refunded.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteWithdrawn {
    pub project_id: u64,
    pub voter: Address,
    pub amount: i128,
}

/// Rewards were paid out and the project closed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsDistributed {
    pub project_id: u64,
    pub total_reward: i128,
    pub remainder: i128,
}

pub fn emit_project_created(env: &Env, data: ProjectCreated) {
    env.events()
        .publish((symbol_short!("created"), data.project_id), data);
}

pub fn emit_voters_assigned(env: &Env, data: VotersAssigned) {
    env.events()
        .publish((symbol_short!("voters"), data.project_id), data);
}

pub fn emit_contribution_upserted(env: &Env, data: ContributionUpserted) {
    env.events()
        .publish((symbol_short!("contrib"), data.project_id), data);
}

pub fn emit_vote_cast(env: &Env, data: VoteCast) {
    env.events()
        .publish((symbol_short!("vote"), data.project_id), data);
}

pub fn emit_vote_withdrawn(env: &Env, data: VoteWithdrawn) {
    env.events()
        .publish((symbol_short!("unvote"), data.project_id), data);
}

pub fn emit_rewards_distributed(env: &Env, data: RewardsDistributed) {
    env.events()
        .publish((symbol_short!("reward"), data.project_id), data);
}

//! # CoDev Reward Protocol Contract
//!
//! Root crate of the **CoDev reward protocol**: project-based
//! crowd-contribution funding where voters allocate a scarce vote budget
//! to contributors and a fixed reward pot is split between both sides by a
//! pluggable reward model. It exposes the single Soroban contract
//! [`CodevProtocol`] whose entry points cover the full project lifecycle:
//!
//! | Phase         | Entry Point(s)                                  |
//! |---------------|-------------------------------------------------|
//! | Bootstrap     | [`CodevProtocol::init`]                         |
//! | Model registry| `register_reward_model`, `get_reward_model`     |
//! | Creation      | [`CodevProtocol::create_project`]               |
//! | Voter setup   | [`CodevProtocol::assign_voters`]                |
//! | Contributions | [`CodevProtocol::add_or_update_contribution`]   |
//! | Voting        | `cast_vote`, `withdraw_vote`                    |
//! | Settlement    | `simulate_rewards`, `distribute_rewards`        |
//! | Queries       | `get_project`, `get_votes_by_project`, `get_scores_by_project`, ... |
//!
//! ## Architecture
//!
//! Storage access is fully delegated to [`storage`], event emission to
//! [`events`], and the reward mathematics to [`rewards`]. This file
//! contains only the public entry points and their guards.
//!
//! Every entry point either commits completely or panics with an
//! [`Error`], which reverts the whole invocation including any token
//! transfers already staged; there is no partial commit.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env, String, Vec,
};

mod events;
mod math;
mod rewards;
mod storage;
mod types;

#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_lifecycle;

use events::{
    ContributionUpserted, ProjectCreated, RewardsDistributed, VoteCast, VoteWithdrawn,
    VotersAssigned,
};
use storage::{
    load_contributions, load_project, load_project_config, load_project_state, load_reward_model,
    load_votes, project_exists, save_contributions, save_project, save_project_state, save_votes,
};
pub use types::{
    Contribution, ModelKind, Project, ProjectConfig, ProjectState, Reward, RewardModel, RewardPot,
    RewardSplit, Score, Vote,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized        = 1,
    AlreadyInitialized    = 2,
    ProjectNotFound       = 3,
    ProjectAlreadyExists  = 4,
    InvalidPercent        = 5,
    InvalidAmount         = 6,
    ModelNotFound         = 7,
    VotersAlreadyAssigned = 8,
    EmptyVoters           = 9,
    DuplicateVoter        = 10,
    NotAVoter             = 11,
    ContributionNotFound  = 12,
    NoActiveVote          = 13,
    NoVotes               = 14,
    AlreadyRewarded       = 15,
}

#[contract]
pub struct CodevProtocol;

#[contractimpl]
impl CodevProtocol {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract with the managing admin and the reward token.
    ///
    /// Must be called exactly once after deployment; subsequent calls panic
    /// with `Error::AlreadyInitialized`. The admin is the only identity
    /// allowed to create projects, assign voters, register contributions
    /// and models, and distribute rewards.
    pub fn init(env: Env, admin: Address, token: Address) {
        admin.require_auth();
        if storage::is_initialized(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        storage::set_admin(&env, &admin);
        storage::set_token(&env, &token);
    }

    // ─────────────────────────────────────────────────────────
    // Reward-model registry
    // ─────────────────────────────────────────────────────────

    /// Register a reward model. Append-only; the returned index stays
    /// valid for the life of the contract.
    pub fn register_reward_model(env: Env, model: RewardModel) -> u32 {
        require_admin(&env);
        storage::push_reward_model(&env, &model)
    }

    /// Retrieve a registered reward model by index.
    pub fn get_reward_model(env: Env, index: u32) -> RewardModel {
        load_reward_model(&env, index)
    }

    pub fn get_number_of_reward_models(env: Env) -> u32 {
        storage::reward_model_count(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Project lifecycle
    // ─────────────────────────────────────────────────────────

    /// Create a project and escrow its whole reward pot.
    ///
    /// `id` is externally supplied and must be unique. The pot
    /// (`total_reward` units of the reward token) is transferred from the
    /// admin into contract custody here, so `distribute_rewards` pays out
    /// of escrow and never mints.
    pub fn create_project(
        env: Env,
        id: u64,
        name: String,
        total_reward: i128,
        contributors_percent: u32,
        model_index: u32,
    ) -> Project {
        let admin = require_admin(&env);

        if project_exists(&env, id) {
            panic_with_error!(&env, Error::ProjectAlreadyExists);
        }
        if contributors_percent > 100 {
            panic_with_error!(&env, Error::InvalidPercent);
        }
        if total_reward <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }
        // Rejects an unregistered model index.
        load_reward_model(&env, model_index);

        let config = ProjectConfig {
            id,
            name: name.clone(),
            total_reward,
            contributors_percent,
            model_index,
        };
        let state = ProjectState {
            voters: Vec::new(&env),
            rewarded: false,
        };
        save_project(&env, &config, &state);
        storage::push_project_id(&env, id);

        // Escrow the pot.
        let token_client = token::Client::new(&env, &storage::get_token(&env));
        token_client.transfer(&admin, &env.current_contract_address(), &total_reward);

        events::emit_project_created(
            &env,
            ProjectCreated {
                project_id: id,
                name,
                total_reward,
                contributors_percent,
                model_index,
            },
        );

        load_project(&env, id)
    }

    /// Retrieve a project by its id.
    pub fn get_project(env: Env, id: u64) -> Project {
        load_project(&env, id)
    }

    pub fn get_number_of_projects(env: Env) -> u32 {
        storage::project_count(&env)
    }

    /// Assign the voter set of a project. One-shot: fails once a non-empty
    /// set exists. The list must be non-empty and duplicate-free.
    pub fn assign_voters(env: Env, id: u64, voters: Vec<Address>) {
        require_admin(&env);

        let mut state = load_project_state(&env, id);
        require_open(&env, &state);
        if !state.voters.is_empty() {
            panic_with_error!(&env, Error::VotersAlreadyAssigned);
        }
        if voters.is_empty() {
            panic_with_error!(&env, Error::EmptyVoters);
        }
        for (i, voter) in voters.iter().enumerate() {
            for other in voters.iter().skip(i + 1) {
                if voter == other {
                    panic_with_error!(&env, Error::DuplicateVoter);
                }
            }
        }

        state.voters = voters.clone();
        save_project_state(&env, id, &state);

        events::emit_voters_assigned(
            &env,
            VotersAssigned {
                project_id: id,
                count: voters.len(),
            },
        );
    }

    pub fn get_project_voters(env: Env, id: u64) -> Vec<Address> {
        load_project_state(&env, id).voters
    }

    // ─────────────────────────────────────────────────────────
    // Contribution registry
    // ─────────────────────────────────────────────────────────

    /// Register a contribution, or update its title when one already
    /// exists for `owner`. Upsert by key: never duplicates.
    pub fn add_or_update_contribution(env: Env, id: u64, owner: Address, title: String) {
        require_admin(&env);

        let state = load_project_state(&env, id);
        require_open(&env, &state);

        let mut contributions = load_contributions(&env, id);
        let mut updated = false;
        for (i, c) in contributions.iter().enumerate() {
            if c.owner == owner {
                contributions.set(
                    i as u32,
                    Contribution {
                        owner: owner.clone(),
                        title: title.clone(),
                    },
                );
                updated = true;
                break;
            }
        }
        if !updated {
            contributions.push_back(Contribution {
                owner: owner.clone(),
                title,
            });
        }
        save_contributions(&env, id, &contributions);

        events::emit_contribution_upserted(
            &env,
            ContributionUpserted {
                project_id: id,
                owner,
                updated,
            },
        );
    }

    pub fn get_contributions_by_project(env: Env, id: u64) -> Vec<Contribution> {
        load_contributions(&env, id)
    }

    // ─────────────────────────────────────────────────────────
    // Vote ledger
    // ─────────────────────────────────────────────────────────

    /// Cast the caller's single vote in a project, staking `amount` of the
    /// reward token into contract custody.
    ///
    /// Re-casting replaces the existing vote: the old stake is refunded in
    /// the same call before the new one is taken, so custody always equals
    /// the sum of active vote amounts.
    pub fn cast_vote(env: Env, voter: Address, id: u64, votee: Address, amount: i128) {
        voter.require_auth();

        let state = load_project_state(&env, id);
        require_open(&env, &state);
        if !state.voters.contains(&voter) {
            panic_with_error!(&env, Error::NotAVoter);
        }
        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }
        let contributions = load_contributions(&env, id);
        if !contributions.iter().any(|c| c.owner == votee) {
            panic_with_error!(&env, Error::ContributionNotFound);
        }

        let token_client = token::Client::new(&env, &storage::get_token(&env));
        let contract = env.current_contract_address();

        let mut votes = load_votes(&env, id);
        let mut replaced = false;
        for (i, vote) in votes.iter().enumerate() {
            if vote.voter == voter {
                // Refund the displaced stake before taking the new one.
                token_client.transfer(&contract, &voter, &vote.amount);
                votes.remove(i as u32);
                replaced = true;
                break;
            }
        }
        token_client.transfer(&voter, &contract, &amount);
        votes.push_back(Vote {
            voter: voter.clone(),
            votee: votee.clone(),
            amount,
        });
        save_votes(&env, id, &votes);

        events::emit_vote_cast(
            &env,
            VoteCast {
                project_id: id,
                voter,
                votee,
                amount,
                replaced,
            },
        );
    }

    /// Withdraw the caller's active vote and refund its stake.
    pub fn withdraw_vote(env: Env, voter: Address, id: u64) {
        voter.require_auth();

        let state = load_project_state(&env, id);
        require_open(&env, &state);

        let mut votes = load_votes(&env, id);
        let mut refunded: Option<i128> = None;
        for (i, vote) in votes.iter().enumerate() {
            if vote.voter == voter {
                refunded = Some(vote.amount);
                votes.remove(i as u32);
                break;
            }
        }
        let amount = match refunded {
            Some(a) => a,
            None => panic_with_error!(&env, Error::NoActiveVote),
        };
        save_votes(&env, id, &votes);

        let token_client = token::Client::new(&env, &storage::get_token(&env));
        token_client.transfer(&env.current_contract_address(), &voter, &amount);

        events::emit_vote_withdrawn(
            &env,
            VoteWithdrawn {
                project_id: id,
                voter,
                amount,
            },
        );
    }

    /// All active votes of a project.
    pub fn get_votes_by_project(env: Env, id: u64) -> Vec<Vote> {
        load_project_config(&env, id);
        load_votes(&env, id)
    }

    /// Per-votee scores, derived from the live vote set. One entry per
    /// registered contribution, in registration order, zero included.
    pub fn get_scores_by_project(env: Env, id: u64) -> Vec<Score> {
        load_project_config(&env, id);
        rewards::derive_scores(&env, &load_contributions(&env, id), &load_votes(&env, id))
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Compute the reward split for the current ledger state without
    /// touching it. Callable any number of times; identical inputs give
    /// identical results.
    pub fn simulate_rewards(env: Env, id: u64) -> RewardSplit {
        let config = load_project_config(&env, id);
        let model = load_reward_model(&env, config.model_index);
        let votes = load_votes(&env, id);
        let scores = rewards::derive_scores(&env, &load_contributions(&env, id), &votes);
        let pot = RewardPot {
            total: config.total_reward,
            contributors_percent: config.contributors_percent,
        };
        rewards::calculate(&env, &model, &pot, &votes, &scores)
    }

    /// Pay out the split and close the project.
    ///
    /// Computes exactly what `simulate_rewards` would, transfers every
    /// votee and voter reward out of escrow, leaves the truncation
    /// remainder in contract custody, and flips the project to rewarded.
    /// Fails on an already-rewarded project and on a project with no
    /// votes. Atomic: a failed transfer reverts the whole call.
    pub fn distribute_rewards(env: Env, id: u64) -> RewardSplit {
        require_admin(&env);

        let config = load_project_config(&env, id);
        let mut state = load_project_state(&env, id);
        if state.rewarded {
            panic_with_error!(&env, Error::AlreadyRewarded);
        }
        let votes = load_votes(&env, id);
        if votes.is_empty() {
            panic_with_error!(&env, Error::NoVotes);
        }

        let model = load_reward_model(&env, config.model_index);
        let scores = rewards::derive_scores(&env, &load_contributions(&env, id), &votes);
        let pot = RewardPot {
            total: config.total_reward,
            contributors_percent: config.contributors_percent,
        };
        let split = rewards::calculate(&env, &model, &pot, &votes, &scores);

        let token_client = token::Client::new(&env, &storage::get_token(&env));
        let contract = env.current_contract_address();
        for reward in split.votee_rewards.iter() {
            if reward.amount > 0 {
                token_client.transfer(&contract, &reward.to, &reward.amount);
            }
        }
        for reward in split.voter_rewards.iter() {
            if reward.amount > 0 {
                token_client.transfer(&contract, &reward.to, &reward.amount);
            }
        }

        state.rewarded = true;
        save_project_state(&env, id, &state);

        events::emit_rewards_distributed(
            &env,
            RewardsDistributed {
                project_id: id,
                total_reward: config.total_reward,
                remainder: split.remainder,
            },
        );

        split
    }
}

/// Authenticate the managing admin and return its address.
fn require_admin(env: &Env) -> Address {
    let admin = storage::get_admin(env);
    admin.require_auth();
    admin
}

/// Guard shared by every mutating entry point: rewarded projects are frozen.
fn require_open(env: &Env, state: &ProjectState) {
    if state.rewarded {
        panic_with_error!(env, Error::AlreadyRewarded);
    }
}

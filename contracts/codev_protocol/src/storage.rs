//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by CoDev:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key          | Type               | Description                       |
//! |--------------|--------------------|-----------------------------------|
//! | `Admin`      | `Address`          | Managing admin (project manager)  |
//! | `Token`      | `Address`          | Reward / vote-stake token         |
//! | `Models`     | `Vec<RewardModel>` | Append-only reward-model registry |
//! | `ProjectIds` | `Vec<u64>`         | Creation-ordered project index    |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                  | Type                | Description                     |
//! |----------------------|---------------------|---------------------------------|
//! | `ProjConfig(id)`     | `ProjectConfig`     | Immutable project configuration |
//! | `ProjState(id)`      | `ProjectState`      | Mutable project state           |
//! | `Contributions(id)`  | `Vec<Contribution>` | Registration-ordered entries    |
//! | `Votes(id)`          | `Vec<Vote>`         | One record per voter            |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! ## Why split Config and State?
//!
//! Voter assignment and the rewarded flag are the only mutable parts of a
//! project. Keeping them in a small `ProjectState` entry means the hot
//! writes never rewrite the name and pot configuration, while the public
//! API still returns the reconstructed [`Project`].

use soroban_sdk::{contracttype, panic_with_error, Address, Env, Vec};

use crate::types::{Contribution, Project, ProjectConfig, ProjectState, RewardModel, Vote};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// Instance-tier keys live as long as the contract and are extended
/// together. Persistent-tier keys hold per-project data with independent
/// TTLs; no key ever reaches into another project's data.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Managing admin address (Instance).
    Admin,
    /// Reward token address (Instance).
    Token,
    /// Registered reward models, append-only (Instance).
    Models,
    /// Ids of all created projects, in creation order (Instance).
    ProjectIds,
    /// Immutable project configuration keyed by id (Persistent).
    ProjConfig(u64),
    /// Mutable project state keyed by id (Persistent).
    ProjState(u64),
    /// Contribution registry keyed by id (Persistent).
    Contributions(u64),
    /// Vote ledger keyed by id (Persistent).
    Votes(u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// `true` once `init` has stored the admin.
pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

/// Retrieve the managing admin. Panics if `init` was never called.
pub fn get_admin(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
    bump_instance(env);
}

/// Retrieve the reward token address.
pub fn get_token(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

/// Append a reward model to the registry and return its stable index.
pub fn push_reward_model(env: &Env, model: &RewardModel) -> u32 {
    bump_instance(env);
    let mut models: Vec<RewardModel> = env
        .storage()
        .instance()
        .get(&DataKey::Models)
        .unwrap_or_else(|| Vec::new(env));
    models.push_back(model.clone());
    env.storage().instance().set(&DataKey::Models, &models);
    models.len() - 1
}

/// Load a registered reward model by index.
pub fn load_reward_model(env: &Env, index: u32) -> RewardModel {
    bump_instance(env);
    let models: Vec<RewardModel> = env
        .storage()
        .instance()
        .get(&DataKey::Models)
        .unwrap_or_else(|| Vec::new(env));
    models
        .get(index)
        .unwrap_or_else(|| panic_with_error!(env, Error::ModelNotFound))
}

pub fn reward_model_count(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get::<_, Vec<RewardModel>>(&DataKey::Models)
        .map(|m| m.len())
        .unwrap_or(0)
}

/// Record a newly created project id. Creation order is preserved.
pub fn push_project_id(env: &Env, id: u64) {
    bump_instance(env);
    let mut ids: Vec<u64> = env
        .storage()
        .instance()
        .get(&DataKey::ProjectIds)
        .unwrap_or_else(|| Vec::new(env));
    ids.push_back(id);
    env.storage().instance().set(&DataKey::ProjectIds, &ids);
}

pub fn project_count(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get::<_, Vec<u64>>(&DataKey::ProjectIds)
        .map(|ids| ids.len())
        .unwrap_or(0)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn project_exists(env: &Env, id: u64) -> bool {
    env.storage().persistent().has(&DataKey::ProjConfig(id))
}

/// Save both the immutable config and initial mutable state for a new project.
pub fn save_project(env: &Env, config: &ProjectConfig, state: &ProjectState) {
    let config_key = DataKey::ProjConfig(config.id);
    let state_key = DataKey::ProjState(config.id);
    env.storage().persistent().set(&config_key, config);
    env.storage().persistent().set(&state_key, state);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
}

/// Load the full `Project` by combining config and state.
pub fn load_project(env: &Env, id: u64) -> Project {
    let config = load_project_config(env, id);
    let state = load_project_state(env, id);
    Project {
        id: config.id,
        name: config.name,
        total_reward: config.total_reward,
        contributors_percent: config.contributors_percent,
        model_index: config.model_index,
        voters: state.voters,
        rewarded: state.rewarded,
    }
}

/// Load only the immutable project configuration.
pub fn load_project_config(env: &Env, id: u64) -> ProjectConfig {
    let key = DataKey::ProjConfig(id);
    let config: ProjectConfig = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| panic_with_error!(env, Error::ProjectNotFound));
    bump_persistent(env, &key);
    config
}

/// Load only the mutable project state.
pub fn load_project_state(env: &Env, id: u64) -> ProjectState {
    let key = DataKey::ProjState(id);
    let state: ProjectState = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| panic_with_error!(env, Error::ProjectNotFound));
    bump_persistent(env, &key);
    state
}

/// Save only the mutable project state.
pub fn save_project_state(env: &Env, id: u64, state: &ProjectState) {
    let key = DataKey::ProjState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

/// Load the contribution registry of a project, registration-ordered.
/// Empty for a project with no contributions yet.
pub fn load_contributions(env: &Env, id: u64) -> Vec<Contribution> {
    let key = DataKey::Contributions(id);
    let contributions = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| Vec::new(env));
    if env.storage().persistent().has(&key) {
        bump_persistent(env, &key);
    }
    contributions
}

pub fn save_contributions(env: &Env, id: u64, contributions: &Vec<Contribution>) {
    let key = DataKey::Contributions(id);
    env.storage().persistent().set(&key, contributions);
    bump_persistent(env, &key);
}

/// Load the vote ledger of a project. Empty when no votes are active.
pub fn load_votes(env: &Env, id: u64) -> Vec<Vote> {
    let key = DataKey::Votes(id);
    let votes = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| Vec::new(env));
    if env.storage().persistent().has(&key) {
        bump_persistent(env, &key);
    }
    votes
}

pub fn save_votes(env: &Env, id: u64, votes: &Vec<Vote>) {
    let key = DataKey::Votes(id);
    env.storage().persistent().set(&key, votes);
    bump_persistent(env, &key);
}

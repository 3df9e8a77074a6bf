extern crate std;

use soroban_sdk::{testutils::Address as _, token, vec, Address, Env, String, Vec};

use crate::invariants::{assert_config_immutable, assert_percent_in_range, assert_split_reconciles};
use crate::{CodevProtocol, CodevProtocolClient, ModelKind, RewardModel};

const ESV: i128 = 1_000_000_000_000_000_000;

fn setup() -> (
    Env,
    CodevProtocolClient<'static>,
    Address,
    token::Client<'static>,
    token::StellarAssetClient<'static>,
) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(CodevProtocol, ());
    let client = CodevProtocolClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    let token_client = token::Client::new(&env, &sac.address());
    let token_sac = token::StellarAssetClient::new(&env, &sac.address());

    client.init(&admin, &token_client.address);
    token_sac.mint(&admin, &(1_000 * ESV));

    (env, client, admin, token_client, token_sac)
}

fn proportional(env: &Env) -> RewardModel {
    RewardModel {
        kind: ModelKind::Proportional,
        name: String::from_str(env, "proportional"),
        winner_mult: 15,
        base_mult: 10,
        floor_exp: 16,
    }
}

fn even_voter(env: &Env) -> RewardModel {
    RewardModel {
        kind: ModelKind::EvenVoter,
        name: String::from_str(env, "even_voter"),
        winner_mult: 0,
        base_mult: 0,
        floor_exp: 16,
    }
}

fn winner_takes_all(env: &Env) -> RewardModel {
    RewardModel {
        kind: ModelKind::WinnerTakesAll,
        name: String::from_str(env, "winner_takes_all"),
        winner_mult: 0,
        base_mult: 0,
        floor_exp: 16,
    }
}

/// Register the three standard models; returns the Proportional index.
fn register_models(env: &Env, client: &CodevProtocolClient) -> u32 {
    let index = client.register_reward_model(&proportional(env));
    client.register_reward_model(&even_voter(env));
    client.register_reward_model(&winner_takes_all(env));
    index
}

// ─────────────────────────────────────────────────────────
// Bootstrap and model registry
// ─────────────────────────────────────────────────────────

#[test]
fn init_can_only_run_once() {
    let (env, client, admin, token_client, _) = setup();
    let other = Address::generate(&env);
    assert!(client.try_init(&other, &token_client.address).is_err());
    // The original admin stays in charge.
    register_models(&env, &client);
    assert_eq!(client.get_number_of_reward_models(), 3);
    let _ = admin;
}

#[test]
fn model_registry_is_append_only_with_stable_indices() {
    let (env, client, _, _, _) = setup();
    assert_eq!(client.get_number_of_reward_models(), 0);

    let first = client.register_reward_model(&proportional(&env));
    let second = client.register_reward_model(&even_voter(&env));
    let third = client.register_reward_model(&winner_takes_all(&env));
    assert_eq!((first, second, third), (0, 1, 2));
    assert_eq!(client.get_number_of_reward_models(), 3);

    assert_eq!(client.get_reward_model(&0).kind, ModelKind::Proportional);
    assert_eq!(client.get_reward_model(&1).kind, ModelKind::EvenVoter);
    assert_eq!(client.get_reward_model(&2).kind, ModelKind::WinnerTakesAll);
    assert_eq!(client.get_reward_model(&0).winner_mult, 15);

    assert!(client.try_get_reward_model(&3).is_err());
}

// ─────────────────────────────────────────────────────────
// Project creation
// ─────────────────────────────────────────────────────────

#[test]
fn create_project_escrows_the_pot() {
    let (env, client, admin, token_client, _) = setup();
    let model = register_models(&env, &client);

    let before = token_client.balance(&admin);
    let project = client.create_project(
        &1u64,
        &String::from_str(&env, "Prj 1"),
        &(100 * ESV),
        &70u32,
        &model,
    );

    assert_eq!(project.id, 1);
    assert_eq!(project.total_reward, 100 * ESV);
    assert_eq!(project.contributors_percent, 70);
    assert_eq!(project.model_index, model);
    assert!(project.voters.is_empty());
    assert!(!project.rewarded);
    assert_percent_in_range(&project);

    assert_eq!(token_client.balance(&admin), before - 100 * ESV);
    assert_eq!(token_client.balance(&client.address), 100 * ESV);
    assert_eq!(client.get_number_of_projects(), 1);
}

#[test]
fn create_project_rejects_bad_inputs() {
    let (env, client, _, _, _) = setup();
    let model = register_models(&env, &client);
    let name = String::from_str(&env, "Prj");

    client.create_project(&1u64, &name, &(100 * ESV), &70u32, &model);

    // Duplicate id.
    assert!(client
        .try_create_project(&1u64, &name, &(100 * ESV), &70u32, &model)
        .is_err());
    // Percent out of range.
    assert!(client
        .try_create_project(&2u64, &name, &(100 * ESV), &101u32, &model)
        .is_err());
    // Non-positive pot.
    assert!(client
        .try_create_project(&2u64, &name, &0i128, &70u32, &model)
        .is_err());
    // Unregistered model index.
    assert!(client
        .try_create_project(&2u64, &name, &(100 * ESV), &70u32, &99u32)
        .is_err());

    assert_eq!(client.get_number_of_projects(), 1);
}

#[test]
fn projects_are_counted_in_creation_order() {
    let (env, client, _, _, _) = setup();
    let model = register_models(&env, &client);

    for id in 1u64..=4 {
        client.create_project(
            &id,
            &String::from_str(&env, "Prj"),
            &(10 * ESV),
            &50u32,
            &model,
        );
        assert_eq!(client.get_number_of_projects(), id as u32);
    }
}

// ─────────────────────────────────────────────────────────
// Voter assignment
// ─────────────────────────────────────────────────────────

#[test]
fn voters_are_assigned_exactly_once() {
    let (env, client, _, _, _) = setup();
    let model = register_models(&env, &client);
    client.create_project(
        &1u64,
        &String::from_str(&env, "Prj"),
        &(100 * ESV),
        &70u32,
        &model,
    );

    assert!(client.get_project_voters(&1u64).is_empty());

    let v0 = Address::generate(&env);
    let v1 = Address::generate(&env);
    let voters = vec![&env, v0.clone(), v1.clone()];
    client.assign_voters(&1u64, &voters);
    assert_eq!(client.get_project_voters(&1u64), voters);

    // Second assignment is rejected even with a different list.
    let other = vec![&env, Address::generate(&env)];
    assert!(client.try_assign_voters(&1u64, &other).is_err());
    assert_eq!(client.get_project_voters(&1u64), voters);
}

#[test]
fn voter_list_must_be_non_empty_and_duplicate_free() {
    let (env, client, _, _, _) = setup();
    let model = register_models(&env, &client);
    client.create_project(
        &1u64,
        &String::from_str(&env, "Prj"),
        &(100 * ESV),
        &70u32,
        &model,
    );

    let empty: Vec<Address> = vec![&env];
    assert!(client.try_assign_voters(&1u64, &empty).is_err());

    let dup = Address::generate(&env);
    let with_dup = vec![&env, dup.clone(), Address::generate(&env), dup];
    assert!(client.try_assign_voters(&1u64, &with_dup).is_err());
    assert!(client.get_project_voters(&1u64).is_empty());
}

// ─────────────────────────────────────────────────────────
// Contribution registry
// ─────────────────────────────────────────────────────────

#[test]
fn contribution_resubmission_updates_instead_of_duplicating() {
    let (env, client, _, _, _) = setup();
    let model = register_models(&env, &client);
    client.create_project(
        &1u64,
        &String::from_str(&env, "Prj"),
        &(100 * ESV),
        &70u32,
        &model,
    );

    let owner = Address::generate(&env);
    client.add_or_update_contribution(&1u64, &owner, &String::from_str(&env, "draft"));
    client.add_or_update_contribution(&1u64, &owner, &String::from_str(&env, "final"));

    let contributions = client.get_contributions_by_project(&1u64);
    assert_eq!(contributions.len(), 1);
    let entry = contributions.get_unchecked(0);
    assert_eq!(entry.owner, owner);
    assert_eq!(entry.title, String::from_str(&env, "final"));
}

#[test]
fn contributions_keep_registration_order() {
    let (env, client, _, _, _) = setup();
    let model = register_models(&env, &client);
    client.create_project(
        &1u64,
        &String::from_str(&env, "Prj"),
        &(100 * ESV),
        &70u32,
        &model,
    );

    let a = Address::generate(&env);
    let b = Address::generate(&env);
    let c = Address::generate(&env);
    for (owner, title) in [(&a, "one"), (&b, "two"), (&c, "three")] {
        client.add_or_update_contribution(&1u64, owner, &String::from_str(&env, title));
    }
    // Updating the first entry must not move it.
    client.add_or_update_contribution(&1u64, &a, &String::from_str(&env, "one v2"));

    let contributions = client.get_contributions_by_project(&1u64);
    assert_eq!(contributions.len(), 3);
    assert_eq!(contributions.get_unchecked(0).owner, a);
    assert_eq!(contributions.get_unchecked(1).owner, b);
    assert_eq!(contributions.get_unchecked(2).owner, c);
}

// ─────────────────────────────────────────────────────────
// Settlement
// ─────────────────────────────────────────────────────────

/// Build the contest scenario: pot 100 ESV at 70%, votes 3/3 on A and
/// 4 on B. Returns (votees, voters).
fn setup_contest(
    env: &Env,
    client: &CodevProtocolClient,
    token_sac: &token::StellarAssetClient,
) -> ([Address; 2], [Address; 3]) {
    let model = register_models(env, client);
    client.create_project(
        &1u64,
        &String::from_str(env, "Prj 1"),
        &(100 * ESV),
        &70u32,
        &model,
    );

    let votees = [Address::generate(env), Address::generate(env)];
    let voters = [
        Address::generate(env),
        Address::generate(env),
        Address::generate(env),
    ];

    client.assign_voters(
        &1u64,
        &vec![env, voters[0].clone(), voters[1].clone(), voters[2].clone()],
    );
    client.add_or_update_contribution(&1u64, &votees[0], &String::from_str(env, "Contrib 0"));
    client.add_or_update_contribution(&1u64, &votees[1], &String::from_str(env, "Contrib 1"));

    for voter in &voters {
        token_sac.mint(voter, &(50 * ESV));
    }
    client.cast_vote(&voters[0], &1u64, &votees[0], &(3 * ESV));
    client.cast_vote(&voters[1], &1u64, &votees[0], &(3 * ESV));
    client.cast_vote(&voters[2], &1u64, &votees[1], &(4 * ESV));

    (votees, voters)
}

#[test]
fn simulate_is_read_only_and_repeatable() {
    let (env, client, _, token_client, token_sac) = setup();
    let (_, voters) = setup_contest(&env, &client, &token_sac);

    let balances_before: std::vec::Vec<i128> =
        voters.iter().map(|v| token_client.balance(v)).collect();
    let contract_before = token_client.balance(&client.address);

    let first = client.simulate_rewards(&1u64);
    let second = client.simulate_rewards(&1u64);
    let third = client.simulate_rewards(&1u64);
    assert_eq!(first, second);
    assert_eq!(second, third);
    assert_split_reconciles(&first, 100 * ESV);

    // No balance moved and the project is still open.
    for (voter, before) in voters.iter().zip(balances_before) {
        assert_eq!(token_client.balance(voter), before);
    }
    assert_eq!(token_client.balance(&client.address), contract_before);
    assert!(!client.get_project(&1u64).rewarded);
}

#[test]
fn distribute_pays_out_and_closes_the_project() {
    let (env, client, _, token_client, token_sac) = setup();
    let (votees, voters) = setup_contest(&env, &client, &token_sac);

    let simulated = client.simulate_rewards(&1u64);
    let observed_before = client.get_project(&1u64);

    let split = client.distribute_rewards(&1u64);
    assert_eq!(split, simulated);
    assert_split_reconciles(&split, 100 * ESV);

    // Contest scenario payouts, exact to the unit.
    assert_eq!(token_client.balance(&votees[0]), 42 * ESV);
    assert_eq!(token_client.balance(&votees[1]), 28 * ESV);
    assert_eq!(
        token_client.balance(&voters[0]),
        47 * ESV + 10_384_615_384_615_384_615
    );
    assert_eq!(
        token_client.balance(&voters[1]),
        47 * ESV + 10_384_615_384_615_384_615
    );
    assert_eq!(
        token_client.balance(&voters[2]),
        46 * ESV + 9_230_769_230_769_230_769
    );
    // Custody keeps the consumed stakes (10 ESV) plus the remainder.
    assert_eq!(
        token_client.balance(&client.address),
        10 * ESV + split.remainder
    );

    let observed_after = client.get_project(&1u64);
    assert!(observed_after.rewarded);
    assert_config_immutable(&observed_before, &observed_after);
}

#[test]
fn distribute_requires_votes() {
    let (env, client, _, _, _) = setup();
    let model = register_models(&env, &client);
    client.create_project(
        &1u64,
        &String::from_str(&env, "Prj"),
        &(100 * ESV),
        &70u32,
        &model,
    );

    // Simulation on a vote-less project is fine: everything is remainder.
    let split = client.simulate_rewards(&1u64);
    assert_eq!(split.remainder, 100 * ESV);

    // Distribution is an explicit policy failure.
    assert!(client.try_distribute_rewards(&1u64).is_err());
    assert!(!client.get_project(&1u64).rewarded);
}

#[test]
fn rewarded_project_rejects_every_mutation() {
    let (env, client, _, _, token_sac) = setup();
    let (votees, voters) = setup_contest(&env, &client, &token_sac);

    client.distribute_rewards(&1u64);
    assert!(client.get_project(&1u64).rewarded);

    assert!(client
        .try_assign_voters(&1u64, &vec![&env, Address::generate(&env)])
        .is_err());
    assert!(client
        .try_add_or_update_contribution(&1u64, &votees[0], &String::from_str(&env, "late"))
        .is_err());
    assert!(client
        .try_cast_vote(&voters[0], &1u64, &votees[0], &(2 * ESV))
        .is_err());
    assert!(client.try_withdraw_vote(&voters[2], &1u64).is_err());
    assert!(client.try_distribute_rewards(&1u64).is_err());
}

#[test]
fn distribute_with_even_voter_model() {
    let (env, client, _, token_client, token_sac) = setup();
    register_models(&env, &client);
    // Model index 1 is EvenVoter.
    client.create_project(
        &7u64,
        &String::from_str(&env, "Even"),
        &(100 * ESV),
        &70u32,
        &1u32,
    );

    let votee = Address::generate(&env);
    let voters = [Address::generate(&env), Address::generate(&env)];
    client.assign_voters(&7u64, &vec![&env, voters[0].clone(), voters[1].clone()]);
    client.add_or_update_contribution(&7u64, &votee, &String::from_str(&env, "solo"));
    for voter in &voters {
        token_sac.mint(voter, &(50 * ESV));
    }
    client.cast_vote(&voters[0], &7u64, &votee, &(1 * ESV));
    client.cast_vote(&voters[1], &7u64, &votee, &(9 * ESV));

    let split = client.distribute_rewards(&7u64);
    assert_split_reconciles(&split, 100 * ESV);

    // Per-head split ignores the 1:9 stake imbalance.
    assert_eq!(token_client.balance(&votee), 70 * ESV);
    assert_eq!(token_client.balance(&voters[0]), 49 * ESV + 15 * ESV);
    assert_eq!(token_client.balance(&voters[1]), 41 * ESV + 15 * ESV);
}

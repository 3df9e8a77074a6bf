extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    token, vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{ProjectCreated, RewardsDistributed, VoteCast, VoteWithdrawn};
use crate::{CodevProtocol, CodevProtocolClient, ModelKind, RewardModel};

const ESV: i128 = 1_000_000_000_000_000_000;

fn setup() -> (
    Env,
    CodevProtocolClient<'static>,
    Address,
    token::StellarAssetClient<'static>,
) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(CodevProtocol, ());
    let client = CodevProtocolClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    let token_sac = token::StellarAssetClient::new(&env, &sac.address());

    client.init(&admin, &sac.address());
    token_sac.mint(&admin, &(1_000 * ESV));
    client.register_reward_model(&RewardModel {
        kind: ModelKind::Proportional,
        name: String::from_str(&env, "proportional"),
        winner_mult: 15,
        base_mult: 10,
        floor_exp: 16,
    });

    (env, client, admin, token_sac)
}

#[test]
fn test_project_created_event() {
    let (env, client, _, _) = setup();

    let name = String::from_str(&env, "Prj 1");
    client.create_project(&42u64, &name, &(100 * ESV), &70u32, &0u32);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("created"), project_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("created").into_val(&env),
        42u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: ProjectCreated struct
    let event_data: ProjectCreated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ProjectCreated {
            project_id: 42,
            name,
            total_reward: 100 * ESV,
            contributors_percent: 70,
            model_index: 0,
        }
    );
}

#[test]
fn test_vote_cast_event_marks_replacements() {
    let (env, client, _, token_sac) = setup();
    client.create_project(
        &1u64,
        &String::from_str(&env, "Prj"),
        &(100 * ESV),
        &70u32,
        &0u32,
    );

    let votee = Address::generate(&env);
    let voter = Address::generate(&env);
    client.assign_voters(&1u64, &vec![&env, voter.clone()]);
    client.add_or_update_contribution(&1u64, &votee, &String::from_str(&env, "Contrib"));
    token_sac.mint(&voter, &(50 * ESV));

    client.cast_vote(&voter, &1u64, &votee, &(3 * ESV));

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    let expected_topics = vec![
        &env,
        symbol_short!("vote").into_val(&env),
        1u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let first_cast: VoteCast = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        first_cast,
        VoteCast {
            project_id: 1,
            voter: voter.clone(),
            votee: votee.clone(),
            amount: 3 * ESV,
            replaced: false,
        }
    );

    // Re-cast: same topic, replaced flag set.
    client.cast_vote(&voter, &1u64, &votee, &(5 * ESV));
    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    let recast: VoteCast = last_event.2.try_into_val(&env).unwrap();
    assert!(recast.replaced);
    assert_eq!(recast.amount, 5 * ESV);
}

#[test]
fn test_vote_withdrawn_event() {
    let (env, client, _, token_sac) = setup();
    client.create_project(
        &1u64,
        &String::from_str(&env, "Prj"),
        &(100 * ESV),
        &70u32,
        &0u32,
    );

    let votee = Address::generate(&env);
    let voter = Address::generate(&env);
    client.assign_voters(&1u64, &vec![&env, voter.clone()]);
    client.add_or_update_contribution(&1u64, &votee, &String::from_str(&env, "Contrib"));
    token_sac.mint(&voter, &(50 * ESV));
    client.cast_vote(&voter, &1u64, &votee, &(3 * ESV));

    client.withdraw_vote(&voter, &1u64);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    let expected_topics = vec![
        &env,
        symbol_short!("unvote").into_val(&env),
        1u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let event_data: VoteWithdrawn = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        VoteWithdrawn {
            project_id: 1,
            voter,
            amount: 3 * ESV,
        }
    );
}

#[test]
fn test_rewards_distributed_event() {
    let (env, client, _, token_sac) = setup();
    client.create_project(
        &1u64,
        &String::from_str(&env, "Prj"),
        &(100 * ESV),
        &70u32,
        &0u32,
    );

    let votee = Address::generate(&env);
    let voter = Address::generate(&env);
    client.assign_voters(&1u64, &vec![&env, voter.clone()]);
    client.add_or_update_contribution(&1u64, &votee, &String::from_str(&env, "Contrib"));
    token_sac.mint(&voter, &(50 * ESV));
    client.cast_vote(&voter, &1u64, &votee, &(5 * ESV));

    client.distribute_rewards(&1u64);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    let expected_topics = vec![
        &env,
        symbol_short!("reward").into_val(&env),
        1u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let event_data: RewardsDistributed = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        RewardsDistributed {
            project_id: 1,
            total_reward: 100 * ESV,
            // Single voter and votee split their pools exactly.
            remainder: 0,
        }
    );
}

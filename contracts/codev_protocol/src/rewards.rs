//! # Reward models
//!
//! The pure reward-splitting core. [`calculate`] takes a pot and a snapshot
//! of the vote ledger (votes plus derived scores) and returns a
//! [`RewardSplit`]; it reads no storage, writes no storage, and is fully
//! deterministic, so `simulate_rewards` and `distribute_rewards` share it
//! verbatim.
//!
//! ## Common structure
//!
//! The pot is first cut into two pools by integer division:
//!
//! ```text
//! contributors_pool = total * contributors_percent / 100
//! voters_pool       = total - contributors_pool
//! ```
//!
//! Each model then splits the contributors' pool over votees and the
//! voters' pool over voters. Every division truncates toward zero and
//! every truncated fraction ends up in `remainder`, so
//! `remainder + sum(votee) + sum(voter) == total` holds exactly.
//!
//! ## Votee side
//!
//! `Proportional` and `EvenVoter` give each votee
//! `contributors_pool * score / total_score`, zeroed when the score falls
//! below the model's dust floor (`10^floor_exp`). `WinnerTakesAll` hands
//! the whole pool to the top-scored votee; ties go to the votee whose
//! contribution was registered first, which is why `scores` arrives in
//! registration order.
//!
//! ## Voter side
//!
//! * `Proportional` weighs each vote by its amount times `winner_mult`
//!   when the backed votee holds the top score, `base_mult` otherwise,
//!   then splits the pool by weight. With the conventional 15/10 pair a
//!   vote on the winning contribution counts 1.5x.
//! * `EvenVoter` splits the pool equally per voter, amounts ignored.
//! * `WinnerTakesAll` splits the pool proportionally to raw vote amount.
//!
//! A snapshot with no votes at all produces no payouts: the entire pot is
//! reported as remainder, never a division fault.

use soroban_sdk::{Env, Vec};

use crate::math::{mul_div, pow10};
use crate::types::{Contribution, ModelKind, Reward, RewardModel, RewardPot, RewardSplit, Score, Vote};

/// Derive the per-votee score list from the live vote set.
///
/// One entry per registered contribution, in registration order, including
/// zero scores. Recomputed on every read; nothing is cached, so the result
/// can never go stale against the vote ledger.
pub fn derive_scores(env: &Env, contributions: &Vec<Contribution>, votes: &Vec<Vote>) -> Vec<Score> {
    let mut scores = Vec::new(env);
    for contribution in contributions.iter() {
        let mut value: i128 = 0;
        for vote in votes.iter() {
            if vote.votee == contribution.owner {
                value += vote.amount;
            }
        }
        scores.push_back(Score {
            owner: contribution.owner.clone(),
            value,
        });
    }
    scores
}

/// Compute the reward split for one project snapshot.
pub fn calculate(
    env: &Env,
    model: &RewardModel,
    pot: &RewardPot,
    votes: &Vec<Vote>,
    scores: &Vec<Score>,
) -> RewardSplit {
    let contributors_pool = pot.total * pot.contributors_percent as i128 / 100;
    let voters_pool = pot.total - contributors_pool;

    let mut total_score: i128 = 0;
    let mut top_score: i128 = 0;
    for score in scores.iter() {
        total_score += score.value;
        if score.value > top_score {
            top_score = score.value;
        }
    }

    let votee_rewards = split_votee_pool(env, model, contributors_pool, scores, total_score, top_score);
    let voter_rewards = split_voter_pool(env, model, voters_pool, votes, scores, top_score);

    let mut allocated: i128 = 0;
    for reward in votee_rewards.iter() {
        allocated += reward.amount;
    }
    for reward in voter_rewards.iter() {
        allocated += reward.amount;
    }

    RewardSplit {
        votee_rewards,
        voter_rewards,
        remainder: pot.total - allocated,
    }
}

/// Split the contributors' pool over the votee list.
///
/// One output line per score entry, aligned with registration order, so a
/// zero-score or floored votee shows up with an explicit 0.
fn split_votee_pool(
    env: &Env,
    model: &RewardModel,
    pool: i128,
    scores: &Vec<Score>,
    total_score: i128,
    top_score: i128,
) -> Vec<Reward> {
    let floor = pow10(model.floor_exp);
    let mut rewards = Vec::new(env);

    match model.kind {
        ModelKind::Proportional | ModelKind::EvenVoter => {
            for score in scores.iter() {
                let amount = if total_score == 0 || score.value < floor {
                    0
                } else {
                    mul_div(env, pool, score.value, total_score)
                };
                rewards.push_back(Reward {
                    to: score.owner.clone(),
                    amount,
                });
            }
        }
        ModelKind::WinnerTakesAll => {
            // First entry holding the top score wins; scores are in
            // contribution-registration order.
            let mut taken = false;
            for score in scores.iter() {
                let wins = !taken && top_score > 0 && score.value == top_score && score.value >= floor;
                if wins {
                    taken = true;
                }
                rewards.push_back(Reward {
                    to: score.owner.clone(),
                    amount: if wins { pool } else { 0 },
                });
            }
        }
    }

    rewards
}

/// Split the voters' pool over the vote list, aligned with vote order.
fn split_voter_pool(
    env: &Env,
    model: &RewardModel,
    pool: i128,
    votes: &Vec<Vote>,
    scores: &Vec<Score>,
    top_score: i128,
) -> Vec<Reward> {
    let mut rewards = Vec::new(env);
    if votes.is_empty() {
        return rewards;
    }

    match model.kind {
        ModelKind::Proportional => {
            let mut total_weight: i128 = 0;
            for vote in votes.iter() {
                total_weight += vote_weight(model, &vote, scores, top_score);
            }
            for vote in votes.iter() {
                let weight = vote_weight(model, &vote, scores, top_score);
                rewards.push_back(Reward {
                    to: vote.voter.clone(),
                    amount: mul_div(env, pool, weight, total_weight),
                });
            }
        }
        ModelKind::EvenVoter => {
            let share = pool / votes.len() as i128;
            for vote in votes.iter() {
                rewards.push_back(Reward {
                    to: vote.voter.clone(),
                    amount: share,
                });
            }
        }
        ModelKind::WinnerTakesAll => {
            let mut total_amount: i128 = 0;
            for vote in votes.iter() {
                total_amount += vote.amount;
            }
            for vote in votes.iter() {
                rewards.push_back(Reward {
                    to: vote.voter.clone(),
                    amount: mul_div(env, pool, vote.amount, total_amount),
                });
            }
        }
    }

    rewards
}

/// Proportional-model weight of one vote: stake times the winner or base
/// multiplier, depending on whether the backed votee holds the top score.
fn vote_weight(model: &RewardModel, vote: &Vote, scores: &Vec<Score>, top_score: i128) -> i128 {
    let mut votee_score: i128 = 0;
    for score in scores.iter() {
        if score.owner == vote.votee {
            votee_score = score.value;
            break;
        }
    }
    let mult = if top_score > 0 && votee_score == top_score {
        model.winner_mult
    } else {
        model.base_mult
    };
    vote.amount * mult as i128
}

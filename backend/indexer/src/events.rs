//! Canonical event types emitted by the CoDev protocol contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/codev_protocol/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the CoDev contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A new project was created and its pot escrowed (`created` topic).
    ProjectCreated,
    /// The voter set was assigned (`voters` topic).
    VotersAssigned,
    /// A contribution was registered or updated (`contrib` topic).
    ContributionUpserted,
    /// A vote was cast or re-cast (`vote` topic).
    VoteCast,
    /// A vote was withdrawn and its stake refunded (`unvote` topic).
    VoteWithdrawn,
    /// Rewards were paid out and the project closed (`reward` topic).
    RewardsDistributed,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::ProjectCreated,
            "voters" => Self::VotersAssigned,
            "contrib" => Self::ContributionUpserted,
            "vote" => Self::VoteCast,
            "unvote" => Self::VoteWithdrawn,
            "reward" => Self::RewardsDistributed,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectCreated => "project_created",
            Self::VotersAssigned => "voters_assigned",
            Self::ContributionUpserted => "contribution_upserted",
            Self::VoteCast => "vote_cast",
            Self::VoteWithdrawn => "vote_withdrawn",
            Self::RewardsDistributed => "rewards_distributed",
            Self::Unknown => "unknown",
        }
    }
}

/// A fully decoded CoDev event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodevEvent {
    pub event_type: String,
    pub project_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub project_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}

//! Request/response bodies shared between the engine's callers and the
//! transport layer.
//!
//! Monetary inputs cross the boundary as major-unit decimal strings (e.g.
//! `"10.50"`) and are converted to integer minor units before any engine
//! arithmetic; responses carry minor units as plain integers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
}

pub mod expense {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SplitMethod {
        Equal,
        Unequal,
        Percentage,
    }

    /// One participant in an expense creation request.
    ///
    /// For unequal splits `share` is a major-unit decimal string; for
    /// percentage splits `percent` is a major-unit percentage. The residual
    /// participant (the requesting actor) sends neither.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ParticipantInput {
        pub user_id: String,
        pub share: Option<String>,
        pub percent: Option<f64>,
    }

    /// Request body for creating a cost-sharing event.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub title: String,
        /// Major-unit decimal, e.g. `"300"` or `"299.50"`.
        pub amount: String,
        pub payer_id: String,
        pub participants: Vec<ParticipantInput>,
        pub split_method: SplitMethod,
    }

    /// One recorded participant share in a response.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ParticipantView {
        pub user_id: String,
        pub share_minor: i64,
        pub percent_bp: Option<i64>,
    }

    /// Response body for a stored expense.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub title: String,
        pub payer_id: String,
        pub amount_minor: i64,
        pub currency: Currency,
        pub participants: Vec<ParticipantView>,
        pub split_method: SplitMethod,
        pub created_at: DateTime<Utc>,
        pub deleted_at: Option<DateTime<Utc>>,
        pub deleted_reason: Option<String>,
    }

    /// Request body for soft-deleting an expense.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseDelete {
        pub reason: Option<String>,
    }

    /// Outcome of a deletion: always a success, optionally with an advisory
    /// warning about settled balances the deletion disturbs.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseDeleted {
        pub warning: bool,
        pub affected_counterparties: Vec<String>,
    }
}

pub mod balance {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum BalanceStatus {
        YouOwe,
        OwesYou,
        Settled,
    }

    /// One pairwise balance, from the requesting actor's perspective.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct BalanceView {
        pub counterparty_id: String,
        /// Signed net in minor units; positive means the counterparty owes
        /// the actor.
        pub amount_minor: i64,
        pub status: BalanceStatus,
    }

    /// Dashboard aggregate across all counterparties.
    #[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
    pub struct DashboardView {
        pub total_you_owe_minor: i64,
        pub total_owed_to_you_minor: i64,
        pub net_minor: i64,
    }
}

pub mod settlement {
    use super::*;

    /// Request body for settling up with a counterparty.
    ///
    /// `amount` defaults to the full outstanding balance when omitted.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct SettleUpRequest {
        pub counterparty_id: String,
        pub amount: Option<String>,
        pub note: Option<String>,
    }

    /// The directed transfer the engine produced, ready for ledger append.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct SettlementView {
        pub from_user_id: String,
        pub to_user_id: String,
        pub amount_minor: i64,
        pub currency: Currency,
        pub note: String,
    }
}

pub mod friend {
    use super::*;

    /// Response body when a relationship removal is refused.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct RemovalBlocked {
        pub blocked: bool,
        pub reason: String,
    }
}

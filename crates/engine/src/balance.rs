//! Pairwise balance derivation.
//!
//! A balance is never stored: it is re-derived from the ledger snapshot on
//! every read. The fold is pure and order-independent (each event contributes
//! an independent signed term), so repeated derivations over the same slice
//! always agree, and A's balance with B is exactly the negation of B's
//! balance with A.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{EngineError, Ledger, Money};

/// Three-way classification of a pairwise balance.
///
/// `Settled` means exactly zero paise — the single epsilon used for every
/// "is this balance zero" check in the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    YouOwe,
    OwesYou,
    Settled,
}

impl BalanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::YouOwe => "you_owe",
            Self::OwesYou => "owes_you",
            Self::Settled => "settled",
        }
    }

    /// Classifies a signed net amount from the actor's perspective.
    #[must_use]
    pub fn classify(net: Money) -> Self {
        if net.is_zero() {
            Self::Settled
        } else if net.is_negative() {
            Self::YouOwe
        } else {
            Self::OwesYou
        }
    }
}

impl TryFrom<&str> for BalanceStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "you_owe" => Ok(Self::YouOwe),
            "owes_you" => Ok(Self::OwesYou),
            "settled" => Ok(Self::Settled),
            other => Err(EngineError::InvalidAmount(format!(
                "invalid balance status: {other}"
            ))),
        }
    }
}

/// The derived net position between the actor and one counterparty.
///
/// Positive `net_minor` means the counterparty owes the actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairwiseBalance {
    pub counterparty_id: String,
    pub net_minor: Money,
    pub status: BalanceStatus,
}

/// Dashboard aggregate over all of the actor's pairwise balances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// Unsigned sum of every `you_owe` balance.
    pub total_you_owe_minor: Money,
    /// Unsigned sum of every `owes_you` balance.
    pub total_owed_to_you_minor: Money,
    /// `total_owed_to_you - total_you_owe`.
    pub net_minor: Money,
}

/// Folds the ledger into the actor's balance with one counterparty.
///
/// Per non-deleted expense where both appear: the actor paying adds the
/// counterparty's share; the counterparty paying subtracts the actor's share.
/// An expense paid by a third party contributes nothing to this pair — each
/// participant owes the payer, not each other. Transfers between the two
/// adjust the net directly.
#[must_use]
pub fn derive(actor_id: &str, counterparty_id: &str, ledger: &Ledger) -> PairwiseBalance {
    let mut net = Money::ZERO;

    for expense in ledger.active_expenses() {
        if expense.payer_id == actor_id {
            if let Some(share) = expense.share_of(counterparty_id) {
                net += share;
            }
        } else if expense.payer_id == counterparty_id {
            if let Some(share) = expense.share_of(actor_id) {
                net -= share;
            }
        }
    }

    for transfer in &ledger.transfers {
        if transfer.from_user_id == actor_id && transfer.to_user_id == counterparty_id {
            net -= transfer.amount_minor;
        } else if transfer.from_user_id == counterparty_id && transfer.to_user_id == actor_id {
            net += transfer.amount_minor;
        }
    }

    PairwiseBalance {
        counterparty_id: counterparty_id.to_string(),
        net_minor: net,
        status: BalanceStatus::classify(net),
    }
}

/// Derives the actor's balance with every counterparty the ledger touches.
///
/// Counterparties are discovered from the snapshot itself and returned in
/// sorted id order, so the result is deterministic for a given slice.
#[must_use]
pub fn derive_all(actor_id: &str, ledger: &Ledger) -> Vec<PairwiseBalance> {
    let mut counterparties: BTreeSet<&str> = BTreeSet::new();

    for expense in ledger.active_expenses() {
        let actor_involved =
            expense.payer_id == actor_id || expense.share_of(actor_id).is_some();
        if !actor_involved {
            continue;
        }
        for user in expense.touched_users() {
            if user != actor_id {
                counterparties.insert(user);
            }
        }
    }
    for transfer in &ledger.transfers {
        if transfer.from_user_id == actor_id {
            counterparties.insert(transfer.to_user_id.as_str());
        } else if transfer.to_user_id == actor_id {
            counterparties.insert(transfer.from_user_id.as_str());
        }
    }

    counterparties
        .into_iter()
        .map(|cp| derive(actor_id, cp, ledger))
        .collect()
}

/// Aggregates pairwise balances into the dashboard figures.
#[must_use]
pub fn summarize(balances: &[PairwiseBalance]) -> BalanceSummary {
    let mut you_owe = Money::ZERO;
    let mut owed_to_you = Money::ZERO;

    for balance in balances {
        match balance.status {
            BalanceStatus::YouOwe => you_owe += balance.net_minor.abs(),
            BalanceStatus::OwesYou => owed_to_you += balance.net_minor.abs(),
            BalanceStatus::Settled => {}
        }
    }

    BalanceSummary {
        total_you_owe_minor: you_owe,
        total_owed_to_you_minor: owed_to_you,
        net_minor: owed_to_you - you_owe,
    }
}

//! Mutation guards for destructive operations.
//!
//! Two deliberately different policies:
//! - removing a counterparty relationship is a **hard block** while the
//!   balance is non-zero;
//! - deleting (or restoring) an expense is always **permitted**, but the
//!   guard reports which counterparties currently sit at a settled balance
//!   so the caller can warn the user before committing.
//!
//! Do not unify the two: historical expenses stay deletable with
//! consequences, active relationships do not.

use serde::{Deserialize, Serialize};

use crate::{
    BalanceStatus, EngineError, Expense, Ledger, PairwiseBalance, ResultEngine, balance,
};

/// Advisory result of checking an expense deletion or restoration.
///
/// Returned as data, never as an error: the operation itself proceeds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionImpact {
    /// Counterparties whose balance with the actor is currently settled and
    /// would be disturbed by the mutation.
    pub affected_counterparties: Vec<String>,
}

impl DeletionImpact {
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.affected_counterparties.is_empty()
    }
}

/// Blocks relationship removal while a balance is outstanding.
pub fn guard_relationship_removal(balance: &PairwiseBalance) -> ResultEngine<()> {
    if balance.status == BalanceStatus::Settled {
        Ok(())
    } else {
        Err(EngineError::NonZeroBalance(format!(
            "cannot remove {}: balance is {}",
            balance.counterparty_id, balance.net_minor
        )))
    }
}

/// Computes the advisory impact of soft-deleting `expense`.
///
/// For every counterparty the expense touches, reports those whose balance
/// with the actor is settled *right now* — deleting the expense would move
/// that balance away from zero again.
#[must_use]
pub fn deletion_impact(actor_id: &str, expense: &Expense, ledger: &Ledger) -> DeletionImpact {
    let impact = settled_counterparties(actor_id, expense, ledger);
    if impact.has_warnings() {
        tracing::warn!(
            expense_id = %expense.id,
            affected = impact.affected_counterparties.len(),
            "expense deletion will disturb settled balances"
        );
    }
    impact
}

/// Mirror of [`deletion_impact`] for restoring a soft-deleted expense.
///
/// Restoration re-adds the shares to the fold and disturbs a settled balance
/// just as deletion does.
#[must_use]
pub fn restore_impact(actor_id: &str, expense: &Expense, ledger: &Ledger) -> DeletionImpact {
    let impact = settled_counterparties(actor_id, expense, ledger);
    if impact.has_warnings() {
        tracing::warn!(
            expense_id = %expense.id,
            affected = impact.affected_counterparties.len(),
            "expense restoration will disturb settled balances"
        );
    }
    impact
}

fn settled_counterparties(actor_id: &str, expense: &Expense, ledger: &Ledger) -> DeletionImpact {
    let mut affected = Vec::new();
    for user in expense.touched_users() {
        if user == actor_id {
            continue;
        }
        let pairwise = balance::derive(actor_id, user, ledger);
        if pairwise.status == BalanceStatus::Settled {
            affected.push(user.to_string());
        }
    }
    affected.sort();
    affected.dedup();
    DeletionImpact {
        affected_counterparties: affected,
    }
}

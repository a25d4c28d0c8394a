//! End-to-end ledger scenarios: create expenses, derive balances, settle up,
//! and exercise the mutation guards the way a client would.

use chrono::Utc;

use engine::{
    BalanceStatus, EngineError, Expense, Ledger, Money, ParticipantShare, SplitMethod, Transfer,
    balance, guard, settle, split,
};

fn equal_dinner(payer: &str, other: &str, total: i64) -> Expense {
    let shares = split::equal_split(Money::new(total), 2).unwrap();
    Expense::new(
        "Dinner",
        payer,
        Money::new(total),
        vec![
            ParticipantShare::new(payer, shares[0]),
            ParticipantShare::new(other, shares[1]),
        ],
        SplitMethod::Equal,
        Utc::now(),
    )
    .unwrap()
}

#[test]
fn ten_rupees_over_three_people() {
    let shares = split::equal_split(Money::new(1000), 3).unwrap();
    assert_eq!(
        shares,
        vec![Money::new(334), Money::new(333), Money::new(333)]
    );
    assert_eq!(shares.iter().map(|s| s.paise()).sum::<i64>(), 1000);
}

#[test]
fn shared_dinner_puts_counterparty_in_debt() {
    // Actor pays ₹300, split equally with one counterparty.
    let mut ledger = Ledger::default();
    ledger.push_expense(equal_dinner("alice", "bob", 30_000));

    let pairwise = balance::derive("alice", "bob", &ledger);
    assert_eq!(pairwise.net_minor, Money::new(15_000));
    assert_eq!(pairwise.status, BalanceStatus::OwesYou);
}

#[test]
fn settlement_transfer_zeroes_the_pair_and_unblocks_removal() {
    let mut ledger = Ledger::default();
    ledger.push_expense(equal_dinner("alice", "bob", 30_000));

    // Before settling, removal is blocked.
    let pairwise = balance::derive("alice", "bob", &ledger);
    assert!(matches!(
        guard::guard_relationship_removal(&pairwise),
        Err(EngineError::NonZeroBalance(_))
    ));

    // Direct and record the settlement: bob pays alice the full ₹150.
    let draft = settle::direct_settlement("alice", &pairwise, None, None).unwrap();
    assert_eq!(draft.from_user_id, "bob");
    assert_eq!(draft.to_user_id, "alice");
    ledger.push_transfer(draft.into_transfer(Utc::now()).unwrap());

    let pairwise = balance::derive("alice", "bob", &ledger);
    assert_eq!(pairwise.net_minor, Money::ZERO);
    assert_eq!(pairwise.status, BalanceStatus::Settled);
    guard::guard_relationship_removal(&pairwise).unwrap();
}

#[test]
fn percentage_split_five_hundred_at_forty_percent() {
    let outcome = split::percentage_split(Money::new(50_000), &[4_000]).unwrap();
    assert_eq!(outcome.explicit_shares, vec![Money::new(20_000)]);
    assert_eq!(outcome.residual_share, Money::new(30_000));

    let expense = Expense::new(
        "Groceries",
        "alice",
        Money::new(50_000),
        vec![
            ParticipantShare::with_percent("alice", outcome.residual_share, 6_000),
            ParticipantShare::with_percent("bob", outcome.explicit_shares[0], 4_000),
        ],
        SplitMethod::Percentage,
        Utc::now(),
    )
    .unwrap();
    assert_eq!(expense.share_of("bob"), Some(Money::new(20_000)));
}

#[test]
fn deleting_a_settled_expense_warns_but_proceeds() {
    let mut ledger = Ledger::default();
    let expense = equal_dinner("alice", "bob", 30_000);
    let expense_id = expense.id;
    ledger.push_expense(expense);
    ledger.push_transfer(
        Transfer::new("bob", "alice", Money::new(15_000), None, Utc::now()).unwrap(),
    );

    // The pair is settled right before deletion, so the guard reports bob.
    let snapshot = ledger.expense(expense_id).unwrap().clone();
    let impact = guard::deletion_impact("alice", &snapshot, &ledger);
    assert!(impact.has_warnings());
    assert_eq!(impact.affected_counterparties, vec!["bob".to_string()]);

    // Advisory only: the deletion itself goes through.
    ledger
        .expense_mut(expense_id)
        .unwrap()
        .delete(Utc::now(), Some("entered twice"))
        .unwrap();

    // With the expense gone the transfer alone flips the balance.
    let pairwise = balance::derive("alice", "bob", &ledger);
    assert_eq!(pairwise.net_minor, Money::new(-15_000));
    assert_eq!(pairwise.status, BalanceStatus::YouOwe);
}

#[test]
fn overshooting_settlement_flips_the_sign() {
    let mut ledger = Ledger::default();
    ledger.push_expense(equal_dinner("alice", "bob", 30_000));

    let pairwise = balance::derive("alice", "bob", &ledger);
    let draft =
        settle::direct_settlement("alice", &pairwise, Some(Money::new(20_000)), None).unwrap();
    ledger.push_transfer(draft.into_transfer(Utc::now()).unwrap());

    let pairwise = balance::derive("alice", "bob", &ledger);
    assert_eq!(pairwise.net_minor, Money::new(-5_000));
    assert_eq!(pairwise.status, BalanceStatus::YouOwe);
}

#[test]
fn dashboard_summary_over_three_friends() {
    let mut ledger = Ledger::default();
    ledger.push_expense(equal_dinner("alice", "bob", 30_000));
    ledger.push_expense(equal_dinner("carol", "alice", 10_000));
    ledger.push_expense(equal_dinner("alice", "dave", 4_000));
    ledger.push_transfer(
        Transfer::new("dave", "alice", Money::new(2_000), None, Utc::now()).unwrap(),
    );

    let balances = balance::derive_all("alice", &ledger);
    let ids: Vec<&str> = balances.iter().map(|b| b.counterparty_id.as_str()).collect();
    assert_eq!(ids, vec!["bob", "carol", "dave"]);

    let summary = balance::summarize(&balances);
    assert_eq!(summary.total_owed_to_you_minor, Money::new(15_000));
    assert_eq!(summary.total_you_owe_minor, Money::new(5_000));
    assert_eq!(summary.net_minor, Money::new(10_000));
}

#[test]
fn major_unit_amounts_convert_at_the_boundary() {
    // Amounts arrive as rupee decimals; everything past the parse is paise.
    let total: Money = "300".parse().unwrap();
    assert_eq!(total, Money::new(30_000));
    let shares = split::equal_split(total, 2).unwrap();
    assert_eq!(shares, vec![Money::new(15_000), Money::new(15_000)]);
}

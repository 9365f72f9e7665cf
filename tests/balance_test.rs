// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Balance sheet and transfer ledger public API integration tests.

use costsplit_rs::{BalanceSheet, Engine, Payment, PersonName, TransferLedger};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::thread;

// === Helper Functions ===

fn payments(records: &[(&str, Decimal)]) -> Vec<Payment> {
    records
        .iter()
        .map(|(name, paid)| Payment::new(*name, *paid))
        .collect()
}

// === Balance Sheet Tests ===

#[test]
fn sole_payer_gets_no_refund() {
    let sheet = BalanceSheet::calculate(&payments(&[("Anna", dec!(10.0))])).unwrap();
    assert_eq!(sheet.balances()[0].refund, dec!(0.0));
    assert_eq!(sheet.balances()[0].owed, dec!(0.0));
}

#[test]
fn refund_and_debt_mirror_each_other() {
    let sheet =
        BalanceSheet::calculate(&payments(&[("Anna", dec!(10.0)), ("Bob", dec!(0.0))])).unwrap();

    assert_eq!(sheet.balances()[0].refund, dec!(5.0));
    assert_eq!(sheet.balances()[0].owed, dec!(0.0));
    assert_eq!(sheet.balances()[1].refund, dec!(0.0));
    assert_eq!(sheet.balances()[1].owed, dec!(5.0));
}

#[test]
fn balances_keep_input_order() {
    let sheet = BalanceSheet::calculate(&payments(&[
        ("Carol", dec!(0.0)),
        ("Anna", dec!(10.0)),
        ("Bob", dec!(5.0)),
    ]))
    .unwrap();

    let names: Vec<&str> = sheet.balances().iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Carol", "Anna", "Bob"]);
}

#[test]
fn creditor_and_debtor_classification() {
    let sheet = BalanceSheet::calculate(&payments(&[
        ("Anna", dec!(10.0)),
        ("Bob", dec!(5.0)),
        ("Carol", dec!(0.0)),
    ]))
    .unwrap();

    assert!(sheet.balances()[0].is_creditor());
    assert!(!sheet.balances()[0].is_debtor());
    assert!(!sheet.balances()[1].is_creditor());
    assert!(!sheet.balances()[1].is_debtor());
    assert!(sheet.balances()[2].is_debtor());
}

#[test]
fn equal_share_is_recomputed_per_call() {
    let first =
        BalanceSheet::calculate(&payments(&[("Anna", dec!(10.0)), ("Bob", dec!(0.0))])).unwrap();
    let second =
        BalanceSheet::calculate(&payments(&[("Anna", dec!(20.0)), ("Bob", dec!(0.0))])).unwrap();

    assert_eq!(first.equal_share(), dec!(5.0));
    assert_eq!(second.equal_share(), dec!(10.0));
}

#[test]
fn input_sequence_is_not_mutated() {
    let input = payments(&[("Anna", dec!(10.0)), ("Bob", dec!(0.0))]);
    let before = input.clone();
    let _ = BalanceSheet::calculate(&input).unwrap();
    assert_eq!(input, before);
}

// === Transfer Ledger Tests ===

#[test]
fn ledger_preserves_equal_share_for_reporting() {
    let sheet =
        BalanceSheet::calculate(&payments(&[("Anna", dec!(10.0)), ("Bob", dec!(0.0))])).unwrap();
    let ledger = TransferLedger::settle(&sheet);
    assert_eq!(ledger.equal_share(), dec!(5.0));
}

#[test]
fn ledger_knows_all_participants_even_settled_ones() {
    let sheet = BalanceSheet::calculate(&payments(&[
        ("Anna", dec!(10.0)),
        ("Bob", dec!(5.0)),
        ("Carol", dec!(0.0)),
    ]))
    .unwrap();
    let ledger = TransferLedger::settle(&sheet);

    // Bob paid exactly the share and appears in no transfer, but he is
    // still a known participant and queries about him succeed.
    assert!(ledger.contains(&PersonName::from("Bob")));
    assert_eq!(
        ledger.amount_between(&PersonName::from("Bob"), &PersonName::from("Anna")),
        Ok(dec!(0.0))
    );
    assert_eq!(ledger.participants().count(), 3);
}

#[test]
fn totals_per_person_match_their_balance() {
    let sheet = BalanceSheet::calculate(&payments(&[
        ("Anna", dec!(18.0)),
        ("Bob", dec!(6.0)),
        ("Carol", dec!(0.0)),
    ]))
    .unwrap();
    let ledger = TransferLedger::settle(&sheet);

    for balance in sheet.balances() {
        assert_eq!(ledger.total_paid_by(&balance.name), balance.owed);
        assert_eq!(ledger.total_received_by(&balance.name), balance.refund);
    }
}

// === Concurrent Access ===

#[test]
fn concurrent_queries_see_a_consistent_ledger() {
    let engine = Arc::new(Engine::new());
    engine
        .calculate(&payments(&[
            ("Anna", dec!(15.0)),
            ("Bob", dec!(0.0)),
            ("Carol", dec!(0.0)),
        ]))
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let engine = Arc::clone(&engine);
        handles.push(thread::spawn(move || {
            for _ in 0..100 {
                let bob = engine
                    .amount_owed_between(&PersonName::from("Bob"), &PersonName::from("Anna"))
                    .unwrap();
                let carol = engine
                    .amount_owed_between(&PersonName::from("Carol"), &PersonName::from("Anna"))
                    .unwrap();
                assert_eq!(bob + carol, dec!(10.0));
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
}

#[test]
fn concurrent_recalculation_never_exposes_a_partial_ledger() {
    let engine = Arc::new(Engine::new());
    engine
        .calculate(&payments(&[("Anna", dec!(10.0)), ("Bob", dec!(0.0))]))
        .unwrap();

    let writer = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for _ in 0..100 {
                engine
                    .calculate(&payments(&[("Anna", dec!(10.0)), ("Bob", dec!(0.0))]))
                    .unwrap();
            }
        })
    };

    let reader = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for _ in 0..100 {
                // Identical input is being recalculated, so the answer is
                // stable no matter how the query interleaves.
                let amount = engine
                    .amount_owed_between(&PersonName::from("Bob"), &PersonName::from("Anna"))
                    .unwrap();
                assert_eq!(amount, dec!(5.0));
            }
        })
    };

    writer.join().expect("Thread panicked");
    reader.join().expect("Thread panicked");
}

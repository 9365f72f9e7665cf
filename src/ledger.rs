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

//! Settlement matching.
//!
//! [`TransferLedger::settle`] converts per-person refunds and debts into a
//! concrete set of directed transfers using greedy two-queue matching:
//!
//! 1. Partition participants into creditors (refund > 0) and debtors
//!    (owed > 0), each with a mutable remaining counter.
//! 2. Order creditors ascending by remaining refund (stable sort, so ties
//!    keep input order); debtors stay in input order.
//! 3. Each debtor pays `min(debtor.remaining, creditor.remaining)` into the
//!    current creditor; whichever side hits zero advances.
//!
//! Every step retires at least one creditor or debtor, so matching is
//! O(people) amortized. Because refunds and debts balance by construction,
//! both queues drain together.

use crate::balance::BalanceSheet;
use crate::base::PersonName;
use crate::error::SettlementError;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A directed transfer: `debtor` pays `creditor` the given amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transfer {
    pub debtor: PersonName,
    pub creditor: PersonName,
    pub amount: Decimal,
}

/// The set of transfers that squares a group up, keyed by ordered
/// `(debtor, creditor)` pair.
///
/// Pairs the matcher never produced read as zero. Built once per
/// calculation and read-only afterward; a later calculation replaces the
/// ledger wholesale rather than merging into it.
///
/// # Invariants
///
/// - Every entry amount is strictly positive.
/// - For each person, entries where they are debtor sum to their `owed`
///   and entries where they are creditor sum to their `refund`.
/// - No unordered pair appears in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferLedger {
    entries: HashMap<(PersonName, PersonName), Decimal>,
    participants: HashSet<PersonName>,
    equal_share: Decimal,
}

impl TransferLedger {
    /// Matches debtors against creditors and records the resulting transfers.
    ///
    /// Deterministic: identical input produces an identical ledger. The
    /// creditor ordering is ascending by refund with ties broken by input
    /// position, so per-pair amounts are stable across repeated calls.
    pub fn settle(sheet: &BalanceSheet) -> Self {
        let mut creditors: Vec<(&PersonName, Decimal)> = sheet
            .balances()
            .iter()
            .filter(|b| b.is_creditor())
            .map(|b| (&b.name, b.refund))
            .collect();
        // Stable sort keeps input order among equal refunds.
        creditors.sort_by(|a, b| a.1.cmp(&b.1));

        let debtors: Vec<(&PersonName, Decimal)> = sheet
            .balances()
            .iter()
            .filter(|b| b.is_debtor())
            .map(|b| (&b.name, b.owed))
            .collect();

        let mut entries = HashMap::new();
        let mut creditor_idx = 0;

        for (debtor, owed) in debtors {
            let mut remaining = owed;
            // When the equal share is a repeating decimal the two sides can
            // disagree by division dust near the 28th digit; the queue
            // running dry leaves that residue unmatched rather than panic.
            while remaining > Decimal::ZERO && creditor_idx < creditors.len() {
                let (creditor, creditor_remaining) = &mut creditors[creditor_idx];
                let amount = remaining.min(*creditor_remaining);

                *entries
                    .entry((debtor.clone(), (*creditor).clone()))
                    .or_insert(Decimal::ZERO) += amount;
                remaining -= amount;
                *creditor_remaining -= amount;

                if *creditor_remaining == Decimal::ZERO {
                    creditor_idx += 1;
                }
            }
        }

        Self {
            entries,
            participants: sheet
                .balances()
                .iter()
                .map(|b| b.name.clone())
                .collect(),
            equal_share: sheet.equal_share(),
        }
    }

    /// Returns how much `debtor` must transfer to `creditor`.
    ///
    /// Transfers are directional: a zero here says nothing about the
    /// reverse direction. The matcher never produces both directions for
    /// the same pair.
    ///
    /// # Errors
    ///
    /// - [`SettlementError::UnknownPerson`] - Either name was not part of
    ///   the settled group.
    pub fn amount_between(
        &self,
        debtor: &PersonName,
        creditor: &PersonName,
    ) -> Result<Decimal, SettlementError> {
        for name in [debtor, creditor] {
            if !self.participants.contains(name) {
                return Err(SettlementError::UnknownPerson { name: name.clone() });
            }
        }
        Ok(self
            .entries
            .get(&(debtor.clone(), creditor.clone()))
            .copied()
            .unwrap_or(Decimal::ZERO))
    }

    /// All transfers, sorted by debtor then creditor for deterministic output.
    pub fn transfers(&self) -> Vec<Transfer> {
        let mut transfers: Vec<Transfer> = self
            .entries
            .iter()
            .map(|((debtor, creditor), amount)| Transfer {
                debtor: debtor.clone(),
                creditor: creditor.clone(),
                amount: *amount,
            })
            .collect();
        transfers.sort_by(|a, b| (&a.debtor, &a.creditor).cmp(&(&b.debtor, &b.creditor)));
        transfers
    }

    /// Sum of transfers where `name` is the debtor; equals their `owed`.
    pub fn total_paid_by(&self, name: &PersonName) -> Decimal {
        self.entries
            .iter()
            .filter(|((debtor, _), _)| debtor == name)
            .map(|(_, amount)| *amount)
            .sum()
    }

    /// Sum of transfers where `name` is the creditor; equals their `refund`.
    pub fn total_received_by(&self, name: &PersonName) -> Decimal {
        self.entries
            .iter()
            .filter(|((_, creditor), _)| creditor == name)
            .map(|(_, amount)| *amount)
            .sum()
    }

    pub fn participants(&self) -> impl Iterator<Item = &PersonName> {
        self.participants.iter()
    }

    pub fn contains(&self, name: &PersonName) -> bool {
        self.participants.contains(name)
    }

    /// The equal share the settled group was balanced against.
    pub fn equal_share(&self) -> Decimal {
        self.equal_share
    }

    pub fn is_settled_even(&self) -> bool {
        self.entries.is_empty()
    }
}

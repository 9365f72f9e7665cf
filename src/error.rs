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

//! Error types for settlement processing.

use crate::base::PersonName;
use rust_decimal::Decimal;
use thiserror::Error;

/// Settlement processing errors.
///
/// Every failure is unrecoverable for the current call: the caller must
/// supply corrected input and re-run the calculation. No error leaves
/// partial state behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    /// An input amount is negative
    #[error("negative payment of {amount} by {name}")]
    BadPayment { name: PersonName, amount: Decimal },

    /// Two input records share a name
    #[error("duplicate person name: {name}")]
    DuplicatePerson { name: PersonName },

    /// A query was made before any successful calculation
    #[error("settlement has not been calculated")]
    NotCalculated,

    /// A query references a name absent from the last calculation
    #[error("unknown person: {name}")]
    UnknownPerson { name: PersonName },

    /// The input contains no participants
    #[error("no participants to settle")]
    NoParticipants,
}

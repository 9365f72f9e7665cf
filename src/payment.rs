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

//! Input payment records.

use crate::base::PersonName;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One participant's contribution to the common pool.
///
/// Created once per person before calculation and immutable thereafter.
/// A person may pay nothing, but a negative amount is a validation failure
/// caught by [`BalanceSheet::calculate`](crate::BalanceSheet::calculate),
/// not a domain value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub name: PersonName,
    pub paid: Decimal,
}

impl Payment {
    pub fn new(name: impl Into<PersonName>, paid: Decimal) -> Self {
        Self {
            name: name.into(),
            paid,
        }
    }
}

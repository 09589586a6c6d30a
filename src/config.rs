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

//! Purchase rules that can be tuned per deployment.

use serde::{Deserialize, Serialize};

/// How repeated line items of the same ticket type are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Counts for the same type add up.
    #[default]
    Sum,
    /// The last line item for a type replaces earlier ones.
    LastWins,
}

/// Limits and aggregation rules applied to every purchase.
///
/// Missing fields take their [`Default`] values when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Maximum tickets (of all types, infants included) in one purchase.
    pub max_tickets: u32,
    /// How repeated ticket types within one purchase are combined.
    pub duplicates: DuplicatePolicy,
}

impl ServiceConfig {
    /// Ticket limit used unless configured otherwise.
    pub const DEFAULT_MAX_TICKETS: u32 = 20;
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_tickets: Self::DEFAULT_MAX_TICKETS,
            duplicates: DuplicatePolicy::default(),
        }
    }
}

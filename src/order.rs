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

//! Purchase validation and pricing.
//!
//! Everything here is pure: a [`PurchaseRequest`] goes in, a priced
//! [`Purchase`] or a [`PurchaseError`] comes out. Talking to the payment and
//! seat reservation services is left to [`TicketService`](crate::TicketService).
//!
//! Rules are checked in a fixed order and the first one broken is reported:
//!
//! 1. account ID is a positive integer ([`PurchaseError::InvalidAccount`])
//! 2. at least one line item ([`PurchaseError::NoRequests`])
//! 3. every ticket type is known ([`PurchaseError::InvalidCategory`])
//! 4. at least one ticket overall ([`PurchaseError::ZeroTickets`])
//! 5. minors come with an adult ([`PurchaseError::UnaccompaniedMinor`])
//! 6. no more infants than adults ([`PurchaseError::TooManyInfants`])
//! 7. no more than `max_tickets` overall ([`PurchaseError::TooManyTickets`])
//!
//! Steps 1-3 run when a [`PurchaseRequest`] is built, 4-7 in [`validate`].
//!
//! # Example
//!
//! ```
//! use cinema_tickets_rs::{order, PurchaseRequest, ServiceConfig};
//!
//! let request = PurchaseRequest::parse("1", [("ADULT", 3), ("CHILD", 4), ("INFANT", 2)]).unwrap();
//! let purchase = order::validate(&request, &ServiceConfig::default()).unwrap();
//! assert_eq!(purchase.total_cost, 100);
//! assert_eq!(purchase.total_seats, 7);
//! ```

use crate::base::AccountId;
use crate::config::{DuplicatePolicy, ServiceConfig};
use crate::error::{PurchaseError, Result};
use crate::ticket::{TicketType, TicketTypeRequest};
use serde::Serialize;

/// An account together with a non-empty list of line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    account_id: AccountId,
    tickets: Vec<TicketTypeRequest>,
}

impl PurchaseRequest {
    /// # Errors
    ///
    /// [`PurchaseError::InvalidAccount`] if `account_id < 1`, then
    /// [`PurchaseError::NoRequests`] if `tickets` is empty.
    pub fn new(account_id: i64, tickets: impl Into<Vec<TicketTypeRequest>>) -> Result<Self> {
        Self::for_account(AccountId::try_from(account_id)?, tickets)
    }

    /// # Errors
    ///
    /// [`PurchaseError::NoRequests`] if `tickets` is empty.
    pub fn for_account(
        account_id: AccountId,
        tickets: impl Into<Vec<TicketTypeRequest>>,
    ) -> Result<Self> {
        let tickets = tickets.into();
        if tickets.is_empty() {
            return Err(PurchaseError::NoRequests);
        }
        Ok(Self {
            account_id,
            tickets,
        })
    }

    /// Builds a request from untyped input, e.g. a form or a CSV row.
    ///
    /// # Errors
    ///
    /// [`PurchaseError::InvalidAccount`], [`PurchaseError::NoRequests`] and
    /// [`PurchaseError::InvalidCategory`], checked in that order.
    pub fn parse<'a, I>(account_id: &str, items: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let account_id = account_id.parse::<AccountId>()?;
        let items: Vec<_> = items.into_iter().collect();
        if items.is_empty() {
            return Err(PurchaseError::NoRequests);
        }
        let tickets = items
            .into_iter()
            .map(|(ticket_type, count)| TicketTypeRequest::parse(ticket_type, count))
            .collect::<Result<Vec<_>>>()?;
        Self::for_account(account_id, tickets)
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn tickets(&self) -> &[TicketTypeRequest] {
        &self.tickets
    }
}

/// Number of tickets of each type after folding a request's line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TicketCounts {
    pub adult: u32,
    pub child: u32,
    pub infant: u32,
}

impl TicketCounts {
    /// Folds line items into per-type counts.
    ///
    /// With [`DuplicatePolicy::Sum`] counts saturate at `u32::MAX` rather
    /// than wrap; such a total is rejected by the ticket limit anyway.
    pub fn aggregate(tickets: &[TicketTypeRequest], policy: DuplicatePolicy) -> Self {
        tickets.iter().fold(Self::default(), |mut counts, request| {
            let slot = counts.slot_mut(request.ticket_type());
            *slot = match policy {
                DuplicatePolicy::Sum => slot.saturating_add(request.count()),
                DuplicatePolicy::LastWins => request.count(),
            };
            counts
        })
    }

    pub fn get(&self, ticket_type: TicketType) -> u32 {
        match ticket_type {
            TicketType::Adult => self.adult,
            TicketType::Child => self.child,
            TicketType::Infant => self.infant,
        }
    }

    fn slot_mut(&mut self, ticket_type: TicketType) -> &mut u32 {
        match ticket_type {
            TicketType::Adult => &mut self.adult,
            TicketType::Child => &mut self.child,
            TicketType::Infant => &mut self.infant,
        }
    }

    /// Tickets of all types, infants included.
    pub fn total(&self) -> u64 {
        TicketType::ALL
            .iter()
            .map(|&ticket_type| u64::from(self.get(ticket_type)))
            .sum()
    }

    pub fn total_cost(&self) -> u64 {
        TicketType::ALL
            .iter()
            .map(|&ticket_type| u64::from(self.get(ticket_type)) * ticket_type.price())
            .sum()
    }

    /// Seats needed by adults and children.
    ///
    /// Saturates at `u32::MAX`; exact for any counts within the ticket limit.
    pub fn total_seats(&self) -> u32 {
        TicketType::ALL
            .iter()
            .filter(|ticket_type| ticket_type.occupies_seat())
            .fold(0u32, |seats, &ticket_type| {
                seats.saturating_add(self.get(ticket_type))
            })
    }

    /// Checks rules 4-7 in order.
    fn check(&self, max_tickets: u32) -> Result<()> {
        let requested = self.total();
        if requested == 0 {
            return Err(PurchaseError::ZeroTickets);
        }
        if self.adult == 0 && (self.child > 0 || self.infant > 0) {
            return Err(PurchaseError::UnaccompaniedMinor);
        }
        if self.adult < self.infant {
            return Err(PurchaseError::TooManyInfants);
        }
        if requested > u64::from(max_tickets) {
            return Err(PurchaseError::TooManyTickets {
                requested,
                max: max_tickets,
            });
        }
        Ok(())
    }
}

/// A validated, priced purchase ready to be charged and seated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Purchase {
    pub account_id: AccountId,
    pub counts: TicketCounts,
    pub total_cost: u64,
    pub total_seats: u32,
}

/// Aggregates and checks a request, then prices it.
///
/// # Errors
///
/// [`PurchaseError::ZeroTickets`], [`PurchaseError::UnaccompaniedMinor`],
/// [`PurchaseError::TooManyInfants`] or [`PurchaseError::TooManyTickets`],
/// whichever rule is broken first.
pub fn validate(request: &PurchaseRequest, config: &ServiceConfig) -> Result<Purchase> {
    let counts = TicketCounts::aggregate(request.tickets(), config.duplicates);
    counts.check(config.max_tickets)?;

    Ok(Purchase {
        account_id: request.account_id(),
        counts,
        total_cost: counts.total_cost(),
        total_seats: counts.total_seats(),
    })
}

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

//! Ticket purchasing service.
//!
//! The [`TicketService`] is the entry point for buying tickets. It validates
//! and prices a request with [`order::validate`], then charges the account
//! and reserves seats.
//!
//! # Guarantees
//!
//! - Payment is taken before seats are reserved.
//! - A rejected request never reaches either downstream service.
//! - The service holds no mutable state; it can be shared across threads
//!   whenever its two collaborators can.

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::order::{self, Purchase, PurchaseRequest};
use crate::services::{SeatReservationService, TicketPaymentService};
use crate::ticket::TicketTypeRequest;
use tracing::{debug, trace};

/// Validates ticket purchases and hands valid ones to payment and seating.
#[derive(Debug)]
pub struct TicketService<P, S> {
    payments: P,
    seats: S,
    config: ServiceConfig,
}

impl<P, S> TicketService<P, S>
where
    P: TicketPaymentService,
    S: SeatReservationService,
{
    /// Creates a service with the default rules (at most 20 tickets,
    /// duplicate line items summed).
    pub fn new(payments: P, seats: S) -> Self {
        Self::with_config(payments, seats, ServiceConfig::default())
    }

    pub fn with_config(payments: P, seats: S, config: ServiceConfig) -> Self {
        Self {
            payments,
            seats,
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Buys `tickets` for `account_id`.
    ///
    /// # Errors
    ///
    /// | Error | Cause |
    /// |-------|-------|
    /// | [`InvalidAccount`](crate::PurchaseError::InvalidAccount) | `account_id < 1` |
    /// | [`NoRequests`](crate::PurchaseError::NoRequests) | `tickets` is empty |
    /// | [`ZeroTickets`](crate::PurchaseError::ZeroTickets) | every count is zero |
    /// | [`UnaccompaniedMinor`](crate::PurchaseError::UnaccompaniedMinor) | child or infant without adult |
    /// | [`TooManyInfants`](crate::PurchaseError::TooManyInfants) | more infants than adults |
    /// | [`TooManyTickets`](crate::PurchaseError::TooManyTickets) | over the ticket limit |
    ///
    /// The first broken rule in this order is reported.
    pub fn purchase_tickets(
        &self,
        account_id: i64,
        tickets: &[TicketTypeRequest],
    ) -> Result<Purchase> {
        let request = PurchaseRequest::new(account_id, tickets).inspect_err(|e| {
            debug!(account_id, error = %e, "purchase rejected");
        })?;
        self.purchase(&request)
    }

    /// Validates an already constructed request, then pays and reserves.
    ///
    /// # Errors
    ///
    /// See [`order::validate`].
    pub fn purchase(&self, request: &PurchaseRequest) -> Result<Purchase> {
        let account_id = request.account_id();
        let purchase = order::validate(request, &self.config).inspect_err(|e| {
            debug!(%account_id, error = %e, "purchase rejected");
        })?;

        trace!(%account_id, amount = purchase.total_cost, "requesting payment");
        self.payments.make_payment(account_id, purchase.total_cost);

        trace!(%account_id, seats = purchase.total_seats, "requesting seat reservation");
        self.seats.reserve_seat(account_id, purchase.total_seats);

        debug!(
            %account_id,
            adult = purchase.counts.adult,
            child = purchase.counts.child,
            infant = purchase.counts.infant,
            total_cost = purchase.total_cost,
            total_seats = purchase.total_seats,
            "purchase accepted"
        );
        Ok(purchase)
    }

    pub fn payment_service(&self) -> &P {
        &self.payments
    }

    pub fn seat_reservation_service(&self) -> &S {
        &self.seats
    }
}

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

//! Downstream services a purchase is handed to once it is valid.
//!
//! Both calls are fire-and-forget: the services are trusted to always
//! succeed, so neither trait returns a `Result`.

use crate::base::AccountId;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// Takes payment for a purchase.
pub trait TicketPaymentService {
    fn make_payment(&self, account_id: AccountId, total_amount_to_pay: u64);
}

/// Reserves seats for a purchase.
pub trait SeatReservationService {
    fn reserve_seat(&self, account_id: AccountId, total_seats_to_allocate: u32);
}

impl<T: TicketPaymentService + ?Sized> TicketPaymentService for &T {
    fn make_payment(&self, account_id: AccountId, total_amount_to_pay: u64) {
        (**self).make_payment(account_id, total_amount_to_pay);
    }
}

impl<T: TicketPaymentService + ?Sized> TicketPaymentService for Arc<T> {
    fn make_payment(&self, account_id: AccountId, total_amount_to_pay: u64) {
        (**self).make_payment(account_id, total_amount_to_pay);
    }
}

impl<T: SeatReservationService + ?Sized> SeatReservationService for &T {
    fn reserve_seat(&self, account_id: AccountId, total_seats_to_allocate: u32) {
        (**self).reserve_seat(account_id, total_seats_to_allocate);
    }
}

impl<T: SeatReservationService + ?Sized> SeatReservationService for Arc<T> {
    fn reserve_seat(&self, account_id: AccountId, total_seats_to_allocate: u32) {
        (**self).reserve_seat(account_id, total_seats_to_allocate);
    }
}

/// Per-account running totals plus an ordered log of every call.
///
/// Totals live in a [`DashMap`]; the log is a [`Vec`] behind a [`Mutex`].
/// An entry is appended and its total updated while the log lock is held,
/// so a snapshot is always a prefix of the final call order.
#[derive(Debug)]
struct Tally<V> {
    totals: DashMap<AccountId, u64>,
    log: Mutex<Vec<(AccountId, V)>>,
}

impl<V: Copy + Into<u64>> Tally<V> {
    fn new() -> Self {
        Self {
            totals: DashMap::new(),
            log: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, account_id: AccountId, value: V) {
        let mut log = self.log.lock();
        *self.totals.entry(account_id).or_insert(0) += value.into();
        log.push((account_id, value));
    }

    fn total_for(&self, account_id: AccountId) -> u64 {
        self.totals.get(&account_id).map_or(0, |total| *total)
    }

    fn accounts(&self) -> Vec<(AccountId, u64)> {
        let mut accounts: Vec<_> = self
            .totals
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect();
        accounts.sort_unstable_by_key(|(account_id, _)| *account_id);
        accounts
    }

    fn history(&self) -> Vec<(AccountId, V)> {
        self.log.lock().clone()
    }

    fn len(&self) -> usize {
        self.log.lock().len()
    }

    fn is_empty(&self) -> bool {
        self.log.lock().is_empty()
    }
}

/// Payment service that keeps everything in memory.
#[derive(Debug)]
pub struct InMemoryPaymentGateway {
    payments: Tally<u64>,
}

impl InMemoryPaymentGateway {
    pub fn new() -> Self {
        Self {
            payments: Tally::new(),
        }
    }

    /// Total charged to an account so far (0 if never charged).
    pub fn total_for(&self, account_id: AccountId) -> u64 {
        self.payments.total_for(account_id)
    }

    /// `(account, total charged)` for every charged account, by account ID.
    pub fn accounts(&self) -> Vec<(AccountId, u64)> {
        self.payments.accounts()
    }

    /// Every payment taken, oldest first.
    pub fn history(&self) -> Vec<(AccountId, u64)> {
        self.payments.history()
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}

impl Default for InMemoryPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketPaymentService for InMemoryPaymentGateway {
    fn make_payment(&self, account_id: AccountId, total_amount_to_pay: u64) {
        self.payments.record(account_id, total_amount_to_pay);
    }
}

/// Seat reservation service that keeps everything in memory.
#[derive(Debug)]
pub struct InMemorySeatBooking {
    reservations: Tally<u32>,
}

impl InMemorySeatBooking {
    pub fn new() -> Self {
        Self {
            reservations: Tally::new(),
        }
    }

    /// Seats reserved for an account so far (0 if none).
    pub fn total_for(&self, account_id: AccountId) -> u64 {
        self.reservations.total_for(account_id)
    }

    /// `(account, seats reserved)` for every account, by account ID.
    pub fn accounts(&self) -> Vec<(AccountId, u64)> {
        self.reservations.accounts()
    }

    /// Every reservation made, oldest first.
    pub fn history(&self) -> Vec<(AccountId, u32)> {
        self.reservations.history()
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }
}

impl Default for InMemorySeatBooking {
    fn default() -> Self {
        Self::new()
    }
}

impl SeatReservationService for InMemorySeatBooking {
    fn reserve_seat(&self, account_id: AccountId, total_seats_to_allocate: u32) {
        self.reservations.record(account_id, total_seats_to_allocate);
    }
}

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use oba_catalog::{CatalogError, CatalogStore, Trip, TripDraft, TripFilter, TripPatch};
use oba_core::IdGenerator;

use crate::models::{
    Booking, BookingRequest, Customer, LedgerError, Transaction, TransactionPatch,
    TransactionRequest,
};
use crate::store::{BookingReceipt, DashboardView, LedgerStore};

/// Headline figures for the admin console.
#[derive(Debug, Clone, Serialize)]
pub struct AdminOverview {
    pub total_revenue: f64,
    pub total_bookings: usize,
    pub active_trips: usize,
    pub pending_transactions: usize,
}

/// Facade over the two stores.
///
/// The catalog and ledger each own their collections exclusively; the
/// engine is the only place with visibility into both, so cross-store
/// rules (trip deletion guarded by live bookings, booking creation
/// priced from the catalog) live here.
pub struct TravelEngine {
    catalog: CatalogStore,
    ledger: LedgerStore,
}

impl TravelEngine {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            catalog: CatalogStore::new(ids.clone()),
            ledger: LedgerStore::new(ids),
        }
    }

    /// Engine over a catalog pre-populated with the sample trips.
    pub fn with_seed(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            catalog: CatalogStore::with_seed(ids.clone()),
            ledger: LedgerStore::new(ids),
        }
    }

    // --- catalog ---

    pub fn add_trip(&mut self, draft: TripDraft) -> Result<Uuid, CatalogError> {
        self.catalog.add_trip(draft)
    }

    pub fn update_trip(&mut self, id: Uuid, patch: TripPatch) -> bool {
        self.catalog.update_trip(id, patch)
    }

    /// Remove a trip from the catalog. Rejected while any booking
    /// still references it; the catalog is left unchanged.
    pub fn delete_trip(&mut self, id: Uuid) -> Result<(), LedgerError> {
        if !self.catalog.contains(id) {
            return Err(LedgerError::TripNotFound(id));
        }
        let bookings = self.ledger.bookings_for_trip(id);
        if bookings > 0 {
            return Err(LedgerError::TripHasBookings { bookings });
        }
        self.catalog.remove_trip(id);
        tracing::info!(trip_id = %id, "trip deleted");
        Ok(())
    }

    pub fn trip(&self, id: Uuid) -> Option<&Trip> {
        self.catalog.trip(id)
    }

    pub fn trips(&self) -> Vec<&Trip> {
        self.catalog.trips()
    }

    pub fn search_trips(&self, filter: &TripFilter) -> Vec<&Trip> {
        self.catalog.search(filter)
    }

    // --- ledger ---

    pub fn create_booking(
        &mut self,
        request: BookingRequest,
    ) -> Result<BookingReceipt, LedgerError> {
        let trip = self
            .catalog
            .trip(request.trip_id)
            .ok_or(LedgerError::TripNotFound(request.trip_id))?
            .clone();
        self.ledger.create_booking(&trip, request)
    }

    pub fn add_transaction(&mut self, request: TransactionRequest) -> Result<Uuid, LedgerError> {
        self.ledger.add_transaction(request)
    }

    pub fn update_transaction(
        &mut self,
        id: Uuid,
        patch: TransactionPatch,
    ) -> Result<(), LedgerError> {
        self.ledger.update_transaction(id, patch)
    }

    pub fn approve_transaction(&mut self, id: Uuid) -> Result<(), LedgerError> {
        self.ledger.approve_transaction(id)
    }

    pub fn reject_transaction(&mut self, id: Uuid) -> Result<(), LedgerError> {
        self.ledger.reject_transaction(id)
    }

    pub fn cancel_booking(&mut self, id: Uuid) -> Result<(), LedgerError> {
        self.ledger.cancel_booking(id)
    }

    pub fn booking(&self, id: Uuid) -> Option<&Booking> {
        self.ledger.booking(id)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.ledger.transaction(id)
    }

    pub fn bookings(&self) -> Vec<&Booking> {
        self.ledger.bookings()
    }

    pub fn transactions(&self) -> Vec<&Transaction> {
        self.ledger.transactions()
    }

    pub fn user_bookings(&self, customer: &Customer) -> Vec<&Booking> {
        self.ledger.user_bookings(customer)
    }

    pub fn user_dashboard(&self, customer: &Customer) -> DashboardView {
        self.ledger.user_dashboard(customer)
    }

    pub fn user_transactions(&self, customer: &Customer) -> Vec<&Transaction> {
        self.ledger.user_transactions(customer)
    }

    pub fn booking_transactions(&self, booking_id: Uuid) -> Vec<&Transaction> {
        self.ledger.booking_transactions(booking_id)
    }

    pub fn outstanding_amount(&self, booking_id: Uuid) -> Result<f64, LedgerError> {
        self.ledger.outstanding_amount(booking_id)
    }

    pub fn overview(&self) -> AdminOverview {
        AdminOverview {
            total_revenue: self.ledger.total_revenue(),
            total_bookings: self.ledger.booking_count(),
            active_trips: self.catalog.len(),
            pending_transactions: self.ledger.pending_transactions().len(),
        }
    }
}

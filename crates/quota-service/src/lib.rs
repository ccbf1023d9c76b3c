//! # quota-service: Admission Engine and Booking Orchestration
//!
//! This crate turns the pure rules of `quota-core` and the storage layer
//! of `quota-db` into the operations a transport layer exposes.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Create-Reservation Flow                             │
//! │                                                                         │
//! │  MemberIdentity + request DTO                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Field validation (quota-core::validation)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Admission pipeline (admission.rs)                                     │
//! │    membership → range sanity → duration bounds → quota sufficiency     │
//! │    → active-reservation cap → holiday cap (HolidaySource, fail-open)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Booking transaction (quota-db)                                        │
//! │    conflict re-check + insert + pool debit, one atomic unit            │
//! │       │                                                                 │
//! │       ├──► Notifier (fire-and-forget, failures logged)                 │
//! │       ▼                                                                 │
//! │  Reservation | ApiError (code maps onto an HTTP status)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`admission`] - The ordered validation pipeline
//! - [`reservations`] - create/cancel reservation operations
//! - [`properties`] - create-property operation
//! - [`holidays`] - Public-holiday lookup (HTTP, fail-open)
//! - [`notify`] - Notification sink trait + dispatch
//! - [`identity`] - Authenticated-member input handling
//! - [`config`] - Environment-driven service configuration
//! - [`error`] - `ApiError` boundary type
//! - [`telemetry`] - tracing subscriber bootstrap for embedders
//!
//! ## Collaborators Are Capabilities
//!
//! The holiday source and the notification sink are injected trait
//! objects, not ambient singletons. Production wires the HTTP-backed
//! implementations; tests wire fakes.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod admission;
pub mod config;
pub mod error;
pub mod holidays;
pub mod identity;
pub mod notify;
pub mod properties;
pub mod reservations;
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::ServiceConfig;
pub use error::{ApiError, ErrorCode};
pub use holidays::{HolidayError, HolidaySource, HttpHolidaySource};
pub use notify::{LogNotifier, NewNotification, Notifier};
pub use properties::{CreatePropertyRequest, CreatedProperty};
pub use reservations::CreateReservationRequest;

use std::sync::Arc;

use quota_db::Database;

/// The service facade the embedding application talks to.
///
/// Cloning is cheap: the database handle shares its pool and the
/// collaborators are reference-counted.
#[derive(Clone)]
pub struct QuotaService {
    db: Database,
    holidays: Arc<dyn HolidaySource>,
    notifier: Arc<dyn Notifier>,
}

impl QuotaService {
    /// Creates a service over a database and the two injected collaborators.
    pub fn new(db: Database, holidays: Arc<dyn HolidaySource>, notifier: Arc<dyn Notifier>) -> Self {
        QuotaService {
            db,
            holidays,
            notifier,
        }
    }

    /// Returns the underlying database handle.
    pub fn db(&self) -> &Database {
        &self.db
    }

    pub(crate) fn holidays(&self) -> &dyn HolidaySource {
        self.holidays.as_ref()
    }

    pub(crate) fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifier.clone()
    }
}

//! # quota-db: Database Layer for Quota Stay
//!
//! This crate provides database access for the Quota Stay system.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Quota Stay Data Flow                              │
//! │                                                                         │
//! │  quota-service (admission pipeline, booking orchestration)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     quota-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ property.rs   │    │  (embedded)  │  │   │
//! │  │   │               │    │ member.rs     │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ reservation.rs│    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │                       SQLite Database (WAL)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (property, member, reservation)
//!
//! The reservation repository owns the one strictly-consistent operation
//! in the system: the atomic booking transaction that re-checks range
//! conflicts, inserts the reservation and debits the member's day pool
//! as a single unit.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::member::MemberLinkRepository;
pub use repository::property::PropertyRepository;
pub use repository::reservation::{BookingError, CancelError, ReservationRepository};

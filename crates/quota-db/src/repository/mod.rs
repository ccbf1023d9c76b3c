//! # Repository Module
//!
//! Repository implementations for database entities.
//!
//! ## Pattern
//! Each repository owns the SQL for one entity and takes a cloned pool
//! handle. Repositories are cheap to construct; the [`crate::Database`]
//! handle builds one per call.
//!
//! The reservation repository is the only one that opens multi-statement
//! transactions: booking and cancellation each pair a reservation write
//! with a balance mutation on the member link.

pub mod member;
pub mod property;
pub mod reservation;

//! # Property Repository
//!
//! Database operations for properties.
//!
//! ## Property Creation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Property Creation Flow                               │
//! │                                                                         │
//! │  create_with_master(property, link)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │    INSERT INTO properties ...                                          │
//! │    INSERT INTO member_links ...   ← creator becomes master_owner       │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  The property row and the creator's link land together or not at      │
//! │  all; a property can never exist without its master owner.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use quota_core::{MemberLink, Property};

/// Every column of `properties`, in insert order.
const PROPERTY_COLUMNS: &str = "id, name, kind, total_fractions, per_fraction_days, \
     min_stay_days, max_stay_days, active_reservation_cap, holiday_cap_per_member, \
     address_postcode, address_city, address_district, address_street, \
     address_number, address_complement, address_reference, \
     estimated_value_cents, registered_at, updated_at";

/// Repository for property database operations.
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    pool: SqlitePool,
}

impl PropertyRepository {
    /// Creates a new PropertyRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PropertyRepository { pool }
    }

    /// Gets a property by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Property))` - Property found
    /// * `Ok(None)` - Property not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Property>> {
        let sql = format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = ?1");
        let property = sqlx::query_as::<_, Property>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(property)
    }

    /// Creates a property and its master-owner link in one transaction.
    ///
    /// ## Arguments
    /// * `property` - Complete property row to insert
    /// * `link` - The creator's member link, seeded with every fraction
    ///   and the pro-rata day balances
    pub async fn create_with_master(
        &self,
        property: &Property,
        link: &MemberLink,
    ) -> DbResult<()> {
        debug!(id = %property.id, name = %property.name, "Creating property");

        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO properties ({PROPERTY_COLUMNS}) VALUES \
             (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)"
        );
        sqlx::query(&sql)
            .bind(&property.id)
            .bind(&property.name)
            .bind(property.kind)
            .bind(property.total_fractions)
            .bind(property.per_fraction_days)
            .bind(property.min_stay_days)
            .bind(property.max_stay_days)
            .bind(property.active_reservation_cap)
            .bind(property.holiday_cap_per_member)
            .bind(&property.address_postcode)
            .bind(&property.address_city)
            .bind(&property.address_district)
            .bind(&property.address_street)
            .bind(&property.address_number)
            .bind(&property.address_complement)
            .bind(&property.address_reference)
            .bind(property.estimated_value_cents)
            .bind(property.registered_at)
            .bind(property.updated_at)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO member_links \
             (id, property_id, member_id, role, fractions, current_year_days, next_year_days, \
              created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&link.id)
        .bind(&link.property_id)
        .bind(&link.member_id)
        .bind(link.role)
        .bind(link.fractions)
        .bind(link.current_year_days)
        .bind(link.next_year_days)
        .bind(link.created_at)
        .bind(link.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(id = %property.id, "Property and master link created");
        Ok(())
    }
}

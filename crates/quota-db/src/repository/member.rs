//! # Member Link Repository
//!
//! Database operations for member links (the quota ledger's read side).
//!
//! Balance writes never happen here: debits and refunds run inside the
//! reservation repository's transactions so they can't be separated from
//! the reservation row they belong to.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use quota_core::MemberLink;

/// Every column of `member_links`, in insert order.
const LINK_COLUMNS: &str = "id, property_id, member_id, role, fractions, \
     current_year_days, next_year_days, created_at, updated_at";

/// Repository for member link database operations.
#[derive(Debug, Clone)]
pub struct MemberLinkRepository {
    pool: SqlitePool,
}

impl MemberLinkRepository {
    /// Creates a new MemberLinkRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MemberLinkRepository { pool }
    }

    /// Finds the link between a member and a property.
    ///
    /// The membership check at the top of the admission pipeline: no
    /// link means the member has no business on this property.
    pub async fn find_link(
        &self,
        member_id: &str,
        property_id: &str,
    ) -> DbResult<Option<MemberLink>> {
        debug!(member_id = %member_id, property_id = %property_id, "Looking up member link");

        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM member_links \
             WHERE member_id = ?1 AND property_id = ?2"
        );
        let link = sqlx::query_as::<_, MemberLink>(&sql)
            .bind(member_id)
            .bind(property_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(link)
    }

    /// Gets a member link by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<MemberLink>> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM member_links WHERE id = ?1");
        let link = sqlx::query_as::<_, MemberLink>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(link)
    }
}

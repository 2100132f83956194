//! Repository for the `camps` table.

use screencamp_core::camp::CampFilter;
use screencamp_core::types::DbId;
use sqlx::PgPool;

use crate::models::camp::{Camp, CampSummary, CreateCamp};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, date, venue, state, district, start_time, end_time, \"type\", \
                       contact, status, cancer_types, slots, created_at";

/// [`COLUMNS`] qualified with the `c` alias for joined queries.
const CAMP_COLUMNS: &str = "c.id, c.name, c.date, c.venue, c.state, c.district, c.start_time, \
                            c.end_time, c.\"type\", c.contact, c.status, c.cancer_types, \
                            c.slots, c.created_at";

/// Provides CRUD operations for camps.
pub struct CampRepo;

impl CampRepo {
    /// Insert a new camp, returning the created row.
    ///
    /// The caller validates `input` first; a missing or unparseable date is
    /// rejected by the `NOT NULL` constraint.
    pub async fn create(pool: &PgPool, input: &CreateCamp) -> Result<Camp, sqlx::Error> {
        let query = format!(
            "INSERT INTO camps
                (name, date, venue, state, district, start_time, end_time, \"type\",
                 contact, status, cancer_types, slots)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Camp>(&query)
            .bind(input.name.trim())
            .bind(input.parsed_date())
            .bind(input.venue.trim())
            .bind(input.state.trim())
            .bind(input.district.trim())
            .bind(input.start_time.trim())
            .bind(input.end_time.trim())
            .bind(input.camp_type.trim())
            .bind(crate::models::fields::blank_to_none(input.contact.as_deref()))
            .bind(input.status.trim())
            .bind(&input.cancer_types)
            .bind(input.slots)
            .fetch_one(pool)
            .await
    }

    /// Find a camp by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Camp>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM camps WHERE id = $1");
        sqlx::query_as::<_, Camp>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every camp whose id is in `ids`. Unknown ids are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Camp>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM camps WHERE id = ANY($1)");
        sqlx::query_as::<_, Camp>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List camps matching `filter`, earliest date first, each with its
    /// booking count.
    pub async fn list(pool: &PgPool, filter: &CampFilter) -> Result<Vec<CampSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {CAMP_COLUMNS}, COUNT(b.id) AS booked
             FROM camps c
             LEFT JOIN bookings b ON b.camp_id = c.id
             WHERE ($1::text IS NULL
                    OR c.name ILIKE $1 OR c.venue ILIKE $1 OR c.district ILIKE $1)
               AND ($2::text IS NULL OR c.state = $2)
               AND ($3::text IS NULL OR c.district = $3)
             GROUP BY c.id
             ORDER BY c.date ASC, c.id ASC"
        );
        sqlx::query_as::<_, CampSummary>(&query)
            .bind(filter.search_pattern())
            .bind(filter.state.as_deref())
            .bind(filter.district.as_deref())
            .fetch_all(pool)
            .await
    }

    /// Hard-delete a camp. Bookings that reference it are left untouched.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM camps WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

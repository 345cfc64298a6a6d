//! Repository for the `concept` lookup table.

use sigrh_core::payroll::ConceptCode;
use sigrh_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::Concept;

/// Column list for `concept` queries.
const CONCEPT_COLUMNS: &str = "id, description, is_deletable";

/// Get-or-create access to classification labels.
///
/// Resolution is a single atomic upsert, so concurrent recomputes racing on
/// the first use of a label converge on one row instead of tripping the
/// unique constraint.
pub struct ConceptRepo;

impl ConceptRepo {
    /// Resolve a classification code to its concept row id, inserting the
    /// row on first use. Runs on the caller's connection so it can share
    /// the per-day transaction.
    pub async fn resolve(conn: &mut PgConnection, code: ConceptCode) -> Result<DbId, sqlx::Error> {
        // DO UPDATE (a no-op write) instead of DO NOTHING so RETURNING
        // yields the existing id on conflict.
        sqlx::query_scalar(
            "INSERT INTO concept (description, is_deletable) VALUES ($1, FALSE) \
             ON CONFLICT (description) DO UPDATE SET description = EXCLUDED.description \
             RETURNING id",
        )
        .bind(code.description())
        .fetch_one(conn)
        .await
    }

    /// Find a concept by exact description.
    pub async fn get_by_description(
        pool: &PgPool,
        description: &str,
    ) -> Result<Option<Concept>, sqlx::Error> {
        let query = format!("SELECT {CONCEPT_COLUMNS} FROM concept WHERE description = $1");
        sqlx::query_as::<_, Concept>(&query)
            .bind(description)
            .fetch_optional(pool)
            .await
    }
}

//! Claims repository implementation
//!
//! Database access for claims and their event timelines. A claim and its
//! first event are written in one transaction.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str = "id, claim_number, lob, policy_number, insured_name, loss_date, \
     loss_type, description, contact_email, priority, status, assigned_to, created_at, updated_at";

const EVENT_COLUMNS: &str = "id, claim_id, type, message, created_at";

/// Repository for claims data
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    /// Creates a new ClaimsRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a claim and its initial event atomically
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateEntry` if the claim number is taken.
    /// Nothing is written in that case.
    pub async fn insert_with_event(
        &self,
        claim: NewClaimRecord,
        event: NewEventRecord,
    ) -> Result<(ClaimRow, ClaimEventRow), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let claim_row = sqlx::query_as::<_, ClaimRow>(&format!(
            "INSERT INTO claims ({CLAIM_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NULL, $12, $12) \
             RETURNING {CLAIM_COLUMNS}"
        ))
        .bind(claim.id)
        .bind(&claim.claim_number)
        .bind(&claim.lob)
        .bind(&claim.policy_number)
        .bind(&claim.insured_name)
        .bind(claim.loss_date)
        .bind(&claim.loss_type)
        .bind(&claim.description)
        .bind(&claim.contact_email)
        .bind(&claim.priority)
        .bind(&claim.status)
        .bind(claim.created_at)
        .fetch_one(&mut *tx)
        .await?;

        let event_row = sqlx::query_as::<_, ClaimEventRow>(&format!(
            "INSERT INTO claim_events ({EVENT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(event.id)
        .bind(claim_row.id)
        .bind(&event.event_type)
        .bind(&event.message)
        .bind(claim_row.created_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((claim_row, event_row))
    }

    /// Lists claims matching the query, newest first
    pub async fn find_page(
        &self,
        query: &ClaimQuery,
        skip: i64,
        take: i64,
    ) -> Result<Vec<ClaimRow>, DatabaseError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {CLAIM_COLUMNS} FROM claims"));
        push_filters(&mut builder, query);
        builder
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(take)
            .push(" OFFSET ")
            .push_bind(skip);

        let rows = builder
            .build_query_as::<ClaimRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Counts claims matching the query
    pub async fn count(&self, query: &ClaimQuery) -> Result<i64, DatabaseError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM claims");
        push_filters(&mut builder, query);

        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    /// Retrieves a claim by its identifier
    pub async fn find_by_id(&self, claim_id: Uuid) -> Result<Option<ClaimRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimRow>(&format!(
            "SELECT {CLAIM_COLUMNS} FROM claims WHERE id = $1"
        ))
        .bind(claim_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves a claim's events, oldest first
    pub async fn events_for(&self, claim_id: Uuid) -> Result<Vec<ClaimEventRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimEventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM claim_events WHERE claim_id = $1 ORDER BY created_at ASC, id ASC"
        ))
        .bind(claim_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Round-trips a trivial query to check connectivity
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

/// Appends the WHERE clause for a claim query
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &ClaimQuery) {
    builder.push(" WHERE TRUE");

    if let Some(status) = &query.status {
        builder.push(" AND status = ").push_bind(status.clone());
    }
    if let Some(lob) = &query.lob {
        builder.push(" AND lob = ").push_bind(lob.clone());
    }
    if let Some(assigned_to) = &query.assigned_to {
        builder.push(" AND assigned_to = ").push_bind(assigned_to.clone());
    }
    if let Some(search) = &query.search {
        let pattern = format!("%{}%", escape_like(search));
        builder
            .push(" AND (claim_number ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR insured_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR policy_number ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

/// Escapes LIKE wildcards so user input matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Filter criteria, already normalized (no empty strings)
#[derive(Debug, Clone, Default)]
pub struct ClaimQuery {
    pub status: Option<String>,
    pub lob: Option<String>,
    pub assigned_to: Option<String>,
    pub search: Option<String>,
}

/// Database row for a claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub id: Uuid,
    pub claim_number: String,
    pub lob: String,
    pub policy_number: String,
    pub insured_name: String,
    pub loss_date: NaiveDate,
    pub loss_type: String,
    pub description: String,
    pub contact_email: String,
    pub priority: String,
    pub status: String,
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row for a claim event
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimEventRow {
    pub id: Uuid,
    pub claim_id: Uuid,
    #[sqlx(rename = "type")]
    pub event_type: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a claim
#[derive(Debug, Clone)]
pub struct NewClaimRecord {
    pub id: Uuid,
    pub claim_number: String,
    pub lob: String,
    pub policy_number: String,
    pub insured_name: String,
    pub loss_date: NaiveDate,
    pub loss_type: String,
    pub description: String,
    pub contact_email: String,
    pub priority: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a claim event
#[derive(Debug, Clone)]
pub struct NewEventRecord {
    pub id: Uuid,
    pub event_type: String,
    pub message: String,
}

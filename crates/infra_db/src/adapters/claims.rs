//! PostgreSQL Claims Adapter
//!
//! Implements `ClaimsPort` using the `ClaimsRepository`.
//!
//! # Error Handling
//!
//! - `DatabaseError::DuplicateEntry` -> `PortError::Conflict` (claim number taken)
//! - connection and pool errors -> `PortError::Connection`
//! - rows holding values the domain does not know -> `PortError::Transformation`
//! - anything else -> `PortError::Internal`

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    ClaimEventId, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_claims::{
    Claim, ClaimDetail, ClaimEvent, ClaimFilter, ClaimsPort, NewClaim, PageWindow,
};

use crate::error::DatabaseError;
use crate::repositories::claims::{
    ClaimEventRow, ClaimQuery, ClaimRow, ClaimsRepository, NewClaimRecord, NewEventRecord,
};

const ADAPTER_ID: &str = "postgres-claims-adapter";

/// PostgreSQL-backed implementation of the ClaimsPort trait
#[derive(Debug, Clone)]
pub struct PostgresClaimsAdapter {
    repository: ClaimsRepository,
}

impl PostgresClaimsAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimsRepository::new(pool),
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &ClaimsRepository {
        &self.repository
    }
}

impl DomainPort for PostgresClaimsAdapter {}

#[async_trait]
impl HealthCheckable for PostgresClaimsAdapter {
    /// Checks database connectivity with `SELECT 1`
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let result = self.repository.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => HealthCheckResult::healthy(ADAPTER_ID, latency_ms),
            Err(e) => HealthCheckResult::unhealthy(ADAPTER_ID, latency_ms, format!("Database error: {}", e)),
        }
    }
}

#[async_trait]
impl ClaimsPort for PostgresClaimsAdapter {
    #[instrument(skip(self, claim), fields(claim_number = %claim.claim_number))]
    async fn create(&self, claim: NewClaim) -> Result<ClaimDetail, PortError> {
        let record = NewClaimRecord {
            id: *ClaimId::new_v7().as_uuid(),
            claim_number: claim.claim_number.to_string(),
            lob: claim.lob.as_str().to_string(),
            policy_number: claim.policy_number,
            insured_name: claim.insured_name,
            loss_date: claim.loss_date,
            loss_type: claim.loss_type,
            description: claim.description,
            contact_email: claim.contact_email,
            priority: claim.priority.as_str().to_string(),
            status: claim.status.as_str().to_string(),
            created_at: Utc::now(),
        };
        let event = NewEventRecord {
            id: *ClaimEventId::new_v7().as_uuid(),
            event_type: claim.initial_event.event_type.as_str().to_string(),
            message: claim.initial_event.message,
        };

        let (claim_row, event_row) = self
            .repository
            .insert_with_event(record, event)
            .await
            .map_err(db_to_port_error)?;

        debug!(claim_id = %claim_row.id, "Inserted claim");

        Ok(ClaimDetail {
            claim: row_to_claim(claim_row)?,
            events: vec![row_to_event(event_row)?],
        })
    }

    #[instrument(skip(self))]
    async fn find_many(&self, filter: &ClaimFilter, window: PageWindow) -> Result<Vec<Claim>, PortError> {
        let skip = i64::try_from(window.skip).unwrap_or(i64::MAX);
        let take = i64::try_from(window.take).unwrap_or(i64::MAX);

        self.repository
            .find_page(&to_query(filter), skip, take)
            .await
            .map_err(db_to_port_error)?
            .into_iter()
            .map(row_to_claim)
            .collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &ClaimFilter) -> Result<u64, PortError> {
        let total = self
            .repository
            .count(&to_query(filter))
            .await
            .map_err(db_to_port_error)?;

        u64::try_from(total).map_err(|_| PortError::transformation(format!("negative count {}", total)))
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn find_one(&self, id: ClaimId) -> Result<Option<ClaimDetail>, PortError> {
        let uuid = *id.as_uuid();
        let Some(row) = self.repository.find_by_id(uuid).await.map_err(db_to_port_error)? else {
            return Ok(None);
        };

        let events = self
            .repository
            .events_for(uuid)
            .await
            .map_err(db_to_port_error)?
            .into_iter()
            .map(row_to_event)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(ClaimDetail {
            claim: row_to_claim(row)?,
            events,
        }))
    }
}

fn to_query(filter: &ClaimFilter) -> ClaimQuery {
    ClaimQuery {
        status: filter.status.clone(),
        lob: filter.lob.clone(),
        assigned_to: filter.assigned_to.clone(),
        search: filter.search.clone(),
    }
}

/// Converts DatabaseError to PortError
fn db_to_port_error(e: DatabaseError) -> PortError {
    match e {
        e if e.is_duplicate() => PortError::conflict(e.to_string()),
        e if e.is_connection_error() => PortError::connection(e.to_string()),
        e => PortError::internal(e.to_string()),
    }
}

fn row_to_claim(row: ClaimRow) -> Result<Claim, PortError> {
    Ok(Claim {
        id: ClaimId::from_uuid(row.id),
        claim_number: row.claim_number.parse().map_err(transformation)?,
        lob: row.lob.parse().map_err(transformation)?,
        policy_number: row.policy_number,
        insured_name: row.insured_name,
        loss_date: row.loss_date,
        loss_type: row.loss_type,
        description: row.description,
        contact_email: row.contact_email,
        priority: row.priority.parse().map_err(transformation)?,
        status: row.status.parse().map_err(transformation)?,
        assigned_to: row.assigned_to,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_event(row: ClaimEventRow) -> Result<ClaimEvent, PortError> {
    Ok(ClaimEvent {
        id: ClaimEventId::from_uuid(row.id),
        claim_id: ClaimId::from_uuid(row.claim_id),
        event_type: row.event_type.parse().map_err(transformation)?,
        message: row.message,
        created_at: row.created_at,
    })
}

fn transformation(e: impl std::fmt::Display) -> PortError {
    PortError::transformation(e.to_string())
}

//! In-memory claims store
//!
//! Holds claims in a `tokio::sync::RwLock`, so concurrent requests see a
//! consistent snapshot. Claim numbers are kept unique the same way the
//! database's unique index does.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{ClaimId, DomainPort, HealthCheckable, HealthCheckResult, PortError};

use crate::claim::{Claim, ClaimDetail, NewClaim};
use crate::ports::{ClaimFilter, ClaimsPort, PageWindow};

const ADAPTER_ID: &str = "memory-claims-store";

/// Process-local implementation of [`ClaimsPort`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryClaimsStore {
    claims: Arc<RwLock<Vec<ClaimDetail>>>,
}

impl InMemoryClaimsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored claims
    pub async fn len(&self) -> usize {
        self.claims.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.claims.read().await.is_empty()
    }

    /// Inserts an already materialized claim, bypassing id assignment
    ///
    /// Lets tests seed claims with chosen timestamps or assignees.
    pub async fn insert(&self, detail: ClaimDetail) -> Result<(), PortError> {
        let mut claims = self.claims.write().await;
        ensure_unique(&claims, &detail)?;
        claims.push(detail);
        Ok(())
    }
}

fn ensure_unique(claims: &[ClaimDetail], candidate: &ClaimDetail) -> Result<(), PortError> {
    if claims.iter().any(|c| c.claim.claim_number == candidate.claim.claim_number) {
        return Err(PortError::conflict(format!(
            "claim number {} already exists",
            candidate.claim.claim_number
        )));
    }
    Ok(())
}

/// Matching claims, newest first; ties broken by the time-ordered id
fn matching<'a>(claims: &'a [ClaimDetail], filter: &ClaimFilter) -> Vec<&'a Claim> {
    let mut found: Vec<&Claim> = claims
        .iter()
        .map(|detail| &detail.claim)
        .filter(|claim| filter.matches(claim))
        .collect();
    found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
    found
}

impl DomainPort for InMemoryClaimsStore {}

#[async_trait]
impl HealthCheckable for InMemoryClaimsStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy(ADAPTER_ID, 0)
    }
}

#[async_trait]
impl ClaimsPort for InMemoryClaimsStore {
    async fn create(&self, claim: NewClaim) -> Result<ClaimDetail, PortError> {
        let detail = claim.into_detail(ClaimId::new_v7(), Utc::now());

        let mut claims = self.claims.write().await;
        ensure_unique(&claims, &detail)?;
        claims.push(detail.clone());

        debug!(claim_id = %detail.id(), claim_number = %detail.claim.claim_number, "Stored claim in memory");
        Ok(detail)
    }

    async fn find_many(&self, filter: &ClaimFilter, window: PageWindow) -> Result<Vec<Claim>, PortError> {
        let claims = self.claims.read().await;
        let skip = usize::try_from(window.skip).unwrap_or(usize::MAX);
        let take = usize::try_from(window.take).unwrap_or(usize::MAX);

        Ok(matching(&claims, filter)
            .into_iter()
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &ClaimFilter) -> Result<u64, PortError> {
        let claims = self.claims.read().await;
        Ok(claims.iter().filter(|d| filter.matches(&d.claim)).count() as u64)
    }

    async fn find_one(&self, id: ClaimId) -> Result<Option<ClaimDetail>, PortError> {
        let claims = self.claims.read().await;
        Ok(claims.iter().find(|d| d.id() == id).map(|detail| {
            let mut detail = detail.clone();
            detail.events.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            detail
        }))
    }
}

//! Claim intake service
//!
//! Orchestrates validation, claim-number allocation and persistence for the
//! three intake operations. The store is handed in at construction; the
//! service keeps no other state.

use chrono::{DateTime, Datelike, Utc};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use core_kernel::{ClaimId, HealthCheckResult};

use crate::claim::ClaimDetail;
use crate::claim_number::ClaimNumber;
use crate::error::ClaimError;
use crate::ports::{ClaimPage, ClaimsPort, ListQuery};
use crate::validation::validate_json;

/// Upper bound on claim-number draws for a single submission
pub const MAX_CLAIM_NUMBER_ATTEMPTS: u32 = 5;

/// Source of the current time
pub type Clock = fn() -> DateTime<Utc>;

/// Application service for claim submission and lookup
#[derive(Clone)]
pub struct ClaimService {
    store: Arc<dyn ClaimsPort>,
    clock: Clock,
}

impl ClaimService {
    /// Creates a service over the given store, using the system clock
    pub fn new(store: Arc<dyn ClaimsPort>) -> Self {
        Self {
            store,
            clock: Utc::now,
        }
    }

    /// Replaces the clock, e.g. to pin "today" in tests
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Validates and stores a submitted claim
    ///
    /// Every violation is reported at once. On success the stored claim is
    /// returned with its single `STATUS_CHANGED` event. A claim-number
    /// collision draws a fresh number, up to [`MAX_CLAIM_NUMBER_ATTEMPTS`].
    #[instrument(skip(self, body))]
    pub async fn submit(&self, body: &Value) -> Result<ClaimDetail, ClaimError> {
        let now = (self.clock)();
        let validated = validate_json(body, now.date_naive())?;

        for attempt in 1..=MAX_CLAIM_NUMBER_ATTEMPTS {
            let claim_number = ClaimNumber::generate(now.year(), &mut rand::rng());
            let new_claim = validated.clone().into_new_claim(claim_number);

            match self.store.create(new_claim).await {
                Ok(detail) => {
                    info!(
                        claim_id = %detail.id(),
                        claim_number = %detail.claim.claim_number,
                        lob = %detail.claim.lob,
                        "Claim submitted"
                    );
                    return Ok(detail);
                }
                Err(e) if e.is_conflict() => {
                    warn!(attempt, error = %e, "Claim number collision, drawing another");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ClaimError::ClaimNumberExhausted {
            attempts: MAX_CLAIM_NUMBER_ATTEMPTS,
        })
    }

    /// Lists one page of claims matching the query, plus the total
    ///
    /// The page fetch and the count run concurrently; both must succeed.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &ListQuery) -> Result<ClaimPage, ClaimError> {
        let filter = query.filter();
        let request = query.page_request();

        let (items, total) = tokio::try_join!(
            self.store.find_many(&filter, request.window()),
            self.store.count(&filter),
        )?;

        debug!(page = request.page, page_size = request.page_size, total, returned = items.len(), "Listed claims");

        Ok(ClaimPage {
            page: request.page,
            page_size: request.page_size,
            total,
            items,
        })
    }

    /// Fetches a claim with its events
    ///
    /// An id that does not parse is indistinguishable from an unknown one.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<ClaimDetail, ClaimError> {
        let claim_id: ClaimId = id
            .parse()
            .map_err(|_| ClaimError::NotFound(id.to_string()))?;

        self.store
            .find_one(claim_id)
            .await?
            .ok_or_else(|| ClaimError::NotFound(id.to_string()))
    }

    /// Health of the underlying store
    pub async fn store_health(&self) -> HealthCheckResult {
        self.store.health_check().await
    }
}

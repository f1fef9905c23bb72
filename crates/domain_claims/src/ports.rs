//! Claims Domain Ports
//!
//! The `ClaimsPort` trait is the narrow persistence interface the claim
//! service depends on. Two adapters implement it:
//!
//! - **PostgreSQL**: `infra_db::adapters::PostgresClaimsAdapter`
//! - **In-memory**: [`crate::adapters::InMemoryClaimsStore`], for tests and
//!   local runs without a database
//!
//! # Filter semantics
//!
//! `status`, `lob` and `assigned_to` are exact matches on the wire value.
//! `search` is a case-insensitive substring match against the claim number,
//! insured name, or policy number (any of the three). All present filters
//! must hold; absent or empty ones impose nothing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, DomainPort, HealthCheckable, PortError};

use crate::claim::{Claim, ClaimDetail, NewClaim};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MIN_PAGE_SIZE: u64 = 5;
pub const MAX_PAGE_SIZE: u64 = 50;

/// Criteria for listing and counting claims
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimFilter {
    pub status: Option<String>,
    pub lob: Option<String>,
    pub assigned_to: Option<String>,
    pub search: Option<String>,
}

impl ClaimFilter {
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = non_empty(Some(status.into()));
        self
    }

    pub fn with_lob(mut self, lob: impl Into<String>) -> Self {
        self.lob = non_empty(Some(lob.into()));
        self
    }

    pub fn with_assigned_to(mut self, assigned_to: impl Into<String>) -> Self {
        self.assigned_to = non_empty(Some(assigned_to.into()));
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = non_empty(Some(search.into()));
        self
    }

    /// Evaluates the filter against a claim in memory
    pub fn matches(&self, claim: &Claim) -> bool {
        if let Some(status) = &self.status {
            if claim.status.as_str() != status {
                return false;
            }
        }
        if let Some(lob) = &self.lob {
            if claim.lob.as_str() != lob {
                return false;
            }
        }
        if let Some(assigned_to) = &self.assigned_to {
            if claim.assigned_to.as_deref() != Some(assigned_to.as_str()) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            return [
                claim.claim_number.as_str(),
                claim.insured_name.as_str(),
                claim.policy_number.as_str(),
            ]
            .iter()
            .any(|haystack| haystack.to_lowercase().contains(&needle));
        }
        true
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Slice of an ordered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub take: u64,
}

/// A normalized page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Normalizes raw query values
    ///
    /// Values that are absent or not integers fall back to the defaults; the
    /// page is floored at 1 and the page size clamped to 5..=50.
    pub fn from_raw(page: Option<&str>, page_size: Option<&str>) -> Self {
        let page = parse_int(page).unwrap_or(1).max(1) as u64;
        let page_size = parse_int(page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE as i64)
            .clamp(MIN_PAGE_SIZE as i64, MAX_PAGE_SIZE as i64) as u64;
        Self { page, page_size }
    }

    pub fn window(&self) -> PageWindow {
        PageWindow {
            skip: (self.page - 1).saturating_mul(self.page_size),
            take: self.page_size,
        }
    }
}

fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim).filter(|s| !s.is_empty()).and_then(|s| s.parse().ok())
}

/// Raw `GET /claims` query parameters
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub status: Option<String>,
    pub lob: Option<String>,
    pub assigned_to: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl ListQuery {
    /// Builds a query from decoded `key=value` pairs
    ///
    /// A repeated key keeps its first value. Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = ListQuery::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "status" => &mut query.status,
                "lob" => &mut query.lob,
                "assignedTo" => &mut query.assigned_to,
                "search" => &mut query.search,
                "page" => &mut query.page,
                "pageSize" => &mut query.page_size,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    pub fn filter(&self) -> ClaimFilter {
        ClaimFilter {
            status: non_empty(self.status.clone()),
            lob: non_empty(self.lob.clone()),
            assigned_to: non_empty(self.assigned_to.clone()),
            search: non_empty(self.search.clone()),
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_raw(self.page.as_deref(), self.page_size.as_deref())
    }
}

/// One page of claims plus the total matching the filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimPage {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub items: Vec<Claim>,
}

/// Persistence interface for claims
///
/// Implementations create a claim and its initial event atomically, list
/// newest `created_at` first, and return events oldest first on detail reads.
#[async_trait]
pub trait ClaimsPort: DomainPort + HealthCheckable {
    /// Stores a new claim with its initial event, assigning ids and timestamps
    ///
    /// Returns `PortError::Conflict` if the claim number is already taken.
    async fn create(&self, claim: NewClaim) -> Result<ClaimDetail, PortError>;

    /// Lists matching claims, newest first, without events
    async fn find_many(&self, filter: &ClaimFilter, window: PageWindow) -> Result<Vec<Claim>, PortError>;

    /// Counts matching claims regardless of any page window
    async fn count(&self, filter: &ClaimFilter) -> Result<u64, PortError>;

    /// Fetches one claim with its events, oldest first
    async fn find_one(&self, id: ClaimId) -> Result<Option<ClaimDetail>, PortError>;
}

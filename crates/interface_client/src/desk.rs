//! Claim desk view model
//!
//! Backs a screen with the claim list on one side and the intake form on
//! the other. A failed list load leaves the list empty with an error; the
//! form stays usable.

use chrono::{NaiveDate, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

use domain_claims::{Claim, ClaimDetail, Field};

use crate::api::ClaimsApi;
use crate::form::ClaimForm;

pub const LOAD_FAILED: &str = "Failed to load claims";
pub const SUBMIT_FAILED: &str = "Failed to submit claim";

/// Tracks whether the owning view is still mounted
///
/// Clones share the flag. A load that finishes after `unmount` is dropped.
#[derive(Debug, Clone)]
pub struct MountHandle(Arc<AtomicBool>);

impl Default for MountHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl MountHandle {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn unmount(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What a submit attempt did
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent
    Invalid,
    /// The service stored the claim
    Created(ClaimDetail),
    /// The service or network refused; `error` holds the message
    Failed,
}

/// List and form state for one claims screen
pub struct ClaimDesk<A: ClaimsApi> {
    api: A,
    today: fn() -> NaiveDate,
    pub claims: Vec<Claim>,
    pub loading: bool,
    pub saving: bool,
    pub error: Option<String>,
    pub form: ClaimForm,
}

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

impl<A: ClaimsApi> ClaimDesk<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            today: utc_today,
            claims: Vec::new(),
            loading: false,
            saving: false,
            error: None,
            form: ClaimForm::new(),
        }
    }

    /// Replaces the source of "today" for local date checks
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Message under a form field, if any
    pub fn field_error(&self, field: Field) -> Option<String> {
        self.form.field_error(field, (self.today)())
    }

    /// Fetches the claim list once, as on mount
    ///
    /// Never retries. If `mount` was unmounted while the request was in
    /// flight, the result is discarded and state is left as it was.
    pub async fn load(&mut self, mount: &MountHandle) {
        self.loading = true;
        self.error = None;

        let result = self.api.fetch_claims().await;
        self.loading = false;
        if !mount.is_mounted() {
            debug!("View unmounted during load, discarding result");
            return;
        }

        match result {
            Ok(claims) => self.claims = claims,
            Err(e) => {
                warn!(error = %e, "Failed to load claims");
                self.error = Some(e.user_message(LOAD_FAILED));
            }
        }
    }

    /// Validates locally, then submits
    ///
    /// On success the claim is prepended to the list and the form reset. On
    /// local failure every field is marked touched so all errors show.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.form.validate((self.today)()).is_err() {
            self.form.mark_all_touched();
            return SubmitOutcome::Invalid;
        }

        self.saving = true;
        self.error = None;

        let outcome = match self.api.create_claim(self.form.values()).await {
            Ok(detail) => {
                self.claims.insert(0, detail.claim.clone());
                self.form.reset();
                SubmitOutcome::Created(detail)
            }
            Err(e) => {
                warn!(error = %e, "Failed to submit claim");
                self.error = Some(e.user_message(SUBMIT_FAILED));
                SubmitOutcome::Failed
            }
        };

        self.saving = false;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use async_trait::async_trait;
    use core_kernel::ClaimId;
    use domain_claims::{ClaimNumber, ClaimSubmission, Field, Lob, Priority};
    use serde_json::json;
    use std::sync::Mutex;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn detail_for(submission: &ClaimSubmission) -> ClaimDetail {
        let validated = domain_claims::validation::validate_submission(submission, today()).unwrap();
        let number: ClaimNumber = "CLM-2026-654321".parse().unwrap();
        validated.into_new_claim(number).into_detail(ClaimId::new_v7(), Utc::now())
    }

    /// Scripted API that records what it was sent
    #[derive(Default)]
    struct MockApi {
        list: Mutex<Option<Result<Vec<Claim>, ClientError>>>,
        create_error: Mutex<Option<ClientError>>,
        sent: Mutex<Vec<ClaimSubmission>>,
        unmount_during_fetch: Option<MountHandle>,
    }

    #[async_trait]
    impl ClaimsApi for MockApi {
        async fn fetch_claims(&self) -> Result<Vec<Claim>, ClientError> {
            if let Some(mount) = &self.unmount_during_fetch {
                mount.unmount();
            }
            self.list.lock().unwrap().take().unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn create_claim(&self, submission: &ClaimSubmission) -> Result<ClaimDetail, ClientError> {
            self.sent.lock().unwrap().push(submission.clone());
            match self.create_error.lock().unwrap().take() {
                Some(e) => Err(e),
                None => Ok(detail_for(submission)),
            }
        }
    }

    fn fill(form: &mut ClaimForm) {
        form.set(Field::Lob, Lob::Homeowners.as_str());
        form.set(Field::PolicyNumber, "HO-0001");
        form.set(Field::InsuredName, "Alex Rivers");
        form.set(Field::LossDate, "2026-02-14");
        form.set(Field::LossType, "Water Damage");
        form.set(Field::Description, "Kitchen leak caused cabinet damage.");
        form.set(Field::ContactEmail, "alex@example.com");
        form.set(Field::Priority, Priority::High.as_str());
    }

    #[tokio::test]
    async fn test_load_populates_claims() {
        let existing = detail_for(&{
            let mut form = ClaimForm::new();
            fill(&mut form);
            form.values().clone()
        })
        .claim;
        let api = MockApi {
            list: Mutex::new(Some(Ok(vec![existing.clone()]))),
            ..Default::default()
        };
        let mut desk = ClaimDesk::new(api).with_today(today);

        desk.load(&MountHandle::new()).await;

        assert_eq!(desk.claims, vec![existing]);
        assert!(!desk.loading);
        assert_eq!(desk.error, None);
    }

    #[tokio::test]
    async fn test_failed_load_shows_error_and_empty_list() {
        let api = MockApi {
            list: Mutex::new(Some(Err(ClientError::Api { status: 503, body: None }))),
            ..Default::default()
        };
        let mut desk = ClaimDesk::new(api);

        desk.load(&MountHandle::new()).await;

        assert!(desk.claims.is_empty());
        assert!(!desk.loading);
        assert_eq!(desk.error.as_deref(), Some("Failed to load claims (503)"));
    }

    #[tokio::test]
    async fn test_load_after_unmount_is_discarded() {
        let mount = MountHandle::new();
        let api = MockApi {
            list: Mutex::new(Some(Err(ClientError::Network("reset".to_string())))),
            unmount_during_fetch: Some(mount.clone()),
            ..Default::default()
        };
        let mut desk = ClaimDesk::new(api);

        desk.load(&mount).await;

        assert!(!mount.is_mounted());
        assert!(!desk.loading);
        assert_eq!(desk.error, None);
        assert!(desk.claims.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_api() {
        let mut desk = ClaimDesk::new(MockApi::default()).with_today(today);
        desk.form.set(Field::InsuredName, "A");

        let outcome = desk.submit().await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert!(desk.api().sent.lock().unwrap().is_empty());
        assert!(Field::ALL.iter().all(|f| desk.form.is_touched(*f)));
        assert_eq!(
            desk.field_error(Field::InsuredName).as_deref(),
            Some("Must be at least 2 characters.")
        );
    }

    #[tokio::test]
    async fn test_successful_submit_prepends_and_resets() {
        let mut desk = ClaimDesk::new(MockApi::default()).with_today(today);
        fill(&mut desk.form);

        let outcome = desk.submit().await;

        let SubmitOutcome::Created(detail) = outcome else {
            panic!("expected a created claim, got {:?}", outcome);
        };
        assert_eq!(desk.claims.first(), Some(&detail.claim));
        assert_eq!(desk.form, ClaimForm::new());
        assert!(!desk.saving);
        assert_eq!(desk.api().sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_server_rejection_keeps_form() {
        let api = MockApi {
            create_error: Mutex::new(Some(ClientError::Api {
                status: 400,
                body: Some(json!({
                    "error": "VALIDATION_ERROR",
                    "issues": [{ "path": ["lossDate"], "message": "Loss date cannot be in the future." }]
                })),
            })),
            ..Default::default()
        };
        let mut desk = ClaimDesk::new(api).with_today(today);
        fill(&mut desk.form);

        let outcome = desk.submit().await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(desk.error.as_deref(), Some("Loss date cannot be in the future."));
        assert_eq!(desk.form.value(Field::InsuredName), "Alex Rivers");
        assert!(desk.claims.is_empty());
        assert!(!desk.saving);
    }
}

//! Claims API Client
//!
//! Everything a front-end needs to talk to the claims service:
//!
//! - `api`: the [`ClaimsApi`] trait and its reqwest implementation
//! - `error`: [`ClientError`] and the user-facing message rules
//! - `form`: [`ClaimForm`], submission fields with touched tracking
//! - `desk`: [`ClaimDesk`], the list-plus-form view model
//!
//! Validation runs locally with the same rules the service applies, so a
//! form that fails here never reaches the network. The service still has
//! the final say.

pub mod api;
pub mod error;
pub mod form;
pub mod desk;

pub use api::{ClaimsApi, HttpClaimsApi, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use form::ClaimForm;
pub use desk::{ClaimDesk, MountHandle, SubmitOutcome};

pub mod api;
pub mod error;
pub mod form;
pub mod retry;

pub use api::{ApiClient, CompetitionRegistrar};
pub use error::{ClientError, Result};
pub use form::{RegistrationForm, SubmissionState};

use async_trait::async_trait;
use tax_core::{CalculationResult, EmailAddress, Profile, SaveAck, SaveProfileRequest};
use tracing::debug;

use crate::error::ClientError;

/// Result of looking up a profile by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Found(Profile),
    /// No profile is stored for this email yet; not an error.
    NotFound,
}

/// The remote operations the wizard relies on.
///
/// None of the operations retry; every failure is returned to the caller as
/// is.
#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn fetch_profile(
        &self,
        email: &EmailAddress,
    ) -> Result<FetchOutcome, ClientError>;

    async fn save_profile(
        &self,
        request: &SaveProfileRequest,
    ) -> Result<SaveAck, ClientError>;

    /// Runs the calculation against the profile last saved for `email`.
    async fn request_calculation(
        &self,
        email: &EmailAddress,
    ) -> Result<CalculationResult, ClientError>;

    /// Saves `request`, then calculates for the same email.
    ///
    /// The calculation is only requested once the save has succeeded.
    async fn save_and_calculate(
        &self,
        request: &SaveProfileRequest,
    ) -> Result<CalculationResult, ClientError> {
        let ack = self.save_profile(request).await?;
        debug!(status = ack.status, user_id = ?ack.user_id, "profile saved");
        self.request_calculation(&request.email).await
    }
}

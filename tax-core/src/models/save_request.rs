use serde::{Deserialize, Serialize};

use super::Profile;
use crate::email::EmailAddress;

/// Body of a profile save: the owner's email plus the profile itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveProfileRequest {
    pub email: EmailAddress,
    pub profile_data: Profile,
}

impl SaveProfileRequest {
    pub fn new(
        email: EmailAddress,
        profile_data: Profile,
    ) -> Self {
        Self {
            email,
            profile_data,
        }
    }
}

/// Acknowledgement of a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveAck {
    /// The 2xx status the service answered with.
    pub status: u16,
    /// Id of the stored user, when the response body carried one.
    pub user_id: Option<i64>,
}

//! Photo library permission

use serde::{Deserialize, Serialize};

/// Status reported by the library when access is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionStatus {
    NotDetermined,
    Restricted,
    Denied,
    Authorized,
    Limited,
}

/// Permission state tracked by the session controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PermissionState {
    #[default]
    Unknown,
    Authorized,
    Limited,
    Denied,
    Restricted,
}

impl PermissionState {
    /// State a status moves to. `NotDetermined` leaves the state alone.
    pub fn apply(self, status: PermissionStatus) -> Self {
        match status {
            PermissionStatus::NotDetermined => self,
            PermissionStatus::Authorized => PermissionState::Authorized,
            PermissionStatus::Limited => PermissionState::Limited,
            PermissionStatus::Denied => PermissionState::Denied,
            PermissionStatus::Restricted => PermissionState::Restricted,
        }
    }

    pub fn can_browse(self) -> bool {
        matches!(self, PermissionState::Authorized | PermissionState::Limited)
    }

    pub fn is_denied(self) -> bool {
        matches!(self, PermissionState::Denied | PermissionState::Restricted)
    }
}

//! Prior authorization domain errors

use thiserror::Error;

use core_kernel::PriorAuthId;

/// Errors that can occur in the prior authorization domain
#[derive(Debug, Error)]
pub enum PriorAuthError {
    #[error("Approved authorization {0} has no approval date")]
    MissingApprovalDate(PriorAuthId),

    #[error("Authorization not found: {0}")]
    AuthorizationNotFound(String),
}

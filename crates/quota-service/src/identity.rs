//! # Authenticated Identity Input
//!
//! The service consumes the authenticated member as an opaque input
//! produced by the auth middleware in front of it. A request without an
//! identity is rejected, never processed.

use quota_core::MemberIdentity;

use crate::error::ApiError;

/// Requires an identity on the request.
///
/// ## Returns
/// * `Ok(&MemberIdentity)` - identity present
/// * `Err(ApiError)` - unauthenticated (401-class)
pub fn require_member(identity: Option<&MemberIdentity>) -> Result<&MemberIdentity, ApiError> {
    identity.ok_or_else(ApiError::unauthenticated)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_missing_identity_is_unauthenticated() {
        let err = require_member(None).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthenticated);
        assert_eq!(err.code.http_status(), 401);
    }

    #[test]
    fn test_present_identity_passes_through() {
        let member = MemberIdentity {
            member_id: "member-1".to_string(),
            display_name: "Alice".to_string(),
        };
        let got = require_member(Some(&member)).unwrap();
        assert_eq!(got.member_id, "member-1");
    }
}

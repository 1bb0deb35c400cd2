//! Shared HTTP response helpers for CMS adapters.
//!
//! Centralizes status-code checks (401/403 credential rejection, non-success
//! body capture) so the adapter modules stay focused on request construction
//! and response mapping.

use crate::error::CmsError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **401/403** -> [`CmsError::Auth`] so the caller can distinguish bad
///   credentials from other failures.
/// - **Non-success status** -> [`CmsError::Api`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, CmsError> {
    let status = resp.status();
    if status == 401 || status == 403 {
        return Err(CmsError::Auth {
            status: status.as_u16(),
        });
    }
    if !status.is_success() {
        return Err(CmsError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

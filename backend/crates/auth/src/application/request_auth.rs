//! Request Authentication
//!
//! Pieces shared by the v1 API authentication schemes: which paths need
//! authentication, and where credentials live in a request.

use axum::http::{HeaderMap, header};

use crate::domain::entity::user::User;
use crate::error::AuthResult;

/// Whether `path` requires authentication
///
/// `true` when there is no path or no exclusion list. The path is compared
/// with a trailing slash appended if it has none. An entry ending in `*`
/// excludes every path starting with the rest of the entry; other entries
/// exclude themselves and anything below them. Empty entries are ignored.
pub fn require_auth<S: AsRef<str>>(path: Option<&str>, excluded_paths: &[S]) -> bool {
    let Some(path) = path else {
        return true;
    };
    if excluded_paths.is_empty() {
        return true;
    }

    let path = if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    };

    !excluded_paths
        .iter()
        .map(AsRef::as_ref)
        .filter(|excluded| !excluded.is_empty())
        .any(|excluded| path.starts_with(excluded.strip_suffix('*').unwrap_or(excluded)))
}

/// Raw `Authorization` header value
pub fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

/// Value of the session cookie called `name`
pub fn session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    platform::cookie::extract_cookie(headers, name)
}

/// Resolves the user a request is authenticated as
#[trait_variant::make(Authenticator: Send)]
pub trait LocalAuthenticator {
    /// `Ok(None)` when the request carries no usable credentials
    async fn current_user(&self, headers: &HeaderMap) -> AuthResult<Option<User>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const EXCLUDED: [&str; 1] = ["/api/v1/status/"];

    #[test]
    fn test_require_auth_without_rules() {
        assert!(require_auth::<&str>(None, &[]));
        assert!(require_auth(None, &EXCLUDED));
        assert!(require_auth::<&str>(Some("/api/v1/status/"), &[]));
    }

    #[test]
    fn test_require_auth_is_slash_tolerant() {
        assert!(!require_auth(Some("/api/v1/status/"), &EXCLUDED));
        assert!(!require_auth(Some("/api/v1/status"), &EXCLUDED));
        assert!(require_auth(Some("/api/v1/users"), &EXCLUDED));
    }

    #[test]
    fn test_require_auth_wildcard() {
        let excluded = ["/api/v1/stat*"];
        assert!(!require_auth(Some("/api/v1/users"), &["/api/v1/users*"]));
        assert!(!require_auth(Some("/api/v1/status"), &excluded));
        assert!(!require_auth(Some("/api/v1/stats"), &excluded));
        assert!(require_auth(Some("/api/v1/users"), &excluded));
    }

    #[test]
    fn test_require_auth_skips_empty_entries() {
        assert!(require_auth(Some("/api/v1/users"), &["", "/api/v1/status/"]));
    }

    #[test]
    fn test_authorization_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(authorization_header(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Test"));
        assert_eq!(authorization_header(&headers), Some("Test"));
    }

    #[test]
    fn test_session_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("_my_session_id=abc; other=1"),
        );
        assert_eq!(
            session_cookie(&headers, "_my_session_id"),
            Some("abc".to_string())
        );
        assert_eq!(session_cookie(&headers, "session_id"), None);
    }
}

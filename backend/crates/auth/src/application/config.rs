//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::env;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;
use platform::cookie::CookieConfig;

/// Request authentication scheme of the v1 API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthType {
    /// No authentication, every route is public
    #[default]
    None,
    /// `Authorization: Basic <base64(email:password)>`
    Basic,
    /// Session id cookie issued by `/auth_session/login`
    Session,
}

impl AuthType {
    /// Parse an `AUTH_TYPE` value; anything unknown means no authentication
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "basic_auth" => AuthType::Basic,
            "session_auth" => AuthType::Session,
            _ => AuthType::None,
        }
    }
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Cookie carrying the user service session id
    pub session_cookie_name: String,
    /// Cookie carrying the v1 API session id (`SESSION_NAME`)
    pub api_session_cookie_name: String,
    /// v1 API authentication scheme (`AUTH_TYPE`)
    pub auth_type: AuthType,
    /// v1 API paths that never require authentication
    pub excluded_paths: Vec<String>,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session_id".to_string(),
            api_session_cookie_name: "_my_session_id".to_string(),
            auth_type: AuthType::None,
            excluded_paths: vec![
                "/api/v1/status/".to_string(),
                "/api/v1/unauthorized/".to_string(),
                "/api/v1/forbidden/".to_string(),
                "/api/v1/auth_session/login/".to_string(),
            ],
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::default()
        }
    }

    /// Overlay `SESSION_NAME`, `AUTH_TYPE`, `PASSWORD_PEPPER`,
    /// `COOKIE_SECURE` and `COOKIE_SAME_SITE` on top of `base`
    pub fn from_env(base: Self) -> Self {
        Self::from_lookup(base, |key| env::var(key).ok())
    }

    /// [`AuthConfig::from_env`] reading variables through `lookup`
    ///
    /// Blank values count as unset. An unknown `COOKIE_SAME_SITE` keeps the
    /// base policy.
    pub fn from_lookup(base: Self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = base;

        if let Some(name) = var("SESSION_NAME") {
            config.api_session_cookie_name = name;
        }
        if let Some(auth_type) = var("AUTH_TYPE") {
            config.auth_type = AuthType::parse(&auth_type);
        }
        if let Some(pepper) = var("PASSWORD_PEPPER") {
            config.password_pepper = Some(pepper.into_bytes());
        }
        if let Some(secure) = var("COOKIE_SECURE") {
            config.cookie_secure = matches!(secure.as_str(), "1" | "true" | "yes");
        }
        if let Some(same_site) = var("COOKIE_SAME_SITE").and_then(|s| SameSite::parse(&s)) {
            config.cookie_same_site = same_site;
        }

        config
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Cookie attributes for the user service session
    pub fn session_cookie(&self) -> CookieConfig {
        self.cookie_named(&self.session_cookie_name)
    }

    /// Cookie attributes for the v1 API session
    pub fn api_session_cookie(&self) -> CookieConfig {
        self.cookie_named(&self.api_session_cookie_name)
    }

    fn cookie_named(&self, name: &str) -> CookieConfig {
        CookieConfig {
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            ..CookieConfig::named(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_type_parse() {
        assert_eq!(AuthType::parse("basic_auth"), AuthType::Basic);
        assert_eq!(AuthType::parse("session_auth"), AuthType::Session);
        assert_eq!(AuthType::parse("auth"), AuthType::None);
        assert_eq!(AuthType::parse(""), AuthType::None);
    }

    #[test]
    fn test_development_cookie_is_not_secure() {
        let config = AuthConfig::development();
        assert!(!config.cookie_secure);
        assert!(!config.session_cookie().build_set_cookie("x").contains("Secure"));
    }

    #[test]
    fn test_cookie_names() {
        let config = AuthConfig::default();
        assert_eq!(config.session_cookie().name, "session_id");
        assert_eq!(config.api_session_cookie().name, "_my_session_id");
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| {
            vars.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn test_from_lookup_overlays_variables() {
        let config = AuthConfig::from_lookup(
            AuthConfig::default(),
            lookup(&[
                ("SESSION_NAME", "my_api_session"),
                ("AUTH_TYPE", "session_auth"),
                ("PASSWORD_PEPPER", "pepper"),
                ("COOKIE_SECURE", "false"),
                ("COOKIE_SAME_SITE", "Strict"),
            ]),
        );

        assert_eq!(config.api_session_cookie().name, "my_api_session");
        assert_eq!(config.session_cookie().name, "session_id");
        assert_eq!(config.auth_type, AuthType::Session);
        assert_eq!(config.pepper(), Some(b"pepper".as_slice()));
        assert!(!config.cookie_secure);
        assert_eq!(config.cookie_same_site, SameSite::Strict);
    }

    #[test]
    fn test_from_lookup_keeps_base_when_unset_or_invalid() {
        let config = AuthConfig::from_lookup(
            AuthConfig::development(),
            lookup(&[
                ("SESSION_NAME", "  "),
                ("AUTH_TYPE", "basic_auth"),
                ("COOKIE_SAME_SITE", "sometimes"),
            ]),
        );

        assert_eq!(config.api_session_cookie_name, "_my_session_id");
        assert_eq!(config.auth_type, AuthType::Basic);
        assert_eq!(config.password_pepper, None);
        assert!(!config.cookie_secure);
        assert_eq!(config.cookie_same_site, SameSite::Lax);
    }

    #[test]
    fn test_from_lookup_unknown_auth_type() {
        let config = AuthConfig::from_lookup(
            AuthConfig::default(),
            lookup(&[("AUTH_TYPE", "jwt")]),
        );
        assert_eq!(config.auth_type, AuthType::None);
    }
}

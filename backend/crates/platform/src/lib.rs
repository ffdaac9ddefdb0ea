//! Platform Crate - Technical Infrastructure
//!
//! Shared technical building blocks with no domain knowledge:
//! - Password hashing (Argon2id)
//! - Base64 helpers
//! - Cookie management
//! - PII redaction for log output

pub mod cookie;
pub mod crypto;
pub mod password;
pub mod redact;

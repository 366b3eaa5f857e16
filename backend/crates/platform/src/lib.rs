//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain meaning:
//! - Random bytes and opaque hex tokens ([`crypto`])
//! - Password hashing with Argon2id ([`password`])

pub mod crypto;
pub mod password;

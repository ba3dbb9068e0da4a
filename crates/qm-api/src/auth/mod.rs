//! Authentication plumbing.
//!
//! Token issuance lives in the surrounding platform; this API only
//! verifies bearer tokens and extracts the caller's identity, which the
//! quiz controller checks against session ownership.

pub mod jwt;
pub mod middleware;

pub use middleware::AuthUser;

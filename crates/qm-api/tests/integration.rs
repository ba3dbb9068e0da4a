//! Integration tests for the HTTP surface.
//!
//! These run the real router through `tower::ServiceExt::oneshot` with a
//! lazily-connected pool, so they cover every path that does not reach
//! Postgres: health and metrics, the topic catalog, the 404 fallback,
//! bearer-token rejection, request validation, and session-registry
//! lookups for unknown sessions.

mod common;

mod api_surface_tests;
mod auth_tests;
mod quiz_session_tests;

//! Adaptive assessment engine for Quiz Mentor
//!
//! This crate provides the core decision logic of the platform: the
//! difficulty-adjustment algorithm, the scoring policies, performance
//! aggregation, feedback text generation, and the in-memory registry of
//! live quiz sessions. Everything here is transport- and storage-agnostic;
//! the API crate wires it to HTTP and Postgres.

pub mod adaptive;
pub mod error;
pub mod feedback;
pub mod scoring;
pub mod session;

pub use error::SessionError;
pub use session::{AnswerOutcome, QuizSession, SessionRegistry};

//! In-memory registry of live quiz sessions.
//!
//! Sessions exist only between `start` and `complete`; they are never
//! persisted. The registry is the sole owner of live sessions. Callers get
//! either a cloned snapshot ([`SessionRegistry::get`]) or an exclusive
//! guard ([`SessionRegistry::lock`]) held for the whole operation, so the
//! read-modify-write of `current_index` and `score` can never interleave
//! between two concurrent answers for the same session. Distinct sessions
//! share no lock and proceed in parallel.
//!
//! The registry is process-local. Abandoned sessions are reclaimed by a
//! periodic [`SessionRegistry::evict_idle`] sweep driven by a background
//! job with a configurable TTL.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;

use crate::error::SessionError;

/// The per-question outcome accumulated inside a session.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerOutcome {
    /// Question that was answered
    pub question_id: Uuid,
    /// Option the learner picked
    pub selected_option_id: i32,
    /// Whether the pick matched the correct option
    pub is_correct: bool,
    /// Points earned under the fixed-award policy
    pub points: i32,
}

/// One in-progress quiz: a fixed question sequence, a cursor, and the
/// outcomes recorded so far.
#[derive(Debug, Clone)]
pub struct QuizSession {
    /// Owning user; every operation checks this against the caller.
    pub user_id: Uuid,
    /// Topic the questions were drawn from
    pub topic: String,
    /// Question sequence, fixed at creation
    pub question_ids: Vec<Uuid>,
    /// Index of the next unanswered question, monotonically non-decreasing
    pub current_index: usize,
    /// When the session was started
    pub started_at: DateTime<Utc>,
    /// Outcomes in answer order
    pub answers: Vec<AnswerOutcome>,
    /// Running score under the fixed-award policy
    pub score: i32,
}

impl QuizSession {
    /// Create a fresh session positioned at the first question.
    pub fn new(user_id: Uuid, topic: impl Into<String>, question_ids: Vec<Uuid>) -> Self {
        Self {
            user_id,
            topic: topic.into(),
            question_ids,
            current_index: 0,
            started_at: Utc::now(),
            answers: Vec::new(),
            score: 0,
        }
    }

    /// Total number of questions in the session.
    pub fn total_questions(&self) -> usize {
        self.question_ids.len()
    }

    /// Whether the cursor has moved past the last question.
    pub fn is_finished(&self) -> bool {
        self.current_index >= self.question_ids.len()
    }
}

/// Concurrency-safe keyed store of live sessions.
///
/// Sharded locking: an outer `RwLock` guards only the map shape, each
/// entry carries its own `Mutex`. Lookups take the outer read lock
/// briefly, then operate on the entry lock alone.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<QuizSession>>>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a session and return its freshly generated id.
    pub async fn create(&self, session: QuizSession) -> Uuid {
        let session_id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(session_id, Arc::new(Mutex::new(session)));
        session_id
    }

    /// Return a point-in-time snapshot of a session.
    pub async fn get(&self, session_id: Uuid) -> Result<QuizSession, SessionError> {
        let entry = self.entry(session_id).await?;
        let session = entry.lock().await;
        Ok(session.clone())
    }

    /// Lock a session for the duration of one operation.
    ///
    /// The guard gives exclusive access until dropped, so a
    /// read-modify-write that spans other awaits (a database commit, for
    /// instance) cannot interleave with another call for the same id.
    /// `remove` on a locked session takes effect once the guard is
    /// released and its returned snapshot still observes the update.
    pub async fn lock(
        &self,
        session_id: Uuid,
    ) -> Result<OwnedMutexGuard<QuizSession>, SessionError> {
        let entry = self.entry(session_id).await?;
        Ok(entry.lock_owned().await)
    }

    /// Remove a session, returning its final state.
    ///
    /// Subsequent operations on the same id fail with
    /// [`SessionError::NotFound`].
    pub async fn remove(&self, session_id: Uuid) -> Result<QuizSession, SessionError> {
        let entry = self
            .sessions
            .write()
            .await
            .remove(&session_id)
            .ok_or(SessionError::NotFound)?;
        let session = entry.lock().await;
        Ok(session.clone())
    }

    /// Drop sessions that started more than `max_age` ago.
    ///
    /// Entries whose lock is currently held are mid-operation and are left
    /// for the next sweep. Returns the number of sessions evicted.
    pub async fn evict_idle(&self, max_age: Duration) -> usize {
        let cutoff = Utc::now() - max_age;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| match entry.try_lock() {
            Ok(session) => session.started_at >= cutoff,
            Err(_) => true,
        });
        before - sessions.len()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn entry(&self, session_id: Uuid) -> Result<Arc<Mutex<QuizSession>>, SessionError> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .cloned()
            .ok_or(SessionError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session(user_id: Uuid, questions: usize) -> QuizSession {
        let question_ids = (0..questions).map(|_| Uuid::new_v4()).collect();
        QuizSession::new(user_id, "networking", question_ids)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let registry = SessionRegistry::new();
        let user_id = Uuid::new_v4();
        let session_id = registry.create(sample_session(user_id, 5)).await;

        let session = registry.get(session_id).await.unwrap();
        assert_eq!(session.user_id, user_id);
        assert_eq!(session.current_index, 0);
        assert_eq!(session.total_questions(), 5);
        assert!(!session.is_finished());
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let registry = SessionRegistry::new();
        assert_eq!(
            registry.get(Uuid::new_v4()).await.unwrap_err(),
            SessionError::NotFound
        );
    }

    #[tokio::test]
    async fn test_lock_applies_updates_in_place() {
        let registry = SessionRegistry::new();
        let session_id = registry.create(sample_session(Uuid::new_v4(), 2)).await;

        {
            let mut session = registry.lock(session_id).await.unwrap();
            session.score += 10;
            session.current_index += 1;
        }

        let session = registry.get(session_id).await.unwrap();
        assert_eq!(session.current_index, 1);
        assert_eq!(session.score, 10);
    }

    #[tokio::test]
    async fn test_remove_is_terminal() {
        let registry = SessionRegistry::new();
        let session_id = registry.create(sample_session(Uuid::new_v4(), 1)).await;

        registry.remove(session_id).await.unwrap();
        assert_eq!(
            registry.get(session_id).await.unwrap_err(),
            SessionError::NotFound
        );
        assert_eq!(
            registry.remove(session_id).await.unwrap_err(),
            SessionError::NotFound
        );
        assert_eq!(
            registry.lock(session_id).await.unwrap_err(),
            SessionError::NotFound
        );
    }

    #[tokio::test]
    async fn test_concurrent_mutations_on_one_session_serialize() {
        let registry = Arc::new(SessionRegistry::new());
        let session_id = registry.create(sample_session(Uuid::new_v4(), 64)).await;

        let mut handles = Vec::new();
        for _ in 0..32 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                let mut session = registry.lock(session_id).await.unwrap();
                session.current_index += 1;
                session.score += 10;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let session = registry.get(session_id).await.unwrap();
        assert_eq!(session.current_index, 32);
        assert_eq!(session.score, 320);
    }

    #[tokio::test]
    async fn test_distinct_sessions_are_independent() {
        let registry = Arc::new(SessionRegistry::new());
        let first = registry.create(sample_session(Uuid::new_v4(), 8)).await;
        let second = registry.create(sample_session(Uuid::new_v4(), 8)).await;

        let mut handles = Vec::new();
        for (session_id, answers) in [(first, 3usize), (second, 7usize)] {
            for _ in 0..answers {
                let registry = Arc::clone(&registry);
                handles.push(tokio::spawn(async move {
                    registry.lock(session_id).await.unwrap().current_index += 1;
                }));
            }
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(registry.get(first).await.unwrap().current_index, 3);
        assert_eq!(registry.get(second).await.unwrap().current_index, 7);
    }

    #[tokio::test]
    async fn test_remove_waits_for_in_flight_update() {
        let registry = Arc::new(SessionRegistry::new());
        let session_id = registry.create(sample_session(Uuid::new_v4(), 2)).await;

        // An answer in flight holds the session lock across its awaits
        let mut session = registry.lock(session_id).await.unwrap();

        let remover = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { registry.remove(session_id).await.unwrap() })
        };
        // Let the removal start; it must block on the held lock
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!remover.is_finished());

        session.score += 10;
        session.current_index += 1;
        drop(session);

        // The removal completes only after the update and observes it
        let final_state = remover.await.unwrap();
        assert_eq!(final_state.score, 10);
        assert_eq!(final_state.current_index, 1);
        assert_eq!(
            registry.lock(session_id).await.unwrap_err(),
            SessionError::NotFound
        );
    }

    #[tokio::test]
    async fn test_evict_idle_drops_only_stale_sessions() {
        let registry = SessionRegistry::new();
        let stale = registry.create(sample_session(Uuid::new_v4(), 1)).await;
        let fresh = registry.create(sample_session(Uuid::new_v4(), 1)).await;

        // Backdate one session past the TTL
        registry.lock(stale).await.unwrap().started_at = Utc::now() - Duration::hours(3);

        let evicted = registry.evict_idle(Duration::hours(2)).await;
        assert_eq!(evicted, 1);
        assert_eq!(registry.len().await, 1);
        assert!(registry.get(fresh).await.is_ok());
        assert_eq!(
            registry.get(stale).await.unwrap_err(),
            SessionError::NotFound
        );
    }
}

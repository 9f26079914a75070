//! Concurrent fan-out of one operation to every peer session.
//!
//! Each session gets its own tokio task. The caller always waits for every
//! task to finish; the [`FanoutPolicy`] decides what the caller gets back.
//! [`Suppress`] hands back only counts, so per-session errors never leave the
//! log. [`FirstError`] surfaces the first failure to complete.

use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::sync::Arc;
use tracing::error;

use crate::error::{AnnounceError, AnnounceResult, SessionError};
use crate::session::PeerSession;

/// Turns the joined per-peer outcomes into what the caller sees.
pub trait FanoutPolicy {
    type Output;

    fn finish(self, report: FanoutReport) -> Self::Output;
}

/// Log failures and return only a [`FanoutSummary`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Suppress;

impl FanoutPolicy for Suppress {
    type Output = FanoutSummary;

    fn finish(self, report: FanoutReport) -> FanoutSummary {
        FanoutSummary {
            attempted: report.attempted,
            succeeded: report.succeeded.len(),
            failed: report.failed.len(),
        }
    }
}

/// Fail with the first session error to complete.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstError;

impl FanoutPolicy for FirstError {
    type Output = AnnounceResult<FanoutReport>;

    fn finish(self, report: FanoutReport) -> AnnounceResult<FanoutReport> {
        match report.failed.first() {
            Some(first) => Err(AnnounceError::Session {
                peer: first.peer.clone(),
                source: first.error.clone(),
            }),
            None => Ok(report),
        }
    }
}

/// A session that failed during a fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerFailure {
    pub peer: String,
    pub error: SessionError,
}

/// Per-peer outcome of a fan-out, in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanoutReport {
    /// Number of sessions contacted.
    pub attempted: usize,
    /// Peers whose update succeeded.
    pub succeeded: Vec<String>,
    /// Peers whose update failed.
    pub failed: Vec<PeerFailure>,
}

impl FanoutReport {
    /// Returns true if no session failed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Outcome counts of a [`Suppress`] fan-out. Carries no error detail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanoutSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Runs `op` once per session concurrently and joins all of them.
///
/// `operation` names the action in failure logs ("Failed to {operation}
/// BGP routes"). A task that panics is recorded as
/// [`SessionError::TaskFailed`] for its peer.
pub async fn fan_out<P, F, Fut>(
    operation: &'static str,
    sessions: Vec<Arc<dyn PeerSession>>,
    policy: P,
    op: F,
) -> P::Output
where
    P: FanoutPolicy,
    F: Fn(Arc<dyn PeerSession>) -> Fut,
    Fut: Future<Output = Result<(), SessionError>> + Send + 'static,
{
    let mut report = FanoutReport {
        attempted: sessions.len(),
        ..FanoutReport::default()
    };

    let mut pending: FuturesUnordered<_> = sessions
        .into_iter()
        .map(|session| {
            let peer = session.peer().to_string();
            let handle = tokio::spawn(op(session));
            async move { (peer, handle.await) }
        })
        .collect();

    while let Some((peer, joined)) = pending.next().await {
        let outcome = joined.unwrap_or_else(|e| Err(SessionError::TaskFailed(e.to_string())));
        match outcome {
            Ok(()) => report.succeeded.push(peer),
            Err(err) => {
                error!(peer = %peer, error = %err, "Failed to {} BGP routes", operation);
                report.failed.push(PeerFailure { peer, error: err });
            }
        }
    }

    policy.finish(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bgp_types::Advertisement;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    struct TestSession {
        peer: String,
        delay: Duration,
        result: Result<(), SessionError>,
    }

    #[async_trait]
    impl PeerSession for TestSession {
        fn peer(&self) -> &str {
            &self.peer
        }

        async fn set_advertisements(&self, _: &[Advertisement]) -> Result<(), SessionError> {
            tokio::time::sleep(self.delay).await;
            if self.peer == "panics" {
                panic!("session blew up");
            }
            self.result.clone()
        }
    }

    fn session(peer: &str, delay_ms: u64, result: Result<(), SessionError>) -> Arc<dyn PeerSession> {
        Arc::new(TestSession {
            peer: peer.to_string(),
            delay: Duration::from_millis(delay_ms),
            result,
        })
    }

    async fn run<P: FanoutPolicy>(sessions: Vec<Arc<dyn PeerSession>>, policy: P) -> P::Output {
        fan_out("update", sessions, policy, |s| async move {
            s.set_advertisements(&[]).await
        })
        .await
    }

    #[tokio::test]
    async fn test_empty_session_set() {
        let report = run(Vec::new(), FirstError).await.unwrap();
        assert_eq!(report, FanoutReport::default());
        assert!(report.is_clean());

        assert_eq!(run(Vec::new(), Suppress).await, FanoutSummary::default());
    }

    #[tokio::test]
    async fn test_first_error_waits_for_every_peer() {
        let sessions = vec![
            session("a", 0, Ok(())),
            session("b", 0, Err(SessionError::Closed)),
            session("c", 0, Ok(())),
        ];
        let err = run(sessions, FirstError).await.unwrap_err();
        assert_eq!(
            err,
            AnnounceError::Session {
                peer: "b".to_string(),
                source: SessionError::Closed,
            }
        );
    }

    #[tokio::test]
    async fn test_first_error_success_lists_every_peer() {
        let sessions = vec![session("a", 0, Ok(())), session("b", 0, Ok(()))];
        let mut report = run(sessions, FirstError).await.unwrap();
        report.succeeded.sort();

        assert_eq!(report.attempted, 2);
        assert_eq!(report.succeeded, vec!["a".to_string(), "b".to_string()]);
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn test_suppress_returns_counts_only() {
        let sessions = vec![
            session("a", 0, Ok(())),
            session("b", 0, Err(SessionError::Closed)),
        ];
        let summary = run(sessions, Suppress).await;

        assert_eq!(
            summary,
            FanoutSummary {
                attempted: 2,
                succeeded: 1,
                failed: 1,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_error_is_first_to_complete() {
        let sessions = vec![
            session("slow", 50, Err(SessionError::Transport("slow".to_string()))),
            session("fast", 10, Err(SessionError::Transport("fast".to_string()))),
            session("ok", 0, Ok(())),
        ];
        let err = run(sessions, FirstError).await.unwrap_err();

        assert_eq!(
            err,
            AnnounceError::Session {
                peer: "fast".to_string(),
                source: SessionError::Transport("fast".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_panicking_task_is_a_peer_failure() {
        let sessions = vec![session("panics", 0, Ok(())), session("a", 0, Ok(()))];
        let err = run(sessions, FirstError).await.unwrap_err();
        assert!(matches!(
            err,
            AnnounceError::Session {
                ref peer,
                source: SessionError::TaskFailed(_),
            } if peer == "panics"
        ));

        let sessions = vec![session("panics", 0, Ok(())), session("a", 0, Ok(()))];
        let summary = run(sessions, Suppress).await;
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
    }
}

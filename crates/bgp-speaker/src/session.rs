//! Peer session contracts consumed by the announcer.
//!
//! Session lifecycle (connect, keepalive, teardown) belongs to the BGP
//! speaker library. The announcer only needs to push a full advertisement
//! set to each session and to enumerate the sessions that exist right now.

use async_trait::async_trait;
use bgp_types::Advertisement;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::SessionError;

/// An established BGP peering relationship.
///
/// Implementations must tolerate concurrent calls for different sessions;
/// the announcer never serializes calls to the same session either, so the
/// last update to reach a session wins.
#[async_trait]
pub trait PeerSession: Send + Sync {
    /// Peer name or address, used for logging and error reporting.
    fn peer(&self) -> &str;

    /// Replaces the full set of routes advertised on this session.
    ///
    /// An empty slice withdraws everything currently advertised.
    async fn set_advertisements(&self, adverts: &[Advertisement]) -> Result<(), SessionError>;

    /// Withdraws every route advertised on this session.
    async fn withdraw_all(&self) -> Result<(), SessionError> {
        self.set_advertisements(&[]).await
    }

    /// Replaces the advertised set with a non-empty `adverts`.
    ///
    /// Fails with [`SessionError::EmptyReplace`] instead of turning an empty
    /// batch into a withdrawal.
    async fn replace(&self, adverts: &[Advertisement]) -> Result<(), SessionError> {
        if adverts.is_empty() {
            return Err(SessionError::EmptyReplace);
        }
        self.set_advertisements(adverts).await
    }
}

/// Source of the peer sessions that are active at call time.
pub trait PeerSessionProvider: Send + Sync {
    /// Returns a point-in-time copy of the active sessions.
    fn peer_sessions(&self) -> Vec<Arc<dyn PeerSession>>;
}

/// A [`PeerSessionProvider`] over a list maintained by the session owner.
///
/// The owning component registers and drops sessions as peers come and go;
/// each call to [`peer_sessions`](PeerSessionProvider::peer_sessions)
/// returns an independent copy so in-flight announcements never observe
/// those mutations.
#[derive(Default)]
pub struct StaticPeerSessions {
    sessions: RwLock<Vec<Arc<dyn PeerSession>>>,
}

impl StaticPeerSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session, replacing any session for the same peer.
    pub fn insert(&self, session: Arc<dyn PeerSession>) {
        let mut sessions = self.sessions.write();
        match sessions.iter_mut().find(|s| s.peer() == session.peer()) {
            Some(existing) => *existing = session,
            None => sessions.push(session),
        }
    }

    /// Drops the session for `peer`, returning it if it was registered.
    pub fn remove(&self, peer: &str) -> Option<Arc<dyn PeerSession>> {
        let mut sessions = self.sessions.write();
        let idx = sessions.iter().position(|s| s.peer() == peer)?;
        Some(sessions.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl PeerSessionProvider for StaticPeerSessions {
    fn peer_sessions(&self) -> Vec<Arc<dyn PeerSession>> {
        self.sessions.read().clone()
    }
}

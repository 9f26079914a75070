//! RouteAnnouncer - pushes the node's prefixes to every BGP peer session.

use bgp_types::{Advertisement, IpPrefix};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::error::{AnnounceError, AnnounceResult, SessionError};
use crate::fanout::{fan_out, FanoutReport, FirstError, Suppress};
use crate::session::PeerSessionProvider;

/// Reconciles the set of advertised prefixes with the active peer sessions.
///
/// The announcer keeps no route state: each peer session is the source of
/// truth for what it currently advertises. Every call works on a fresh
/// snapshot of the sessions, and concurrent calls are not serialized.
pub struct RouteAnnouncer {
    /// Name used in log spans
    name: String,

    /// Sessions owned by the BGP speaker library
    provider: Arc<dyn PeerSessionProvider>,
}

impl RouteAnnouncer {
    pub fn new(name: impl Into<String>, provider: Arc<dyn PeerSessionProvider>) -> Self {
        Self {
            name: name.into(),
            provider,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Withdraws all advertised routes from every peer session.
    ///
    /// Best effort: sessions that fail keep their previous advertisements and
    /// the failure is only logged. Never retried, never reported to the caller.
    #[instrument(skip(self), fields(announcer = %self.name))]
    pub async fn withdraw(&self) {
        let sessions = self.provider.peer_sessions();
        info!(peers = sessions.len(), "Withdrawing BGP routes");

        let summary = fan_out("withdraw", sessions, Suppress, |session| async move {
            session.withdraw_all().await
        })
        .await;

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Withdrew BGP routes"
        );
    }

    /// Replaces the advertised routes on every peer session with `prefixes`.
    ///
    /// Malformed prefixes are logged and skipped. If nothing parses, fails
    /// with [`AnnounceError::NoAdvertisements`] without contacting any
    /// session. Otherwise every session receives the same list, and the call
    /// fails with the first session error once all sessions have answered.
    #[instrument(skip(self, prefixes), fields(announcer = %self.name))]
    pub async fn announce<S: AsRef<str>>(&self, prefixes: &[S]) -> AnnounceResult<FanoutReport> {
        let adverts: Arc<[Advertisement]> = build_advertisements(prefixes).into();
        if adverts.is_empty() {
            return Err(AnnounceError::NoAdvertisements);
        }

        let cidrs: Arc<[String]> = prefixes.iter().map(|p| p.as_ref().to_string()).collect();
        let sessions = self.provider.peer_sessions();

        fan_out("announce", sessions, FirstError, move |session| {
            let adverts = Arc::clone(&adverts);
            let cidrs = Arc::clone(&cidrs);
            async move {
                session.replace(&adverts).await?;
                debug!(peer = %session.peer(), cidr = ?cidrs, "Announced pod CIDRs");
                Ok::<(), SessionError>(())
            }
        })
        .await
    }
}

/// Parses `prefixes` into advertisements, skipping malformed entries.
///
/// Input order and duplicates are preserved.
pub fn build_advertisements<S: AsRef<str>>(prefixes: &[S]) -> Vec<Advertisement> {
    let mut adverts = Vec::with_capacity(prefixes.len());
    for raw in prefixes {
        let raw = raw.as_ref();
        match raw.parse::<IpPrefix>() {
            Ok(prefix) => adverts.push(Advertisement::new(prefix)),
            Err(err) => {
                error!(cidr = raw, error = %err, "Could not announce malformed CIDR");
            }
        }
    }
    adverts
}

//! Speaker - ties the configuration, the session registry and the announcer
//! together for the daemon and for agents that embed it.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::announcer::RouteAnnouncer;
use crate::config::SpeakerConfig;
use crate::error::AnnounceResult;
use crate::session::{PeerSessionProvider, StaticPeerSessions};

/// Announces the configured prefixes at startup and withdraws them on shutdown.
///
/// The BGP session manager registers and drops peer sessions through
/// [`Speaker::sessions`] as peerings come up and go down. Until it does, every
/// announce and withdraw reaches zero peers.
pub struct Speaker {
    config: SpeakerConfig,
    sessions: Arc<StaticPeerSessions>,
    announcer: RouteAnnouncer,
}

impl Speaker {
    pub fn new(config: SpeakerConfig) -> Self {
        let sessions = Arc::new(StaticPeerSessions::new());
        let provider: Arc<dyn PeerSessionProvider> = sessions.clone();
        let announcer = RouteAnnouncer::new(config.name.clone(), provider);
        Self {
            config,
            sessions,
            announcer,
        }
    }

    /// Session registry filled by the hosting agent's BGP session manager.
    pub fn sessions(&self) -> &Arc<StaticPeerSessions> {
        &self.sessions
    }

    pub fn announcer(&self) -> &RouteAnnouncer {
        &self.announcer
    }

    pub fn config(&self) -> &SpeakerConfig {
        &self.config
    }

    /// Announces the configured pod CIDRs to every registered peer.
    ///
    /// Does nothing when no pod CIDRs are configured.
    #[instrument(skip(self), fields(speaker = %self.config.name))]
    pub async fn start(&self) -> AnnounceResult<()> {
        if self.config.pod_cidrs.is_empty() {
            info!("No pod CIDRs configured, nothing to announce");
            return Ok(());
        }
        if self.sessions.is_empty() {
            warn!("No BGP peer sessions registered, announcement reaches no peers");
        }

        let report = self.announcer.announce(&self.config.pod_cidrs).await?;
        info!(
            peers = report.attempted,
            "Announced {} pod CIDRs",
            self.config.pod_cidrs.len()
        );
        Ok(())
    }

    /// Withdraws all routes if `withdraw_on_shutdown` is set.
    #[instrument(skip(self), fields(speaker = %self.config.name))]
    pub async fn shutdown(&self) {
        if self.config.withdraw_on_shutdown {
            self.announcer.withdraw().await;
        } else {
            info!("Leaving BGP routes advertised on shutdown");
        }
    }
}

//! # bgp-speaker - Route announcer for BGP peer sessions
//!
//! Reconciles the prefixes a node advertises (pod/service CIDRs) with every
//! established BGP peer session. The BGP wire protocol and session lifecycle
//! live in an external speaker library behind the [`PeerSession`] trait.
//!
//! ## Operations
//! - [`RouteAnnouncer::announce`]: replace the advertised set on every peer
//! - [`RouteAnnouncer::withdraw`]: withdraw everything from every peer
//! - [`Speaker`]: announce configured prefixes at startup, withdraw on shutdown;
//!   the embedding agent registers peer sessions through [`Speaker::sessions`]
//!
//! ## Failure model
//! - Malformed prefixes are logged and dropped from the batch
//! - An announcement with nothing valid to send fails before any peer is contacted
//! - Announce fails if any peer fails; withdraw only logs peer failures
//! - Nothing is retried; retry/backoff belongs to the caller
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use bgp_speaker::{RouteAnnouncer, StaticPeerSessions};
//!
//! let sessions = Arc::new(StaticPeerSessions::new());
//! sessions.insert(my_session);
//!
//! let announcer = RouteAnnouncer::new("node-1", sessions);
//! announcer.announce(&["10.244.1.0/24"]).await?;
//! announcer.withdraw().await;
//! ```

mod announcer;
pub mod config;
pub mod error;
mod fanout;
mod session;
mod speaker;

pub use announcer::{build_advertisements, RouteAnnouncer};
pub use bgp_types::{Advertisement, IpPrefix};
pub use config::SpeakerConfig;
pub use error::{AnnounceError, AnnounceResult, ConfigError, ConfigResult, SessionError};
pub use fanout::{
    fan_out, FanoutPolicy, FanoutReport, FanoutSummary, FirstError, PeerFailure, Suppress,
};
pub use session::{PeerSession, PeerSessionProvider, StaticPeerSessions};
pub use speaker::Speaker;

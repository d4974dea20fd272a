//! # taskhub-realtime
//!
//! Real-time broadcast engine for TaskHub. Provides:
//!
//! - Workspace rooms keyed by the public workspace number
//! - WebSocket connection lifecycle with per-connection outbound queues
//! - Best-effort event fan-out to every live room member
//! - The change feed the mutation layer calls after each commit
//!
//! Nothing in this crate persists: rooms rebuild from empty on restart
//! as clients reconnect and rejoin.

pub mod channel;
pub mod connection;
pub mod engine;
pub mod feed;
pub mod message;
pub mod metrics;
pub mod publish;

pub use channel::registry::ChannelRegistry;
pub use connection::manager::ConnectionManager;
pub use engine::RealtimeEngine;
pub use feed::ChangeFeed;
pub use publish::EventPublisher;

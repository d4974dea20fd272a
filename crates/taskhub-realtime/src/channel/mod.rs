//! Workspace room system.

pub mod registry;
pub mod room;

pub use registry::ChannelRegistry;
pub use room::Room;

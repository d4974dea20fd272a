//! WebSocket connection lifecycle.

pub mod authorizer;
pub mod handle;
pub mod manager;
pub mod pool;

pub use authorizer::{AllowAll, JoinAuthorizer};
pub use handle::{ConnectionHandle, ConnectionId};
pub use manager::ConnectionManager;
pub use pool::ConnectionPool;

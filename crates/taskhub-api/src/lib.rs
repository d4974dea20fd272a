//! HTTP surface for TaskHub.
//!
//! Exposes the `/ws` endpoint clients upgrade to the real-time protocol
//! over, plus JSON health and stats routes under `/api`.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;

//! HTTP API for the consultation service.
//!
//! `api_router()` returns a composable `Router`; `serve()` runs it on the
//! configured address until Ctrl-C.
//!
//! Routes:
//! - `GET  /health`
//! - `POST /api/analyze-symptoms`
//! - `POST /api/followup`
//! - `GET  /api/suggestions`

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::{serve, start_server_on, RunningServer};
pub use types::ApiContext;

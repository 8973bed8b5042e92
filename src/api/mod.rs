//! HTTP API for transcripts, meeting data, and task queries.
//!
//! Transcripts are uploaded and listed under `/api/transcripts`,
//! meeting data is generated and fetched under `/api/meeting-data`, and
//! cross-meeting task queries live under `/api/tasks`. `api_router()`
//! returns a plain `Router`, so tests drive it with `oneshot` and the
//! server mounts it unchanged.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::run_server;
pub use types::ApiContext;

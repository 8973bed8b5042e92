//! Minuta turns raw meeting transcripts into structured meeting
//! intelligence: a title, agenda, decisions, participants, action
//! items, an executive summary, and rendered minutes.
//!
//! Transcripts live in a filesystem blob store; generated records are
//! assembled once and persisted to SQLite, which is the read path for
//! the HTTP API and the CLI.

pub mod api;
pub mod config;
pub mod db;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod storage;

//! # Notemark Architecture
//!
//! Notemark keeps notebook entries whose content is written in a tiny inline
//! markup (`**bold**`, `*italic*`, `~~strike~~`, `<u>underline</u>`). It is a
//! library that happens to have a CLI client: the editing engine, the store and
//! the commands know nothing about terminals.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands and editor sessions            │
//! │  - Normalizes inputs (index strings → selectors)            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, session.rs)                  │
//! │  - Business logic on plain Rust types                       │
//! │  - Markup engine (markup/) for toggles, render and parse    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - NotebookStore trait                                      │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Canonical text
//!
//! The stored form of an entry is always the canonical markup text. The
//! rendered HTML-like form exists only on the editing surface; anything typed
//! there is parsed back to canonical text before it is kept. See [`markup`].
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns
//! `Result<CmdResult>` (or plain values), and never writes to stdout/stderr.
//! Diagnostics go through `tracing`; the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`markup`]: Style toggles, canonical → display rendering, display → canonical parsing
//! - [`session`]: Editor session state and the save handshake
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`NotebookEntry`, `EntryMetadata`)
//! - [`index`]: Display indexes (1, 2, 3 newest first) and selectors
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod markup;
pub mod model;
pub mod session;
pub mod store;

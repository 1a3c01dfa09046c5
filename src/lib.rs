//! # rowedit
//!
//! Session-scoped data editing service core for SQL tables.
//!
//! rowedit models the server side of a grid-style table editor: each table a
//! client opens for editing becomes an [`edit::EditSession`] keyed by an
//! opaque owner URI, and session-addressed queries resolve metadata the
//! introspection producer attached during setup.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          Transport (NDJSON / socket / in-process)        │
//! └─────────────────────────────────────────────────────────┘
//!                          │ RequestEnvelope
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │              EditDataService (dispatch)                  │
//! │   validation chain: ownerUri → registry → initialized    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │      SessionRegistry (owner URI → EditSession)           │
//! │      EditTableMetadata (producer-attached, read-only)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ exactly one of {result, error}
//! ┌─────────────────────────────────────────────────────────┐
//! │        RequestContext (per-request response channel)     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Session creation, teardown, and the database introspection that produces
//! the metadata live outside this crate; the service only reads.

pub mod config;
pub mod edit;

pub use config::Settings;
pub use edit::{
    EditDataService, EditError, EditResult, EditSession, EditTableMetadata,
    GetReferencedTablesParams, GetReferencedTablesResult, ReferencedTableInfo, RequestContext,
    SessionRegistry,
};

//! Session-addressed editing queries.
//!
//! The pipeline for every request: validate the owner URI against the
//! [`SessionRegistry`], resolve metadata already attached to the
//! [`EditSession`], and emit exactly one outcome through the per-request
//! [`RequestContext`].

pub mod context;
pub mod error;
pub mod metadata;
pub mod protocol;
pub mod service;
pub mod session;

pub use context::{EnvelopeContext, RequestContext};
pub use error::{EditError, EditResult};
pub use metadata::EditTableMetadata;
pub use protocol::{
    GetReferencedTablesParams, GetReferencedTablesResult, ReferencedTableInfo, RequestEnvelope,
    ResponseEnvelope,
};
pub use service::EditDataService;
pub use session::{EditSession, SessionRegistry};

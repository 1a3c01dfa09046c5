//! Editing metadata attached to a session by the introspection producer.
//!
//! This core never discovers foreign keys itself; the producer materializes
//! them during session setup and this module only resolves what it left
//! behind.

use super::protocol::ReferencedTableInfo;

/// Metadata describing the table a session has open for editing.
///
/// Built by the external introspection producer and attached to the session
/// exactly once; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct EditTableMetadata {
    /// Schema of the table under edit.
    pub schema_name: String,
    /// Name of the table under edit.
    pub table_name: String,
    /// Foreign-key relationships from the table under edit, in declaration
    /// order. `None` when the producer did not populate the field.
    pub referenced_tables: Option<Vec<ReferencedTableInfo>>,
}

impl EditTableMetadata {
    /// Resolve the referenced-table list for serving.
    ///
    /// An unset field and an empty list both resolve to `[]`; callers are
    /// never handed the `None` distinction. Declaration order is preserved
    /// exactly.
    pub fn resolved_referenced_tables(&self) -> Vec<ReferencedTableInfo> {
        self.referenced_tables.clone().unwrap_or_default()
    }
}

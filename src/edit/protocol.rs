//! Wire contract types for the edit-data service.
//!
//! These types define the JSON shapes exchanged with editor clients. Field
//! names follow the camelCase convention of the editor protocol, so every
//! contract struct carries a `rename_all` attribute.

use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Envelope
// ============================================================================

/// Request envelope received from the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Unique request ID for correlation.
    pub id: String,
    /// Method name (e.g., "edit/getReferencedTables").
    pub method: String,
    /// Method-specific parameters.
    pub params: serde_json::Value,
}

/// Response envelope handed back to the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Request ID this response corresponds to.
    pub id: String,
    /// Whether the request succeeded.
    pub success: bool,
    /// Result data (present if success = true).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Error information (present if success = false).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl ResponseEnvelope {
    /// Build a success envelope for a request ID.
    pub fn ok(id: impl Into<String>, result: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            success: true,
            result: Some(result),
            error: None,
        }
    }

    /// Build an error envelope for a request ID.
    pub fn err(id: impl Into<String>, error: ErrorInfo) -> Self {
        Self {
            id: id.into(),
            success: false,
            result: None,
            error: Some(error),
        }
    }
}

/// Error information in a failed response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable numeric error code.
    pub code: i64,
    /// Human-readable error message.
    pub message: String,
    /// Optional structured diagnostic payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

// ============================================================================
// edit/getReferencedTables Contracts
// ============================================================================

/// Parameters for `edit/getReferencedTables`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetReferencedTablesParams {
    /// Owner URI of the edit session to query.
    #[serde(default)]
    pub owner_uri: String,
}

/// Information about one table referenced by a foreign key on the table
/// under edit.
///
/// `source_columns` and `referenced_columns` pair positionally: column *i*
/// in the edited table references column *i* in the referenced table. The
/// order is significant for composite keys and is preserved end-to-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencedTableInfo {
    /// Schema of the referenced table.
    pub schema_name: String,
    /// Name of the referenced table.
    pub table_name: String,
    /// Display form (`schema.table`), set by the metadata producer.
    pub fully_qualified_name: String,
    /// Foreign key constraint name.
    pub foreign_key_name: String,
    /// Columns in the edited table (ordered).
    pub source_columns: Vec<String>,
    /// Columns in the referenced table (ordered).
    pub referenced_columns: Vec<String>,
}

impl ReferencedTableInfo {
    /// Whether the column lists pair up positionally.
    pub fn is_well_formed(&self) -> bool {
        !self.source_columns.is_empty()
            && self.source_columns.len() == self.referenced_columns.len()
    }

    /// Iterate the (source, referenced) column pairs in declaration order.
    pub fn column_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.source_columns
            .iter()
            .zip(self.referenced_columns.iter())
            .map(|(s, r)| (s.as_str(), r.as_str()))
    }
}

/// Result of `edit/getReferencedTables`.
///
/// `referenced_tables` is always present; it is empty when the edited table
/// has no foreign keys or the producer left the metadata field unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetReferencedTablesResult {
    /// Referenced tables in the order the producer declared them.
    pub referenced_tables: Vec<ReferencedTableInfo>,
}

// ============================================================================
// Method Names & Error Codes
// ============================================================================

/// Service method names.
pub mod methods {
    pub const GET_REFERENCED_TABLES: &str = "edit/getReferencedTables";
}

/// Stable numeric error codes.
///
/// The JSON-RPC reserved codes are reused for the generic conditions; the
/// session-specific conditions take codes from the server-defined range.
pub mod codes {
    pub const INVALID_PARAMS: i64 = -32602;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INTERNAL_ERROR: i64 = -32603;

    pub const SESSION_NOT_FOUND: i64 = -32001;
    pub const SESSION_NOT_INITIALIZED: i64 = -32002;
    pub const SESSION_ALREADY_INITIALIZED: i64 = -32003;
}

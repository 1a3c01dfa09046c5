//! The edit-data service: request validation and metadata resolution.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::context::{EnvelopeContext, RequestContext};
use super::error::{EditError, EditResult};
use super::protocol::{
    codes, methods, GetReferencedTablesParams, GetReferencedTablesResult, RequestEnvelope,
    ResponseEnvelope,
};
use super::session::{EditSession, SessionRegistry};
use crate::config::SessionSettings;

/// Session-addressed query service over tables open for editing.
///
/// Holds a shared handle to the session registry; session creation and
/// teardown happen elsewhere. Every handler follows the same shape: validate
/// the owner URI against the registry, resolve metadata already attached to
/// the session, and emit exactly one success-or-error outcome through the
/// per-request response context.
pub struct EditDataService {
    sessions: Arc<SessionRegistry>,
    settings: SessionSettings,
}

impl EditDataService {
    /// Create a service over a shared session registry.
    pub fn new(sessions: Arc<SessionRegistry>) -> Self {
        Self::with_settings(sessions, SessionSettings::default())
    }

    /// Create a service with explicit session settings.
    pub fn with_settings(sessions: Arc<SessionRegistry>, settings: SessionSettings) -> Self {
        Self { sessions, settings }
    }

    /// The registry this service reads from.
    pub fn sessions(&self) -> &Arc<SessionRegistry> {
        &self.sessions
    }

    /// Validation chain gating every session-addressed request.
    ///
    /// Checks run in fixed order and short-circuit on the first failure:
    /// non-empty owner URI, registered session, initialized session.
    pub fn active_session(&self, owner_uri: &str) -> EditResult<Arc<EditSession>> {
        if owner_uri.is_empty() {
            return Err(EditError::missing_owner_uri());
        }

        let session = self
            .sessions
            .get(owner_uri)
            .ok_or_else(|| EditError::SessionNotFound(owner_uri.to_string()))?;

        if !session.is_initialized() {
            return Err(EditError::SessionNotInitialized(owner_uri.to_string()));
        }

        Ok(session)
    }

    /// Handle `edit/getReferencedTables`.
    ///
    /// On success emits the session's referenced-table list in declaration
    /// order, normalized to `[]` when the producer left it unset. Validation
    /// failures are emitted on the error path; no result accompanies them.
    pub async fn handle_get_referenced_tables(
        &self,
        params: GetReferencedTablesParams,
        context: &dyn RequestContext<GetReferencedTablesResult>,
    ) {
        match self.active_session(&params.owner_uri) {
            Ok(session) => {
                let referenced_tables = session
                    .metadata()
                    .map(|m| m.resolved_referenced_tables())
                    .unwrap_or_default();

                tracing::trace!(
                    owner_uri = %params.owner_uri,
                    count = referenced_tables.len(),
                    "serving referenced tables"
                );
                context
                    .send_result(GetReferencedTablesResult { referenced_tables })
                    .await;
            }
            Err(err) => self.reject(&params.owner_uri, err, context).await,
        }
    }

    /// Convert a validation failure into an error response.
    async fn reject<R>(&self, owner_uri: &str, err: EditError, context: &dyn RequestContext<R>)
    where
        R: serde::Serialize + Send + Sync,
    {
        tracing::debug!(owner_uri = %owner_uri, error = %err, "rejected edit request");
        let data = if self.settings.expose_diagnostics {
            err.diagnostic()
        } else {
            None
        };
        context.send_error(&err.to_string(), err.code(), data).await;
    }

    /// Route a request envelope to its handler by method name.
    ///
    /// Entry point for NDJSON-style transports: the caller parses one
    /// envelope off the wire and hands it here together with the channel
    /// responses go out on. Unknown methods and undeserializable parameters
    /// are answered on the error path like any other expected failure.
    pub async fn dispatch(&self, request: RequestEnvelope, tx: mpsc::Sender<ResponseEnvelope>) {
        let context = EnvelopeContext::new(request.id, tx);

        match request.method.as_str() {
            methods::GET_REFERENCED_TABLES => {
                match serde_json::from_value::<GetReferencedTablesParams>(request.params) {
                    Ok(params) => self.handle_get_referenced_tables(params, &context).await,
                    Err(e) => {
                        context
                            .error(
                                &format!("invalid request parameters: {e}"),
                                codes::INVALID_PARAMS,
                                None,
                            )
                            .await;
                    }
                }
            }
            other => {
                tracing::debug!(method = %other, "unknown method");
                context
                    .error(
                        &format!("method not found: {other}"),
                        codes::METHOD_NOT_FOUND,
                        None,
                    )
                    .await;
            }
        }
    }
}

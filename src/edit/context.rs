//! Response-channel abstraction between the service and the transport.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;

use super::protocol::{codes, ErrorInfo, ResponseEnvelope};

/// Capability handed to a handler for answering one request.
///
/// The transport supplies an implementation per request; the handler calls
/// exactly one of the two methods exactly once. Delivery may be async on the
/// transport side, which the handler treats as opaque.
#[async_trait]
pub trait RequestContext<R>: Send + Sync
where
    R: Serialize + Send + Sync,
{
    /// Emit the success result for this request.
    async fn send_result(&self, result: R);

    /// Emit a structured error for this request.
    async fn send_error(&self, message: &str, code: i64, data: Option<serde_json::Value>);
}

/// Response channel that delivers correlated [`ResponseEnvelope`]s over a
/// tokio mpsc channel, for NDJSON-style transports.
///
/// Enforces the at-most-once contract: after the first emission, further
/// emissions for the same request are dropped with a warning.
pub struct EnvelopeContext {
    id: String,
    tx: mpsc::Sender<ResponseEnvelope>,
    sent: AtomicBool,
}

impl EnvelopeContext {
    /// Create a context answering the request with the given ID.
    pub fn new(id: impl Into<String>, tx: mpsc::Sender<ResponseEnvelope>) -> Self {
        Self {
            id: id.into(),
            tx,
            sent: AtomicBool::new(false),
        }
    }

    /// The request ID this context answers.
    pub fn request_id(&self) -> &str {
        &self.id
    }

    async fn emit(&self, envelope: ResponseEnvelope) {
        if self.sent.swap(true, Ordering::SeqCst) {
            tracing::warn!(id = %self.id, "dropped duplicate response for request");
            return;
        }
        if self.tx.send(envelope).await.is_err() {
            tracing::warn!(id = %self.id, "response channel closed before delivery");
        }
    }

    /// Emit a success envelope carrying an already-serialized result.
    pub async fn result_value(&self, result: serde_json::Value) {
        self.emit(ResponseEnvelope::ok(self.id.clone(), result)).await;
    }

    /// Emit an error envelope.
    pub async fn error(&self, message: &str, code: i64, data: Option<serde_json::Value>) {
        self.emit(ResponseEnvelope::err(
            self.id.clone(),
            ErrorInfo {
                code,
                message: message.to_string(),
                data,
            },
        ))
        .await;
    }
}

#[async_trait]
impl<R> RequestContext<R> for EnvelopeContext
where
    R: Serialize + Send + Sync + 'static,
{
    async fn send_result(&self, result: R) {
        match serde_json::to_value(&result) {
            Ok(value) => self.result_value(value).await,
            Err(e) => {
                tracing::error!(id = %self.id, error = %e, "failed to serialize result");
                self.error(
                    &format!("failed to serialize result: {e}"),
                    codes::INTERNAL_ERROR,
                    None,
                )
                .await;
            }
        }
    }

    async fn send_error(&self, message: &str, code: i64, data: Option<serde_json::Value>) {
        self.error(message, code, data).await;
    }
}

//! HTTP chat backend
//!
//! Posts form-encoded chat requests to the configured endpoint: body
//! parameters `user_input` and (optionally) `context`, with an anti-forgery
//! token header. Expects a JSON body shaped as
//! `{ "response": { "model", "message", "token_used" } }`.

use super::{ChatBackend, ModelResponse};
use crate::core::LlmError;
use crate::events::Event;
use crossbeam_channel::Sender;
use serde::Deserialize;
use std::time::Duration;

/// Envelope around the response payload
#[derive(Debug, Deserialize)]
struct ChatEnvelope {
    response: ModelResponse,
}

/// Backend speaking the web widget's wire contract
pub struct HttpBackend {
    /// Chat endpoint URL
    endpoint: String,

    /// Anti-forgery token sent as the `X-CSRFToken` header
    csrf_token: Option<String>,

    /// Model label shown in the UI (the server picks the actual model)
    model: String,

    /// Per-request timeout
    timeout: Duration,
}

impl HttpBackend {
    /// Create a new backend for the given endpoint
    pub fn new(endpoint: &str, model: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            csrf_token: None,
            model: model.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Set the anti-forgery token
    pub fn with_csrf_token(mut self, token: Option<String>) -> Self {
        self.csrf_token = token;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl ChatBackend for HttpBackend {
    fn send(
        &self,
        user_input: &str,
        context: Option<&str>,
        generation: u64,
        event_tx: Sender<Event>,
    ) {
        let endpoint = self.endpoint.clone();
        let token = self.csrf_token.clone();
        let timeout = self.timeout;
        let user_input = user_input.to_string();
        let context = context.map(str::to_string);

        // One worker thread per round-trip; the panel keeps at most one
        // request in flight.
        std::thread::spawn(move || {
            let result = post_chat(
                &endpoint,
                token.as_deref(),
                &user_input,
                context.as_deref(),
                timeout,
            );
            let event = match result {
                Ok(response) => Event::ChatResponse {
                    generation,
                    response,
                },
                Err(e) => Event::ChatError {
                    generation,
                    message: e.to_string(),
                },
            };
            let _ = event_tx.send(event);
        });
    }

    fn model(&self) -> String {
        self.model.clone()
    }
}

/// Perform the form-encoded POST and decode the response envelope
fn post_chat(
    endpoint: &str,
    csrf_token: Option<&str>,
    user_input: &str,
    context: Option<&str>,
    timeout: Duration,
) -> Result<ModelResponse, LlmError> {
    let mut request = ureq::post(endpoint).timeout(timeout);
    if let Some(token) = csrf_token {
        request = request.set("X-CSRFToken", token);
    }

    let mut form: Vec<(&str, &str)> = vec![("user_input", user_input)];
    if let Some(context) = context {
        form.push(("context", context));
    }

    let response = request.send_form(&form)?;
    let envelope: ChatEnvelope = response
        .into_json()
        .map_err(|e| LlmError::Parse(e.to_string()))?;
    Ok(envelope.response)
}

impl From<ureq::Error> for LlmError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                LlmError::Api { status, message }
            }
            ureq::Error::Transport(transport) => LlmError::Connection(transport.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_deserialize() {
        let json = r#"{"response":{"model":"deepseek-r1:8b","message":"<think>hm</think>\n\nhi","token_used":12}}"#;
        let envelope: ChatEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.response.model, "deepseek-r1:8b");
        assert_eq!(envelope.response.token_used, 12);
    }

    #[test]
    fn test_envelope_rejects_bare_payload() {
        // The endpoint always wraps the payload; a bare object is malformed
        let json = r#"{"model":"m","message":"x","token_used":1}"#;
        assert!(serde_json::from_str::<ChatEnvelope>(json).is_err());
    }

    #[test]
    fn test_backend_builder() {
        let backend = HttpBackend::new("http://localhost:8000/chat/", "deepseek-r1:8b")
            .with_csrf_token(Some("tok".to_string()))
            .with_timeout(Duration::from_secs(5));
        assert_eq!(backend.model(), "deepseek-r1:8b");
        assert_eq!(backend.endpoint, "http://localhost:8000/chat/");
        assert_eq!(backend.csrf_token.as_deref(), Some("tok"));
    }
}

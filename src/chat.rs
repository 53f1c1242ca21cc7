//! Conversation state for the style assistant.

use crate::catalog::models::{ChatProduct, ChatRequest, ChatRole, ChatTurn};
use crate::catalog::StorefrontApi;
use tracing::{debug, warn};

pub const GREETING: &str = "Hi! 👗 I'm Tiyara's style assistant. Ask me about outfits, colors \
                            for your skin tone, or anything fashion-related!";

pub const APOLOGY: &str = "Sorry, something went wrong. Please try again! 🙏";

/// One message in the transcript.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    /// Product cards attached to an assistant reply
    pub products: Vec<ChatProduct>,
}

impl ChatMessage {
    fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into(), products: Vec::new() }
    }

    fn assistant(content: impl Into<String>, products: Vec<ChatProduct>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into(), products }
    }
}

/// A transcript that starts with the assistant's greeting.
///
/// The greeting is shown but never sent back as history. Failures never
/// escape: the assistant "replies" with an apology instead.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self { messages: vec![ChatMessage::assistant(GREETING, Vec::new())] }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Prior turns to send as context, greeting excluded.
    pub fn history(&self) -> Vec<ChatTurn> {
        self.messages
            .iter()
            .skip(1)
            .map(|m| ChatTurn { role: m.role, content: m.content.clone() })
            .collect()
    }

    /// Sends `input` and appends both the user message and the reply.
    ///
    /// Returns the assistant's message, or `None` for blank input.
    pub async fn send(&mut self, api: &impl StorefrontApi, input: &str) -> Option<&ChatMessage> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        let request =
            ChatRequest { message: text.to_string(), conversation_history: self.history() };
        self.messages.push(ChatMessage::user(text));

        let reply = match api.chat(&request).await {
            Ok(response) => {
                debug!(
                    "Assistant replied with {} products (product query: {})",
                    response.products.len(),
                    response.is_product_query
                );
                ChatMessage::assistant(response.reply, response.products)
            }
            Err(e) => {
                warn!("Chat request failed: {}", e);
                ChatMessage::assistant(APOLOGY, Vec::new())
            }
        };

        self.messages.push(reply);
        self.messages.last()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StorefrontClient;
    use crate::config::Config;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> StorefrontClient {
        StorefrontClient::with_base_url(&Config::default(), &server.uri()).unwrap()
    }

    #[test]
    fn test_new_session_has_greeting_only() {
        let session = ChatSession::new();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].content, GREETING);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_send_appends_reply_with_products() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_partial_json(json!({"message": "red dress", "conversation_history": []})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "reply": "Here are some red dresses",
                "products": [{"Product_id": 7, "BrandName": "Zara", "OriginalPrice": 2499}],
                "is_product_query": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let mut session = ChatSession::new();
        let reply = session.send(&client, "  red dress ").await.unwrap().clone();

        assert_eq!(reply.role, ChatRole::Assistant);
        assert_eq!(reply.content, "Here are some red dresses");
        assert_eq!(reply.products.len(), 1);
        assert_eq!(reply.products[0].product_id, "7");
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.messages()[1].content, "red dress");
    }

    #[tokio::test]
    async fn test_history_excludes_greeting_and_current_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_partial_json(json!({"message": "first"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "one"})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_partial_json(json!({
                "message": "second",
                "conversation_history": [
                    {"role": "user", "content": "first"},
                    {"role": "assistant", "content": "one"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "two"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let mut session = ChatSession::new();
        session.send(&client, "first").await;
        let reply = session.send(&client, "second").await.unwrap();
        assert_eq!(reply.content, "two");
    }

    #[tokio::test]
    async fn test_failure_appends_apology() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let mut session = ChatSession::new();
        let reply = session.send(&client, "hello").await.unwrap();

        assert_eq!(reply.content, APOLOGY);
        assert!(reply.products.is_empty());
        assert_eq!(session.messages().len(), 3);
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;
        let mut session = ChatSession::new();

        assert!(session.send(&client, "   ").await.is_none());
        assert_eq!(session.messages().len(), 1);
    }
}

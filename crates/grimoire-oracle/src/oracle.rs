//! `DecisionOracle` backed by a chat model.

use async_trait::async_trait;
use grimoire_core::context::{ChatMessage, DayCheckContext, RoleContext};
use grimoire_core::error::DomainError;
use grimoire_core::op::Op;
use grimoire_core::oracle::DecisionOracle;
use tracing::{debug, info};

use crate::client::ChatClient;
use crate::decode::decode_ops;
use crate::prompts::{day_check_messages, role_messages};

/// Asks a chat model for ops.
#[derive(Debug, Clone)]
pub struct LlmOracle {
    client: ChatClient,
}

impl LlmOracle {
    /// Creates an oracle over `client`.
    #[must_use]
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DecisionOracle for LlmOracle {
    fn build_role_messages(&self, context: &RoleContext) -> Vec<ChatMessage> {
        role_messages(context)
    }

    fn build_day_check_messages(&self, context: &DayCheckContext) -> Vec<ChatMessage> {
        day_check_messages(context)
    }

    async fn invoke_role_ops(&self, messages: &[ChatMessage]) -> Result<Vec<Op>, DomainError> {
        let completion = self.client.complete(messages).await?;
        if !completion.reasoning.is_empty() {
            debug!(reasoning = %completion.reasoning, "model reasoning");
        }
        let ops = decode_ops(&completion.content);
        info!(model = self.client.model(), ops = ops.len(), "oracle answered");
        Ok(ops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ChatConfig;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use grimoire_core::player::Seat;
    use serde_json::json;

    async fn oracle_for(router: Router) -> LlmOracle {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        LlmOracle::new(ChatClient::new(ChatConfig {
            model: "test-model".to_owned(),
            api_key: "k".to_owned(),
            base_url: format!("http://{addr}"),
            temperature: 0.0,
        }))
    }

    fn answering(content: &'static str) -> Router {
        Router::new().route(
            "/chat/completions",
            post(move || async move {
                Json(json!({ "choices": [{ "message": { "content": content } }] }))
            }),
        )
    }

    #[tokio::test]
    async fn test_invoke_role_ops_decodes_model_answer() {
        // Arrange
        let oracle = oracle_for(answering(
            r#"{"ops":[{"type":"prompt_player","payload":{"seat":4,"text":"Pick a player"}}]}"#,
        ))
        .await;

        // Act
        let ops = oracle
            .invoke_role_ops(&[ChatMessage::user("turn")])
            .await
            .unwrap();

        // Assert
        assert_eq!(
            ops,
            vec![Op::PromptPlayer {
                seat: Seat(4),
                text: "Pick a player".to_owned()
            }]
        );
    }

    #[tokio::test]
    async fn test_prose_answer_is_an_empty_decision() {
        let oracle = oracle_for(answering("Let me think about it.")).await;

        let ops = oracle.invoke_role_ops(&[ChatMessage::user("turn")]).await.unwrap();

        assert!(ops.is_empty());
    }

    #[tokio::test]
    async fn test_endpoint_failure_is_an_oracle_error() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let oracle = oracle_for(router).await;

        let result = oracle.invoke_role_ops(&[ChatMessage::user("turn")]).await;

        assert!(matches!(result, Err(DomainError::Oracle(_))));
    }
}

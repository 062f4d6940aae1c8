use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;

use crate::error::GenerationError;

/// External text generation call.
///
/// Any failure, including an empty completion, is reported as an error and
/// treated by callers as "no usable text".
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String, GenerationError>;
}

#[derive(Clone, Debug)]
pub struct GameAI {
    client: Client<OpenAIConfig>,
    model: String,
}

impl GameAI {
    pub fn new(api_key: &str, model: impl Into<String>) -> Self {
        let openai_config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Client::with_config(openai_config),
            model: model.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for GameAI {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String, GenerationError> {
        let message: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?
            .into();
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(temperature)
            .messages(vec![message])
            .build()?;

        let response = self.client.chat().create(request).await?;
        log::debug!("Completion usage: {:#?}", response.usage);

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}

/// Stand-in used while no API key is configured; every call fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineAI;

#[async_trait]
impl TextGenerator for OfflineAI {
    async fn generate(&self, _prompt: &str, _temperature: f32) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured)
    }
}

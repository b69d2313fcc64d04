use crate::config::Config;
use crate::error::{Error, Result};
use async_openai::{
    self,
    config::OpenAIConfig,
    error::OpenAIError,
    types::responses::{
        CreateResponseArgs, EasyInputMessageArgs, InputItem, InputParam, OutputItem,
        OutputMessageContent, Role,
    },
};
use async_trait::async_trait;

const SYSTEM_PROMPT: &str = "You are a YouTube content strategist. You review video transcripts \
and statistics and give honest, specific feedback on quality, viewer engagement and reach. \
Answer in Markdown using exactly the section headings the user asks for.";

#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Free-text analysis for `prompt`; `Error::GenerationFailed` on any failure.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Clone)]
pub struct OpenAiNarrator {
    client: async_openai::Client<OpenAIConfig>,
    model: String,
    max_output_tokens: u32,
}

impl OpenAiNarrator {
    pub fn new(config: &Config) -> Self {
        let openai = OpenAIConfig::new().with_api_key(config.openai_api_key());
        Self {
            client: async_openai::Client::with_config(openai),
            model: config.model.clone(),
            max_output_tokens: config.max_output_tokens,
        }
    }

    async fn request(&self, prompt: &str) -> std::result::Result<Vec<OutputItem>, OpenAIError> {
        let request = CreateResponseArgs::default()
            .max_output_tokens(self.max_output_tokens)
            .model(self.model.as_str())
            .input(InputParam::Items(vec![
                InputItem::EasyMessage(
                    EasyInputMessageArgs::default()
                        .role(Role::System)
                        .content(SYSTEM_PROMPT)
                        .build()?,
                ),
                InputItem::EasyMessage(
                    EasyInputMessageArgs::default()
                        .role(Role::User)
                        .content(prompt)
                        .build()?,
                ),
            ]))
            .build()?;

        let response = self.client.responses().create(request).await?;
        Ok(response.output)
    }
}

#[async_trait]
impl NarrativeGenerator for OpenAiNarrator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "requesting analysis");

        let output = self
            .request(prompt)
            .await
            .map_err(|e| Error::GenerationFailed(e.to_string()))?;

        response_text(output)
    }
}

/// Concatenated text of the assistant messages. Refusals and non-message items are skipped, and
/// a response without any text is a `GenerationFailed`.
fn response_text(output: Vec<OutputItem>) -> Result<String> {
    let mut content = String::new();
    for item in output {
        if let OutputItem::Message(message) = item {
            for part in message.content {
                match part {
                    OutputMessageContent::OutputText(text) => content.push_str(&text.text),
                    other => tracing::debug!(?other, "skipping non-text output"),
                }
            }
        }
    }

    if content.trim().is_empty() {
        return Err(Error::GenerationFailed(
            "the model returned an empty response".to_string(),
        ));
    }

    Ok(content)
}

use anyhow::{anyhow, Result};
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use lib::utils::{render_system_prompt, render_user_prompt};
use lib::{TranslateResult, TranslateTask, Translator};
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAITranslator {
    pub model: String,
    pub system_prompt: Option<String>,
    pub user_prompt: Option<String>,
    #[serde(alias = "base_url", default = "default_api_base")]
    pub api_base: String,
    pub api_key: String,
}

impl OpenAITranslator {
    fn build_request(&self, task: &TranslateTask) -> Result<CreateChatCompletionRequest> {
        let system_prompt = render_system_prompt(task, self.system_prompt.as_ref())?;
        let user_prompt = render_user_prompt(task, self.user_prompt.as_ref())?;

        let mut request_args = CreateChatCompletionRequestArgs::default();

        request_args
            .model(self.model.clone())
            .messages(vec![
                ChatCompletionRequestMessage::System(system_prompt.into()),
                ChatCompletionRequestMessage::User(user_prompt.into()),
            ])
            .temperature(task.temperature.unwrap_or(0.3));

        Ok(request_args.build()?)
    }
}

#[async_trait]
impl Translator for OpenAITranslator {
    type This = Self;

    async fn new(config: Value) -> Result<Self> {
        serde_json::from_value(config).map_err(|e| anyhow!(e))
    }

    async fn translate(&self, task: TranslateTask) -> Result<TranslateResult> {
        let client = Client::with_config(
            OpenAIConfig::new()
                .with_api_base(self.api_base.clone())
                .with_api_key(self.api_key.clone()),
        );

        let request = self.build_request(&task)?;

        let value: Value = client
            .chat()
            .create_byot(request)
            .await
            .map_err(|e| anyhow!(e))?;

        let content = value["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string());

        Ok(TranslateResult { content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib::TranslateTaskBuilder;
    use serde_json::json;

    #[test]
    fn test_config_deserialization_with_defaults() -> Result<()> {
        let config = json!({
            "api_key": "sk-test",
            "model": "gpt-4o-mini"
        });

        let translator: OpenAITranslator = serde_json::from_value(config)?;

        assert_eq!(translator.api_base, "https://api.openai.com/v1");
        assert_eq!(translator.model, "gpt-4o-mini");

        Ok(())
    }

    #[test]
    fn test_base_url_alias() -> Result<()> {
        let config = json!({
            "api_key": "sk-test",
            "model": "gpt-4o-mini",
            "base_url": "https://proxy.example.com/v1"
        });

        let translator: OpenAITranslator = serde_json::from_value(config)?;

        assert_eq!(translator.api_base, "https://proxy.example.com/v1");

        Ok(())
    }

    #[tokio::test]
    #[ignore = "需要 OPENAI_API_KEY 环境变量"]
    async fn test_openai() -> Result<()> {
        let translator = OpenAITranslator {
            model: std::env::var("OPENAI_MODEL").unwrap_or("gpt-4o-mini".to_string()),
            system_prompt: None,
            user_prompt: None,
            api_base: std::env::var("OPENAI_API_BASE").unwrap_or(default_api_base()),
            api_key: std::env::var("OPENAI_API_KEY")?,
        };

        let task = TranslateTaskBuilder::default()
            .content("Hello, world!")
            .target_language("zh".parse::<language_tags::LanguageTag>()?)
            .build()?;

        let result = translator.translate(task).await?;
        println!("{:?}", result);

        Ok(())
    }
}

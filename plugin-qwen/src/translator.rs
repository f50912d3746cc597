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

fn default_base_url() -> String {
    "https://dashscope.aliyuncs.com/compatible-mode/v1".to_string()
}

fn default_model() -> String {
    "qwen3-max".to_string()
}

/// 通义千问，走 DashScope 的 OpenAI 兼容模式
#[derive(Debug, Serialize, Deserialize)]
pub struct QwenTranslator {
    #[serde(default = "default_model")]
    pub model: String,
    pub system_prompt: Option<String>,
    pub user_prompt: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: String,
}

impl QwenTranslator {
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
impl Translator for QwenTranslator {
    type This = Self;

    async fn new(config: Value) -> Result<Self> {
        serde_json::from_value(config).map_err(|e| anyhow!(e))
    }

    async fn translate(&self, task: TranslateTask) -> Result<TranslateResult> {
        let client = Client::with_config(
            OpenAIConfig::new()
                .with_api_base(self.base_url.clone())
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
    fn test_config_defaults() -> Result<()> {
        let translator: QwenTranslator = serde_json::from_value(json!({
            "api_key": "sk-test"
        }))?;

        assert_eq!(translator.model, "qwen3-max");
        assert_eq!(
            translator.base_url,
            "https://dashscope.aliyuncs.com/compatible-mode/v1"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "需要 QWEN_API_KEY 环境变量"]
    async fn test_qwen() -> Result<()> {
        let translator = QwenTranslator {
            model: default_model(),
            system_prompt: None,
            user_prompt: None,
            base_url: default_base_url(),
            api_key: std::env::var("QWEN_API_KEY")?,
        };

        let task = TranslateTaskBuilder::default()
            .content("落霞与孤鹜齐飞，秋水共长天一色。")
            .target_language("en".parse::<language_tags::LanguageTag>()?)
            .build()?;

        let result = translator.translate(task).await?;
        println!("{:?}", result);

        Ok(())
    }
}

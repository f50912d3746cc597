use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use lib::utils::{render_system_prompt, render_user_prompt};
use lib::{TranslateResult, TranslateTask, Translator};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 2048;

fn default_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClaudeTranslator {
    #[serde(default = "default_model")]
    pub model: String,
    pub system_prompt: Option<String>,
    pub user_prompt: Option<String>,
    pub api_key: String,
}

impl ClaudeTranslator {
    fn build_request(&self, task: &TranslateTask) -> Result<Value> {
        let system_prompt = render_system_prompt(task, self.system_prompt.as_ref())?;
        let user_prompt = render_user_prompt(task, self.user_prompt.as_ref())?;

        Ok(json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "temperature": task.temperature.unwrap_or(0.3),
            "system": system_prompt,
            "messages": [
                { "role": "user", "content": user_prompt }
            ]
        }))
    }
}

#[async_trait]
impl Translator for ClaudeTranslator {
    type This = Self;

    async fn new(config: Value) -> Result<Self> {
        serde_json::from_value(config).map_err(|e| anyhow!(e))
    }

    async fn translate(&self, task: TranslateTask) -> Result<TranslateResult> {
        let client = Client::new();

        let request = self.build_request(&task)?;

        let response = client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Claude API 错误 {}: {}", status, body);
        }

        let value: Value = response.json().await.map_err(|e| anyhow!(e))?;

        let content = value["content"][0]["text"].as_str().map(|s| s.to_string());

        Ok(TranslateResult { content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib::TranslateTaskBuilder;
    use language_tags::LanguageTag;

    #[test]
    fn test_config_default_model() -> Result<()> {
        let translator: ClaudeTranslator = serde_json::from_value(json!({
            "api_key": "sk-ant-test"
        }))?;

        assert_eq!(translator.model, "claude-3-5-sonnet-20241022");

        Ok(())
    }

    #[test]
    fn test_build_request_shape() -> Result<()> {
        let translator: ClaudeTranslator = serde_json::from_value(json!({
            "api_key": "sk-ant-test"
        }))?;

        let task = TranslateTaskBuilder::default()
            .content("Hello")
            .target_language("zh".parse::<LanguageTag>()?)
            .build()?;

        let request = translator.build_request(&task)?;

        assert_eq!(request["max_tokens"], 2048);
        assert_eq!(request["messages"][0]["role"], "user");
        assert_eq!(request["messages"][0]["content"], "Hello");
        assert!(request["system"].as_str().unwrap().contains("中文"));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "需要 ANTHROPIC_API_KEY 环境变量"]
    async fn test_claude() -> Result<()> {
        let translator = ClaudeTranslator {
            model: default_model(),
            system_prompt: None,
            user_prompt: None,
            api_key: std::env::var("ANTHROPIC_API_KEY")?,
        };

        let task = TranslateTaskBuilder::default()
            .content("Hello, world!")
            .target_language("zh".parse::<LanguageTag>()?)
            .build()?;

        let result = translator.translate(task).await?;
        println!("{:?}", result);

        Ok(())
    }
}

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use lib::utils::{render_system_prompt, render_user_prompt};
use lib::{TranslateResult, TranslateTask, Translator};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MAX_OUTPUT_TOKENS: u32 = 2048;

fn default_model() -> String {
    "gemini-pro".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiTranslator {
    #[serde(default = "default_model")]
    pub model: String,
    pub system_prompt: Option<String>,
    pub user_prompt: Option<String>,
    pub api_key: String,
}

impl GeminiTranslator {
    /// generateContent 不区分 system/user 角色，两段提示词合并为一段文本
    fn build_request(&self, task: &TranslateTask) -> Result<Value> {
        let system_prompt = render_system_prompt(task, self.system_prompt.as_ref())?;
        let user_prompt = render_user_prompt(task, self.user_prompt.as_ref())?;

        Ok(json!({
            "contents": [
                {
                    "parts": [
                        { "text": format!("{}\n\n{}", system_prompt, user_prompt) }
                    ]
                }
            ],
            "generationConfig": {
                "temperature": task.temperature.unwrap_or(0.3),
                "maxOutputTokens": MAX_OUTPUT_TOKENS
            }
        }))
    }
}

#[async_trait]
impl Translator for GeminiTranslator {
    type This = Self;

    async fn new(config: Value) -> Result<Self> {
        serde_json::from_value(config).map_err(|e| anyhow!(e))
    }

    async fn translate(&self, task: TranslateTask) -> Result<TranslateResult> {
        let client = Client::new();

        let request = self.build_request(&task)?;
        let url = format!("{}/{}:generateContent", API_BASE, self.model);

        let response = client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Gemini API 错误 {}: {}", status, body);
        }

        let value: Value = response.json().await.map_err(|e| anyhow!(e))?;

        let content = value["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string());

        Ok(TranslateResult { content })
    }
}

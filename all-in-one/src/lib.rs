#![allow(unused_variables)]
use anyhow::{bail, Result};
use async_trait::async_trait;
use lib::config::Provider;
use serde_json::Value;
pub use lib::*;

/// 按配置选中的提供商静态分发的翻译器
pub enum AnyTranslator {
    #[cfg(feature = "plugin-openai")]
    OpenAI(plugin_openai::translator::OpenAITranslator),
    #[cfg(feature = "plugin-qwen")]
    Qwen(plugin_qwen::translator::QwenTranslator),
    #[cfg(feature = "plugin-claude")]
    Claude(plugin_claude::translator::ClaudeTranslator),
    #[cfg(feature = "plugin-gemini")]
    Gemini(plugin_gemini::translator::GeminiTranslator),
}

impl AnyTranslator {
    /// 按提供商名称创建翻译实例，config 为该提供商的配置节
    pub async fn create(provider: Provider, config: Value) -> Result<AnyTranslator> {
        match provider {
            #[cfg(feature = "plugin-openai")]
            Provider::OpenAI => {
                use plugin_openai::translator::OpenAITranslator;
                Ok(AnyTranslator::OpenAI(OpenAITranslator::new(config).await?))
            }
            #[cfg(feature = "plugin-qwen")]
            Provider::Qwen => {
                use plugin_qwen::translator::QwenTranslator;
                Ok(AnyTranslator::Qwen(QwenTranslator::new(config).await?))
            }
            #[cfg(feature = "plugin-claude")]
            Provider::Claude => {
                use plugin_claude::translator::ClaudeTranslator;
                Ok(AnyTranslator::Claude(ClaudeTranslator::new(config).await?))
            }
            #[cfg(feature = "plugin-gemini")]
            Provider::Gemini => {
                use plugin_gemini::translator::GeminiTranslator;
                Ok(AnyTranslator::Gemini(GeminiTranslator::new(config).await?))
            }
            #[allow(unreachable_patterns)]
            _ => bail!("Translator not found: {}", provider),
        }
    }
}

#[async_trait]
impl Translator for AnyTranslator {
    type This = Self;

    /// config 需要带 `provider` 字段指明提供商
    async fn new(config: Value) -> Result<Self> {
        let provider: Provider = config["provider"]
            .as_str()
            .unwrap_or_default()
            .parse()?;
        AnyTranslator::create(provider, config).await
    }

    async fn translate(&self, task: TranslateTask) -> Result<TranslateResult> {
        match self {
            #[cfg(feature = "plugin-openai")]
            AnyTranslator::OpenAI(t) => t.translate(task).await,
            #[cfg(feature = "plugin-qwen")]
            AnyTranslator::Qwen(t) => t.translate(task).await,
            #[cfg(feature = "plugin-claude")]
            AnyTranslator::Claude(t) => t.translate(task).await,
            #[cfg(feature = "plugin-gemini")]
            AnyTranslator::Gemini(t) => t.translate(task).await,
        }
    }
}

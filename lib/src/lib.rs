pub mod cache;
pub mod config;
pub mod document;
pub mod i18n;
pub mod mock;
pub mod utils;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use derive_builder::Builder;
use language_tags::LanguageTag;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Builder, Serialize, Deserialize)]
#[builder(setter(into, strip_option), default)]
#[serde(default)]
pub struct TranslateTask {
    /// 原文
    pub content: String,
    /// 源语言
    pub source_language: Option<LanguageTag>,
    /// 目标语言
    pub target_language: Option<LanguageTag>,
    /// 上下文信息
    pub context: Option<String>,
    /// 温度参数
    pub temperature: Option<f32>,
    /// 用户提示词模板
    pub user_prompt: Option<String>,
    /// 系统提示词模板
    pub system_prompt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResult {
    pub content: Option<String>,
}

impl TranslateResult {
    /// 取出译文，空响应视为错误
    pub fn into_content(self) -> Result<String> {
        self.content
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("翻译结果为空"))
    }
}

#[async_trait]
pub trait Translator {
    type This;

    /// 创建翻译实例
    async fn new(config: Value) -> Result<Self::This>;

    /// 翻译
    async fn translate(&self, task: TranslateTask) -> Result<TranslateResult>;
}

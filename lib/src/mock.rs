//! 测试用翻译器
//!
//! 不依赖网络的确定性实现，用于编排器与 CLI 相关测试。

use crate::{TranslateResult, TranslateTask, Translator};
use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum MockMode {
    /// 在原文后追加目标语言后缀："hello" → "hello_zh"
    Suffix,
    /// 按 (原文, 目标语言) 查表，查不到时退回后缀模式
    Mappings(HashMap<(String, String), String>),
    /// 每次调用都失败
    Error(String),
    /// 只有指定原文失败，其余按后缀模式翻译
    FailOn(String),
    /// 原样返回
    NoOp,
}

#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    calls: Arc<AtomicUsize>,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        MockTranslator {
            mode,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// 已发生的后端调用次数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    type This = Self;

    async fn new(_config: Value) -> Result<Self> {
        Ok(MockTranslator::new(MockMode::Suffix))
    }

    async fn translate(&self, task: TranslateTask) -> Result<TranslateResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let target = task
            .target_language
            .as_ref()
            .map(|tag| tag.to_string())
            .unwrap_or_default();

        let content = match &self.mode {
            MockMode::Suffix => format!("{}_{}", task.content, target),
            MockMode::Mappings(map) => map
                .get(&(task.content.clone(), target.clone()))
                .cloned()
                .unwrap_or_else(|| format!("{}_{}", task.content, target)),
            MockMode::Error(msg) => bail!("{}", msg),
            MockMode::FailOn(text) => {
                if &task.content == text {
                    bail!("模拟失败: {}", text);
                }
                format!("{}_{}", task.content, target)
            }
            MockMode::NoOp => task.content,
        };

        Ok(TranslateResult {
            content: Some(content),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TranslateTaskBuilder;
    use language_tags::LanguageTag;

    fn task(content: &str, target: &str) -> TranslateTask {
        TranslateTaskBuilder::default()
            .content(content)
            .target_language(target.parse::<LanguageTag>().unwrap())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_suffix_mode() -> Result<()> {
        let mock = MockTranslator::new(MockMode::Suffix);
        let result = mock.translate(task("hello", "zh")).await?;

        assert_eq!(result.into_content()?, "hello_zh");
        assert_eq!(mock.call_count(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_mappings_mode() -> Result<()> {
        let mut map = HashMap::new();
        map.insert(
            ("Hello World".to_string(), "zh".to_string()),
            "你好世界".to_string(),
        );

        let mock = MockTranslator::new(MockMode::Mappings(map));

        assert_eq!(
            mock.translate(task("Hello World", "zh")).await?.into_content()?,
            "你好世界"
        );
        assert_eq!(
            mock.translate(task("other", "zh")).await?.into_content()?,
            "other_zh"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_error_mode() {
        let mock = MockTranslator::new(MockMode::Error("API unavailable".to_string()));
        let result = mock.translate(task("hello", "zh")).await;

        assert!(result.is_err());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fail_on_single_text() -> Result<()> {
        let mock = MockTranslator::new(MockMode::FailOn("bad".to_string()));

        assert!(mock.translate(task("bad", "zh")).await.is_err());
        assert_eq!(mock.translate(task("ok", "zh")).await?.into_content()?, "ok_zh");

        Ok(())
    }
}

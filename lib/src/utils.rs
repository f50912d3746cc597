use crate::TranslateTask;
use anyhow::{anyhow, Result};
use handlebars::Handlebars;
use language_tags::LanguageTag;
use serde_json::json;

/// 根据语言标签取人类可读的语言名称，用于提示词
pub fn language_display_name(tag: &LanguageTag) -> String {
    match tag.primary_language() {
        "zh" => "中文",
        "en" => "英文",
        "es" => "西班牙语",
        "ja" => "日语",
        "ko" => "韩语",
        "fr" => "法语",
        "de" => "德语",
        "ru" => "俄语",
        "pt" => "葡萄牙语",
        "it" => "意大利语",
        "ar" => "阿拉伯语",
        _ => return tag.to_string(),
    }
    .to_string()
}

/// 用任务内容渲染提示词模板
pub fn format_messages(template: &str, task: &TranslateTask) -> Result<String> {
    let mut reg = Handlebars::new();
    // 提示词是纯文本，不做 HTML 转义
    reg.register_escape_fn(handlebars::no_escape);

    let data = json!({
        "content": task.content,
        "context": task.context,
        "source_language": task.source_language.as_ref().map(language_display_name),
        "target_language": task.target_language.as_ref().map(language_display_name),
    });

    reg.render_template(template, &data).map_err(|e| anyhow!(e))
}

/// 默认系统提示词
pub const DEFAULT_SYSTEM_PROMPT: &str = r##"请将以下文本翻译成{{ target_language }}，确保符合以下要求：
1. 保持原文的格式和语气
2. 保留专业术语及关键数据
3. 只输出译文，不要输出其它内容"##;

/// 默认用户提示词，带上下文时在译文前给出上下文信息
pub const DEFAULT_USER_PROMPT: &str = r##"{{#if context}}上下文信息：
{{ context }}

要翻译的文本：
{{/if}}{{ content }}"##;

/// 渲染系统提示词，任务模板优先于调用方默认模板
pub fn render_system_prompt(task: &TranslateTask, fallback: Option<&String>) -> Result<String> {
    let template = task
        .system_prompt
        .as_deref()
        .or(fallback.map(|s| s.as_str()))
        .unwrap_or(DEFAULT_SYSTEM_PROMPT);
    format_messages(template, task)
}

/// 渲染用户提示词
pub fn render_user_prompt(task: &TranslateTask, fallback: Option<&String>) -> Result<String> {
    let template = task
        .user_prompt
        .as_deref()
        .or(fallback.map(|s| s.as_str()))
        .unwrap_or(DEFAULT_USER_PROMPT);
    format_messages(template, task)
}

//! 配置文件管理
//!
//! `config.json` 按提供商分节保存凭证，另有 `default_provider`
//! 指定默认提供商。凭证缺失或仍为占位符的提供商在任何网络调用
//! 之前就会被拒绝。

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Qwen,
    Claude,
    Gemini,
    OpenAI,
}

impl Provider {
    pub fn all() -> [Provider; 4] {
        [
            Provider::Qwen,
            Provider::Claude,
            Provider::Gemini,
            Provider::OpenAI,
        ]
    }
}

impl Display for Provider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Qwen => f.write_str("qwen"),
            Provider::Claude => f.write_str("claude"),
            Provider::Gemini => f.write_str("gemini"),
            Provider::OpenAI => f.write_str("openai"),
        }
    }
}

impl FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "qwen" => Ok(Provider::Qwen),
            "claude" => Ok(Provider::Claude),
            "gemini" => Ok(Provider::Gemini),
            "openai" => Ok(Provider::OpenAI),
            _ => Err(anyhow!("不支持的provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSection {
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub qwen: Option<ProviderSection>,
    pub claude: Option<ProviderSection>,
    pub gemini: Option<ProviderSection>,
    pub openai: Option<ProviderSection>,
    pub default_provider: Option<String>,
}

impl AppConfig {
    fn section(&self, provider: Provider) -> Option<&ProviderSection> {
        match provider {
            Provider::Qwen => self.qwen.as_ref(),
            Provider::Claude => self.claude.as_ref(),
            Provider::Gemini => self.gemini.as_ref(),
            Provider::OpenAI => self.openai.as_ref(),
        }
    }

    /// 配置的默认提供商，未配置时回落到 qwen
    pub fn default_provider(&self) -> Result<Provider> {
        match &self.default_provider {
            Some(name) => name.parse(),
            None => Ok(Provider::Qwen),
        }
    }

    /// 取某提供商的配置节并校验凭证，返回可直接交给翻译器反序列化的 Value
    pub fn provider_config(&self, provider: Provider) -> Result<Value> {
        let section = self
            .section(provider)
            .filter(|s| credential_configured(&s.api_key))
            .ok_or_else(|| anyhow!("请在 config.json 中配置 {}.api_key", provider))?;

        Ok(serde_json::to_value(section)?)
    }

    /// 已配置有效凭证的提供商列表
    pub fn available_providers(&self) -> Vec<Provider> {
        Provider::all()
            .into_iter()
            .filter(|p| {
                self.section(*p)
                    .map(|s| credential_configured(&s.api_key))
                    .unwrap_or(false)
            })
            .collect()
    }
}

/// 凭证非空且不是 init 写入的占位符
fn credential_configured(api_key: &str) -> bool {
    !api_key.is_empty() && !(api_key.starts_with("your_") && api_key.ends_with("_here"))
}

/// 生成默认配置模板
pub fn default_config(default_provider: Provider) -> AppConfig {
    AppConfig {
        qwen: Some(ProviderSection {
            api_key: "your_dashscope_api_key_here".to_string(),
            base_url: Some("https://dashscope.aliyuncs.com/compatible-mode/v1".to_string()),
            model: Some("qwen3-max".to_string()),
        }),
        claude: Some(ProviderSection {
            api_key: "your_anthropic_api_key_here".to_string(),
            base_url: None,
            model: None,
        }),
        gemini: Some(ProviderSection {
            api_key: "your_google_api_key_here".to_string(),
            base_url: None,
            model: None,
        }),
        openai: Some(ProviderSection {
            api_key: "your_openai_api_key_here".to_string(),
            base_url: Some("https://api.openai.com/v1".to_string()),
            model: Some("gpt-4o-mini".to_string()),
        }),
        default_provider: Some(default_provider.to_string()),
    }
}

/// 初始化配置文件，已存在时除非 force 否则失败
pub fn init(path: &Path, force: bool, default_provider: Provider) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "配置文件 {} 已存在，如需重新初始化请使用 --force",
            path.display()
        );
    }

    let config = default_config(default_provider);
    let json = serde_json::to_string_pretty(&config)?;
    fs::write(path, json)
        .map_err(|e| anyhow!("配置文件 {} 写入失败: {}", path.display(), e))?;

    Ok(())
}

/// 加载并解析配置文件，文件缺失与格式错误给出不同的提示
pub fn load(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        bail!(
            "配置文件 {} 不存在，请先运行 'brick-translator init' 初始化配置文件",
            path.display()
        );
    }

    let text = fs::read_to_string(path)
        .map_err(|e| anyhow!("读取配置文件 {} 失败: {}", path.display(), e))?;

    serde_json::from_str(&text).map_err(|e| anyhow!("配置文件格式错误: {}", e))
}

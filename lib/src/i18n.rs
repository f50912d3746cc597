//! 国际化文件生成
//!
//! 从源 JSON 文件生成多语言版本：扁平化一次，按语言逐串翻译
//! （优先命中缓存），再按原始结构重建并序列化输出。
//! 单个字符串翻译失败只保留原文，不中断整个文档。

use crate::cache::TranslationCache;
use crate::document::{extract_translatable, rebuild};
use crate::{TranslateTaskBuilder, Translator};
use anyhow::{anyhow, Context, Result};
use derive_builder::Builder;
use language_tags::LanguageTag;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(anyhow!("不支持的输出格式: {}", s)),
        }
    }
}

fn default_languages() -> Vec<LanguageTag> {
    vec!["zh".parse().unwrap(), "es".parse().unwrap()]
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct GenerateOptions {
    /// 源 JSON 文件
    pub input_file: PathBuf,
    /// 输出目录
    #[builder(default = "PathBuf::from(\"i18n\")")]
    pub output_dir: PathBuf,
    /// 目标语言列表
    #[builder(default = "default_languages()")]
    pub languages: Vec<LanguageTag>,
    /// 输出文件格式
    #[builder(default)]
    pub format: OutputFormat,
    /// 是否启用翻译缓存
    #[builder(default)]
    pub use_cache: bool,
}

pub struct I18nGenerator<T: Translator> {
    translator: T,
}

impl<T: Translator + Sync> I18nGenerator<T> {
    pub fn new(translator: T) -> Self {
        I18nGenerator { translator }
    }

    /// 生成全部目标语言的国际化文件
    pub async fn generate(&self, options: &GenerateOptions) -> Result<()> {
        let text = fs::read_to_string(&options.input_file)
            .with_context(|| format!("读取源文件 {} 失败", options.input_file.display()))?;
        let source: Value = serde_json::from_str(&text)
            .with_context(|| format!("源文件 {} 不是合法的 JSON", options.input_file.display()))?;

        let translatable = extract_translatable(&source);
        if translatable.is_empty() {
            warn!("源文件中没有找到可翻译的内容");
            return Ok(());
        }

        fs::create_dir_all(&options.output_dir)
            .with_context(|| format!("创建输出目录 {} 失败", options.output_dir.display()))?;

        let stem = options
            .input_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        for language in &options.languages {
            let lang = language.to_string();
            info!("正在生成 {} 版本", lang);

            let mut cache = if options.use_cache {
                TranslationCache::load(&options.input_file, &lang)
            } else {
                TranslationCache::disabled()
            };

            let translations =
                self.translate_all(&translatable, language, &mut cache, options.use_cache).await;

            if options.use_cache {
                cache.persist();
            }

            let translated = rebuild(&source, &translations);

            let output_file = options
                .output_dir
                .join(format!("{}_{}.{}", stem, lang, options.format.extension()));
            let serialized = match options.format {
                OutputFormat::Json => serde_json::to_string_pretty(&translated)?,
                OutputFormat::Yaml => serde_yaml::to_string(&translated)?,
            };
            fs::write(&output_file, serialized)
                .with_context(|| format!("写入 {} 失败", output_file.display()))?;

            info!("{} 版本已保存到 {}", lang, output_file.display());
        }

        Ok(())
    }

    /// 逐串翻译，失败的串从结果中缺席，重建时自动保留原文
    async fn translate_all(
        &self,
        translatable: &[(String, String)],
        language: &LanguageTag,
        cache: &mut TranslationCache,
        use_cache: bool,
    ) -> HashMap<String, String> {
        let mut translations = HashMap::new();

        for (path, text) in translatable {
            if let Some(hit) = cache.get(text) {
                translations.insert(path.clone(), hit.clone());
                continue;
            }

            let task = match TranslateTaskBuilder::default()
                .content(text.clone())
                .target_language(language.clone())
                .build()
            {
                Ok(task) => task,
                Err(e) => {
                    warn!("构建翻译任务失败: {}", e);
                    continue;
                }
            };

            match self.translator.translate(task).await.and_then(|r| r.into_content()) {
                Ok(translated) => {
                    if use_cache {
                        cache.insert(text.clone(), translated.clone());
                    }
                    translations.insert(path.clone(), translated);
                }
                Err(e) => {
                    warn!("翻译 '{}' 失败: {}", text, e);
                }
            }
        }

        translations
    }
}

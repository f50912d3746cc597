//! AI 搬砖翻译器命令行入口
//!
//! 支持 Qwen、Claude、Gemini、OpenAI 四种 API。

use all_in_one::AnyTranslator;
use anyhow::Result;
use clap::{Parser, Subcommand};
use language_tags::LanguageTag;
use lib::config::{self, Provider, DEFAULT_CONFIG_PATH};
use lib::i18n::{GenerateOptionsBuilder, I18nGenerator, OutputFormat};
use lib::{TranslateTaskBuilder, Translator};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "brick-translator", version, about = "AI搬砖路人A - 智能翻译器")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 初始化配置文件
    Init {
        /// 配置文件路径
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// 强制覆盖已存在的配置文件
        #[arg(long)]
        force: bool,
        /// 默认API提供商
        #[arg(long, default_value = "qwen")]
        default_provider: String,
    },
    /// 验证配置文件
    Validate {
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// 列出已配置凭证的提供商
    List {
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// 翻译文本
    Translate {
        /// 要翻译的文本
        text: String,
        /// API提供商，缺省时使用配置文件中的默认提供商
        #[arg(long)]
        provider: Option<String>,
        /// 目标语言
        #[arg(long, default_value = "zh")]
        target: String,
        /// 温度参数 (0.0-1.0)
        #[arg(long, default_value_t = 0.3)]
        temperature: f32,
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// 带上下文的翻译
    TranslateWithContext {
        /// 要翻译的文本
        text: String,
        /// 上下文信息
        #[arg(long)]
        context: String,
        #[arg(long)]
        provider: Option<String>,
        #[arg(long, default_value = "zh")]
        target: String,
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// 从源 JSON 文件生成多语言版本
    I18n {
        /// 源 JSON 文件
        input: PathBuf,
        /// 输出目录
        #[arg(long, default_value = "i18n")]
        output_dir: PathBuf,
        /// 目标语言列表，逗号分隔
        #[arg(long, value_delimiter = ',', default_values_t = ["zh".to_string(), "es".to_string()])]
        languages: Vec<String>,
        /// 输出文件格式 (json 或 yaml)
        #[arg(long, default_value = "json")]
        format: String,
        /// 启用翻译缓存
        #[arg(long)]
        cache: bool,
        #[arg(long)]
        provider: Option<String>,
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
}

/// 加载配置并创建选中提供商的翻译实例
async fn build_translator(config_path: &Path, provider: Option<&str>) -> Result<AnyTranslator> {
    let config = config::load(config_path)?;

    let provider: Provider = match provider {
        Some(name) => name.parse()?,
        None => config.default_provider()?,
    };

    let section = config.provider_config(provider)?;
    let translator = AnyTranslator::create(provider, section).await?;

    println!("使用 {} API", provider.to_string().to_uppercase());

    Ok(translator)
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Init {
            config,
            force,
            default_provider,
        } => {
            let provider: Provider = default_provider.parse()?;
            config::init(&config, force, provider)?;

            println!("[OK] 配置文件已生成: {}", config.display());
            println!("[INFO] 默认API提供商设置为: {}", provider);
            println!("[INFO] 请编辑配置文件，填入你的API密钥");
        }

        Command::Validate { config } => {
            config::load(&config)?;
            println!("[OK] 配置文件验证通过");
        }

        Command::List { config } => {
            let providers = config::load(&config)?.available_providers();
            if providers.is_empty() {
                println!("[WARN] 没有配置任何有效的提供商");
                println!("   请先运行 'brick-translator init' 并填入API密钥");
            } else {
                let names: Vec<String> = providers.iter().map(|p| p.to_string()).collect();
                println!("[OK] 可用的提供商: {}", names.join(", "));
            }
        }

        Command::Translate {
            text,
            provider,
            target,
            temperature,
            config,
        } => {
            let translator = build_translator(&config, provider.as_deref()).await?;

            let task = TranslateTaskBuilder::default()
                .content(text)
                .target_language(target.parse::<LanguageTag>()?)
                .temperature(temperature)
                .build()?;

            let result = translator.translate(task).await?.into_content()?;
            println!("{}", result);
        }

        Command::TranslateWithContext {
            text,
            context,
            provider,
            target,
            config,
        } => {
            let translator = build_translator(&config, provider.as_deref()).await?;

            let task = TranslateTaskBuilder::default()
                .content(text)
                .context(context)
                .target_language(target.parse::<LanguageTag>()?)
                .build()?;

            let result = translator.translate(task).await?.into_content()?;
            println!("{}", result);
        }

        Command::I18n {
            input,
            output_dir,
            languages,
            format,
            cache,
            provider,
            config,
        } => {
            let translator = build_translator(&config, provider.as_deref()).await?;

            let languages = languages
                .iter()
                .map(|s| s.parse::<LanguageTag>().map_err(anyhow::Error::from))
                .collect::<Result<Vec<_>>>()?;
            let format: OutputFormat = format.parse()?;

            let options = GenerateOptionsBuilder::default()
                .input_file(input)
                .output_dir(output_dir.clone())
                .languages(languages)
                .format(format)
                .use_cache(cache)
                .build()?;

            I18nGenerator::new(translator).generate(&options).await?;

            println!("[OK] 国际化文件已生成到 {}", output_dir.display());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] 错误: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_i18n_language_list_parsing() {
        let cli = Cli::parse_from([
            "brick-translator",
            "i18n",
            "app.json",
            "--languages",
            "zh,es,ja",
            "--format",
            "yaml",
            "--cache",
        ]);

        match cli.command {
            Command::I18n {
                languages,
                format,
                cache,
                ..
            } => {
                assert_eq!(languages, vec!["zh", "es", "ja"]);
                assert_eq!(format, "yaml");
                assert!(cache);
            }
            _ => panic!("expected i18n subcommand"),
        }
    }

    #[test]
    fn test_translate_defaults() {
        let cli = Cli::parse_from(["brick-translator", "translate", "Hello, world!"]);

        match cli.command {
            Command::Translate {
                text,
                target,
                provider,
                temperature,
                ..
            } => {
                assert_eq!(text, "Hello, world!");
                assert_eq!(target, "zh");
                assert!(provider.is_none());
                assert_eq!(temperature, 0.3);
            }
            _ => panic!("expected translate subcommand"),
        }
    }
}

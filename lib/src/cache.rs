//! 翻译缓存
//!
//! 每个 (输入文件, 目标语言) 一个缓存文件，放在输入文件同级的
//! `.i18n_cache/` 目录下，内容是原文到译文的扁平 JSON 映射。
//! 缓存读写失败只降级为无缓存，绝不中断翻译。

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CACHE_DIR_NAME: &str = ".i18n_cache";

#[derive(Debug, Default)]
pub struct TranslationCache {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl TranslationCache {
    /// 不落盘的空缓存，用于未启用缓存的场景
    pub fn disabled() -> Self {
        TranslationCache::default()
    }

    /// 按输入文件与目标语言加载缓存，文件不存在或损坏时从空开始
    pub fn load(input_file: &Path, language: &str) -> Self {
        let path = cache_file_path(input_file, language);

        let entries = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(map) => map,
                Err(e) => {
                    warn!("缓存文件 {} 解析失败，忽略缓存: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        TranslationCache {
            path: Some(path),
            entries,
        }
    }

    pub fn get(&self, text: &str) -> Option<&String> {
        self.entries.get(text)
    }

    pub fn insert(&mut self, text: String, translated: String) {
        self.entries.insert(text, translated);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 整体写回缓存文件，失败时仅记录日志
    pub fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };

        if let Some(dir) = path.parent() {
            if let Err(e) = fs::create_dir_all(dir) {
                warn!("创建缓存目录 {} 失败: {}", dir.display(), e);
                return;
            }
        }

        let json = match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                warn!("序列化缓存失败: {}", e);
                return;
            }
        };

        if let Err(e) = fs::write(path, json) {
            warn!("写入缓存文件 {} 失败: {}", path.display(), e);
        }
    }
}

/// 缓存文件路径：`<输入目录>/.i18n_cache/<文件名主干>_<语言>.json`
pub fn cache_file_path(input_file: &Path, language: &str) -> PathBuf {
    let stem = input_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    input_file
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(CACHE_DIR_NAME)
        .join(format!("{}_{}.json", stem, language))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_file_path() {
        let path = cache_file_path(Path::new("/data/app.json"), "zh");
        assert_eq!(path, PathBuf::from("/data/.i18n_cache/app_zh.json"));
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("app.json");

        let cache = TranslationCache::load(&input, "zh");

        assert!(cache.is_empty());
    }

    #[test]
    fn test_persist_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("app.json");

        let mut cache = TranslationCache::load(&input, "zh");
        cache.insert("Hello".to_string(), "你好".to_string());
        cache.persist();

        let reloaded = TranslationCache::load(&input, "zh");
        assert_eq!(reloaded.get("Hello"), Some(&"你好".to_string()));
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("app.json");
        let cache_path = cache_file_path(&input, "zh");

        fs::create_dir_all(cache_path.parent().unwrap()).unwrap();
        fs::write(&cache_path, "not json {").unwrap();

        let cache = TranslationCache::load(&input, "zh");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_disabled_cache_never_persists() {
        let mut cache = TranslationCache::disabled();
        cache.insert("a".to_string(), "b".to_string());
        cache.persist();

        assert_eq!(cache.get("a"), Some(&"b".to_string()));
    }

    #[test]
    fn test_languages_use_separate_files() {
        let zh = cache_file_path(Path::new("app.json"), "zh");
        let es = cache_file_path(Path::new("app.json"), "es");
        assert_ne!(zh, es);
    }
}

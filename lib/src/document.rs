//! JSON 文档的扁平化与重建
//!
//! 路径规则：对象键用 `.` 连接，数组元素用 `[i]` 下标，
//! 例如 `a.b[2].c`。扁平化与重建走同一套路径规则，
//! 保证每个路径在两侧一一对应。

use serde_json::{Map, Value};
use std::collections::HashMap;

/// 递归提取所有可翻译的字符串值，按遍历顺序返回 (路径, 原文)
pub fn extract_translatable(value: &Value) -> Vec<(String, String)> {
    let mut out = Vec::new();
    visit(value, String::new(), &mut out);
    out
}

fn visit(value: &Value, path: String, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, item) in map {
                let new_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                visit(item, new_path, out);
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                visit(item, format!("{}[{}]", path, i), out);
            }
        }
        Value::String(s) => {
            // 空白字符串不参与翻译
            if !s.trim().is_empty() {
                out.push((path, s.clone()));
            }
        }
        Value::Number(_) | Value::Bool(_) | Value::Null => {}
    }
}

/// 根据翻译结果重建文档，结构与原文档完全一致；
/// 路径不在翻译表中的字符串保留原文
pub fn rebuild(value: &Value, translations: &HashMap<String, String>) -> Value {
    rebuild_at(value, translations, String::new())
}

fn rebuild_at(value: &Value, translations: &HashMap<String, String>, path: String) -> Value {
    match value {
        Value::Object(map) => {
            let mut result = Map::new();
            for (key, item) in map {
                let new_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                result.insert(key.clone(), rebuild_at(item, translations, new_path));
            }
            Value::Object(result)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| rebuild_at(item, translations, format!("{}[{}]", path, i)))
                .collect(),
        ),
        Value::String(s) => match translations.get(&path) {
            Some(translated) => Value::String(translated.clone()),
            None => Value::String(s.clone()),
        },
        other => other.clone(),
    }
}

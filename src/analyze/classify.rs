//! Keyword-vote classifier.
//!
//! Each category owns a keyword list. For an article text (lower-cased) a
//! category's score is the number of list entries found as substrings;
//! duplicate entries count twice. The strictly highest positive score wins;
//! ties go to the earliest category in table order. With no hit at all the
//! default category is assigned with confidence 0.
//!
//! Confidence = `min(score / list_len * 2, 1.0)`. A heuristic, not a probability.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_CATEGORY: &str = "其他";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    pub keywords: Vec<String>,
}

impl CategorySpec {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub category: String,
    pub confidence: f64,
}

#[derive(Debug, Clone)]
pub struct Classifier {
    // (name, lower-cased keywords) in table order
    categories: Vec<(String, Vec<String>)>,
    default_category: String,
}

impl Classifier {
    pub fn new(categories: Vec<CategorySpec>, default_category: &str) -> Result<Self, ConfigError> {
        if categories.is_empty() {
            return Err(ConfigError::EmptyCategories);
        }
        let mut seen = std::collections::HashSet::new();
        let mut table = Vec::with_capacity(categories.len());
        for c in categories {
            if c.name == default_category || !seen.insert(c.name.clone()) {
                return Err(ConfigError::DuplicateCategory(c.name));
            }
            let kws = c.keywords.iter().map(|k| k.to_lowercase()).collect();
            table.push((c.name, kws));
        }
        Ok(Self {
            categories: table,
            default_category: default_category.to_string(),
        })
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    /// Every label this classifier can emit, default last.
    pub fn labels(&self) -> Vec<&str> {
        self.categories
            .iter()
            .map(|(n, _)| n.as_str())
            .chain(std::iter::once(self.default_category.as_str()))
            .collect()
    }

    /// Raw per-category hit counts, in table order.
    pub fn scores(&self, text: &str) -> Vec<(&str, usize)> {
        let lower = text.to_lowercase();
        self.categories
            .iter()
            .map(|(name, kws)| {
                let hits = kws
                    .iter()
                    .filter(|k| !k.is_empty() && lower.contains(k.as_str()))
                    .count();
                (name.as_str(), hits)
            })
            .collect()
    }

    pub fn classify(&self, text: &str) -> Classification {
        let scores = self.scores(text);
        let max = scores.iter().map(|(_, s)| *s).max().unwrap_or(0);

        if max > 0 {
            // first category (table order) reaching the max
            if let Some(idx) = scores.iter().position(|(_, s)| *s == max) {
                let (name, kws) = &self.categories[idx];
                let confidence = (max as f64 / kws.len() as f64 * 2.0).min(1.0);
                return Classification {
                    category: name.clone(),
                    confidence,
                };
            }
        }

        Classification {
            category: self.default_category.clone(),
            confidence: 0.0,
        }
    }
}

/// Built-in category table for AI news.
pub fn default_categories() -> Vec<CategorySpec> {
    vec![
        CategorySpec::new(
            "大模型",
            &[
                "GPT", "Claude", "LLM", "大模型", "ChatGPT", "Gemini", "Qwen", "文心", "通义",
                "DeepSeek", "Kimi", "月之暗面", "智谱",
            ],
        ),
        CategorySpec::new(
            "AI 绘画",
            &[
                "Midjourney",
                "Stable Diffusion",
                "DALL-E",
                "AI 绘画",
                "AI 艺术",
                "文生图",
                "图生图",
                "ControlNet",
                "LoRA",
                "SDXL",
            ],
        ),
        CategorySpec::new(
            "工具推荐",
            &[
                "推荐", "工具", "插件", "扩展", "好用", "发现", "神器", "AI 工具", "效率", "助手",
                "自动化",
            ],
        ),
        CategorySpec::new(
            "技术分享",
            &[
                "代码", "教程", "实现", "原理", "源码", "论文", "研究", "算法", "架构", "部署",
                "训练", "微调",
            ],
        ),
        // "发布" is listed twice on purpose: it counts double.
        CategorySpec::new(
            "行业新闻",
            &[
                "发布", "融资", "收购", "合作", "上线", "发布", "新闻", "公告", "财报", "股价",
                "公司", "企业",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clf() -> Classifier {
        Classifier::new(default_categories(), DEFAULT_CATEGORY).unwrap()
    }

    #[test]
    fn single_hit_confidence_follows_formula() {
        let c = clf().classify("New GPT model released with breakthrough performance");
        assert_eq!(c.category, "大模型");
        assert!((c.confidence - 2.0 / 13.0).abs() < 1e-9);
    }

    #[test]
    fn no_hit_is_default_with_zero_confidence() {
        let c = clf().classify("Quarterly earnings beat expectations");
        assert_eq!(c.category, DEFAULT_CATEGORY);
        assert_eq!(c.confidence, 0.0);
    }

    #[test]
    fn higher_raw_count_wins_regardless_of_list_length() {
        // 大模型: GPT (1 of 13). 行业新闻: 融资 + 公司 (2 of 12).
        let c = clf().classify("GPT 公司 完成融资");
        assert_eq!(c.category, "行业新闻");
        assert!((c.confidence - 4.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn tie_goes_to_first_category_in_table_order() {
        // 大模型: Claude (1). 技术分享: 论文 (1).
        let c = clf().classify("Claude 论文");
        assert_eq!(c.category, "大模型");
    }

    #[test]
    fn duplicate_keyword_counts_twice() {
        let c = clf();
        let scores = c.scores("模型发布");
        let news = scores.iter().find(|(n, _)| *n == "行业新闻").unwrap();
        assert_eq!(news.1, 2);
    }

    #[test]
    fn confidence_saturates_at_one() {
        let tiny = Classifier::new(vec![CategorySpec::new("x", &["a", "b"])], "other").unwrap();
        let c = tiny.classify("a b");
        assert_eq!(c.confidence, 1.0);
    }

    #[test]
    fn empty_and_duplicate_tables_are_rejected() {
        assert!(matches!(
            Classifier::new(vec![], "other"),
            Err(ConfigError::EmptyCategories)
        ));
        let dup = vec![CategorySpec::new("x", &["a"]), CategorySpec::new("x", &["b"])];
        assert!(matches!(
            Classifier::new(dup, "other"),
            Err(ConfigError::DuplicateCategory(n)) if n == "x"
        ));
        let clash = vec![CategorySpec::new("other", &["a"])];
        assert!(Classifier::new(clash, "other").is_err());
    }

    #[test]
    fn labels_end_with_default() {
        let c = clf();
        let labels = c.labels();
        assert_eq!(labels.len(), 6);
        assert_eq!(labels.last(), Some(&DEFAULT_CATEGORY));
    }
}

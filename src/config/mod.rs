// src/config/mod.rs
//! Digest configuration: source registry, fetch settings, relevance
//! vocabulary and category table.
//!
//! Lookup order for `load_config_default()`:
//! 1) $DIGEST_CONFIG_PATH
//! 2) config/digest.toml
//! 3) config/digest.json
//! 4) built-in seed

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analyze::classify::{default_categories, CategorySpec, Classifier, DEFAULT_CATEGORY};
use crate::error::ConfigError;
use crate::ingest::executor::{DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_CONCURRENCY};
use crate::ingest::transport::DEFAULT_USER_AGENT;
use crate::ingest::types::{Source, SourceRegistry};
use crate::relevance::RelevanceFilter;

pub const ENV_CONFIG_PATH: &str = "DIGEST_CONFIG_PATH";
pub const DEFAULT_TOML_PATH: &str = "config/digest.toml";
pub const DEFAULT_JSON_PATH: &str = "config/digest.json";

fn default_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT.as_secs()
}
fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_category_name() -> String {
    DEFAULT_CATEGORY.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_concurrency: default_max_concurrency(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchSettings {
    /// Zero is not a usable timeout; fall back to the default.
    pub fn timeout(&self) -> Duration {
        if self.timeout_secs == 0 {
            DEFAULT_FETCH_TIMEOUT
        } else {
            Duration::from_secs(self.timeout_secs)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceSettings {
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    #[serde(default = "default_category_name")]
    pub default_category: String,
    /// Table order is the tie-break order.
    #[serde(default)]
    pub categories: Vec<CategorySpec>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            default_category: default_category_name(),
            categories: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestConfig {
    #[serde(default)]
    pub fetch: FetchSettings,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub relevance: RelevanceSettings,
    #[serde(default)]
    pub classifier: ClassifierSettings,
}

impl DigestConfig {
    /// Check everything a run needs. Any error here is fatal for the run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.registry()?;
        self.relevance_filter()?;
        self.classifier()?;
        Ok(())
    }

    pub fn registry(&self) -> Result<SourceRegistry, ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::EmptyRegistry);
        }
        SourceRegistry::new(self.sources.clone())
    }

    pub fn relevance_filter(&self) -> Result<RelevanceFilter, ConfigError> {
        let f = RelevanceFilter::new(&self.relevance.keywords);
        if f.keywords().is_empty() {
            return Err(ConfigError::EmptyVocabulary);
        }
        Ok(f)
    }

    pub fn classifier(&self) -> Result<Classifier, ConfigError> {
        Classifier::new(
            self.classifier.categories.clone(),
            &self.classifier.default_category,
        )
    }

    /// Built-in seed: five AI news feeds, AI vocabulary, six categories.
    pub fn default_seed() -> Self {
        let sources = vec![
            Source::new(
                "TechCrunch",
                "https://techcrunch.com/category/artificial-intelligence/feed/",
                "科技媒体",
            ),
            Source::new(
                "The Verge",
                "https://www.theverge.com/rss/artificial-intelligence/index.xml",
                "科技媒体",
            ),
            Source::new("VentureBeat", "https://venturebeat.com/category/ai/feed/", "科技媒体"),
            Source::new(
                "MIT Technology Review",
                "https://www.technologyreview.com/feed/",
                "科技媒体",
            ),
            Source::new("AI News", "https://artificialintelligence-news.com/feed/", "AI 专业"),
        ];

        let keywords = [
            "AI",
            "artificial intelligence",
            "人工智能",
            "machine learning",
            "机器学习",
            "deep learning",
            "深度学习",
            "neural network",
            "神经网络",
            "LLM",
            "GPT",
            "Claude",
            "ChatGPT",
            "openai",
            "google deepmind",
            "gemini",
            "copilot",
            "midjourney",
            "stable diffusion",
            "diffusion model",
            "transformer",
            "generative",
            "生成式",
            "reinforcement learning",
            "强化学习",
            "computer vision",
            "nlp",
            "natural language processing",
            "robotics",
            "autonomous",
            "automation",
            "智能",
            "大模型",
            "agentic",
            "多模态",
        ]
        .iter()
        .map(|k| k.to_string())
        .collect();

        Self {
            fetch: FetchSettings::default(),
            sources,
            relevance: RelevanceSettings { keywords },
            classifier: ClassifierSettings {
                default_category: default_category_name(),
                categories: default_categories(),
            },
        }
    }
}

/// Load from an explicit path. TOML or JSON, picked by extension with a content fallback.
pub fn load_config_from(path: &Path) -> Result<DigestConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let cfg = parse_config(&content, ext.as_str())?;
    info!(path = %path.display(), sources = cfg.sources.len(), "digest config loaded");
    Ok(cfg)
}

/// Load using env var + fallbacks (see module docs).
pub fn load_config_default() -> Result<DigestConfig, ConfigError> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        }
        return Err(ConfigError::EnvPath {
            var: ENV_CONFIG_PATH,
            path: pb,
        });
    }
    for candidate in [DEFAULT_TOML_PATH, DEFAULT_JSON_PATH] {
        let p = PathBuf::from(candidate);
        if p.exists() {
            return load_config_from(&p);
        }
    }
    info!("no digest config file found; using built-in seed");
    Ok(DigestConfig::default_seed())
}

pub fn parse_config(s: &str, hint_ext: &str) -> Result<DigestConfig, ConfigError> {
    if hint_ext == "json" {
        return serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()));
    }
    if hint_ext == "toml" {
        return toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()));
    }
    // Unknown extension: JSON if it looks like an object, else TOML.
    if s.trim_start().starts_with('{') {
        serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    } else {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

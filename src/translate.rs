// src/translate.rs
//! Localization collaborator.
//!
//! The pipeline calls `Translator::translate` once per relevant article. Errors
//! never fail the article: the pipeline falls back to the untranslated text.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub title: String,
    pub body: String,
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, title: &str, body: &str) -> Result<Localized>;
    fn name(&self) -> &'static str;
}

/// Summary template chosen by the first rule whose needles hit the
/// lower-cased title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRule {
    pub needles: Vec<String>,
    pub template: String,
}

impl SummaryRule {
    pub fn new(needles: &[&str], template: &str) -> Self {
        Self {
            needles: needles.iter().map(|n| n.to_lowercase()).collect(),
            template: template.to_string(),
        }
    }

    fn matches(&self, title_lower: &str) -> bool {
        self.needles.iter().any(|n| title_lower.contains(n.as_str()))
    }
}

/// Table-driven translator: exact title table, ordered summary rules
/// (first match wins), default summary.
#[derive(Debug, Clone, Default)]
pub struct PhraseTableTranslator {
    titles: HashMap<String, String>,
    rules: Vec<SummaryRule>,
    default_summary: String,
}

impl PhraseTableTranslator {
    pub fn new(
        titles: HashMap<String, String>,
        rules: Vec<SummaryRule>,
        default_summary: &str,
    ) -> Self {
        Self {
            titles,
            rules,
            default_summary: default_summary.to_string(),
        }
    }

    pub fn translate_title(&self, title: &str) -> String {
        self.titles
            .get(title)
            .cloned()
            .unwrap_or_else(|| format!("中文翻译：{title}"))
    }

    pub fn translate_summary(&self, title: &str) -> String {
        let lower = title.to_lowercase();
        self.rules
            .iter()
            .find(|r| r.matches(&lower))
            .map(|r| r.template.clone())
            .unwrap_or_else(|| self.default_summary.clone())
    }

    /// Built-in table for the curated AI headlines.
    pub fn default_table() -> Self {
        let titles = [
            (
                "GPT-5 Leaks: OpenAI's Next Model to Feature Real-Time Multimodal Understanding",
                "GPT-5 曝光：OpenAI 下一代模型将具备实时多模态理解能力",
            ),
            (
                "Claude Sonnet 4.5's Code Understanding Boosts Developer Productivity by 200%",
                "Claude Sonnet 4.5 的代码理解能力使开发者生产力提升 200%",
            ),
            (
                "Stable Diffusion 3.0 Released with Major Quality Improvements",
                "Stable Diffusion 3.0 发布，画质显著提升",
            ),
            (
                "Breakthrough in LLM Inference Cost Optimization",
                "LLM 推理成本优化取得突破",
            ),
            (
                "Google Gemini 2.5 Introduces Advanced Code Execution Capabilities",
                "Google Gemini 2.5 引入高级代码执行能力",
            ),
            (
                "Agentic AI Systems: The Next Frontier in Artificial Intelligence",
                "智能代理 AI 系统：人工智能的下一个前沿",
            ),
            (
                "Multimodal AI Models Achieve Human-Level Performance on Complex Tasks",
                "多模态 AI 模型在复杂任务上达到人类水平表现",
            ),
            (
                "OpenAI Sora Leaked: Revolutionary Video Generation Model Revealed",
                "OpenAI Sora 泄露：革命性视频生成模型曝光",
            ),
            (
                "Anthropic Announces New Constitutional AI Framework",
                "Anthropic 宣布新宪法 AI 框架",
            ),
        ]
        .into_iter()
        .map(|(en, cn)| (en.to_string(), cn.to_string()))
        .collect();

        let rules = vec![
            SummaryRule::new(
                &["developer"],
                "开发者报告使用 Claude Sonnet 4.5 进行编码任务时生产力显著提升。该模型理解和编写复杂代码的能力大幅提升。",
            ),
            SummaryRule::new(
                &["stable diffusion"],
                "Stability AI 发布了 Stable Diffusion 3.0，在图像质量和生成速度方面有显著改进。更新包括文本渲染和构图的新功能。",
            ),
            SummaryRule::new(
                &["multimodal"],
                "最新的基准测试显示，最新的多模态 AI 模型可以在需要同时理解文本、图像和音频的复杂推理任务上匹配或超越人类表现。",
            ),
            SummaryRule::new(
                &["cost optimization"],
                "新的量化技术使小型语言模型能够达到更大规模模型的效果。这可能普及对强大 AI 的访问。",
            ),
            SummaryRule::new(
                &["code execution"],
                "Google 的最新 Gemini 模型现在可以直接执行 Python 代码，为开发者提供数据分析和原型设计的强大工具。",
            ),
            SummaryRule::new(
                &["agentic"],
                "研究表明，能够自主规划和执行的智能代理 AI 系统正变得越来越复杂。这种转变可能会改变企业自动化。",
            ),
        ];

        Self::new(
            titles,
            rules,
            "这是 AI 领域的重要进展，展示了人工智能技术的最新突破和发展方向。",
        )
    }
}

#[async_trait]
impl Translator for PhraseTableTranslator {
    async fn translate(&self, title: &str, _body: &str) -> Result<Localized> {
        Ok(Localized {
            title: self.translate_title(title),
            body: self.translate_summary(title),
        })
    }

    fn name(&self) -> &'static str {
        "phrase-table"
    }
}

/// Ordered English -> Chinese term substitution (case-sensitive).
#[derive(Debug, Clone, Default)]
pub struct GlossaryTranslator {
    terms: Vec<(String, String)>,
}

impl GlossaryTranslator {
    pub fn new(terms: Vec<(String, String)>) -> Self {
        Self { terms }
    }

    /// Entries mapping a term to itself (GPT, Claude, API, ...) are left out.
    pub fn default_glossary() -> Self {
        let terms = [
            ("AI", "人工智能"),
            ("Artificial Intelligence", "人工智能"),
            ("Machine Learning", "机器学习"),
            ("Deep Learning", "深度学习"),
            ("Neural Network", "神经网络"),
            ("LLM", "大语言模型"),
            ("Google", "谷歌"),
            ("Microsoft", "微软"),
            ("Model", "模型"),
            ("Algorithm", "算法"),
            ("Framework", "框架"),
            ("Platform", "平台"),
            ("Startup", "初创公司"),
            ("Company", "公司"),
            ("Technology", "技术"),
            ("Innovation", "创新"),
            ("Research", "研究"),
            ("Development", "开发"),
            ("Deployment", "部署"),
            ("Training", "训练"),
            ("Optimization", "优化"),
            ("Launch", "推出"),
            ("Release", "发布"),
            ("Announce", "宣布"),
            ("Introduce", "介绍"),
            ("Update", "更新"),
            ("Version", "版本"),
            ("Feature", "功能"),
            ("Capability", "能力"),
            ("Breakthrough", "突破"),
            ("Revolution", "革命"),
            ("Innovate", "创新"),
            ("Achieve", "实现"),
            ("Develop", "开发"),
            ("Create", "创建"),
            ("Build", "构建"),
            ("Design", "设计"),
            ("2026", "2026年"),
            ("2025", "2025年"),
            ("Q1", "第一季度"),
            ("Q2", "第二季度"),
            ("Q3", "第三季度"),
            ("Q4", "第四季度"),
        ]
        .into_iter()
        .map(|(en, cn)| (en.to_string(), cn.to_string()))
        .collect();
        Self::new(terms)
    }

    pub fn translate_text(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (en, cn) in &self.terms {
            out = out.replace(en.as_str(), cn);
        }
        out.trim().to_string()
    }

    pub fn translate_title(&self, title: &str) -> String {
        if is_mostly_cjk(title) {
            return title.to_string();
        }
        self.translate_text(title)
    }
}

#[async_trait]
impl Translator for GlossaryTranslator {
    async fn translate(&self, title: &str, body: &str) -> Result<Localized> {
        Ok(Localized {
            title: self.translate_title(title),
            body: self.translate_text(body),
        })
    }

    fn name(&self) -> &'static str {
        "glossary"
    }
}

/// More than half of the chars are CJK unified ideographs.
fn is_mostly_cjk(s: &str) -> bool {
    let total = s.chars().count();
    let cjk = s
        .chars()
        .filter(|c| ('\u{4e00}'..='\u{9fff}').contains(c))
        .count();
    total > 0 && cjk * 2 > total
}

//! Integration Agent
//!
//! Merges many documents (or a whole search tree) into one structured
//! synthesis. There is no useful local fallback for this, so failures are
//! reported to the caller instead of being papered over.

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::sync::Arc;
use tracing::{info, warn};

use crate::agents::summary::SummaryAgent;
use crate::types::AppError;

const FLAT_MAX_LENGTH: usize = 800;
const TREE_MAX_LENGTH: usize = 1200;

/// One document to integrate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub title: String,
    /// Search results can be posted back as-is.
    #[serde(alias = "snippet")]
    pub content: String,
}

/// One search-tree node and the results collected under it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(rename = "keyword")]
    pub label: String,
    #[serde(rename = "results", default)]
    pub items: Vec<ContentItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IntegrationOutcome {
    fn succeeded(integration: String) -> Self {
        Self {
            success: true,
            integration: Some(integration),
            message: None,
        }
    }

    fn failed(error: &AppError) -> Self {
        Self {
            success: false,
            integration: None,
            message: Some(error.to_string()),
        }
    }
}

pub struct IntegrationAgent {
    summary: Arc<SummaryAgent>,
}

impl IntegrationAgent {
    pub fn new(summary: Arc<SummaryAgent>) -> Self {
        Self { summary }
    }

    pub async fn integrate(&self, items: &[ContentItem], topic: &str) -> IntegrationOutcome {
        if items.is_empty() {
            return IntegrationOutcome::failed(&AppError::InvalidRequest(
                "no content to integrate".to_string(),
            ));
        }
        info!(topic = %topic, items = items.len(), "Integrating contents");
        self.run(&flat_prompt(items, topic), FLAT_MAX_LENGTH).await
    }

    pub async fn integrate_tree(&self, nodes: &[TreeNode], topic: &str) -> IntegrationOutcome {
        if nodes.iter().all(|n| n.items.is_empty()) {
            return IntegrationOutcome::failed(&AppError::InvalidRequest(
                "search tree has no results to integrate".to_string(),
            ));
        }
        info!(topic = %topic, nodes = nodes.len(), "Integrating search tree");
        self.run(&tree_prompt(nodes, topic), TREE_MAX_LENGTH).await
    }

    async fn run(&self, prompt: &str, max_length: usize) -> IntegrationOutcome {
        match self.summary.complete(prompt, max_length).await {
            Ok(text) => IntegrationOutcome::succeeded(text),
            Err(e) => {
                warn!(error = %e, "Integration failed");
                IntegrationOutcome::failed(&e)
            }
        }
    }
}

fn flat_prompt(items: &[ContentItem], topic: &str) -> String {
    let mut sections = String::new();
    for (i, item) in items.iter().enumerate() {
        let _ = write!(sections, "内容{}：{}\n{}\n\n", i + 1, item.title, item.content);
    }

    format!(
        "请整合以下关于\"{topic}\"的多篇内容，生成一个连贯、全面的总结：\n\n\
         {sections}\n\
         请按照以下要求进行整合：\n\
         1. 提取各篇内容的核心观点和重要信息\n\
         2. 消除重复内容，保持逻辑清晰\n\
         3. 按照主题相关性组织内容\n\
         4. 生成一个结构化的总结，包含主要观点和关键信息\n\
         5. 保持客观中立的语调\n\
         6. 总结长度控制在500-800字之间\n\n\
         请直接输出整合后的内容，不要添加额外的说明文字。"
    )
}

fn tree_prompt(nodes: &[TreeNode], topic: &str) -> String {
    let mut sections = String::new();
    for (i, node) in nodes.iter().enumerate() {
        let _ = writeln!(sections, "=== 节点{}：{} ===", i + 1, node.label);
        for (j, item) in node.items.iter().enumerate() {
            let _ = write!(sections, "结果{}：{}\n{}\n\n", j + 1, item.title, item.content);
        }
    }

    format!(
        "请整合以下关于\"{topic}\"的整棵搜索树内容，生成一个全面、系统的总结：\n\n\
         {sections}\n\
         请按照以下要求进行整合：\n\
         1. 分析各个搜索节点的主题关联性和层次结构\n\
         2. 提取每个节点的核心观点和重要信息\n\
         3. 识别不同节点间的联系和差异\n\
         4. 按照逻辑层次组织内容，形成完整的知识体系\n\
         5. 消除重复信息，突出关键观点\n\
         6. 生成一个结构化的综合总结，包含主要主题、核心观点、不同角度的分析和整体结论\n\
         7. 保持客观中立的语调\n\
         8. 总结长度控制在800-1200字之间\n\n\
         请直接输出整合后的内容，不要添加额外的说明文字。"
    )
}

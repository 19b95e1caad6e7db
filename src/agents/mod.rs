//! Agent System
//!
//! LLM-backed services invoked on demand by the UI:
//!
//! - **Summary Agent**: condenses one piece of content, degrading to a local
//!   extractive summary when the LLM is unreachable
//! - **Integration Agent**: synthesizes many documents or a whole search tree
//!   through the summary agent's LLM call with a larger budget

pub mod integration;
pub mod summary;

pub use integration::{ContentItem, IntegrationAgent, IntegrationOutcome, TreeNode};
pub use summary::{extractive_summary, SummaryAgent, SUMMARY_UNAVAILABLE};

//! Statistical keyword extraction over the input text alone.
//!
//! Terms are lower-cased Latin/numeric words and dictionary-segmented CJK
//! words. Score is term frequency weighted by term length; a term contained
//! in an already selected one is skipped.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::keywords::lexical::{is_stop_word, tokenize};
use crate::keywords::KeywordTier;
use crate::types::AppResult;

#[derive(Debug)]
struct Candidate {
    freq: usize,
    first_seen: usize,
}

#[derive(Debug, Default)]
pub struct StatisticalTier;

impl StatisticalTier {
    pub fn extract(text: &str, count: usize) -> Vec<String> {
        let mut table: HashMap<String, Candidate> = HashMap::new();

        for (position, token) in tokenize(text).into_iter().enumerate() {
            let term = token.to_lowercase();
            if term.chars().count() < 2 || is_stop_word(&term) {
                continue;
            }
            table
                .entry(term)
                .or_insert(Candidate {
                    freq: 0,
                    first_seen: position,
                })
                .freq += 1;
        }

        let mut ranked: Vec<(String, f64, usize)> = table
            .into_iter()
            .map(|(term, c)| {
                let weight = ((term.chars().count() + 1) as f64).ln();
                (term, c.freq as f64 * weight, c.first_seen)
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.2.cmp(&b.2))
        });

        let mut selected: Vec<String> = Vec::new();
        for (term, _, _) in ranked {
            if selected.len() >= count {
                break;
            }
            // fragments of an already chosen term add nothing
            if selected.iter().any(|s| s.contains(term.as_str())) {
                continue;
            }
            selected.push(term);
        }
        selected
    }
}

#[async_trait]
impl KeywordTier for StatisticalTier {
    fn name(&self) -> &str {
        "statistical"
    }

    async fn generate(&self, text: &str, count: usize) -> AppResult<Vec<String>> {
        Ok(Self::extract(text, count))
    }
}

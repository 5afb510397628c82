//! Deterministic lexical analysis used when the remote service is unavailable
//!
//! Builds a fixed-layout report from word frequencies, sentence segmentation
//! and paragraph counts. Pure: the same text and category always produce the
//! same report.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::framing::{CategoryFraming, Depth};
use crate::config::AnalyzerConfig;
use crate::processing::normalize_text;
use crate::types::{AnalysisReport, Category, NormalizedDocument};

/// Sentence terminators; runs count as one boundary
static SENTENCE_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence pattern should compile"));

/// Blank-line paragraph boundaries
static PARAGRAPH_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t\r]*\n").expect("paragraph pattern should compile"));

const SUMMARY_MAX_CHARS: usize = 300;
const SUMMARY_SENTENCES: usize = 3;
const TOPIC_COUNT: usize = 5;
const TOPIC_MAX_CHARS: usize = 100;
/// Paragraphs shorter than this (trimmed) are not counted as sections
const MIN_SECTION_CHARS: usize = 50;

const SUMMARY_FILLER: &str =
    "This document provides comprehensive information on its subject matter.";
const KEY_TERMS_FILLER: &str = "No recurring key terms identified";
const TOPICS_FILLER: &str = "No distinct topics identified";
const COMPLETION_MARKER: &str = "✓ Analysis complete • Advanced document intelligence applied";

/// Section headings every report contains, in order (after the title)
pub const REPORT_SECTIONS: [&str; 7] = [
    "**Executive Summary**",
    "**Document Overview**",
    "**Key Terms & Concepts**",
    "**Content Structure**",
    "**Main Topics Covered**",
    "**Analysis Insights**",
    COMPLETION_MARKER,
];

/// Size statistics reported in the overview
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentStats {
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub reading_minutes: usize,
}

/// Term frequencies in first-seen order
struct WordFrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl WordFrequencyTable {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn add(&mut self, term: String) {
        match self.index.get(&term) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(term.clone(), self.entries.len());
                self.entries.push((term, 1));
            }
        }
    }

    /// Most frequent terms; ties keep first-seen order
    fn top(mut self, limit: usize) -> Vec<String> {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.entries
            .into_iter()
            .take(limit)
            .map(|(term, _)| term)
            .collect()
    }
}

/// Heuristic report generator
#[derive(Debug, Clone)]
pub struct HeuristicAnalyzer {
    stop_words: HashSet<String>,
    key_term_limit: usize,
    words_per_minute: usize,
}

impl Default for HeuristicAnalyzer {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}

impl HeuristicAnalyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            stop_words: config.stop_words.iter().map(|w| w.to_lowercase()).collect(),
            key_term_limit: config.key_term_limit,
            words_per_minute: config.words_per_minute.max(1),
        }
    }

    pub fn analyze_document(&self, document: &NormalizedDocument) -> AnalysisReport {
        self.analyze(document.text(), document.category())
    }

    /// Build the full report for `text`. Never fails; empty text gives zero statistics.
    pub fn analyze(&self, text: &str, category: Category) -> AnalysisReport {
        let stats = self.document_stats(text);
        let sentences = sentences(text);
        let key_terms = self.key_terms(text);
        let framing = CategoryFraming::for_category(category);
        let depth = Depth::from_word_count(stats.word_count);
        let title = category.title();

        let summary = {
            let joined = sentences
                .iter()
                .take(SUMMARY_SENTENCES)
                .copied()
                .collect::<Vec<_>>()
                .join(". ");
            let capped = normalize_text(&joined, SUMMARY_MAX_CHARS).trim().to_string();
            if capped.is_empty() {
                SUMMARY_FILLER.to_string()
            } else {
                capped
            }
        };

        let key_term_lines = if key_terms.is_empty() {
            format!("• {}", KEY_TERMS_FILLER)
        } else {
            bullets(key_terms.iter().map(String::as_str))
        };

        let aspect_lines = framing
            .aspects
            .iter()
            .map(|aspect| format!("• {} present in the text", aspect))
            .collect::<Vec<_>>()
            .join("\n");

        let topic_lines = if sentences.is_empty() {
            format!("1. {}", TOPICS_FILLER)
        } else {
            sentences
                .iter()
                .take(TOPIC_COUNT)
                .enumerate()
                .map(|(i, sentence)| {
                    let capped = normalize_text(sentence, TOPIC_MAX_CHARS);
                    let ellipsis = if capped.len() < sentence.len() { "..." } else { "" };
                    format!("{}. {}{}", i + 1, capped, ellipsis)
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        let sections = plural(stats.paragraph_count, "section");

        let report = format!(
            r#"**{title} Document Analysis**

**Executive Summary**
{summary}

**Document Overview**
• Total Length: {words} words across {sentence_count} sentences
• Document Type: {title} Document
• Structure: {paragraphs} main {sections} identified
• Reading Time: ~{minutes} {minute_word}

**Key Terms & Concepts**
The document prominently features the following key terms:
{key_term_lines}

**{focus}**
Based on the document type and content analysis:
{aspect_lines}

**Content Structure**
The document is organized into {paragraphs} main {sections}, providing {coverage} coverage of its subject matter.

**Main Topics Covered**
{topic_lines}

**Analysis Insights**
This {category} document demonstrates {insight}. The content is structured to convey information effectively with clear progression of ideas.

{marker}"#,
            title = title,
            summary = summary,
            words = stats.word_count,
            sentence_count = stats.sentence_count,
            paragraphs = stats.paragraph_count,
            sections = sections,
            minutes = stats.reading_minutes,
            minute_word = plural(stats.reading_minutes, "minute"),
            key_term_lines = key_term_lines,
            focus = framing.focus,
            aspect_lines = aspect_lines,
            coverage = depth.coverage(),
            topic_lines = topic_lines,
            category = category.as_str(),
            insight = depth.insight(),
            marker = COMPLETION_MARKER,
        );

        AnalysisReport::new(report)
    }

    /// Word, sentence, paragraph and reading-time counts
    pub fn document_stats(&self, text: &str) -> DocumentStats {
        let word_count = text.split_whitespace().count();
        let paragraph_count = PARAGRAPH_SPLIT
            .split(text)
            .filter(|p| p.trim().chars().count() > MIN_SECTION_CHARS)
            .count();

        DocumentStats {
            word_count,
            sentence_count: sentences(text).len(),
            paragraph_count,
            reading_minutes: word_count.div_ceil(self.words_per_minute),
        }
    }

    /// Most frequent qualifying terms, title-cased
    pub fn key_terms(&self, text: &str) -> Vec<String> {
        let mut table = WordFrequencyTable::new();
        for token in text.split_whitespace() {
            let cleaned: String = token
                .to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_lowercase())
                .collect();
            if cleaned.len() > 3 && !self.stop_words.contains(&cleaned) {
                table.add(cleaned);
            }
        }

        table
            .top(self.key_term_limit)
            .into_iter()
            .map(|term| title_case(&term))
            .collect()
    }
}

/// Trimmed, non-empty sentence fragments
fn sentences(text: &str) -> Vec<&str> {
    SENTENCE_SPLIT
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn bullets<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items
        .map(|item| format!("• {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &str = "The quick brown fox jumps. The fox runs fast! Foxes are quick animals.";

    fn analyzer() -> HeuristicAnalyzer {
        HeuristicAnalyzer::default()
    }

    #[test]
    fn test_fox_stats() {
        let stats = analyzer().document_stats(FOX);
        assert_eq!(stats.word_count, 13);
        assert_eq!(stats.sentence_count, 3);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.reading_minutes, 1);
    }

    #[test]
    fn test_fox_key_terms() {
        let terms = analyzer().key_terms(FOX);
        assert_eq!(
            terms,
            vec!["Quick", "Brown", "Jumps", "Runs", "Fast", "Foxes", "Animals"]
        );
        assert!(!terms.iter().any(|t| t == "Fox"));
    }

    #[test]
    fn test_fox_report() {
        let report = analyzer().analyze(FOX, Category::General);
        let text = report.as_str();

        assert!(text.starts_with("**General Document Analysis**"));
        assert!(text.contains(
            "**Executive Summary**\nThe quick brown fox jumps. The fox runs fast. Foxes are quick animals\n"
        ));
        assert!(text.contains("• Total Length: 13 words across 3 sentences"));
        assert!(text.contains("• Reading Time: ~1 minute\n"));
        assert!(text.contains("• Structure: 1 main section identified"));
        assert!(text.contains("• Quick\n• Brown"));
        assert!(text.contains("**Main Content & Themes**"));
        assert!(text.contains("1. The quick brown fox jumps\n2. The fox runs fast\n3. Foxes are quick animals"));
        assert!(text.contains("This general document demonstrates focused and direct communication."));
        assert!(text.ends_with(COMPLETION_MARKER));
    }

    #[test]
    fn test_empty_text() {
        let report = analyzer().analyze("", Category::Legal);
        let text = report.as_str();

        assert!(text.starts_with("**Legal Document Analysis**"));
        for heading in REPORT_SECTIONS {
            assert!(text.contains(heading), "missing {}", heading);
        }
        assert!(text.contains("**Legal Terms & Obligations**"));
        assert!(text.contains("0 words"));
        assert!(text.contains("0 sentences"));
        assert!(text.contains("~0 minutes"));
        assert!(text.contains(SUMMARY_FILLER));
        assert!(text.contains(KEY_TERMS_FILLER));
        assert!(text.contains(TOPICS_FILLER));
    }

    #[test]
    fn test_key_terms_capped_and_qualifying() {
        let text = "alpha bravo charlie delta echoes foxtrot golfer hotel india juliet kilo lima";
        let terms = analyzer().key_terms(text);
        assert_eq!(terms.len(), 8);
        for term in &terms {
            assert!(term.len() > 3);
        }
        assert!(!terms.iter().any(|t| t == "Kilo"));
    }

    #[test]
    fn test_key_terms_frequency_order() {
        let text = "river stone river cloud stone river";
        assert_eq!(analyzer().key_terms(text), vec!["River", "Stone", "Cloud"]);
    }

    #[test]
    fn test_stop_words_and_punctuation() {
        let text = "These would-be THOSE \"being\" contract's contract";
        let terms = analyzer().key_terms(text);
        assert_eq!(terms, vec!["Wouldbe", "Contracts", "Contract"]);
    }

    #[test]
    fn test_custom_config() {
        let config = AnalyzerConfig {
            key_term_limit: 2,
            stop_words: vec!["River".to_string()],
            words_per_minute: 2,
        };
        let analyzer = HeuristicAnalyzer::new(&config);
        let text = "river stone river cloud stone river";

        assert_eq!(analyzer.key_terms(text), vec!["Stone", "Cloud"]);
        assert_eq!(analyzer.document_stats(text).reading_minutes, 3);
    }

    #[test]
    fn test_paragraph_count() {
        let long = "This paragraph is comfortably longer than fifty characters in total.";
        let text = format!("{}\n\nshort\n\n\n{}\r\n\r\n{}", long, long, long);
        assert_eq!(analyzer().document_stats(&text).paragraph_count, 3);
    }

    #[test]
    fn test_depth_wording() {
        let text = "word ".repeat(600);
        let report = analyzer().analyze(&text, Category::Business);
        assert!(report.as_str().contains("providing thorough coverage"));
        assert!(report.as_str().contains("balanced coverage with clear explanations"));
        assert!(report.as_str().contains("~3 minutes"));
    }

    #[test]
    fn test_long_topics_truncated() {
        let sentence = "a".repeat(150);
        let report = analyzer().analyze(&sentence, Category::Technical);
        let expected = format!("1. {}...", "a".repeat(100));
        assert!(report.as_str().contains(&expected));
    }

    #[test]
    fn test_summary_capped() {
        let text = format!("{}. {}. {}.", "b".repeat(200), "c".repeat(200), "d".repeat(200));
        let report = analyzer().analyze(&text, Category::General);
        let summary = report
            .as_str()
            .split("**Executive Summary**\n")
            .nth(1)
            .and_then(|rest| rest.split('\n').next())
            .unwrap();
        assert_eq!(summary.chars().count(), 300);
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let a = analyzer();
        assert_eq!(
            a.analyze(FOX, Category::Academic),
            a.analyze(FOX, Category::Academic)
        );
    }
}

//! Category framing for heuristic reports

use crate::types::Category;

/// Focus heading and aspect bullets for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryFraming {
    pub focus: &'static str,
    pub aspects: [&'static str; 4],
}

impl CategoryFraming {
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Legal => Self {
                focus: "Legal Terms & Obligations",
                aspects: [
                    "Contractual elements",
                    "Rights and responsibilities",
                    "Legal terminology",
                    "Binding agreements",
                ],
            },
            Category::Business => Self {
                focus: "Business Strategy & Operations",
                aspects: [
                    "Strategic objectives",
                    "Business operations",
                    "Market considerations",
                    "Performance indicators",
                ],
            },
            Category::Academic => Self {
                focus: "Research & Scholarship",
                aspects: [
                    "Research methodology",
                    "Academic arguments",
                    "Literature review",
                    "Scholarly findings",
                ],
            },
            Category::Technical => Self {
                focus: "Technical Specifications",
                aspects: [
                    "Technical details",
                    "System architecture",
                    "Implementation methods",
                    "Technical requirements",
                ],
            },
            Category::General => Self {
                focus: "Main Content & Themes",
                aspects: [
                    "Primary topics",
                    "Key information",
                    "Core messages",
                    "Important details",
                ],
            },
        }
    }
}

/// Coverage wording chosen from document length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    Comprehensive,
    Thorough,
    Concise,
}

impl Depth {
    pub fn from_word_count(words: usize) -> Self {
        if words > 1000 {
            Self::Comprehensive
        } else if words > 500 {
            Self::Thorough
        } else {
            Self::Concise
        }
    }

    /// Phrase used in the Content Structure section
    pub fn coverage(&self) -> &'static str {
        match self {
            Self::Comprehensive => "comprehensive and detailed",
            Self::Thorough => "thorough",
            Self::Concise => "concise",
        }
    }

    /// Phrase used in the Analysis Insights section
    pub fn insight(&self) -> &'static str {
        match self {
            Self::Comprehensive => "extensive depth with detailed explanations",
            Self::Thorough => "balanced coverage with clear explanations",
            Self::Concise => "focused and direct communication",
        }
    }
}

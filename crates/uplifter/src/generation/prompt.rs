//! Prompt templates for remote document analysis

use crate::types::{Category, NormalizedDocument};

/// Prompt builder for per-category analysis requests
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the analysis prompt for a normalized document
    pub fn build_for(document: &NormalizedDocument) -> String {
        Self::build(document.category(), document.text())
    }

    /// Build the analysis prompt for `text` framed as `category`
    pub fn build(category: Category, text: &str) -> String {
        format!(
            "{instructions}\n\nDocument to analyze:\n{text}",
            instructions = Self::instructions(category),
            text = text
        )
    }

    /// Role line and numbered section list for a category
    fn instructions(category: Category) -> &'static str {
        match category {
            Category::Legal => {
                r#"You are a legal expert analyzing a legal document. Provide a comprehensive analysis with:

1. **Executive Summary**: Brief overview in 2-3 sentences
2. **Key Points**: Main clauses, terms, or provisions
3. **Legal Implications**: Important legal considerations and potential risks
4. **Parties Involved**: Identify all parties and their roles
5. **Critical Dates & Deadlines**: Any important timeframes
6. **Obligations & Rights**: What each party must do and their entitlements
7. **Red Flags**: Potential concerns or unusual clauses
8. **Recommendations**: Practical advice or next steps"#
            }
            Category::Business => {
                r#"You are a business analyst. Analyze this document with focus on:

1. **Executive Summary**: Business context in 2-3 sentences
2. **Strategic Points**: Key business strategies and objectives
3. **Financial Implications**: Budget, costs, revenue considerations
4. **Market Analysis**: Market position, competitors, opportunities
5. **Risk Assessment**: Business risks and mitigation strategies
6. **Stakeholder Impact**: How different parties are affected
7. **Performance Metrics**: KPIs and success indicators
8. **Recommendations**: Strategic business recommendations"#
            }
            Category::Academic => {
                r#"You are an academic researcher. Analyze this document with:

1. **Abstract**: Academic summary in 2-3 sentences
2. **Main Arguments**: Core thesis and supporting arguments
3. **Methodology**: Research methods and approaches used
4. **Key Findings**: Important discoveries or conclusions
5. **Literature Context**: How it relates to existing research
6. **Strengths & Weaknesses**: Critical evaluation
7. **Implications**: Impact on the field
8. **Future Research**: Suggested areas for further study"#
            }
            Category::Technical => {
                r#"You are a technical documentation expert. Analyze with:

1. **Overview**: Technical summary in 2-3 sentences
2. **Core Concepts**: Main technical ideas and principles
3. **Architecture**: System design and structure
4. **Implementation Details**: Key technical specifications
5. **Dependencies**: Required technologies and tools
6. **Best Practices**: Recommended approaches
7. **Potential Issues**: Technical challenges or limitations
8. **Next Steps**: Implementation guidance"#
            }
            Category::General => {
                r#"You are a document analysis expert. Provide a thorough analysis with:

1. **Executive Summary**: Core message in 2-3 sentences
2. **Main Topics**: Primary themes and subjects covered
3. **Key Insights**: Important findings or arguments
4. **Structure & Organization**: How the document is organized
5. **Important Details**: Critical facts, figures, or claims
6. **Conclusions**: Main takeaways or conclusions
7. **Action Items**: Any suggested actions or next steps"#
            }
        }
    }
}

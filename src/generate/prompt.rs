//! The extemp question prompt.

/// Prompt template for NSDA extemporaneous speaking questions. The article
/// chunk is substituted for `{article}`.
pub const PROMPT_TEMPLATE: &str = "\
Create exactly 3 NSDA Extemporaneous Speaking questions from this news article.

STRICT REQUIREMENTS FOR NSDA EXTEMP QUESTIONS:
- Questions must encourage ANALYSIS, EVALUATION, and ARGUMENTATION (not just factual recall)
- Focus on implications, causes, effects, solutions, comparisons, and future predictions
- Questions should be answerable with a 7-minute speech using this article as ONE source
- Each question must be clear, specific, and debatable
- Questions should allow for multiple valid perspectives and arguments
- Use question stems that promote critical thinking: \"Should...\", \"What are the implications of...\", \"How effective...\", \"To what extent...\", \"What factors...\", etc.
- Questions must be relevant to current domestic or international issues
- Avoid questions that can be answered with simple yes/no or single facts

QUESTION TYPES TO FOCUS ON:
- Policy analysis and evaluation
- Cause and effect relationships
- Future implications and predictions
- Comparative analysis
- Solution-oriented questions
- Stakeholder impact analysis

FORMAT (follow exactly):
Category: [Domestic/International]
Q1. [Analytical question that encourages argumentation and uses the article's topic]

Category: [Domestic/International]
Q2. [Analytical question that encourages argumentation and uses the article's topic]

Category: [Domestic/International]
Q3. [Analytical question that encourages argumentation and uses the article's topic]

Article: {article}

Generate exactly 3 analytical extemp questions now:
";

/// Builds the generation prompt for an article chunk.
pub fn build_prompt(article_chunk: &str) -> String {
    PROMPT_TEMPLATE.replace("{article}", article_chunk)
}

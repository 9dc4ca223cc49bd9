// All LLM prompt constants for the deck analysis module.
// The deck text is embedded verbatim — no escaping layer on purpose, the
// provider contract treats it as opaque content.

/// System persona for deck analysis.
pub const ANALYSIS_SYSTEM: &str = "You are an expert startup advisor and investor \
    with deep knowledge of what venture investors look for in a pitch deck.";

/// Deck analysis prompt template. Replace `{deck_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an expert investor and startup advisor analyzing an investor pitch deck.

Analyze the following deck content and provide a comprehensive evaluation based on these 9 key criteria:

1. PROBLEM (0-100): How well does the deck define and validate the problem?
2. SOLUTION (0-100): How compelling and differentiated is the solution?
3. MARKET (0-100): Market size, timing, and opportunity assessment
4. BUSINESS MODEL (0-100): Revenue model clarity and scalability
5. TRACTION (0-100): Evidence of market validation and growth
6. TEAM (0-100): Team composition, experience, and capabilities
7. FINANCIALS (0-100): Financial projections and unit economics
8. COMPETITION (0-100): Competitive analysis and positioning
9. PRESENTATION (0-100): Deck quality, storytelling, and clarity

DECK CONTENT:
{deck_text}

Please respond with a JSON object in this exact format:
{
  "scores": {
    "overall": number,
    "problem": number,
    "solution": number,
    "market": number,
    "businessModel": number,
    "traction": number,
    "team": number,
    "financials": number,
    "competition": number,
    "presentation": number
  },
  "insights": {
    "strengths": ["strength1", "strength2", "strength3"],
    "weaknesses": ["weakness1", "weakness2", "weakness3"],
    "actionableItems": [
      {
        "category": "problem|solution|market|businessModel|traction|team|financials|competition|presentation",
        "priority": "high|medium|low",
        "description": "specific action item",
        "impact": "expected impact description"
      }
    ],
    "marketAnalysis": "detailed market analysis",
    "competitiveAdvantage": "competitive advantage assessment"
  },
  "recommendations": ["recommendation1", "recommendation2", "recommendation3"]
}

Guidelines:
- Be constructive and actionable in feedback
- Focus on investor perspective and what they look for
- Provide specific, measurable recommendations
- Overall score should be a weighted average with emphasis on problem, solution, market, and traction
- Include 3-5 actionable items with clear priorities
- Provide 3-5 key recommendations for improvement"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::Category;

    #[test]
    fn test_template_has_deck_text_placeholder() {
        assert!(ANALYSIS_PROMPT_TEMPLATE.contains("{deck_text}"));
    }

    #[test]
    fn test_template_names_all_nine_categories() {
        for category in Category::ALL {
            assert!(
                ANALYSIS_PROMPT_TEMPLATE.contains(&format!("\"{}\"", category.key())),
                "template missing score field {}",
                category.key()
            );
        }
    }
}

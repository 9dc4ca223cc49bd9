//! Deck scoring pipeline — turns raw deck text into a bounds-checked
//! `DeckAnalysis`: prompt construction, one provider call, best-effort JSON
//! recovery from the response text, defensive normalization, assembly.

use chrono::Utc;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::analysis::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::analysis::{
    ActionableItem, AnalysisInsights, Category, DeckAnalysis, InvestmentScores, Priority,
};

/// Category weights for the derived overall score, in `Category::ALL` order.
/// Applied only when the provider omits overall (or scores it 0); a
/// provider-supplied positive overall is kept as-is. Weights sum to 1.00.
pub const OVERALL_WEIGHTS: [f64; 9] = [0.15, 0.15, 0.15, 0.12, 0.15, 0.10, 0.08, 0.05, 0.05];

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("provider call failed: {0}")]
    Provider(#[from] LlmError),

    #[error("no JSON object found in analysis response")]
    NoJsonObject,

    #[error("malformed JSON in analysis response: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("analysis response is missing the `{0}` object")]
    MissingSection(&'static str),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Provider(e) => AppError::Llm(format!("Deck analysis failed: {e}")),
            e => AppError::Llm(format!("Failed to parse analysis result: {e}")),
        }
    }
}

/// Runs the full pipeline for one deck. All-or-nothing: any provider or
/// parse failure is terminal and no partial analysis is returned.
pub async fn analyze_deck(
    deck_text: &str,
    file_name: Option<String>,
    user_id: Uuid,
    llm: &LlmClient,
) -> Result<DeckAnalysis, AnalysisError> {
    let prompt = build_analysis_prompt(deck_text);
    let raw = llm.call(&prompt, ANALYSIS_SYSTEM).await?;

    let span = extract_json_object(&raw).ok_or(AnalysisError::NoJsonObject)?;
    let parsed: Value = serde_json::from_str(span)?;

    let scores = normalize_scores(&parsed)?;
    let insights = normalize_insights(&parsed)?;
    let recommendations = string_seq(parsed.get("recommendations"));

    Ok(DeckAnalysis {
        id: Uuid::new_v4(),
        user_id,
        file_name,
        file_url: None,
        scores,
        insights,
        recommendations,
        created_at: Utc::now(),
        is_premium: false,
    })
}

/// Pure prompt construction: the deck text is substituted verbatim into the
/// fixed template.
pub fn build_analysis_prompt(deck_text: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE.replace("{deck_text}", deck_text)
}

/// Locates the widest outer-brace span in free text — the model is asked for
/// JSON but not guaranteed to return only JSON.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Clamps a raw provider score into [0, 100], treating absent or non-numeric
/// values as 0.
pub fn clamp_score(raw: Option<f64>) -> u32 {
    raw.unwrap_or(0.0).clamp(0.0, 100.0).round() as u32
}

/// Derived overall: fixed weighted sum of the nine category scores, rounded.
pub fn weighted_overall(scores: &InvestmentScores) -> u32 {
    let values = [
        scores.problem,
        scores.solution,
        scores.market,
        scores.business_model,
        scores.traction,
        scores.team,
        scores.financials,
        scores.competition,
        scores.presentation,
    ];
    values
        .iter()
        .zip(OVERALL_WEIGHTS)
        .map(|(score, weight)| f64::from(*score) * weight)
        .sum::<f64>()
        .round() as u32
}

/// Normalizes the `scores` object. Individual fields default to 0 and clamp
/// into range; a missing `scores` object altogether is a shape failure.
///
/// An overall of 0 always triggers the weighted fallback — the wire contract
/// cannot distinguish "scored 0" from "omitted".
pub fn normalize_scores(parsed: &Value) -> Result<InvestmentScores, AnalysisError> {
    let raw = parsed
        .get("scores")
        .ok_or(AnalysisError::MissingSection("scores"))?;

    let mut scores = InvestmentScores {
        overall: read_score(raw, "overall"),
        problem: read_score(raw, "problem"),
        solution: read_score(raw, "solution"),
        market: read_score(raw, "market"),
        business_model: read_score(raw, "businessModel"),
        traction: read_score(raw, "traction"),
        team: read_score(raw, "team"),
        financials: read_score(raw, "financials"),
        competition: read_score(raw, "competition"),
        presentation: read_score(raw, "presentation"),
    };

    if scores.overall == 0 {
        scores.overall = weighted_overall(&scores);
    }

    Ok(scores)
}

fn read_score(scores: &Value, key: &str) -> u32 {
    clamp_score(scores.get(key).and_then(Value::as_f64))
}

/// Normalizes the `insights` object. Sequences copy verbatim-or-empty and
/// actionable items get per-field defaults; a missing `insights` object
/// altogether is a shape failure.
pub fn normalize_insights(parsed: &Value) -> Result<AnalysisInsights, AnalysisError> {
    let raw = parsed
        .get("insights")
        .ok_or(AnalysisError::MissingSection("insights"))?;

    let actionable_items = raw
        .get("actionableItems")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(normalize_actionable_item).collect())
        .unwrap_or_default();

    Ok(AnalysisInsights {
        strengths: string_seq(raw.get("strengths")),
        weaknesses: string_seq(raw.get("weaknesses")),
        actionable_items,
        market_analysis: string_field(raw, "marketAnalysis"),
        competitive_advantage: string_field(raw, "competitiveAdvantage"),
    })
}

fn normalize_actionable_item(item: &Value) -> ActionableItem {
    ActionableItem {
        category: item
            .get("category")
            .and_then(Value::as_str)
            .and_then(Category::parse)
            .unwrap_or(Category::Presentation),
        priority: item
            .get("priority")
            .and_then(Value::as_str)
            .and_then(Priority::parse)
            .unwrap_or_default(),
        description: string_field(item, "description"),
        impact: string_field(item, "impact"),
    }
}

fn string_seq(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(scores: Value) -> Value {
        json!({ "scores": scores, "insights": {}, "recommendations": [] })
    }

    #[test]
    fn test_clamp_score_bounds() {
        assert_eq!(clamp_score(None), 0);
        assert_eq!(clamp_score(Some(-5.0)), 0);
        assert_eq!(clamp_score(Some(150.0)), 100);
        assert_eq!(clamp_score(Some(72.4)), 72);
        assert_eq!(clamp_score(Some(100.0)), 100);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f64 = OVERALL_WEIGHTS.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "weights sum to {sum}");
    }

    #[test]
    fn test_extract_json_object_widest_span() {
        let text = "Here you go:\n{\"a\": {\"b\": 1}}\nHope that helps!";
        assert_eq!(extract_json_object(text), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_extract_json_object_none_when_absent() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn test_overall_falls_back_to_weighted_sum() {
        // 0.15*80 + 0.15*70 + 0.15*60 + 0.12*50 + 0.15*40 + 0.10*90
        //   + 0.08*30 + 0.05*20 + 0.05*10 = 56.4 -> 56
        let parsed = payload(json!({
            "problem": 80, "solution": 70, "market": 60, "businessModel": 50,
            "traction": 40, "team": 90, "financials": 30, "competition": 20,
            "presentation": 10, "overall": 0
        }));
        let scores = normalize_scores(&parsed).unwrap();
        assert_eq!(scores.overall, 56);
    }

    #[test]
    fn test_provider_overall_wins_over_weights() {
        let parsed = payload(json!({
            "problem": 80, "solution": 70, "market": 60, "businessModel": 50,
            "traction": 40, "team": 90, "financials": 30, "competition": 20,
            "presentation": 10, "overall": 77
        }));
        let scores = normalize_scores(&parsed).unwrap();
        assert_eq!(scores.overall, 77);
    }

    #[test]
    fn test_missing_and_out_of_range_fields_normalize() {
        let parsed = payload(json!({
            "problem": -12, "solution": 250, "market": "high", "overall": 0
        }));
        let scores = normalize_scores(&parsed).unwrap();
        assert_eq!(scores.problem, 0);
        assert_eq!(scores.solution, 100);
        assert_eq!(scores.market, 0);
        assert_eq!(scores.traction, 0);
        // fallback over the clamped values: 0.15 * 100 = 15
        assert_eq!(scores.overall, 15);
    }

    #[test]
    fn test_missing_scores_object_is_terminal() {
        let parsed = json!({ "insights": {} });
        assert!(matches!(
            normalize_scores(&parsed),
            Err(AnalysisError::MissingSection("scores"))
        ));
    }

    #[test]
    fn test_missing_insights_object_is_terminal() {
        let parsed = json!({ "scores": {} });
        assert!(matches!(
            normalize_insights(&parsed),
            Err(AnalysisError::MissingSection("insights"))
        ));
    }

    #[test]
    fn test_well_formed_payload_round_trips() {
        let parsed = json!({
            "scores": {
                "overall": 82, "problem": 85, "solution": 80, "market": 78,
                "businessModel": 75, "traction": 88, "team": 90,
                "financials": 70, "competition": 72, "presentation": 84
            },
            "insights": {
                "strengths": ["clear problem", "strong team"],
                "weaknesses": ["thin financials"],
                "actionableItems": [{
                    "category": "financials",
                    "priority": "high",
                    "description": "add unit economics",
                    "impact": "credibility with investors"
                }],
                "marketAnalysis": "growing market",
                "competitiveAdvantage": "network effects"
            },
            "recommendations": ["tighten the ask"]
        });

        let scores = normalize_scores(&parsed).unwrap();
        assert_eq!(scores.overall, 82);
        assert_eq!(scores.team, 90);

        let insights = normalize_insights(&parsed).unwrap();
        assert_eq!(insights.strengths, vec!["clear problem", "strong team"]);
        assert_eq!(insights.actionable_items.len(), 1);
        assert_eq!(insights.actionable_items[0].category, Category::Financials);
        assert_eq!(insights.actionable_items[0].priority, Priority::High);
        assert_eq!(insights.market_analysis, "growing market");

        assert_eq!(string_seq(parsed.get("recommendations")), vec!["tighten the ask"]);
    }

    #[test]
    fn test_missing_actionable_items_yields_empty_sequence() {
        let parsed = json!({
            "insights": { "strengths": ["s"], "weaknesses": [] }
        });
        let insights = normalize_insights(&parsed).unwrap();
        assert!(insights.actionable_items.is_empty());
        assert_eq!(insights.market_analysis, "");
    }

    #[test]
    fn test_actionable_item_defaults() {
        let parsed = json!({
            "insights": {
                "actionableItems": [
                    { "category": "growth", "priority": "urgent" },
                    {}
                ]
            }
        });
        let insights = normalize_insights(&parsed).unwrap();
        for item in &insights.actionable_items {
            assert_eq!(item.category, Category::Presentation);
            assert_eq!(item.priority, Priority::Medium);
            assert_eq!(item.description, "");
            assert_eq!(item.impact, "");
        }
    }

    #[test]
    fn test_string_seq_skips_non_strings() {
        let value = json!(["keep", 42, null, "also keep"]);
        assert_eq!(string_seq(Some(&value)), vec!["keep", "also keep"]);
        assert!(string_seq(None).is_empty());
    }

    #[test]
    fn test_app_error_surface_distinguishes_parse_from_provider() {
        let parse_err = AppError::from(AnalysisError::NoJsonObject);
        assert!(matches!(&parse_err, AppError::Llm(msg) if msg.contains("Failed to parse analysis result")));

        let provider_err = AppError::from(AnalysisError::Provider(LlmError::EmptyContent));
        assert!(matches!(&provider_err, AppError::Llm(msg) if msg.contains("Deck analysis failed")));
    }

    #[test]
    fn test_prompt_embeds_deck_text_verbatim() {
        let deck = "Problem: inventory} is {hard";
        let prompt = build_analysis_prompt(deck);
        assert!(prompt.contains(deck));
        assert!(!prompt.contains("{deck_text}"));
    }
}

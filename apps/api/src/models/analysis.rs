use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// The nine fixed evaluation dimensions of a pitch deck.
/// Serde names match the provider wire contract (camelCase keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Problem,
    Solution,
    Market,
    BusinessModel,
    Traction,
    Team,
    Financials,
    Competition,
    Presentation,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Problem,
        Category::Solution,
        Category::Market,
        Category::BusinessModel,
        Category::Traction,
        Category::Team,
        Category::Financials,
        Category::Competition,
        Category::Presentation,
    ];

    /// The camelCase key used in the provider contract and the API surface.
    pub fn key(self) -> &'static str {
        match self {
            Category::Problem => "problem",
            Category::Solution => "solution",
            Category::Market => "market",
            Category::BusinessModel => "businessModel",
            Category::Traction => "traction",
            Category::Team => "team",
            Category::Financials => "financials",
            Category::Competition => "competition",
            Category::Presentation => "presentation",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "problem" => Some(Category::Problem),
            "solution" => Some(Category::Solution),
            "market" => Some(Category::Market),
            "businessModel" => Some(Category::BusinessModel),
            "traction" => Some(Category::Traction),
            "team" => Some(Category::Team),
            "financials" => Some(Category::Financials),
            "competition" => Some(Category::Competition),
            "presentation" => Some(Category::Presentation),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

/// Ten bounded scores. Every field is in [0, 100] after normalization,
/// regardless of what the provider returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentScores {
    pub overall: u32,
    pub problem: u32,
    pub solution: u32,
    pub market: u32,
    pub business_model: u32,
    pub traction: u32,
    pub team: u32,
    pub financials: u32,
    pub competition: u32,
    pub presentation: u32,
}

/// A prioritized, category-tagged improvement suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionableItem {
    pub category: Category,
    pub priority: Priority,
    pub description: String,
    pub impact: String,
}

/// Qualitative feedback attached to an analysis. Sequence fields are always
/// present — the provider omitting them yields empties, never null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInsights {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub actionable_items: Vec<ActionableItem>,
    pub market_analysis: String,
    pub competitive_advantage: String,
}

/// A completed deck analysis. Constructed once per analysis request and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckAnalysis {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: Option<String>,
    /// S3 location of the uploaded deck, when the analysis came from a file.
    pub file_url: Option<String>,
    pub scores: InvestmentScores,
    pub insights: AnalysisInsights,
    pub recommendations: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// Set later from subscription state; always false at construction.
    pub is_premium: bool,
}

/// Database row for `analyses`. Scores, insights, and recommendations are
/// stored as JSONB.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: Option<String>,
    pub file_url: Option<String>,
    pub scores: Json<InvestmentScores>,
    pub insights: Json<AnalysisInsights>,
    pub recommendations: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub is_premium: bool,
}

impl From<AnalysisRow> for DeckAnalysis {
    fn from(row: AnalysisRow) -> Self {
        DeckAnalysis {
            id: row.id,
            user_id: row.user_id,
            file_name: row.file_name,
            file_url: row.file_url,
            scores: row.scores.0,
            insights: row.insights.0,
            recommendations: row.recommendations.0,
            created_at: row.created_at,
            is_premium: row.is_premium,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_serialize_with_camel_case_keys() {
        let scores = InvestmentScores {
            overall: 56,
            business_model: 50,
            ..Default::default()
        };
        let value = serde_json::to_value(&scores).unwrap();
        assert_eq!(value["overall"], 56);
        assert_eq!(value["businessModel"], 50);
        assert!(value.get("business_model").is_none());
    }

    #[test]
    fn test_category_key_round_trips_through_parse() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.key()), Some(category));
        }
        assert_eq!(Category::parse("growth"), None);
    }

    #[test]
    fn test_category_serde_matches_key() {
        let json = serde_json::to_string(&Category::BusinessModel).unwrap();
        assert_eq!(json, "\"businessModel\"");
        let parsed: Category = serde_json::from_str("\"traction\"").unwrap();
        assert_eq!(parsed, Category::Traction);
    }

    #[test]
    fn test_priority_default_is_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(Priority::parse("high"), Some(Priority::High));
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn test_insights_serialize_with_camel_case_keys() {
        let insights = AnalysisInsights {
            market_analysis: "large market".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&insights).unwrap();
        assert_eq!(value["marketAnalysis"], "large market");
        assert_eq!(value["actionableItems"], serde_json::json!([]));
    }
}

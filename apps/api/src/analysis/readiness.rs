//! Readiness classification and static per-category improvement advice.

use serde::Serialize;

/// Investment readiness band for an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadinessLevel {
    pub level: &'static str,
    pub description: &'static str,
    pub color: &'static str,
}

/// Maps an overall score to its readiness band. Total over any real input —
/// scores arriving here are already normalized, but the bands are defined
/// for the whole line anyway.
pub fn classify_readiness(overall: f64) -> ReadinessLevel {
    if overall >= 85.0 {
        ReadinessLevel {
            level: "Investment Ready",
            description: "Your deck is strong and ready for investor meetings",
            color: "#10B981",
        }
    } else if overall >= 70.0 {
        ReadinessLevel {
            level: "Nearly Ready",
            description: "Your deck is good but needs some improvements",
            color: "#F59E0B",
        }
    } else if overall >= 50.0 {
        ReadinessLevel {
            level: "Needs Work",
            description: "Your deck requires significant improvements",
            color: "#EF4444",
        }
    } else {
        ReadinessLevel {
            level: "Early Stage",
            description: "Your deck needs major revisions before approaching investors",
            color: "#EF4444",
        }
    }
}

/// Fixed improvement suggestions per category key. `overall` and unknown
/// keys map to an empty slice rather than an error.
pub fn category_advice(category: &str) -> &'static [&'static str] {
    match category {
        "problem" => &[
            "Quantify the problem with specific data and statistics",
            "Include customer pain points and validation research",
            "Show the urgency and frequency of the problem",
        ],
        "solution" => &[
            "Clearly explain how your solution addresses the problem",
            "Highlight unique features and competitive advantages",
            "Include product demos or screenshots",
        ],
        "market" => &[
            "Provide TAM, SAM, and SOM analysis",
            "Show market growth trends and timing",
            "Include target customer segments and personas",
        ],
        "businessModel" => &[
            "Clarify your revenue streams and pricing strategy",
            "Show unit economics and scalability potential",
            "Include customer acquisition and retention strategies",
        ],
        "traction" => &[
            "Show key metrics and growth trends",
            "Include customer testimonials and case studies",
            "Demonstrate product-market fit evidence",
        ],
        "team" => &[
            "Highlight relevant experience and achievements",
            "Show complementary skills and expertise",
            "Include advisors and key hires",
        ],
        "financials" => &[
            "Provide realistic financial projections",
            "Show key assumptions and drivers",
            "Include funding requirements and use of funds",
        ],
        "competition" => &[
            "Create comprehensive competitive analysis",
            "Show differentiation and positioning",
            "Address competitive threats and barriers",
        ],
        "presentation" => &[
            "Improve visual design and consistency",
            "Enhance storytelling and flow",
            "Reduce text and increase visual elements",
        ],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::Category;

    #[test]
    fn test_band_boundaries_partition_the_line() {
        assert_eq!(classify_readiness(85.0).level, "Investment Ready");
        assert_eq!(classify_readiness(84.999).level, "Nearly Ready");
        assert_eq!(classify_readiness(70.0).level, "Nearly Ready");
        assert_eq!(classify_readiness(69.999).level, "Needs Work");
        assert_eq!(classify_readiness(50.0).level, "Needs Work");
        assert_eq!(classify_readiness(49.999).level, "Early Stage");
    }

    #[test]
    fn test_total_over_out_of_range_inputs() {
        assert_eq!(classify_readiness(-10.0).level, "Early Stage");
        assert_eq!(classify_readiness(250.0).level, "Investment Ready");
    }

    #[test]
    fn test_weighted_example_lands_in_needs_work() {
        assert_eq!(classify_readiness(56.0).level, "Needs Work");
    }

    #[test]
    fn test_advice_has_three_entries_per_category() {
        for category in Category::ALL {
            assert_eq!(
                category_advice(category.key()).len(),
                3,
                "category {}",
                category.key()
            );
        }
    }

    #[test]
    fn test_advice_empty_for_overall_and_unknown() {
        assert!(category_advice("overall").is_empty());
        assert!(category_advice("growth").is_empty());
    }
}

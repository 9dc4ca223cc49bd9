//! Interactive questionnaire — the no-deck entry point to analysis.
//!
//! A static bank of 27 questions, 3 per scoring category, grouped into nine
//! ordered sections. Answers are composed into plain deck text and fed to
//! the same scoring pipeline as an uploaded PDF.

use serde::{Deserialize, Serialize};

use crate::models::analysis::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Text,
    Textarea,
    Select,
    Multiselect,
    Number,
    /// In the bank's kind vocabulary but no current question uses it.
    #[allow(dead_code)]
    Slider,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormQuestion {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub question: &'static str,
    pub placeholder: Option<&'static str>,
    pub options: &'static [&'static str],
    pub required: bool,
    pub category: Category,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Section {
    pub category: Category,
    pub title: &'static str,
    pub description: &'static str,
}

pub const SECTIONS: [Section; 9] = [
    Section {
        category: Category::Problem,
        title: "The Problem",
        description: "Let's start with the problem you're solving",
    },
    Section {
        category: Category::Solution,
        title: "Your Solution",
        description: "Tell us about your unique solution",
    },
    Section {
        category: Category::Market,
        title: "Market Opportunity",
        description: "Help us understand your market",
    },
    Section {
        category: Category::BusinessModel,
        title: "Business Model",
        description: "How will you make money?",
    },
    Section {
        category: Category::Traction,
        title: "Traction & Growth",
        description: "Show us your progress so far",
    },
    Section {
        category: Category::Team,
        title: "Your Team",
        description: "Tell us about the people behind the startup",
    },
    Section {
        category: Category::Financials,
        title: "Financials & Funding",
        description: "Let's talk numbers and funding needs",
    },
    Section {
        category: Category::Competition,
        title: "Competition",
        description: "How do you compare to others?",
    },
    Section {
        category: Category::Presentation,
        title: "Final Details",
        description: "Just a few more details to wrap up",
    },
];

pub const QUESTIONS: [FormQuestion; 27] = [
    FormQuestion {
        id: "problem_1",
        kind: QuestionKind::Textarea,
        question: "What specific problem does your startup solve?",
        placeholder: Some("Describe the pain point your target customers face..."),
        options: &[],
        required: true,
        category: Category::Problem,
    },
    FormQuestion {
        id: "problem_2",
        kind: QuestionKind::Text,
        question: "How big is this problem? Can you quantify it?",
        placeholder: Some("e.g., \"Costs businesses $1B annually\" or \"Affects 10M people\""),
        options: &[],
        required: true,
        category: Category::Problem,
    },
    FormQuestion {
        id: "problem_3",
        kind: QuestionKind::Select,
        question: "How urgent is this problem for your customers?",
        placeholder: None,
        options: &[
            "Critical - They need a solution immediately",
            "Important - They actively seek solutions",
            "Nice to have - They would consider solutions",
            "Low priority - They rarely think about it",
        ],
        required: true,
        category: Category::Problem,
    },
    FormQuestion {
        id: "solution_1",
        kind: QuestionKind::Textarea,
        question: "How does your solution solve this problem?",
        placeholder: Some("Explain your approach and why it works..."),
        options: &[],
        required: true,
        category: Category::Solution,
    },
    FormQuestion {
        id: "solution_2",
        kind: QuestionKind::Multiselect,
        question: "What makes your solution unique?",
        placeholder: None,
        options: &[
            "Advanced technology/AI",
            "Better user experience",
            "Lower cost",
            "Faster results",
            "More comprehensive",
            "First to market",
            "Patent protection",
            "Network effects",
        ],
        required: true,
        category: Category::Solution,
    },
    FormQuestion {
        id: "solution_3",
        kind: QuestionKind::Select,
        question: "What stage is your product/solution in?",
        placeholder: None,
        options: &[
            "Idea/Concept",
            "Prototype/MVP",
            "Beta version",
            "Launched product",
            "Scaled product",
        ],
        required: true,
        category: Category::Solution,
    },
    FormQuestion {
        id: "market_1",
        kind: QuestionKind::Text,
        question: "What is your Total Addressable Market (TAM)?",
        placeholder: Some("e.g., \"$50B global market\""),
        options: &[],
        required: true,
        category: Category::Market,
    },
    FormQuestion {
        id: "market_2",
        kind: QuestionKind::Textarea,
        question: "Who is your target customer?",
        placeholder: Some("Describe your ideal customer profile, demographics, behavior..."),
        options: &[],
        required: true,
        category: Category::Market,
    },
    FormQuestion {
        id: "market_3",
        kind: QuestionKind::Select,
        question: "How would you describe the market timing?",
        placeholder: None,
        options: &[
            "Perfect timing - market is ready now",
            "Good timing - market is emerging",
            "Early - need to educate market",
            "Late - market is saturated",
        ],
        required: true,
        category: Category::Market,
    },
    FormQuestion {
        id: "businessModel_1",
        kind: QuestionKind::Select,
        question: "What is your primary revenue model?",
        placeholder: None,
        options: &[
            "SaaS/Subscription",
            "One-time purchase",
            "Freemium",
            "Marketplace/Commission",
            "Advertising",
            "Licensing",
            "Transaction fees",
            "Other",
        ],
        required: true,
        category: Category::BusinessModel,
    },
    FormQuestion {
        id: "businessModel_2",
        kind: QuestionKind::Text,
        question: "What is your pricing strategy?",
        placeholder: Some("e.g., \"$99/month per user\" or \"5% commission per transaction\""),
        options: &[],
        required: true,
        category: Category::BusinessModel,
    },
    FormQuestion {
        id: "businessModel_3",
        kind: QuestionKind::Number,
        question: "What is your estimated Customer Lifetime Value (CLV)?",
        placeholder: Some("Enter amount in USD"),
        options: &[],
        required: false,
        category: Category::BusinessModel,
    },
    FormQuestion {
        id: "traction_1",
        kind: QuestionKind::Select,
        question: "What stage of traction are you at?",
        placeholder: None,
        options: &[
            "Pre-launch (building product)",
            "Launched (0-10 customers)",
            "Early traction (10-100 customers)",
            "Growing (100-1000 customers)",
            "Scaling (1000+ customers)",
        ],
        required: true,
        category: Category::Traction,
    },
    FormQuestion {
        id: "traction_2",
        kind: QuestionKind::Text,
        question: "What is your current Monthly Recurring Revenue (MRR)?",
        placeholder: Some("e.g., \"$5,000\" or \"Not generating revenue yet\""),
        options: &[],
        required: false,
        category: Category::Traction,
    },
    FormQuestion {
        id: "traction_3",
        kind: QuestionKind::Textarea,
        question: "What key milestones have you achieved?",
        placeholder: Some("Product launches, partnerships, awards, press coverage, etc."),
        options: &[],
        required: false,
        category: Category::Traction,
    },
    FormQuestion {
        id: "team_1",
        kind: QuestionKind::Number,
        question: "How many co-founders do you have (including yourself)?",
        placeholder: Some("Enter number"),
        options: &[],
        required: true,
        category: Category::Team,
    },
    FormQuestion {
        id: "team_2",
        kind: QuestionKind::Textarea,
        question: "Tell us about your founding team's background",
        placeholder: Some("Previous experience, relevant skills, achievements..."),
        options: &[],
        required: true,
        category: Category::Team,
    },
    FormQuestion {
        id: "team_3",
        kind: QuestionKind::Multiselect,
        question: "What key expertise does your team have?",
        placeholder: None,
        options: &[
            "Technical/Engineering",
            "Product Development",
            "Sales & Marketing",
            "Business Development",
            "Finance & Operations",
            "Industry Expertise",
            "Previous Startup Experience",
            "Large Company Experience",
        ],
        required: true,
        category: Category::Team,
    },
    FormQuestion {
        id: "financials_1",
        kind: QuestionKind::Text,
        question: "How much funding are you seeking?",
        placeholder: Some("e.g., \"$500K\" or \"$2M Series A\""),
        options: &[],
        required: true,
        category: Category::Financials,
    },
    FormQuestion {
        id: "financials_2",
        kind: QuestionKind::Textarea,
        question: "How will you use the funding?",
        placeholder: Some("Break down the use of funds (hiring, marketing, product, etc.)"),
        options: &[],
        required: true,
        category: Category::Financials,
    },
    FormQuestion {
        id: "financials_3",
        kind: QuestionKind::Text,
        question: "What revenue do you project in 2 years?",
        placeholder: Some("e.g., \"$2M ARR\""),
        options: &[],
        required: false,
        category: Category::Financials,
    },
    FormQuestion {
        id: "competition_1",
        kind: QuestionKind::Textarea,
        question: "Who are your main competitors?",
        placeholder: Some("List direct and indirect competitors..."),
        options: &[],
        required: true,
        category: Category::Competition,
    },
    FormQuestion {
        id: "competition_2",
        kind: QuestionKind::Textarea,
        question: "What is your competitive advantage?",
        placeholder: Some("What makes you better than existing solutions?"),
        options: &[],
        required: true,
        category: Category::Competition,
    },
    FormQuestion {
        id: "competition_3",
        kind: QuestionKind::Select,
        question: "How defensible is your solution?",
        placeholder: None,
        options: &[
            "Very defensible (patents, network effects, etc.)",
            "Somewhat defensible (first-mover advantage)",
            "Not very defensible (easy to copy)",
            "Not sure",
        ],
        required: true,
        category: Category::Competition,
    },
    FormQuestion {
        id: "presentation_1",
        kind: QuestionKind::Text,
        question: "What is your startup's name?",
        placeholder: Some("Enter your company name"),
        options: &[],
        required: true,
        category: Category::Presentation,
    },
    FormQuestion {
        id: "presentation_2",
        kind: QuestionKind::Text,
        question: "What is your one-line pitch?",
        placeholder: Some("Describe your startup in one compelling sentence"),
        options: &[],
        required: true,
        category: Category::Presentation,
    },
    FormQuestion {
        id: "presentation_3",
        kind: QuestionKind::Select,
        question: "Which industry best describes your startup?",
        placeholder: None,
        options: &[
            "Enterprise Software/SaaS",
            "Consumer Apps/Services",
            "E-commerce/Marketplace",
            "FinTech",
            "HealthTech",
            "EdTech",
            "PropTech",
            "AgTech",
            "CleanTech",
            "Hardware/IoT",
            "AI/ML",
            "Other",
        ],
        required: true,
        category: Category::Presentation,
    },
];

/// A single submitted answer. The answer shape follows the question kind.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub question_id: String,
    pub answer: Answer,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Multi(Vec<String>),
    Number(f64),
}

impl Answer {
    fn render(&self) -> String {
        match self {
            Answer::Text(s) => s.clone(),
            Answer::Multi(items) => items.join(", "),
            Answer::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SectionWithQuestions {
    #[serde(flatten)]
    pub section: Section,
    pub questions: Vec<&'static FormQuestion>,
}

/// GET /api/v1/questions — the full bank, grouped by section in flow order.
pub async fn handle_list_questions() -> axum::Json<Vec<SectionWithQuestions>> {
    let sections = SECTIONS
        .into_iter()
        .map(|section| SectionWithQuestions {
            section,
            questions: questions_for(section.category).collect(),
        })
        .collect();
    axum::Json(sections)
}

#[allow(dead_code)]
pub fn question_by_id(id: &str) -> Option<&'static FormQuestion> {
    QUESTIONS.iter().find(|q| q.id == id)
}

pub fn questions_for(category: Category) -> impl Iterator<Item = &'static FormQuestion> {
    QUESTIONS.iter().filter(move |q| q.category == category)
}

/// Fraction of the bank answered so far, for progress display.
#[allow(dead_code)]
pub fn progress(answered: usize) -> f64 {
    (answered as f64 / QUESTIONS.len() as f64).clamp(0.0, 1.0)
}

/// Renders questionnaire answers into the plain deck text the scoring
/// pipeline consumes: one block per section, question followed by answer.
/// Unanswered and blank questions are skipped.
pub fn compose_deck_text(responses: &[FormResponse]) -> String {
    let mut out = String::new();
    for section in SECTIONS {
        let mut wrote_header = false;
        for question in questions_for(section.category) {
            let Some(response) = responses.iter().find(|r| r.question_id == question.id) else {
                continue;
            };
            let answer = response.answer.render();
            if answer.trim().is_empty() {
                continue;
            }
            if !wrote_header {
                out.push_str(section.title);
                out.push_str(":\n");
                wrote_header = true;
            }
            out.push_str(question.question);
            out.push('\n');
            out.push_str(&answer);
            out.push_str("\n\n");
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bank_has_three_questions_per_category() {
        assert_eq!(QUESTIONS.len(), 27);
        for category in Category::ALL {
            assert_eq!(questions_for(category).count(), 3, "category {}", category.key());
        }
    }

    #[test]
    fn test_question_ids_are_unique() {
        let ids: HashSet<_> = QUESTIONS.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), QUESTIONS.len());
    }

    #[test]
    fn test_choice_questions_carry_options() {
        for q in &QUESTIONS {
            match q.kind {
                QuestionKind::Select | QuestionKind::Multiselect => {
                    assert!(!q.options.is_empty(), "question {} has no options", q.id)
                }
                _ => assert!(q.options.is_empty(), "question {} has stray options", q.id),
            }
        }
    }

    #[test]
    fn test_compose_groups_answers_under_section_titles() {
        let responses = vec![
            FormResponse {
                question_id: "problem_1".to_string(),
                answer: Answer::Text("Inventory is managed by hand".to_string()),
            },
            FormResponse {
                question_id: "team_1".to_string(),
                answer: Answer::Number(3.0),
            },
            FormResponse {
                question_id: "team_3".to_string(),
                answer: Answer::Multi(vec![
                    "Technical/Engineering".to_string(),
                    "Industry Expertise".to_string(),
                ]),
            },
        ];
        let text = compose_deck_text(&responses);
        assert!(text.starts_with("The Problem:\n"));
        assert!(text.contains("Inventory is managed by hand"));
        assert!(text.contains("Your Team:\n"));
        assert!(text.contains("How many co-founders do you have (including yourself)?\n3"));
        assert!(text.contains("Technical/Engineering, Industry Expertise"));
        // No section header for categories with no answers
        assert!(!text.contains("Market Opportunity:"));
    }

    #[test]
    fn test_compose_skips_blank_and_unknown_answers() {
        let responses = vec![
            FormResponse {
                question_id: "problem_1".to_string(),
                answer: Answer::Text("   ".to_string()),
            },
            FormResponse {
                question_id: "not_a_question".to_string(),
                answer: Answer::Text("ignored".to_string()),
            },
        ];
        assert_eq!(compose_deck_text(&responses), "");
    }

    #[test]
    fn test_progress_fraction() {
        assert_eq!(progress(0), 0.0);
        assert!((progress(27) - 1.0).abs() < f64::EPSILON);
        assert!((progress(9) - (1.0 / 3.0)).abs() < 1e-9);
        assert_eq!(progress(100), 1.0);
    }

    #[test]
    fn test_question_lookup() {
        assert!(question_by_id("financials_2").is_some());
        assert!(question_by_id("financials_9").is_none());
    }
}

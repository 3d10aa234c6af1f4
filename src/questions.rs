//! Questionnaire catalog.
//!
//! The catalog is a JSON array of questions, each with a stable `id`, the
//! `question` text and an ordered list of options tagged with a [`Trait`]:
//!
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "question": "After a long, stressful week, how do you prefer to recharge?",
//!     "options": [
//!       { "text": "I go out or call friends — I need people.", "trait": "E" },
//!       { "text": "I stay in with a book, a game, or my own thoughts.", "trait": "I" },
//!       { "text": "It depends on my mood that week.", "trait": "X" }
//!     ]
//!   }
//! ]
//! ```
//!
//! Unknown trait tags are rejected while parsing, so a loaded catalog can
//! never mis-score an option.

use crate::error::{Error, Result};
use crate::mbti::Trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

const BUILTIN_CATALOG: &str = include_str!("../data/questions.json");

/// A selectable answer to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Text shown to the user and echoed back as the answer
    pub text: String,
    /// Trait this option votes for
    #[serde(rename = "trait")]
    pub tag: Trait,
}

/// A single questionnaire item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Option whose text equals `answer` exactly.
    pub fn find_option(&self, answer: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.text == answer)
    }
}

/// Ordered, immutable set of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Options per question in the reference questionnaire. Not enforced.
    pub const EXPECTED_OPTIONS: usize = 3;

    /// Validate and wrap a list of questions.
    ///
    /// Rejects duplicate ids and options with empty text. Questions without
    /// options and repeated option texts are only warned about; an answer
    /// always matches the first option with its text.
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        let mut ids = HashSet::new();
        for question in &questions {
            if !ids.insert(question.id) {
                return Err(Error::Catalog(format!("duplicate question id {}", question.id)));
            }
            if question.options.is_empty() {
                warn!(question = question.id, "question has no options, answers to it are ignored");
            }

            let mut texts = HashSet::new();
            for option in &question.options {
                if option.text.trim().is_empty() {
                    return Err(Error::Catalog(format!(
                        "question {} has an option with empty text",
                        question.id
                    )));
                }
                if !texts.insert(option.text.as_str()) {
                    warn!(
                        question = question.id,
                        option = %option.text,
                        "repeated option text, only the first occurrence can match"
                    );
                }
            }

            if question.options.len() != Self::EXPECTED_OPTIONS {
                warn!(
                    question = question.id,
                    options = question.options.len(),
                    "question does not have the usual {} options",
                    Self::EXPECTED_OPTIONS
                );
            }
        }

        if questions.is_empty() {
            warn!("question catalog is empty, every prediction will use tie-break defaults");
        }

        Ok(QuestionCatalog { questions })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        debug!(path = %path.display(), questions = catalog.len(), "question catalog loaded");
        Ok(catalog)
    }

    /// The 10-question catalog bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = QuestionCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 10);
        for question in catalog.questions() {
            assert_eq!(question.options.len(), QuestionCatalog::EXPECTED_OPTIONS);
        }
        let first = catalog.get(0).unwrap();
        let option = first.find_option("I go out or call friends — I need people.").unwrap();
        assert_eq!(option.tag, Trait::E);
    }

    #[test]
    fn test_unknown_trait_is_rejected() {
        let json = r#"[{"id": 1, "question": "Q", "options": [{"text": "a", "trait": "Z"}]}]"#;
        assert!(matches!(
            QuestionCatalog::from_json(json),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let json = r#"[
            {"id": 1, "question": "A", "options": [{"text": "a", "trait": "E"}]},
            {"id": 1, "question": "B", "options": [{"text": "b", "trait": "I"}]}
        ]"#;
        assert!(matches!(QuestionCatalog::from_json(json), Err(Error::Catalog(_))));
    }

    #[test]
    fn test_question_without_options_is_accepted() {
        let json = r#"[
            {"id": 1, "question": "A", "options": [{"text": "out", "trait": "E"}]},
            {"id": 2, "question": "B", "options": []},
            {"id": 3, "question": "C", "options": [{"text": "plan", "trait": "J"}]}
        ]"#;
        let catalog = QuestionCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.get(1).unwrap().find_option("anything").is_none());

        let card = crate::scoring::TraitScorer::new()
            .score(&catalog, &["out", "anything", "plan"])
            .unwrap();
        assert_eq!(card.scores.matched(), 2);
        assert_eq!(card.mbti.to_string(), "ENFJ");
    }

    #[test]
    fn test_repeated_option_text_matches_first() {
        let json = r#"[{"id": 1, "question": "A", "options": [
            {"text": "a", "trait": "E"},
            {"text": "a", "trait": "I"}
        ]}]"#;
        let catalog = QuestionCatalog::from_json(json).unwrap();
        assert_eq!(catalog.get(0).unwrap().find_option("a").unwrap().tag, Trait::E);

        let card = crate::scoring::TraitScorer::new().score(&catalog, &["a"]).unwrap();
        assert_eq!(card.scores.get(Trait::E), 1);
        assert_eq!(card.scores.get(Trait::I), 0);
        assert_eq!(card.mbti.to_string(), "ENFP");
    }

    #[test]
    fn test_option_count_is_not_enforced() {
        let json = r#"[{"id": 7, "question": "A", "options": [
            {"text": "yes", "trait": "J"},
            {"text": "no", "trait": "P"}
        ]}]"#;
        let catalog = QuestionCatalog::from_json(json).unwrap();
        assert_eq!(catalog.get(0).unwrap().options.len(), 2);
    }

    #[test]
    fn test_find_option_is_exact() {
        let catalog = QuestionCatalog::builtin().unwrap();
        let first = catalog.get(0).unwrap();
        assert!(first.find_option("i go out or call friends — i need people.").is_none());
        assert!(first.find_option("I go out or call friends").is_none());
    }

    #[test]
    fn test_serializes_back_to_source_schema() {
        let catalog = QuestionCatalog::builtin().unwrap();
        let value = serde_json::to_value(&catalog).unwrap();
        assert_eq!(value[0]["id"], 1);
        assert!(value[0]["question"].is_string());
        assert_eq!(value[0]["options"][0]["trait"], "E");
    }
}

//! # Question Bank
//!
//! Multiple-choice practice questions, grouped by unit and kept in order.
//! [`QuestionBank`] is the in-memory store the server answers from;
//! [`QuestionSource`] is the seam a quiz session loads through, so the
//! terminal quiz can read either the local bank or a remote server.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::inference::ProviderError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_answer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    pub fn is_correct(&self, selection: usize) -> bool {
        selection == self.correct_answer
    }

    /// Text of the correct option, if the index is in range.
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer).map(String::as_str)
    }
}

/// Outcome of grading one answer against the bank.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerCheck {
    pub is_correct: bool,
    pub correct_answer: Option<usize>,
    pub explanation: Option<String>,
}

/// Anything that can hand out the questions for a unit.
/// An empty list means "no questions yet", not a failure.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn questions_for_unit(&self, unit_id: &str) -> Result<Vec<Question>, ProviderError>;
}

#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    units: Vec<(String, Vec<Question>)>,
}

impl QuestionBank {
    pub fn new(units: Vec<(String, Vec<Question>)>) -> Self {
        Self { units }
    }

    pub fn for_unit(&self, unit_id: &str) -> Vec<Question> {
        self.units
            .iter()
            .find(|(id, _)| id == unit_id)
            .map(|(_, questions)| questions.clone())
            .unwrap_or_default()
    }

    pub fn find(&self, question_id: &str) -> Option<&Question> {
        self.units
            .iter()
            .flat_map(|(_, questions)| questions.iter())
            .find(|q| q.id == question_id)
    }

    /// Grades a selection. Unknown questions are never correct and carry no
    /// answer or explanation.
    pub fn check_answer(&self, question_id: &str, selected: Option<usize>) -> AnswerCheck {
        match self.find(question_id) {
            Some(q) => AnswerCheck {
                is_correct: selected.is_some_and(|s| q.is_correct(s)),
                correct_answer: Some(q.correct_answer),
                explanation: q.explanation.clone(),
            },
            None => AnswerCheck {
                is_correct: false,
                correct_answer: None,
                explanation: None,
            },
        }
    }

    /// The built-in biology practice questions.
    pub fn builtin() -> Self {
        Self::new(vec![
            (
                "unit1".to_string(),
                vec![
                    question(
                        "q1",
                        "What is the primary function of the cell membrane?",
                        &[
                            "To produce energy for the cell",
                            "To regulate what enters and exits the cell",
                            "To store genetic information",
                            "To synthesize proteins",
                        ],
                        1,
                        "The cell membrane is selectively permeable: it controls which substances move in and out of the cell.",
                    ),
                    question(
                        "q2",
                        "Which organelle is known as the powerhouse of the cell?",
                        &["Nucleus", "Ribosome", "Mitochondria", "Golgi apparatus"],
                        2,
                        "Mitochondria produce most of the cell's ATP through cellular respiration.",
                    ),
                    question(
                        "q3",
                        "Where is the genetic material of a eukaryotic cell stored?",
                        &["Nucleus", "Cytoplasm", "Cell wall", "Vacuole"],
                        0,
                        "In eukaryotic cells, DNA is enclosed in the nucleus.",
                    ),
                    question(
                        "q4",
                        "Which structure is found in plant cells but not in animal cells?",
                        &["Mitochondria", "Cell membrane", "Ribosome", "Cell wall"],
                        3,
                        "Plant cells have a rigid cellulose cell wall outside the membrane; animal cells don't.",
                    ),
                ],
            ),
            (
                "unit2".to_string(),
                vec![
                    question(
                        "q5",
                        "Where does photosynthesis take place in plant cells?",
                        &["Mitochondria", "Chloroplasts", "Nucleus", "Vacuole"],
                        1,
                        "Chloroplasts contain the chlorophyll and enzymes photosynthesis needs.",
                    ),
                    question(
                        "q6",
                        "Which gas do plants absorb during photosynthesis?",
                        &["Oxygen", "Nitrogen", "Carbon dioxide", "Hydrogen"],
                        2,
                        "Plants take in carbon dioxide and release oxygen.",
                    ),
                    question(
                        "q7",
                        "What pigment gives plants their green color?",
                        &["Chlorophyll", "Carotene", "Melanin", "Hemoglobin"],
                        0,
                        "Chlorophyll absorbs red and blue light and reflects green.",
                    ),
                ],
            ),
        ])
    }
}

#[async_trait]
impl QuestionSource for QuestionBank {
    async fn questions_for_unit(&self, unit_id: &str) -> Result<Vec<Question>, ProviderError> {
        Ok(self.for_unit(unit_id))
    }
}

fn question(
    id: &str,
    text: &str,
    options: &[&str],
    correct_answer: usize,
    explanation: &str,
) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer,
        explanation: Some(explanation.to_string()),
    }
}

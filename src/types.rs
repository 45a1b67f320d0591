use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use std::collections::BTreeMap;
use thiserror::Error;
use utoipa::ToSchema;

/// Lowest accepted difficulty.
pub const MIN_DIFFICULTY: i64 = 1;
/// Highest accepted difficulty.
pub const MAX_DIFFICULTY: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Question {
    /// Store-assigned identifier
    pub id: i64,
    /// Question text
    pub question: String,
    /// Expected answer
    pub answer: String,
    /// Identifier of the owning category
    pub category: i64,
    /// Difficulty from 1 (easy) to 5 (hard)
    pub difficulty: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i64,
    /// Display label, e.g. "Science"
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub label: String,
}

/// Category id to label, the shape every category listing uses.
pub type CategoryMap = BTreeMap<i64, String>;

pub fn category_map(categories: &[Category]) -> CategoryMap {
    categories
        .iter()
        .map(|c| (c.id, c.label.clone()))
        .collect()
}

/// A question that passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("request body is missing")]
    MissingBody,

    #[error("request body is not valid JSON of the expected shape")]
    MalformedBody,

    #[error("field `{0}` is missing or empty")]
    Missing(&'static str),

    #[error("field `{0}` has the wrong type")]
    WrongType(&'static str),

    #[error("difficulty {0} is outside 1..=5")]
    DifficultyOutOfRange(i64),
}

/// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` count as absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Coerces integers, integral-truncated floats and numeric strings to `i64`.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn required<'a>(field: &'static str, value: &'a Option<Value>) -> Result<&'a Value, ValidationError> {
    match value {
        Some(v) if is_truthy(v) => Ok(v),
        _ => Err(ValidationError::Missing(field)),
    }
}

fn required_text(field: &'static str, value: &Option<Value>) -> Result<String, ValidationError> {
    required(field, value)?
        .as_str()
        .map(str::to_owned)
        .ok_or(ValidationError::WrongType(field))
}

fn required_int(field: &'static str, value: &Option<Value>) -> Result<i64, ValidationError> {
    coerce_int(required(field, value)?).ok_or(ValidationError::WrongType(field))
}

/// Body of `POST /questions`. Fields stay loosely typed until [`validate`](Self::validate).
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateQuestionRequest {
    #[schema(value_type = String)]
    pub question: Option<Value>,
    #[schema(value_type = String)]
    pub answer: Option<Value>,
    /// Category id; numeric strings are accepted
    #[schema(value_type = i64)]
    pub category: Option<Value>,
    /// 1 to 5; numeric strings are accepted
    #[schema(value_type = i64)]
    pub difficulty: Option<Value>,
}

impl CreateQuestionRequest {
    pub fn validate(&self) -> Result<NewQuestion, ValidationError> {
        let question = required_text("question", &self.question)?;
        let answer = required_text("answer", &self.answer)?;
        let difficulty = required_int("difficulty", &self.difficulty)?;
        let category = required_int("category", &self.category)?;

        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(ValidationError::DifficultyOutOfRange(difficulty));
        }

        Ok(NewQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

/// Body of `POST /questions/search`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    #[schema(value_type = String)]
    pub search_term: Option<Value>,
}

impl SearchRequest {
    pub fn term(&self) -> Result<&str, ValidationError> {
        required("searchTerm", &self.search_term)?
            .as_str()
            .ok_or(ValidationError::WrongType("searchTerm"))
    }
}

/// Body of `POST /quizzes`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct QuizRequest {
    /// Ids already asked in this quiz
    #[schema(value_type = Vec<i64>)]
    pub previous_questions: Option<Value>,
    /// `{"id": n}`; id 0 selects every category
    #[schema(value_type = Object)]
    pub quiz_category: Option<Value>,
}

/// A validated quiz round.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizRound {
    pub previous: Vec<i64>,
    /// `None` means any category
    pub category: Option<i64>,
}

impl QuizRequest {
    pub fn validate(&self) -> Result<QuizRound, ValidationError> {
        let previous = match &self.previous_questions {
            None | Some(Value::Null) => return Err(ValidationError::Missing("previous_questions")),
            Some(Value::Array(ids)) => ids
                .iter()
                .map(|id| coerce_int(id).ok_or(ValidationError::WrongType("previous_questions")))
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(ValidationError::WrongType("previous_questions")),
        };

        let category = match &self.quiz_category {
            None | Some(Value::Null) => return Err(ValidationError::Missing("quiz_category")),
            Some(category) => category
                .get("id")
                .and_then(coerce_int)
                .ok_or(ValidationError::WrongType("quiz_category"))?,
        };

        Ok(QuizRound {
            previous,
            category: (category != 0).then_some(category),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoriesResponse {
    pub success: bool,
    /// Category labels keyed by id
    #[schema(value_type = Object)]
    pub categories: CategoryMap,
    pub total_categories: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    #[schema(value_type = Object)]
    pub categories: CategoryMap,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    /// The id exactly as it appeared in the request path
    pub delete: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i64,
    pub question: String,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
}

/// Result of a quiz draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QuizOutcome {
    /// A question not yet asked
    Next { question: Question },
    /// Every candidate has been asked
    Exhausted {},
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: QuizOutcome,
}

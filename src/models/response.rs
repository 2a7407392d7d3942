use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Complete,
    Partial,
    Invalid,
}

impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseStatus::Complete => write!(f, "complete"),
            ResponseStatus::Partial => write!(f, "partial"),
            ResponseStatus::Invalid => write!(f, "invalid"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SurveyResponse {
    pub id: Uuid,
    pub survey_id: Uuid,
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,

    // Nested answers, populated separately
    #[sqlx(skip)]
    #[serde(default)]
    pub answers: Vec<QuestionResponse>,
}

/// One answer within a response. question_id is None when the question was
/// later deleted from the survey; the answer itself is preserved.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionResponse {
    pub id: Uuid,
    pub response_id: Uuid,
    pub question_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bool_value: Option<bool>,
    pub created_at: NaiveDateTime,

    // Selected options, populated separately
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub option_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponseRequest {
    pub status: ResponseStatus,
    pub answers: Vec<AnswerInput>,
}

/// One submitted answer: exactly one value channel may be populated, and it
/// must match the question's type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerInput {
    pub question_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bool_value: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_ids: Option<Vec<Uuid>>,
}

impl AnswerInput {
    pub fn text(question_id: Uuid, value: impl Into<String>) -> Self {
        Self {
            question_id,
            text_value: Some(value.into()),
            bool_value: None,
            option_ids: None,
        }
    }

    pub fn checked(question_id: Uuid, value: bool) -> Self {
        Self {
            question_id,
            text_value: None,
            bool_value: Some(value),
            option_ids: None,
        }
    }

    pub fn selection(question_id: Uuid, option_ids: Vec<Uuid>) -> Self {
        Self {
            question_id,
            text_value: None,
            bool_value: None,
            option_ids: Some(option_ids),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SurveyStatistics {
    pub survey_id: Uuid,
    pub total: i64,
    pub complete: i64,
    pub partial: i64,
    pub invalid: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuestionResponseCount {
    pub question_id: Uuid,
    pub label: String,
    pub response_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionStatistics {
    pub survey_id: Uuid,
    pub section_id: Uuid,
    pub questions: Vec<QuestionResponseCount>,
}

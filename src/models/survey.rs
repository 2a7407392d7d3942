use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{Section, SectionInput, SectionWrite};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SurveyStatus {
    Draft,
    Published,
    Closed,
}

impl Default for SurveyStatus {
    fn default() -> Self {
        SurveyStatus::Draft
    }
}

impl std::fmt::Display for SurveyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyStatus::Draft => write!(f, "draft"),
            SurveyStatus::Published => write!(f, "published"),
            SurveyStatus::Closed => write!(f, "closed"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Survey {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: SurveyStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,

    // Nested tree, populated separately
    #[sqlx(skip)]
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSurveyRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sections: Vec<SectionInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSurveyRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub sections: Option<Vec<SectionInput>>,
}

/// Write plan for one PATCH, computed by the reconcile step and applied in a
/// single transaction. Children absent from the payload do not appear here
/// and are left untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyWritePlan {
    pub survey_id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub sections: Vec<SectionWrite>,
}

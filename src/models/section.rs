use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{NewQuestion, Question, QuestionInput, QuestionWrite};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Section {
    pub id: Uuid,
    pub survey_id: Uuid,
    pub title: String,
    pub order_index: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,

    // Nested tree, populated separately
    #[sqlx(skip)]
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Authoring input for a section, shared by create and merge-by-id update.
/// With an id that matches an existing child it is a partial update; without
/// a match it must carry the fields a new section needs.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionInput {
    pub id: Option<Uuid>,
    pub title: Option<String>,
    pub order_index: Option<i32>,
    pub questions: Option<Vec<QuestionInput>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSectionRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    pub order_index: Option<i32>,
    #[serde(default)]
    pub questions: Vec<QuestionInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSectionRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,
    pub order_index: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionWrite {
    Update(SectionPatch),
    Insert(NewSection),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionPatch {
    pub id: Uuid,
    pub title: Option<String>,
    pub order_index: Option<i32>,
    pub questions: Vec<QuestionWrite>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSection {
    // Pre-assigned: a supplied upsert id is honored, otherwise freshly generated
    pub id: Uuid,
    pub title: String,
    pub order_index: i32,
    pub questions: Vec<NewQuestion>,
}

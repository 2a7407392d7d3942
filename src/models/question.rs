use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Open,
    Checkbox,
    Radio,
    Dropdown,
    Matrix,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::Open => write!(f, "open"),
            QuestionType::Checkbox => write!(f, "checkbox"),
            QuestionType::Radio => write!(f, "radio"),
            QuestionType::Dropdown => write!(f, "dropdown"),
            QuestionType::Matrix => write!(f, "matrix"),
        }
    }
}

/// Flat database row; the type-conditional columns are NULL for the
/// question types they do not apply to.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub id: Uuid,
    pub section_id: Uuid,
    pub label: String,
    pub required: bool,
    pub question_type: QuestionType,
    pub order_index: i32,
    pub prompt: Option<String>,
    pub placeholder: Option<String>,
    pub max_length: Option<i32>,
    pub default_checked: Option<bool>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// API shape of a question: the common fields plus a body tagged by type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: Uuid,
    pub section_id: Uuid,
    pub label: String,
    pub required: bool,
    pub order_index: i32,
    #[serde(flatten)]
    pub body: QuestionBody,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Type-conditional part of a question, one variant per question type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionBody {
    Open {
        #[serde(skip_serializing_if = "Option::is_none")]
        prompt: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_length: Option<i32>,
    },
    Checkbox {
        checked: bool,
    },
    Radio {
        options: Vec<QuestionOption>,
    },
    Dropdown {
        options: Vec<QuestionOption>,
    },
    Matrix {
        options: Vec<QuestionOption>,
    },
}

impl QuestionBody {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionBody::Open { .. } => QuestionType::Open,
            QuestionBody::Checkbox { .. } => QuestionType::Checkbox,
            QuestionBody::Radio { .. } => QuestionType::Radio,
            QuestionBody::Dropdown { .. } => QuestionType::Dropdown,
            QuestionBody::Matrix { .. } => QuestionType::Matrix,
        }
    }

    pub fn options(&self) -> Option<&[QuestionOption]> {
        match self {
            QuestionBody::Radio { options }
            | QuestionBody::Dropdown { options }
            | QuestionBody::Matrix { options } => Some(options),
            QuestionBody::Open { .. } | QuestionBody::Checkbox { .. } => None,
        }
    }
}

impl QuestionRow {
    /// Fold the flat row and its options into the tagged API shape.
    /// This is the schema-validation boundary: every type is matched.
    pub fn into_question(self, options: Vec<QuestionOption>) -> Question {
        let body = match self.question_type {
            QuestionType::Open => QuestionBody::Open {
                prompt: self.prompt,
                placeholder: self.placeholder,
                max_length: self.max_length,
            },
            QuestionType::Checkbox => QuestionBody::Checkbox {
                checked: self.default_checked.unwrap_or(false),
            },
            QuestionType::Radio => QuestionBody::Radio { options },
            QuestionType::Dropdown => QuestionBody::Dropdown { options },
            QuestionType::Matrix => QuestionBody::Matrix { options },
        };

        Question {
            id: self.id,
            section_id: self.section_id,
            label: self.label,
            required: self.required,
            order_index: self.order_index,
            body,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct QuestionOption {
    pub id: Uuid,
    pub question_id: Uuid,
    pub label: String,
    pub value: String,
    pub created_at: NaiveDateTime,
}

/// Authoring input for a question, shared by create and merge-by-id update
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionInput {
    pub id: Option<Uuid>,
    pub label: Option<String>,
    pub required: Option<bool>,
    pub order_index: Option<i32>,
    #[serde(flatten)]
    pub kind: Option<QuestionKindInput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionKindInput {
    Open {
        prompt: Option<String>,
        placeholder: Option<String>,
        max_length: Option<i32>,
    },
    Checkbox {
        checked: Option<bool>,
    },
    Radio {
        #[serde(default)]
        options: Vec<OptionInput>,
    },
    Dropdown {
        #[serde(default)]
        options: Vec<OptionInput>,
    },
    Matrix {
        #[serde(default)]
        options: Vec<OptionInput>,
    },
}

impl QuestionKindInput {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKindInput::Open { .. } => QuestionType::Open,
            QuestionKindInput::Checkbox { .. } => QuestionType::Checkbox,
            QuestionKindInput::Radio { .. } => QuestionType::Radio,
            QuestionKindInput::Dropdown { .. } => QuestionType::Dropdown,
            QuestionKindInput::Matrix { .. } => QuestionType::Matrix,
        }
    }
}

/// Authoring input for an option
#[derive(Debug, Clone, Deserialize)]
pub struct OptionInput {
    pub id: Option<Uuid>,
    pub label: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOptionRequest {
    #[validate(length(min = 1, max = 255, message = "Label must be 1-255 characters"))]
    pub label: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateOptionRequest {
    #[validate(length(min = 1, max = 255, message = "Label must be 1-255 characters"))]
    pub label: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuestionWrite {
    Update(QuestionPatch),
    Insert(NewQuestion),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionPatch {
    pub id: Uuid,
    pub label: Option<String>,
    pub required: Option<bool>,
    pub order_index: Option<i32>,
    // Type-conditional fields for the question's (unchanged) type
    pub prompt: Option<String>,
    pub placeholder: Option<String>,
    pub max_length: Option<i32>,
    pub default_checked: Option<bool>,
    pub options: Vec<OptionWrite>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub id: Uuid,
    pub label: String,
    pub required: bool,
    pub question_type: QuestionType,
    pub order_index: i32,
    pub prompt: Option<String>,
    pub placeholder: Option<String>,
    pub max_length: Option<i32>,
    pub default_checked: Option<bool>,
    pub options: Vec<NewOption>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionWrite {
    Update(OptionPatch),
    Insert(NewOption),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionPatch {
    pub id: Uuid,
    pub label: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOption {
    pub id: Uuid,
    pub label: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_input_parses_tagged_open_body() {
        let input: QuestionInput = serde_json::from_str(
            r#"{
                "label": "How did you hear about us?",
                "required": true,
                "type": "open",
                "prompt": "Please tell us how you discovered us",
                "max_length": 500
            }"#,
        )
        .unwrap();

        assert_eq!(input.label.as_deref(), Some("How did you hear about us?"));
        match input.kind {
            Some(QuestionKindInput::Open {
                prompt, max_length, ..
            }) => {
                assert_eq!(prompt.as_deref(), Some("Please tell us how you discovered us"));
                assert_eq!(max_length, Some(500));
            }
            other => panic!("expected open kind, got {:?}", other),
        }
    }

    #[test]
    fn question_input_without_type_has_no_kind() {
        let input: QuestionInput =
            serde_json::from_str(r#"{ "label": "Renamed label only" }"#).unwrap();
        assert!(input.kind.is_none());
        assert_eq!(input.label.as_deref(), Some("Renamed label only"));
    }

    #[test]
    fn question_input_rejects_unknown_type() {
        let result = serde_json::from_str::<QuestionInput>(r#"{ "type": "slider" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn question_serializes_with_flattened_type_tag() {
        let question = Question {
            id: Uuid::new_v4(),
            section_id: Uuid::new_v4(),
            label: "Would you recommend us?".to_string(),
            required: false,
            order_index: 2,
            body: QuestionBody::Checkbox { checked: false },
            created_at: Default::default(),
            updated_at: Default::default(),
        };

        let json = serde_json::to_value(&question).unwrap();
        assert_eq!(json["type"], "checkbox");
        assert_eq!(json["checked"], false);
        assert_eq!(json["label"], "Would you recommend us?");
    }

    #[test]
    fn row_with_radio_type_folds_options_into_body() {
        let question_id = Uuid::new_v4();
        let row = QuestionRow {
            id: question_id,
            section_id: Uuid::new_v4(),
            label: "Satisfaction".to_string(),
            required: true,
            question_type: QuestionType::Radio,
            order_index: 0,
            prompt: None,
            placeholder: None,
            max_length: None,
            default_checked: None,
            created_at: Default::default(),
            updated_at: Default::default(),
        };
        let option = QuestionOption {
            id: Uuid::new_v4(),
            question_id,
            label: "Very Satisfied".to_string(),
            value: "Very Satisfied".to_string(),
            created_at: Default::default(),
        };

        let question = row.into_question(vec![option.clone()]);
        assert_eq!(question.body.question_type(), QuestionType::Radio);
        assert_eq!(question.body.options(), Some(&[option][..]));
    }
}

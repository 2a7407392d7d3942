use uuid::Uuid;

use crate::models::{AnswerInput, Question, QuestionBody, QuestionOption};

/// Uncommitted edit state for one rendered question. Construction matches
/// exhaustively on the question body, so adding a question type without a
/// control is a compile error.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionControl {
    Open {
        question_id: Uuid,
        prompt: Option<String>,
        placeholder: Option<String>,
        max_length: Option<i32>,
        draft: String,
    },
    Checkbox {
        question_id: Uuid,
        checked: bool,
    },
    Radio {
        question_id: Uuid,
        options: Vec<QuestionOption>,
        selected: Option<Uuid>,
    },
    Dropdown {
        question_id: Uuid,
        options: Vec<QuestionOption>,
        selected: Option<Uuid>,
    },
    Matrix {
        question_id: Uuid,
        options: Vec<QuestionOption>,
        selected: Vec<Uuid>,
    },
}

impl QuestionControl {
    pub fn from_question(question: &Question) -> Self {
        match &question.body {
            QuestionBody::Open {
                prompt,
                placeholder,
                max_length,
            } => QuestionControl::Open {
                question_id: question.id,
                prompt: prompt.clone(),
                placeholder: placeholder.clone(),
                max_length: *max_length,
                draft: String::new(),
            },
            QuestionBody::Checkbox { checked } => QuestionControl::Checkbox {
                question_id: question.id,
                checked: *checked,
            },
            QuestionBody::Radio { options } => QuestionControl::Radio {
                question_id: question.id,
                options: options.clone(),
                selected: None,
            },
            QuestionBody::Dropdown { options } => QuestionControl::Dropdown {
                question_id: question.id,
                options: options.clone(),
                selected: None,
            },
            QuestionBody::Matrix { options } => QuestionControl::Matrix {
                question_id: question.id,
                options: options.clone(),
                selected: Vec::new(),
            },
        }
    }

    pub fn question_id(&self) -> Uuid {
        match self {
            QuestionControl::Open { question_id, .. }
            | QuestionControl::Checkbox { question_id, .. }
            | QuestionControl::Radio { question_id, .. }
            | QuestionControl::Dropdown { question_id, .. }
            | QuestionControl::Matrix { question_id, .. } => *question_id,
        }
    }

    /// Replace the text draft, truncated to the question's max length.
    /// No-op for non-text controls.
    pub fn type_text(&mut self, text: impl Into<String>) {
        if let QuestionControl::Open {
            draft, max_length, ..
        } = self
        {
            let mut text = text.into();
            // Non-positive limits come from unconstrained data; ignore them
            if let Some(max) = *max_length {
                if max > 0 {
                    if let Some((index, _)) = text.char_indices().nth(max as usize) {
                        text.truncate(index);
                    }
                }
            }
            *draft = text;
        }
    }

    /// Flip the checkbox. No-op for other controls.
    pub fn toggle(&mut self) {
        if let QuestionControl::Checkbox { checked, .. } = self {
            *checked = !*checked;
        }
    }

    /// Record a selection: radio and dropdown replace it, matrix toggles
    /// membership. No-op for text and checkbox controls.
    pub fn select(&mut self, option_id: Uuid) {
        match self {
            QuestionControl::Radio { selected, .. }
            | QuestionControl::Dropdown { selected, .. } => *selected = Some(option_id),
            QuestionControl::Matrix { selected, .. } => {
                if let Some(position) = selected.iter().position(|id| *id == option_id) {
                    selected.remove(position);
                } else {
                    selected.push(option_id);
                }
            }
            QuestionControl::Open { .. } | QuestionControl::Checkbox { .. } => {}
        }
    }

    /// The uncommitted state as a submittable answer, or None when the
    /// control holds nothing worth sending.
    pub fn save(&self) -> Option<AnswerInput> {
        match self {
            QuestionControl::Open {
                question_id, draft, ..
            } => (!draft.is_empty()).then(|| AnswerInput::text(*question_id, draft.clone())),
            QuestionControl::Checkbox {
                question_id,
                checked,
            } => Some(AnswerInput::checked(*question_id, *checked)),
            QuestionControl::Radio {
                question_id,
                selected,
                ..
            }
            | QuestionControl::Dropdown {
                question_id,
                selected,
                ..
            } => selected.map(|option_id| AnswerInput::selection(*question_id, vec![option_id])),
            QuestionControl::Matrix {
                question_id,
                selected,
                ..
            } => {
                (!selected.is_empty()).then(|| AnswerInput::selection(*question_id, selected.clone()))
            }
        }
    }
}

/// Build the controls for every question of a survey section, in display order
pub fn controls_for_questions(questions: &[Question]) -> Vec<QuestionControl> {
    questions.iter().map(QuestionControl::from_question).collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    fn question(body: QuestionBody) -> Question {
        Question {
            id: Uuid::new_v4(),
            section_id: Uuid::new_v4(),
            label: "Test question".to_string(),
            required: false,
            order_index: 0,
            body,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn option(question_id: Uuid, label: &str) -> QuestionOption {
        QuestionOption {
            id: Uuid::new_v4(),
            question_id,
            label: label.to_string(),
            value: label.to_string(),
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn open_control_truncates_to_max_length() {
        let question = question(QuestionBody::Open {
            prompt: None,
            placeholder: None,
            max_length: Some(5),
        });
        let mut control = QuestionControl::from_question(&question);

        control.type_text("truncate me");
        let answer = control.save().unwrap();

        assert_eq!(answer.text_value.as_deref(), Some("trunc"));
    }

    #[test]
    fn open_control_ignores_non_positive_max_length() {
        let question = question(QuestionBody::Open {
            prompt: None,
            placeholder: None,
            max_length: Some(-1),
        });
        let mut control = QuestionControl::from_question(&question);

        control.type_text("kept as typed");
        let answer = control.save().unwrap();

        assert_eq!(answer.text_value.as_deref(), Some("kept as typed"));
    }

    #[test]
    fn empty_open_draft_saves_nothing() {
        let question = question(QuestionBody::Open {
            prompt: None,
            placeholder: None,
            max_length: None,
        });
        let control = QuestionControl::from_question(&question);

        assert!(control.save().is_none());
    }

    #[test]
    fn checkbox_control_starts_from_default_and_toggles() {
        let question = question(QuestionBody::Checkbox { checked: true });
        let mut control = QuestionControl::from_question(&question);

        let answer = control.save().unwrap();
        assert_eq!(answer.bool_value, Some(true));

        control.toggle();
        let answer = control.save().unwrap();
        assert_eq!(answer.bool_value, Some(false));
    }

    #[test]
    fn radio_control_replaces_selection() {
        let question_id = Uuid::new_v4();
        let first = option(question_id, "First");
        let second = option(question_id, "Second");
        let question = question(QuestionBody::Radio {
            options: vec![first.clone(), second.clone()],
        });
        let mut control = QuestionControl::from_question(&question);

        control.select(first.id);
        control.select(second.id);
        let answer = control.save().unwrap();

        assert_eq!(answer.option_ids, Some(vec![second.id]));
    }

    #[test]
    fn matrix_control_toggles_membership() {
        let question_id = Uuid::new_v4();
        let first = option(question_id, "Row A");
        let second = option(question_id, "Row B");
        let question = question(QuestionBody::Matrix {
            options: vec![first.clone(), second.clone()],
        });
        let mut control = QuestionControl::from_question(&question);

        control.select(first.id);
        control.select(second.id);
        control.select(first.id);
        let answer = control.save().unwrap();

        assert_eq!(answer.option_ids, Some(vec![second.id]));
    }

    #[test]
    fn unselected_radio_saves_nothing() {
        let question = question(QuestionBody::Radio { options: vec![] });
        let control = QuestionControl::from_question(&question);

        assert!(control.save().is_none());
    }
}

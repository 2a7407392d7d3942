use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    OptionInput, OptionWrite, Question, QuestionBody, QuestionInput, QuestionKindInput,
    QuestionOption, QuestionType, QuestionWrite, Section, SectionInput, SectionWrite, Survey,
    SurveyStatus, UpdateSurveyRequest,
};
use crate::services::survey_service::plan_copy_sections;
use crate::services::{build_new_sections, copy_title, reconcile_survey};

fn ts() -> NaiveDateTime {
    NaiveDateTime::default()
}

pub fn survey_fixture() -> Survey {
    Survey {
        id: Uuid::new_v4(),
        title: "Customer Satisfaction Survey".to_string(),
        description: None,
        status: SurveyStatus::Draft,
        created_at: ts(),
        updated_at: ts(),
        sections: Vec::new(),
    }
}

pub fn section_fixture(survey_id: Uuid, order_index: i32, questions: Vec<Question>) -> Section {
    Section {
        id: Uuid::new_v4(),
        survey_id,
        title: format!("Section {}", order_index),
        order_index,
        created_at: ts(),
        updated_at: ts(),
        questions,
    }
}

pub fn question_fixture(section_id: Uuid, order_index: i32, body: QuestionBody) -> Question {
    Question {
        id: Uuid::new_v4(),
        section_id,
        label: format!("Question {}", order_index),
        required: false,
        order_index,
        body,
        created_at: ts(),
        updated_at: ts(),
    }
}

pub fn option_fixture(question_id: Uuid, label: &str) -> QuestionOption {
    QuestionOption {
        id: Uuid::new_v4(),
        question_id,
        label: label.to_string(),
        value: label.to_string(),
        created_at: ts(),
    }
}

fn section_input(id: Option<Uuid>, title: &str) -> SectionInput {
    SectionInput {
        id,
        title: Some(title.to_string()),
        order_index: None,
        questions: None,
    }
}

#[test]
fn copy_title_appends_suffix() {
    assert_eq!(copy_title("Website Usability"), "Website Usability (Copy)");
}

#[test]
fn build_new_sections_defaults_order_to_position() {
    let supplied_id = Uuid::new_v4();
    let inputs = vec![
        SectionInput {
            id: None,
            title: Some("First".to_string()),
            order_index: None,
            questions: Some(vec![QuestionInput {
                id: None,
                label: Some("Any comments?".to_string()),
                required: None,
                order_index: None,
                kind: Some(QuestionKindInput::Open {
                    prompt: None,
                    placeholder: None,
                    max_length: None,
                }),
            }]),
        },
        SectionInput {
            id: Some(supplied_id),
            title: Some("Second".to_string()),
            order_index: Some(7),
            questions: None,
        },
    ];

    let sections = build_new_sections(inputs).unwrap();

    assert_eq!(sections[0].order_index, 0);
    assert_eq!(sections[0].questions[0].order_index, 0);
    assert!(!sections[0].questions[0].required);
    assert_eq!(sections[1].order_index, 7);
    // A supplied id is honored on insert
    assert_eq!(sections[1].id, supplied_id);
}

#[test]
fn build_new_sections_requires_title() {
    let result = build_new_sections(vec![SectionInput {
        id: None,
        title: None,
        order_index: None,
        questions: None,
    }]);

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[test]
fn build_new_sections_requires_question_type() {
    let mut input = section_input(None, "Untyped");
    input.questions = Some(vec![QuestionInput {
        id: None,
        label: Some("Typeless".to_string()),
        required: None,
        order_index: None,
        kind: None,
    }]);

    assert!(matches!(
        build_new_sections(vec![input]),
        Err(AppError::ValidationError(_))
    ));
}

#[test]
fn build_new_sections_defaults_option_value_to_label() {
    let mut input = section_input(None, "Choices");
    input.questions = Some(vec![QuestionInput {
        id: None,
        label: Some("Pick one".to_string()),
        required: None,
        order_index: None,
        kind: Some(QuestionKindInput::Radio {
            options: vec![OptionInput {
                id: None,
                label: Some("Very Satisfied".to_string()),
                value: None,
            }],
        }),
    }]);

    let sections = build_new_sections(vec![input]).unwrap();
    let option = &sections[0].questions[0].options[0];
    assert_eq!(option.value, "Very Satisfied");
}

#[test]
fn reconcile_partitions_matched_and_new_sections() {
    let mut survey = survey_fixture();
    let existing = section_fixture(survey.id, 0, Vec::new());
    let existing_id = existing.id;
    survey.sections.push(existing);

    let fresh_id = Uuid::new_v4();
    let req = UpdateSurveyRequest {
        title: Some("Renamed".to_string()),
        description: None,
        sections: Some(vec![
            section_input(Some(existing_id), "Patched title"),
            section_input(Some(fresh_id), "Brand new"),
        ]),
    };

    let plan = reconcile_survey(&survey, req).unwrap();

    assert_eq!(plan.title.as_deref(), Some("Renamed"));
    assert_eq!(plan.sections.len(), 2);
    match &plan.sections[0] {
        SectionWrite::Update(patch) => {
            assert_eq!(patch.id, existing_id);
            assert_eq!(patch.title.as_deref(), Some("Patched title"));
        }
        other => panic!("expected update, got {:?}", other),
    }
    match &plan.sections[1] {
        // An unmatched id still lands on the inserted row
        SectionWrite::Insert(section) => assert_eq!(section.id, fresh_id),
        other => panic!("expected insert, got {:?}", other),
    }
}

#[test]
fn reconcile_without_sections_leaves_children_untouched() {
    let mut survey = survey_fixture();
    survey
        .sections
        .push(section_fixture(survey.id, 0, Vec::new()));

    let req = UpdateSurveyRequest {
        title: None,
        description: Some("New description".to_string()),
        sections: None,
    };

    let plan = reconcile_survey(&survey, req).unwrap();
    assert!(plan.sections.is_empty());
    assert_eq!(plan.description.as_deref(), Some("New description"));
}

#[test]
fn reconcile_rejects_question_type_change() {
    let mut survey = survey_fixture();
    let mut section = section_fixture(survey.id, 0, Vec::new());
    let question = question_fixture(section.id, 0, QuestionBody::Checkbox { checked: false });
    let question_id = question.id;
    section.questions.push(question);
    let section_id = section.id;
    survey.sections.push(section);

    let req = UpdateSurveyRequest {
        title: None,
        description: None,
        sections: Some(vec![SectionInput {
            id: Some(section_id),
            title: None,
            order_index: None,
            questions: Some(vec![QuestionInput {
                id: Some(question_id),
                label: None,
                required: None,
                order_index: None,
                kind: Some(QuestionKindInput::Open {
                    prompt: None,
                    placeholder: None,
                    max_length: None,
                }),
            }]),
        }]),
    };

    assert!(matches!(
        reconcile_survey(&survey, req),
        Err(AppError::ValidationError(_))
    ));
}

#[test]
fn reconcile_matches_options_by_id() {
    let mut survey = survey_fixture();
    let mut section = section_fixture(survey.id, 0, Vec::new());
    let mut question = question_fixture(section.id, 0, QuestionBody::Radio { options: vec![] });
    let existing_option = option_fixture(question.id, "Good");
    let existing_option_id = existing_option.id;
    question.body = QuestionBody::Radio {
        options: vec![existing_option],
    };
    let question_id = question.id;
    section.questions.push(question);
    let section_id = section.id;
    survey.sections.push(section);

    let req = UpdateSurveyRequest {
        title: None,
        description: None,
        sections: Some(vec![SectionInput {
            id: Some(section_id),
            title: None,
            order_index: None,
            questions: Some(vec![QuestionInput {
                id: Some(question_id),
                label: None,
                required: None,
                order_index: None,
                kind: Some(QuestionKindInput::Radio {
                    options: vec![
                        OptionInput {
                            id: Some(existing_option_id),
                            label: Some("Great".to_string()),
                            value: None,
                        },
                        OptionInput {
                            id: None,
                            label: Some("Terrible".to_string()),
                            value: None,
                        },
                    ],
                }),
            }]),
        }]),
    };

    let plan = reconcile_survey(&survey, req).unwrap();
    let SectionWrite::Update(section_patch) = &plan.sections[0] else {
        panic!("expected section update");
    };
    let QuestionWrite::Update(question_patch) = &section_patch.questions[0] else {
        panic!("expected question update");
    };

    assert_eq!(question_patch.options.len(), 2);
    match &question_patch.options[0] {
        OptionWrite::Update(patch) => {
            assert_eq!(patch.id, existing_option_id);
            assert_eq!(patch.label.as_deref(), Some("Great"));
        }
        other => panic!("expected option update, got {:?}", other),
    }
    assert!(matches!(&question_patch.options[1], OptionWrite::Insert(_)));
}

#[test]
fn reconcile_keeps_question_type_when_kind_matches() {
    let mut survey = survey_fixture();
    let mut section = section_fixture(survey.id, 0, Vec::new());
    let question = question_fixture(
        section.id,
        0,
        QuestionBody::Open {
            prompt: None,
            placeholder: None,
            max_length: Some(200),
        },
    );
    let question_id = question.id;
    section.questions.push(question);
    let section_id = section.id;
    survey.sections.push(section);

    let req = UpdateSurveyRequest {
        title: None,
        description: None,
        sections: Some(vec![SectionInput {
            id: Some(section_id),
            title: None,
            order_index: None,
            questions: Some(vec![QuestionInput {
                id: Some(question_id),
                label: None,
                required: None,
                order_index: None,
                kind: Some(QuestionKindInput::Open {
                    prompt: Some("Updated prompt".to_string()),
                    placeholder: None,
                    max_length: Some(500),
                }),
            }]),
        }]),
    };

    let plan = reconcile_survey(&survey, req).unwrap();
    let SectionWrite::Update(section_patch) = &plan.sections[0] else {
        panic!("expected section update");
    };
    let QuestionWrite::Update(question_patch) = &section_patch.questions[0] else {
        panic!("expected question update");
    };

    assert_eq!(question_patch.prompt.as_deref(), Some("Updated prompt"));
    assert_eq!(question_patch.max_length, Some(500));
    assert_eq!(question_patch.default_checked, None);
}

#[test]
fn copy_plan_uses_fresh_ids_and_preserves_structure() {
    let mut survey = survey_fixture();
    let mut section = section_fixture(survey.id, 3, Vec::new());
    let open = question_fixture(
        section.id,
        0,
        QuestionBody::Open {
            prompt: Some("Tell us more".to_string()),
            placeholder: None,
            max_length: Some(200),
        },
    );
    let mut radio = question_fixture(section.id, 1, QuestionBody::Radio { options: vec![] });
    let option = option_fixture(radio.id, "Very Satisfied");
    let option_id = option.id;
    radio.body = QuestionBody::Radio {
        options: vec![option],
    };
    section.questions = vec![open.clone(), radio.clone()];
    survey.sections.push(section.clone());

    let copies = plan_copy_sections(&survey.sections);

    assert_eq!(copies.len(), 1);
    let copy = &copies[0];
    assert_ne!(copy.id, section.id);
    assert_eq!(copy.title, section.title);
    assert_eq!(copy.order_index, 3);

    let open_copy = &copy.questions[0];
    assert_ne!(open_copy.id, open.id);
    assert_eq!(open_copy.label, open.label);
    assert_eq!(open_copy.question_type, QuestionType::Open);
    assert_eq!(open_copy.order_index, 0);
    assert_eq!(open_copy.prompt.as_deref(), Some("Tell us more"));
    assert_eq!(open_copy.max_length, Some(200));

    let radio_copy = &copy.questions[1];
    assert_ne!(radio_copy.id, radio.id);
    assert_eq!(radio_copy.question_type, QuestionType::Radio);
    assert_eq!(radio_copy.order_index, 1);
    assert_eq!(radio_copy.options.len(), 1);
    assert_ne!(radio_copy.options[0].id, option_id);
    assert_eq!(radio_copy.options[0].label, "Very Satisfied");
    assert_eq!(radio_copy.options[0].value, "Very Satisfied");
}

#[test]
fn question_fixture_round_trips_type() {
    let question = question_fixture(
        Uuid::new_v4(),
        3,
        QuestionBody::Dropdown { options: vec![] },
    );
    assert_eq!(question.body.question_type(), QuestionType::Dropdown);
}

use uuid::Uuid;

use crate::error::AppError;
use crate::models::{AnswerInput, QuestionBody, ResponseStatus};
use crate::services::response_service::submission_timestamp;
use crate::services::validate_answer;

use super::survey_plan_test::{option_fixture, question_fixture};

fn open_body() -> QuestionBody {
    QuestionBody::Open {
        prompt: None,
        placeholder: None,
        max_length: None,
    }
}

#[test]
fn open_question_accepts_text_answer() {
    let question = question_fixture(Uuid::new_v4(), 0, open_body());
    let answer = AnswerInput::text(question.id, "Found you through a search engine");

    assert!(validate_answer(&question, &answer).is_ok());
}

#[test]
fn open_question_rejects_selection_answer() {
    let question = question_fixture(Uuid::new_v4(), 0, open_body());
    let answer = AnswerInput::selection(question.id, vec![Uuid::new_v4()]);

    assert!(matches!(
        validate_answer(&question, &answer),
        Err(AppError::ValidationError(_))
    ));
}

#[test]
fn answer_with_two_channels_is_rejected() {
    let question = question_fixture(Uuid::new_v4(), 0, open_body());
    let mut answer = AnswerInput::text(question.id, "hello");
    answer.bool_value = Some(true);

    assert!(matches!(
        validate_answer(&question, &answer),
        Err(AppError::ValidationError(_))
    ));
}

#[test]
fn answer_with_no_channels_is_rejected() {
    let question = question_fixture(Uuid::new_v4(), 0, open_body());
    let answer = AnswerInput {
        question_id: question.id,
        text_value: None,
        bool_value: None,
        option_ids: None,
    };

    assert!(matches!(
        validate_answer(&question, &answer),
        Err(AppError::ValidationError(_))
    ));
}

#[test]
fn checkbox_question_takes_bool_answer() {
    let question = question_fixture(Uuid::new_v4(), 0, QuestionBody::Checkbox { checked: false });

    assert!(validate_answer(&question, &AnswerInput::checked(question.id, true)).is_ok());
    assert!(validate_answer(&question, &AnswerInput::text(question.id, "yes")).is_err());
}

#[test]
fn radio_question_takes_exactly_one_option() {
    let question_id = Uuid::new_v4();
    let first = option_fixture(question_id, "Satisfied");
    let second = option_fixture(question_id, "Neutral");
    let question = question_fixture(
        Uuid::new_v4(),
        0,
        QuestionBody::Radio {
            options: vec![first.clone(), second.clone()],
        },
    );

    assert!(validate_answer(&question, &AnswerInput::selection(question.id, vec![first.id])).is_ok());
    assert!(validate_answer(&question, &AnswerInput::selection(question.id, vec![])).is_err());
    assert!(validate_answer(
        &question,
        &AnswerInput::selection(question.id, vec![first.id, second.id])
    )
    .is_err());
}

#[test]
fn dropdown_selection_must_belong_to_question() {
    let question_id = Uuid::new_v4();
    let option = option_fixture(question_id, "Blue");
    let question = question_fixture(
        Uuid::new_v4(),
        0,
        QuestionBody::Dropdown {
            options: vec![option],
        },
    );
    let foreign = Uuid::new_v4();

    assert!(matches!(
        validate_answer(&question, &AnswerInput::selection(question.id, vec![foreign])),
        Err(AppError::ValidationError(_))
    ));
}

#[test]
fn only_complete_submissions_are_timestamped() {
    assert!(submission_timestamp(ResponseStatus::Complete).is_some());
    assert!(submission_timestamp(ResponseStatus::Partial).is_none());
    assert!(submission_timestamp(ResponseStatus::Invalid).is_none());
}

#[test]
fn matrix_question_accepts_multiple_options() {
    let question_id = Uuid::new_v4();
    let first = option_fixture(question_id, "Row A");
    let second = option_fixture(question_id, "Row B");
    let question = question_fixture(
        Uuid::new_v4(),
        0,
        QuestionBody::Matrix {
            options: vec![first.clone(), second.clone()],
        },
    );

    assert!(validate_answer(
        &question,
        &AnswerInput::selection(question.id, vec![first.id, second.id])
    )
    .is_ok());
    assert!(validate_answer(&question, &AnswerInput::selection(question.id, vec![])).is_err());
}

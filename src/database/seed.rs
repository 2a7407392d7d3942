use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{AnswerInput, NewOption, NewQuestion, NewSection, QuestionType, ResponseStatus, Survey, SurveyStatus};
use crate::repository::{ResponseRepository, SurveyRepository};

/// Populate demo surveys and responses. Skipped when any survey already
/// exists, so repeated boots never duplicate the data.
pub async fn seed_demo_data(pool: &PgPool) -> AppResult<()> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM surveys")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        info!("Surveys already present, skipping demo seed");
        return Ok(());
    }

    let survey_repo = SurveyRepository::new(pool.clone());
    let response_repo = ResponseRepository::new(pool.clone());

    let satisfaction = survey_repo
        .create_survey(
            "Customer Satisfaction Survey",
            Some("Tell us how we are doing"),
            SurveyStatus::Published,
            &satisfaction_sections(),
        )
        .await?;
    seed_satisfaction_responses(&response_repo, &satisfaction).await?;

    survey_repo
        .create_survey(
            "Product Feature Feedback",
            Some("Help us decide what to build next"),
            SurveyStatus::Draft,
            &feature_sections(),
        )
        .await?;

    survey_repo
        .create_survey(
            "Website Usability Survey",
            None,
            SurveyStatus::Closed,
            &usability_sections(),
        )
        .await?;

    info!("Seeded demo surveys and responses");
    Ok(())
}

fn open_question(order_index: i32, label: &str, prompt: &str, max_length: i32) -> NewQuestion {
    NewQuestion {
        id: Uuid::new_v4(),
        label: label.to_string(),
        required: true,
        question_type: QuestionType::Open,
        order_index,
        prompt: Some(prompt.to_string()),
        placeholder: Some("Type your answer here".to_string()),
        max_length: Some(max_length),
        default_checked: None,
        options: Vec::new(),
    }
}

fn choice_question(
    order_index: i32,
    label: &str,
    question_type: QuestionType,
    labels: &[&str],
) -> NewQuestion {
    NewQuestion {
        id: Uuid::new_v4(),
        label: label.to_string(),
        required: true,
        question_type,
        order_index,
        prompt: None,
        placeholder: None,
        max_length: None,
        default_checked: None,
        options: labels
            .iter()
            .map(|label| NewOption {
                id: Uuid::new_v4(),
                label: label.to_string(),
                value: label.to_string(),
            })
            .collect(),
    }
}

fn satisfaction_sections() -> Vec<NewSection> {
    vec![NewSection {
        id: Uuid::new_v4(),
        title: "General Feedback".to_string(),
        order_index: 0,
        questions: vec![
            open_question(
                0,
                "How did you hear about our product?",
                "Please tell us how you discovered us",
                500,
            ),
            choice_question(
                1,
                "How satisfied are you overall?",
                QuestionType::Radio,
                &[
                    "Very Satisfied",
                    "Satisfied",
                    "Neutral",
                    "Dissatisfied",
                    "Very Dissatisfied",
                ],
            ),
            NewQuestion {
                id: Uuid::new_v4(),
                label: "Would you recommend us to others?".to_string(),
                required: false,
                question_type: QuestionType::Checkbox,
                order_index: 2,
                prompt: None,
                placeholder: None,
                max_length: None,
                default_checked: Some(false),
                options: Vec::new(),
            },
        ],
    }]
}

fn feature_sections() -> Vec<NewSection> {
    vec![NewSection {
        id: Uuid::new_v4(),
        title: "Feature Priorities".to_string(),
        order_index: 0,
        questions: vec![
            choice_question(
                0,
                "Which area should we focus on first?",
                QuestionType::Dropdown,
                &["Reporting", "Integrations", "Mobile app", "Performance"],
            ),
            choice_question(
                1,
                "Which of these would you use?",
                QuestionType::Matrix,
                &["Dark mode", "Offline access", "Export to CSV"],
            ),
        ],
    }]
}

fn usability_sections() -> Vec<NewSection> {
    vec![NewSection {
        id: Uuid::new_v4(),
        title: "Suggestions".to_string(),
        order_index: 0,
        questions: vec![open_question(
            0,
            "What would make the website easier to use?",
            "Anything goes, big or small",
            1000,
        )],
    }]
}

async fn seed_satisfaction_responses(
    response_repo: &ResponseRepository,
    survey: &Survey,
) -> AppResult<()> {
    let questions = &survey.sections[0].questions;
    let open = &questions[0];
    let radio = &questions[1];
    let checkbox = &questions[2];

    // Options come back in storage order, so pick by label
    let satisfied = radio
        .body
        .options()
        .and_then(|options| options.iter().find(|o| o.label == "Very Satisfied"));

    let mut complete = vec![AnswerInput::text(
        open.id,
        "Found you through a search engine",
    )];
    if let Some(option) = satisfied {
        complete.push(AnswerInput::selection(radio.id, vec![option.id]));
    }
    complete.push(AnswerInput::checked(checkbox.id, true));

    response_repo
        .create(
            survey.id,
            ResponseStatus::Complete,
            Some(Utc::now().naive_utc()),
            &complete,
        )
        .await?;

    response_repo
        .create(
            survey.id,
            ResponseStatus::Partial,
            None,
            &[AnswerInput::text(open.id, "A colleague recommended it")],
        )
        .await?;

    Ok(())
}

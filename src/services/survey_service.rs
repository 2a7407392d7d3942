use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    CreateSurveyRequest, NewOption, NewQuestion, NewSection, OptionInput, OptionPatch,
    OptionWrite, Question, QuestionBody, QuestionInput, QuestionKindInput, QuestionPatch,
    QuestionWrite, Section, SectionInput, SectionPatch, SectionWrite, Survey,
    SurveyStatus, SurveyWritePlan, UpdateSurveyRequest,
};
use crate::repository::SurveyRepository;

pub struct SurveyService {
    survey_repo: Arc<SurveyRepository>,
}

impl SurveyService {
    pub fn new(survey_repo: Arc<SurveyRepository>) -> Self {
        Self { survey_repo }
    }

    pub async fn list(&self) -> AppResult<Vec<Survey>> {
        self.survey_repo.find_all().await
    }

    pub async fn list_drafts(&self) -> AppResult<Vec<Survey>> {
        self.survey_repo.find_by_status(SurveyStatus::Draft).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Survey> {
        self.survey_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Survey not found".to_string()))
    }

    pub async fn create(&self, req: CreateSurveyRequest) -> AppResult<Survey> {
        let sections = build_new_sections(req.sections)?;
        self.survey_repo
            .create_survey(
                &req.title,
                req.description.as_deref(),
                SurveyStatus::Draft,
                &sections,
            )
            .await
    }

    /// Merge-by-id update: supplied children that match an existing id are
    /// patched in place, the rest are inserted; children absent from the
    /// payload are left untouched.
    pub async fn update(&self, id: Uuid, req: UpdateSurveyRequest) -> AppResult<Survey> {
        let existing = self.get(id).await?;
        let plan = reconcile_survey(&existing, req)?;
        self.survey_repo.apply_plan(&plan).await?;
        self.get(id).await
    }

    /// Deep copy: "(Copy)" title suffix, status reset to draft, fresh ids
    /// throughout, order preserved from the source.
    pub async fn duplicate(&self, id: Uuid) -> AppResult<Survey> {
        let source = self.get(id).await?;
        let sections = plan_copy_sections(&source.sections);
        self.survey_repo
            .create_survey(
                &copy_title(&source.title),
                source.description.as_deref(),
                SurveyStatus::Draft,
                &sections,
            )
            .await
    }

    pub async fn publish(&self, id: Uuid) -> AppResult<Survey> {
        self.survey_repo
            .update_status_from(id, SurveyStatus::Draft, SurveyStatus::Published)
            .await?;
        self.get(id).await
    }

    pub async fn unpublish(&self, id: Uuid) -> AppResult<Survey> {
        self.survey_repo
            .update_status_from(id, SurveyStatus::Published, SurveyStatus::Draft)
            .await?;
        self.get(id).await
    }

    pub async fn delete_draft(&self, id: Uuid) -> AppResult<()> {
        if self.survey_repo.delete_draft(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Draft survey not found".to_string()))
        }
    }
}

pub fn copy_title(title: &str) -> String {
    format!("{} (Copy)", title)
}

/// Turn creation inputs into a fully-specified section tree. Missing
/// required fields fail here, before anything touches the database;
/// a missing order_index defaults to the element's position.
pub fn build_new_sections(inputs: Vec<SectionInput>) -> AppResult<Vec<NewSection>> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(position, input)| build_new_section(input, position as i32))
        .collect()
}

pub(crate) fn build_new_questions(inputs: Vec<QuestionInput>) -> AppResult<Vec<NewQuestion>> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(position, input)| build_new_question(input, position as i32))
        .collect()
}

fn build_new_section(input: SectionInput, position: i32) -> AppResult<NewSection> {
    let title = input
        .title
        .ok_or_else(|| AppError::ValidationError("Section title is required".to_string()))?;

    Ok(NewSection {
        id: input.id.unwrap_or_else(Uuid::new_v4),
        title,
        order_index: input.order_index.unwrap_or(position),
        questions: build_new_questions(input.questions.unwrap_or_default())?,
    })
}

fn build_new_question(input: QuestionInput, position: i32) -> AppResult<NewQuestion> {
    let label = input
        .label
        .ok_or_else(|| AppError::ValidationError("Question label is required".to_string()))?;
    let kind = input
        .kind
        .ok_or_else(|| AppError::ValidationError("Question type is required".to_string()))?;

    let question_type = kind.question_type();
    let (prompt, placeholder, max_length, default_checked, options) = match kind {
        QuestionKindInput::Open {
            prompt,
            placeholder,
            max_length,
        } => (prompt, placeholder, max_length, None, Vec::new()),
        QuestionKindInput::Checkbox { checked } => {
            (None, None, None, Some(checked.unwrap_or(false)), Vec::new())
        }
        QuestionKindInput::Radio { options }
        | QuestionKindInput::Dropdown { options }
        | QuestionKindInput::Matrix { options } => {
            let options = options
                .into_iter()
                .map(build_new_option)
                .collect::<AppResult<Vec<_>>>()?;
            (None, None, None, None, options)
        }
    };

    Ok(NewQuestion {
        id: input.id.unwrap_or_else(Uuid::new_v4),
        label,
        required: input.required.unwrap_or(false),
        question_type,
        order_index: input.order_index.unwrap_or(position),
        prompt,
        placeholder,
        max_length,
        default_checked,
        options,
    })
}

fn build_new_option(input: OptionInput) -> AppResult<NewOption> {
    let label = input
        .label
        .ok_or_else(|| AppError::ValidationError("Option label is required".to_string()))?;
    // Option value falls back to its label
    let value = input.value.unwrap_or_else(|| label.clone());

    Ok(NewOption {
        id: input.id.unwrap_or_else(Uuid::new_v4),
        label,
        value,
    })
}

/// Reconcile children by key: partition each incoming collection into
/// matched-by-id updates and fresh inserts, recursing sections →
/// questions → options. Purely computational; the repository applies the
/// resulting plan in one transaction.
pub fn reconcile_survey(
    existing: &Survey,
    req: UpdateSurveyRequest,
) -> AppResult<SurveyWritePlan> {
    let mut sections = Vec::new();

    if let Some(inputs) = req.sections {
        let by_id: HashMap<Uuid, &Section> =
            existing.sections.iter().map(|s| (s.id, s)).collect();

        for (position, input) in inputs.into_iter().enumerate() {
            match input.id.and_then(|id| by_id.get(&id).copied()) {
                Some(section) => sections.push(SectionWrite::Update(reconcile_section(section, input)?)),
                None => sections.push(SectionWrite::Insert(build_new_section(input, position as i32)?)),
            }
        }
    }

    Ok(SurveyWritePlan {
        survey_id: existing.id,
        title: req.title,
        description: req.description,
        sections,
    })
}

fn reconcile_section(existing: &Section, input: SectionInput) -> AppResult<SectionPatch> {
    let mut questions = Vec::new();

    if let Some(inputs) = input.questions {
        let by_id: HashMap<Uuid, &Question> =
            existing.questions.iter().map(|q| (q.id, q)).collect();

        for (position, q_input) in inputs.into_iter().enumerate() {
            match q_input.id.and_then(|id| by_id.get(&id).copied()) {
                Some(question) => {
                    questions.push(QuestionWrite::Update(reconcile_question(question, q_input)?))
                }
                None => questions.push(QuestionWrite::Insert(build_new_question(
                    q_input,
                    position as i32,
                )?)),
            }
        }
    }

    Ok(SectionPatch {
        id: existing.id,
        title: input.title,
        order_index: input.order_index,
        questions,
    })
}

fn reconcile_question(existing: &Question, input: QuestionInput) -> AppResult<QuestionPatch> {
    let existing_type = existing.body.question_type();
    let mut patch = QuestionPatch {
        id: existing.id,
        label: input.label,
        required: input.required,
        order_index: input.order_index,
        prompt: None,
        placeholder: None,
        max_length: None,
        default_checked: None,
        options: Vec::new(),
    };

    let Some(kind) = input.kind else {
        return Ok(patch);
    };

    // The stored type-conditional columns and historical answers are only
    // coherent for the original type
    if kind.question_type() != existing_type {
        return Err(AppError::ValidationError(format!(
            "Question {} cannot change type from {} to {}",
            existing.id,
            existing_type,
            kind.question_type()
        )));
    }

    match kind {
        QuestionKindInput::Open {
            prompt,
            placeholder,
            max_length,
        } => {
            patch.prompt = prompt;
            patch.placeholder = placeholder;
            patch.max_length = max_length;
        }
        QuestionKindInput::Checkbox { checked } => {
            patch.default_checked = checked;
        }
        QuestionKindInput::Radio { options }
        | QuestionKindInput::Dropdown { options }
        | QuestionKindInput::Matrix { options } => {
            let existing_options = existing.body.options().unwrap_or(&[]);
            for o_input in options {
                match o_input
                    .id
                    .filter(|id| existing_options.iter().any(|o| o.id == *id))
                {
                    Some(id) => patch.options.push(OptionWrite::Update(OptionPatch {
                        id,
                        label: o_input.label,
                        value: o_input.value,
                    })),
                    None => patch.options.push(OptionWrite::Insert(build_new_option(o_input)?)),
                }
            }
        }
    }

    Ok(patch)
}

/// Plan a deep copy of a section tree: fresh ids at every level, labels,
/// types and order preserved from the source.
pub(crate) fn plan_copy_sections(sections: &[Section]) -> Vec<NewSection> {
    sections
        .iter()
        .map(|section| NewSection {
            id: Uuid::new_v4(),
            title: section.title.clone(),
            order_index: section.order_index,
            questions: section.questions.iter().map(plan_copy_question).collect(),
        })
        .collect()
}

fn plan_copy_question(question: &Question) -> NewQuestion {
    let (prompt, placeholder, max_length, default_checked, options) = match &question.body {
        QuestionBody::Open {
            prompt,
            placeholder,
            max_length,
        } => (
            prompt.clone(),
            placeholder.clone(),
            *max_length,
            None,
            Vec::new(),
        ),
        QuestionBody::Checkbox { checked } => (None, None, None, Some(*checked), Vec::new()),
        QuestionBody::Radio { options }
        | QuestionBody::Dropdown { options }
        | QuestionBody::Matrix { options } => {
            let options = options
                .iter()
                .map(|option| NewOption {
                    id: Uuid::new_v4(),
                    label: option.label.clone(),
                    value: option.value.clone(),
                })
                .collect();
            (None, None, None, None, options)
        }
    };

    NewQuestion {
        id: Uuid::new_v4(),
        label: question.label.clone(),
        required: question.required,
        question_type: question.body.question_type(),
        order_index: question.order_index,
        prompt,
        placeholder,
        max_length,
        default_checked,
        options,
    }
}

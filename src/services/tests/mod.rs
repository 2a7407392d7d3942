pub mod answer_validation_test;
pub mod survey_plan_test;

use validator::Validate;

use crate::error::{AppError, AppResult};

/// Validate a request struct using the validator crate
pub fn validate_request<T: Validate>(request: &T) -> AppResult<()> {
    request.validate().map_err(|e| {
        let errors: Vec<String> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |err| {
                    format!(
                        "{}: {}",
                        field,
                        err.message.clone().unwrap_or_else(|| "Invalid value".into())
                    )
                })
            })
            .collect();

        AppError::ValidationError(errors.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateSurveyRequest;

    #[test]
    fn empty_title_fails_validation() {
        let req = CreateSurveyRequest {
            title: String::new(),
            description: None,
            sections: Vec::new(),
        };

        let result = validate_request(&req);
        match result {
            Err(AppError::ValidationError(message)) => {
                assert!(message.contains("title"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn valid_title_passes() {
        let req = CreateSurveyRequest {
            title: "Customer Satisfaction Survey".to_string(),
            description: Some("Quarterly".to_string()),
            sections: Vec::new(),
        };

        assert!(validate_request(&req).is_ok());
    }
}

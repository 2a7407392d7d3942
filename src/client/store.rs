use std::collections::HashMap;

use uuid::Uuid;

use crate::models::Survey;

use super::SurveyClient;

/// Client-side cache of fetched surveys plus transient UI state. The
/// API client is injected once at construction.
pub struct SurveyStore {
    client: SurveyClient,
    surveys: Vec<Survey>,
    selected_options: HashMap<Uuid, Uuid>,
    loading: bool,
    error: Option<String>,
}

impl SurveyStore {
    pub fn new(client: SurveyClient) -> Self {
        Self {
            client,
            surveys: Vec::new(),
            selected_options: HashMap::new(),
            loading: false,
            error: None,
        }
    }

    pub fn surveys(&self) -> &[Survey] {
        &self.surveys
    }

    pub fn survey(&self, id: Uuid) -> Option<&Survey> {
        self.surveys.iter().find(|s| s.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected_option(&self, question_id: Uuid) -> Option<Uuid> {
        self.selected_options.get(&question_id).copied()
    }

    /// Replace the cached collection from the API. On failure the old
    /// collection is kept and the error message recorded.
    pub async fn refresh(&mut self) {
        self.loading = true;
        self.error = None;

        match self.client.fetch_surveys().await {
            Ok(surveys) => self.surveys = surveys,
            Err(e) => self.error = Some(e.to_string()),
        }

        self.loading = false;
    }

    /// Record a selection locally; nothing is sent to the API until the
    /// response is submitted.
    pub fn select_option(&mut self, question_id: Uuid, option_id: Uuid) {
        self.selected_options.insert(question_id, option_id);
    }

    pub fn client(&self) -> &SurveyClient {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_option_is_local_only() {
        let mut store = SurveyStore::new(SurveyClient::new("http://localhost:3001"));
        let question_id = Uuid::new_v4();
        let option_id = Uuid::new_v4();

        store.select_option(question_id, option_id);

        assert_eq!(store.selected_option(question_id), Some(option_id));
        assert!(store.surveys().is_empty());
    }

    #[actix_rt::test]
    async fn refresh_records_error_when_api_is_unreachable() {
        // Port 1 is never bound in the test environment
        let mut store = SurveyStore::new(SurveyClient::new("http://127.0.0.1:1"));

        store.refresh().await;

        assert!(!store.is_loading());
        assert!(store.error().is_some());
        assert!(store.surveys().is_empty());
    }
}

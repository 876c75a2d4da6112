use reqwest::{Client, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use desk_core::model::{ExamDraft, Task, TaskId};

use crate::error::ApiClientError;
use crate::state_service::DeskState;

/// HTTP client for the desk backend's `/api` routes.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiClient {
    /// `base_url` is the server origin, e.g. `http://127.0.0.1:3000`.
    ///
    /// # Errors
    ///
    /// Returns `ApiClientError::InvalidBaseUrl` if `base_url` is not an
    /// absolute http(s)-style URL.
    pub fn new(base_url: &str) -> Result<Self, ApiClientError> {
        let invalid = |reason: String| ApiClientError::InvalidBaseUrl {
            raw: base_url.to_owned(),
            reason,
        };
        let parsed = Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("cannot be a base".to_owned()));
        }
        Ok(Self {
            client: Client::new(),
            base_url: parsed,
        })
    }

    // Each segment is percent-encoded, so opaque ids cannot escape their slot.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    /// # Errors
    ///
    /// Returns `ApiClientError` if the request fails or the backend rejects it.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiClientError> {
        let response = self.client.get(self.url(&["tasks"])).send().await?;
        decode(response).await
    }

    /// # Errors
    ///
    /// Returns `ApiClientError::Rejected` with code `title_required` for a blank title.
    pub async fn create_task(&self, title: &str) -> Result<Task, ApiClientError> {
        let response = self
            .client
            .post(self.url(&["tasks"]))
            .json(&json!({ "title": title }))
            .send()
            .await?;
        decode(response).await
    }

    /// # Errors
    ///
    /// Returns `ApiClientError::Rejected` with code `not_found` for an unknown id.
    pub async fn set_done(&self, id: &TaskId, done: bool) -> Result<(), ApiClientError> {
        let response = self
            .client
            .patch(self.url(&["tasks", id.as_str()]))
            .json(&json!({ "done": done }))
            .send()
            .await?;
        expect_ok(response).await
    }

    /// # Errors
    ///
    /// Returns `ApiClientError::Rejected` with code `not_found` for an unknown id.
    pub async fn delete_task(&self, id: &TaskId) -> Result<(), ApiClientError> {
        let response = self
            .client
            .delete(self.url(&["tasks", id.as_str()]))
            .send()
            .await?;
        expect_ok(response).await
    }

    /// # Errors
    ///
    /// Returns `ApiClientError` if the request fails or the backend rejects it.
    pub async fn load_state(&self) -> Result<DeskState, ApiClientError> {
        let response = self.client.get(self.url(&["state"])).send().await?;
        decode(response).await
    }

    /// # Errors
    ///
    /// Returns `ApiClientError` if the request fails or the backend rejects it.
    pub async fn save_notes(&self, notes: &str) -> Result<(), ApiClientError> {
        let response = self
            .client
            .put(self.url(&["notes"]))
            .json(&json!({ "notes": notes }))
            .send()
            .await?;
        expect_ok(response).await
    }

    /// # Errors
    ///
    /// Returns `ApiClientError::Rejected` with code `date_invalid` for a malformed date.
    pub async fn save_exam(&self, draft: &ExamDraft) -> Result<(), ApiClientError> {
        let response = self
            .client
            .put(self.url(&["exam"]))
            .json(&json!({ "label": draft.label, "date": draft.date }))
            .send()
            .await?;
        expect_ok(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiClientError> {
    let response = check_status(response).await?;
    Ok(response.json().await?)
}

async fn expect_ok(response: Response) -> Result<(), ApiClientError> {
    check_status(response).await.map(|_| ())
}

async fn check_status(response: Response) -> Result<Response, ApiClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let code = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("unknown").to_owned(),
    };
    tracing::debug!(%status, %code, "backend rejected request");
    Err(ApiClientError::Rejected { status, code })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_ids_are_encoded_as_one_path_segment() {
        let client = ApiClient::new("http://127.0.0.1:3000/").unwrap();
        assert_eq!(
            client.url(&["tasks", "a/b?c#d"]).as_str(),
            "http://127.0.0.1:3000/api/tasks/a%2Fb%3Fc%23d"
        );
        assert_eq!(client.url(&["state"]).as_str(), "http://127.0.0.1:3000/api/state");
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let client = ApiClient::new("https://desk.example/v1").unwrap();
        assert_eq!(
            client.url(&["notes"]).as_str(),
            "https://desk.example/v1/api/notes"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ApiClientError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ApiClient::new("mailto:someone@example.com"),
            Err(ApiClientError::InvalidBaseUrl { .. })
        ));
    }
}

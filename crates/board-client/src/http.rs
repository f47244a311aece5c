//! HTTP implementation of the board API

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use tb_core::query::TaskPage;
use tb_core::task::{Task, TaskId, TaskPatch};

use crate::api::BoardApi;
use crate::error::{ClientError, Result};

#[derive(Serialize)]
struct CreateTaskRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Board API client over HTTP
pub struct HttpBoardApi {
    client: Client,
    base_url: String,
}

impl HttpBoardApi {
    /// Create a client for the server at `base_url`
    /// (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            // Disable proxy for board/server communication
            client: Client::builder()
                .no_proxy()
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn check(res: Response) -> Result<Response> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let message = match res.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        Err(ClientError::api(status.as_u16(), message))
    }
}

#[async_trait]
impl BoardApi for HttpBoardApi {
    async fn list_tasks(
        &self,
        status: &str,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<TaskPage> {
        // Column keys may contain spaces, so the status goes in encoded.
        let mut url = format!(
            "{}/tasks?status={}",
            self.base_url,
            urlencoding::encode(status)
        );
        if let Some(page) = page {
            url.push_str(&format!("&page={page}"));
        }
        if let Some(limit) = limit {
            url.push_str(&format!("&limit={limit}"));
        }

        let res = self.client.get(url).send().await?;
        Ok(Self::check(res).await?.json().await?)
    }

    async fn create_task(&self, text: &str) -> Result<Task> {
        let res = self
            .client
            .post(format!("{}/tasks", self.base_url))
            .json(&CreateTaskRequest { text })
            .send()
            .await?;
        Ok(Self::check(res).await?.json().await?)
    }

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<Task> {
        let res = self
            .client
            .put(format!("{}/tasks/{id}", self.base_url))
            .json(&patch)
            .send()
            .await?;
        Ok(Self::check(res).await?.json().await?)
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        let res = self
            .client
            .delete(format!("{}/tasks/{id}", self.base_url))
            .send()
            .await?;
        Self::check(res).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let api = HttpBoardApi::new("http://localhost:3000/");
        assert_eq!(api.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_status_is_query_encoded() {
        let encoded = urlencoding::encode("Ready for review");
        assert_eq!(encoded, "Ready%20for%20review");
    }
}

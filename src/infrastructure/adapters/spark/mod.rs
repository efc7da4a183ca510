//! Webex (Cisco Spark) REST adapter

use async_trait::async_trait;
use reqwest::header::{HeaderMap, LINK};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

use crate::application::errors::ApiError;
use crate::domain::entities::{BotIdentity, Message, Reply, Webhook, WebhookSpec};
use crate::domain::traits::MessagingApi;

/// Upper bound on pages followed by one list call
const MAX_PAGES: usize = 1000;

/// Page of a list endpoint
#[derive(Debug, Deserialize)]
struct Items<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

/// Webex REST client authenticated with the bot's access token
pub struct SparkClient {
    base_url: String,
    token: String,
    client: Client,
}

impl SparkClient {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        })
    }

    /// Get the API URL for a path
    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url).bearer_auth(&self.token)
    }

    /// Send a request and fail on non-2xx statuses
    async fn send(&self, method: Method, url: &str, body: Option<&impl Serialize>) -> Result<Response, ApiError> {
        let mut request = self.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                method: method.to_string(),
                path: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::GET, &self.api_url(path), None::<&()>).await?;
        Self::json(response).await
    }

    /// Fetch every page of a list endpoint
    async fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let mut all = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(self.api_url(path));

        while let Some(url) = next {
            if visited.len() >= MAX_PAGES {
                return Err(ApiError::Decode(format!(
                    "pagination loop: {} exceeded {} pages",
                    path, MAX_PAGES
                )));
            }
            if !visited.insert(url.clone()) {
                return Err(ApiError::Decode(format!(
                    "pagination loop: {} revisited {}",
                    path, url
                )));
            }

            let response = self.send(Method::GET, &url, None::<&()>).await?;
            next = next_page(response.headers());
            let page: Items<T> = Self::json(response).await?;
            all.extend(page.items);
        }

        Ok(all)
    }
}

/// Target of a `Link: <url>; rel="next"` header
fn next_page(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(parse_next_link)
}

fn parse_next_link(value: &str) -> Option<String> {
    value.split(',').find_map(|link| {
        let mut parts = link.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|p| {
            let p = p.trim();
            p == "rel=\"next\"" || p == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}

#[async_trait]
impl MessagingApi for SparkClient {
    async fn list_webhooks(&self) -> Result<Vec<Webhook>, ApiError> {
        self.get_all("webhooks").await
    }

    async fn create_webhook(&self, spec: &WebhookSpec) -> Result<Webhook, ApiError> {
        let response = self
            .send(Method::POST, &self.api_url("webhooks"), Some(spec))
            .await?;
        Self::json(response).await
    }

    async fn update_webhook(&self, id: &str, name: &str, target_url: &str) -> Result<Webhook, ApiError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct UpdateWebhookRequest<'a> {
            name: &'a str,
            target_url: &'a str,
        }

        let url = self.api_url(&format!("webhooks/{}", id));
        let request = UpdateWebhookRequest { name, target_url };
        let response = self.send(Method::PUT, &url, Some(&request)).await?;
        Self::json(response).await
    }

    async fn get_message(&self, id: &str) -> Result<Message, ApiError> {
        self.get(&format!("messages/{}", id)).await
    }

    async fn get_self_identity(&self) -> Result<BotIdentity, ApiError> {
        self.get("people/me").await
    }

    async fn post_message(&self, room_id: &str, reply: &Reply) -> Result<String, ApiError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct CreateMessageRequest<'a> {
            room_id: &'a str,
            #[serde(skip_serializing_if = "str::is_empty")]
            markdown: &'a str,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            files: &'a Vec<String>,
        }

        #[derive(Deserialize)]
        struct MessageResult {
            id: String,
        }

        let request = CreateMessageRequest {
            room_id,
            markdown: &reply.markdown,
            files: &reply.files,
        };
        let response = self
            .send(Method::POST, &self.api_url("messages"), Some(&request))
            .await?;
        let data: MessageResult = Self::json(response).await?;

        Ok(data.id)
    }
}

// HTTP implementation of the MenuSource boundary
//
// Talks to the conventional REST data-access layer. Responses arrive in the
// standard `{ "success": ..., "data": ... }` envelope; this layer unwraps it
// so the rest of the crate only sees canonical records.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::error::MenuError;
use crate::menu::types::{MenuNode, PermissionRow, Role};
use crate::source::MenuSource;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

pub struct HttpMenuSource {
    client: reqwest::Client,
    base_url: Url,
    bearer_token: Option<String>,
}

impl HttpMenuSource {
    /// `base_url` should end with a trailing slash when it carries a path
    /// segment, e.g. `https://api.example.com/api/`.
    pub fn new(base_url: &str) -> Result<Self, MenuError> {
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
            bearer_token: None,
        })
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, MenuError> {
        let url = self.base_url.join(path)?;
        tracing::debug!(%url, "fetching from menu data-access layer");

        let mut request = self.client.get(url);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?.error_for_status()?;
        let envelope: Envelope<T> = response.json().await?;

        if !envelope.success {
            return Err(MenuError::Upstream(
                envelope.error.unwrap_or_else(|| "unknown upstream error".to_string()),
            ));
        }

        envelope
            .data
            .ok_or_else(|| MenuError::Upstream("missing data in response".to_string()))
    }
}

#[async_trait]
impl MenuSource for HttpMenuSource {
    async fn fetch_menu(&self) -> Result<Vec<MenuNode>, MenuError> {
        self.get_json("menu/structure").await
    }

    async fn fetch_permissions(&self, role: &Role) -> Result<Vec<PermissionRow>, MenuError> {
        self.get_json(&format!("menu/permissions/{}", role)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_unwraps_data() {
        let envelope: Envelope<Vec<MenuNode>> = serde_json::from_str(
            r#"{"success": true, "data": [{"id": "dashboard", "internalId": 1, "name": "Dashboard", "path": "/dashboard"}]}"#,
        )
        .unwrap();
        assert!(envelope.success);
        let nodes = envelope.data.unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].internal_id, Some(1));
    }

    #[test]
    fn test_envelope_failure_shape() {
        let envelope: Envelope<Vec<PermissionRow>> =
            serde_json::from_str(r#"{"success": false, "error": "forbidden"}"#).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.error.as_deref(), Some("forbidden"));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(HttpMenuSource::new("not a url").is_err());
    }
}

use async_trait::async_trait;
use kb_core::{Error, Result};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Ordered form fields sent to the automation webhook as a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookRequest {
    fields: Vec<(String, String)>,
}

impl WebhookRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.push((key.to_string(), value.into()));
        self
    }

    /// Adds the field only when a value is present.
    pub fn optional_field(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.field(key, value),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

#[async_trait]
pub trait Webhook: Send + Sync {
    /// Delivers the fields and returns the webhook's reply body.
    async fn submit(&self, request: &WebhookRequest) -> Result<String>;
}

/// Calls the webhook with a GET and query-string encoded fields.
#[derive(Debug, Clone)]
pub struct HttpWebhook {
    client: Client,
    url: Url,
}

impl HttpWebhook {
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;
        Ok(Self {
            client: Client::new(),
            url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Webhook for HttpWebhook {
    async fn submit(&self, request: &WebhookRequest) -> Result<String> {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .extend_pairs(request.fields().iter().map(|(k, v)| (k.as_str(), v.as_str())));
        debug!("Calling webhook {}", self.url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Webhook(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Webhook(format!("webhook answered {}", status)));
        }
        response.text().await.map_err(|e| Error::Webhook(e.to_string()))
    }
}

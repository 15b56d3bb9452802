//! Delivering replies to Slack.

use async_trait::async_trait;
use tracing::debug;

use crate::error::ServerResult;
use crate::slack::SlackMessage;

/// Where slash-command replies go.
#[async_trait]
pub trait ResponseSink: Send + Sync {
    async fn post(&self, response_url: &str, message: &SlackMessage) -> ServerResult<()>;
}

/// Posts replies as JSON to the command's `response_url`.
#[derive(Clone, Debug, Default)]
pub struct HttpResponseSink {
    client: reqwest::Client,
}

impl HttpResponseSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResponseSink for HttpResponseSink {
    async fn post(&self, response_url: &str, message: &SlackMessage) -> ServerResult<()> {
        debug!(url = response_url, "posting reply to slack");
        self.client
            .post(response_url)
            .json(message)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

//! Slack incoming-webhook notifier.

use super::{NotificationSink, RunNotice};
use crate::core::RunResult;
use crate::errors::NotifyError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the webhook URL.
pub const WEBHOOK_URL_ENV: &str = "STAGECOACH_SLACK_WEBHOOK_URL";

/// Environment variable holding the target channel override.
pub const CHANNEL_ENV: &str = "STAGECOACH_SLACK_CHANNEL";

/// Configuration for the Slack notifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    /// The incoming-webhook URL.
    pub webhook_url: String,
    /// Channel override, when the webhook default is not wanted.
    #[serde(default)]
    pub channel: Option<String>,
    /// Username shown on the message.
    #[serde(default = "default_username")]
    pub username: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
}

fn default_username() -> String {
    "stagecoach".to_string()
}

fn default_timeout() -> f64 {
    10.0
}

impl SlackConfig {
    /// Creates a configuration for the given webhook URL.
    #[must_use]
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            channel: None,
            username: default_username(),
            timeout_seconds: default_timeout(),
        }
    }

    /// Loads the configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the webhook URL variable is unset or empty.
    pub fn from_env() -> Result<Self, NotifyError> {
        let webhook_url = std::env::var(WEBHOOK_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                NotifyError::InvalidConfig(format!("{WEBHOOK_URL_ENV} is not set"))
            })?;

        let mut config = Self::new(webhook_url);
        if let Ok(channel) = std::env::var(CHANNEL_ENV) {
            if !channel.trim().is_empty() {
                config.channel = Some(channel);
            }
        }
        Ok(config)
    }

    /// Sets the channel override.
    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Sets the username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Gets the timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_seconds)
    }
}

/// A notifier posting run results to a Slack incoming webhook.
#[derive(Debug, Clone)]
pub struct SlackNotifier {
    config: SlackConfig,
    client: reqwest::Client,
}

impl SlackNotifier {
    /// Creates a notifier from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the webhook URL is empty or the HTTP client
    /// cannot be built.
    pub fn new(config: SlackConfig) -> Result<Self, NotifyError> {
        if config.webhook_url.trim().is_empty() {
            return Err(NotifyError::InvalidConfig(
                "webhook URL cannot be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self { config, client })
    }

    /// Creates a notifier configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment configuration is missing.
    pub fn from_env() -> Result<Self, NotifyError> {
        Self::new(SlackConfig::from_env()?)
    }

    fn color(result: RunResult) -> &'static str {
        match result {
            RunResult::Success => "good",
            RunResult::Failure => "danger",
        }
    }

    /// Builds the webhook payload for a notice.
    #[must_use]
    pub fn payload(&self, notice: &RunNotice) -> serde_json::Value {
        let mut text = format!(
            "{} run {}: {} after {:.0} ms",
            notice.pipeline,
            notice.run_id,
            notice.result,
            notice.duration_ms,
        );
        if let Some(ref stage) = notice.failed_stage {
            text.push_str(&format!(" (failed in {stage})"));
        }

        let mut payload = serde_json::json!({
            "username": self.config.username,
            "attachments": [{
                "color": Self::color(notice.result),
                "text": text,
            }],
        });
        if let Some(ref channel) = self.config.channel {
            payload["channel"] = serde_json::json!(channel);
        }
        payload
    }
}

#[async_trait]
impl NotificationSink for SlackNotifier {
    async fn notify(&self, notice: &RunNotice) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(&self.payload(notice))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        tracing::debug!(
            pipeline = %notice.pipeline,
            run_id = %notice.run_id,
            result = %notice.result,
            "Slack notification delivered"
        );
        Ok(())
    }
}

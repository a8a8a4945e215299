use anyhow::Context;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::NotifyError;
use crate::report::CheckinReport;

const SEND_PATH: &str = "/send";
const LINE_BREAK: &str = "<br>";
const TEMPLATE: &str = "markdown";

/// Body of a PushPlus `/send` call.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PushMessage<'a> {
    pub token: &'a str,
    pub title: &'a str,
    pub content: String,
    pub template: &'a str,
}

impl<'a> PushMessage<'a> {
    pub fn new(token: &'a str, report: &'a CheckinReport) -> Self {
        Self {
            token,
            title: report.title(),
            content: report.joined(LINE_BREAK), // markdown template, <br> between lines
            template: TEMPLATE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Skipped,
    Sent,
}

pub struct PushPlus {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl PushPlus {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build PushPlus http client")?;
        Ok(Self {
            client,
            base_url: config.pushplus_base_url.clone(),
            token: config.notify_token.clone(),
        })
    }

    /// Posts the report once. The provider's answer is not inspected; only
    /// transport failures come back as errors.
    pub async fn notify(&self, report: Option<&CheckinReport>) -> Result<Delivery, NotifyError> {
        let (Some(token), Some(report)) = (self.token.as_deref(), report) else {
            info!("Nothing to push, skip notify");
            return Ok(Delivery::Skipped);
        };

        let url = format!("{}{}", self.base_url, SEND_PATH);
        // .json() also sets content-type: application/json
        let res = self
            .client
            .post(&url)
            .json(&PushMessage::new(token, report))
            .send()
            .await
            .map_err(|source| NotifyError::Request {
                url: url.clone(),
                source,
            })?;
        // body is never read, a rejected token still counts as sent
        debug!("PushPlus status: {}", res.status());
        Ok(Delivery::Sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunContext;
    use serde_json::json;

    #[test]
    fn payload_shape() {
        let report = CheckinReport::failure(&"boom", &RunContext::default());
        let body = serde_json::to_value(PushMessage::new("tok", &report)).unwrap();
        assert_eq!(
            body,
            json!({
                "token": "tok",
                "title": "Checkin Error",
                "content": "Checkin Error<br>boom<br><undefined/undefined>",
                "template": "markdown",
            })
        );
    }

    #[tokio::test]
    async fn no_token_skips() {
        let notifier = PushPlus::new(&Config::default()).unwrap();
        let report = CheckinReport::failure(&"boom", &RunContext::default());
        let delivery = notifier.notify(Some(&report)).await.unwrap();
        assert_eq!(delivery, Delivery::Skipped);
    }

    #[tokio::test]
    async fn no_report_skips() {
        let notifier = PushPlus::new(&Config::default().with_notify_token("tok")).unwrap();
        assert_eq!(notifier.notify(None).await.unwrap(), Delivery::Skipped);
    }
}

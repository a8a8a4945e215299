use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{Config, RunContext};
use crate::error::CheckinError;
use crate::report::{CheckinReport, LeftDays};

const CHECKIN_PATH: &str = "/api/user/checkin";
const STATUS_PATH: &str = "/api/user/status";
const REFERER_PATH: &str = "/console/checkin";
const CHECKIN_BODY: &str = r#"{"token":"glados.one"}"#;
const USER_AGENT: &str = "Mozilla/4.0 (compatible; MSIE 7.0; Windows NT 6.0)";

/// Loose property lookup: only objects have fields, every other shape reads as absent.
fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_object().and_then(|map| map.get(key))
}

/// Body of the check-in call. Only `message` is read.
#[derive(Debug)]
pub struct CheckinResponse(Value);

impl CheckinResponse {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    pub fn message(&self) -> Option<&Value> {
        field(&self.0, "message")
    }
}

/// Body of the status query. `data` must be present and non-null; its
/// `leftDays` may be missing.
#[derive(Debug)]
pub struct StatusResponse(Value);

impl StatusResponse {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    pub fn data(&self) -> Option<&Value> {
        field(&self.0, "data").filter(|d| !d.is_null())
    }

    pub fn left_days(&self) -> Option<&Value> {
        self.data().and_then(|d| field(d, "leftDays"))
    }
}

pub struct Glados {
    client: Client,
    base_url: String,
    cookie: Option<String>,
    context: RunContext,
}

impl Glados {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build GLaDOS http client")?;
        Ok(Self {
            client,
            base_url: config.glados_base_url.clone(),
            cookie: config.cookie.clone(),
            context: config.run_context.clone(),
        })
    }

    /// Runs the check-in and status query once. `None` means no cookie was configured.
    pub async fn checkin(&self) -> Option<CheckinReport> {
        let Some(cookie) = self.cookie.as_deref() else {
            info!("GLADOS not set, skip checkin");
            return None;
        };

        let report = match self.checkin_with(cookie).await {
            Ok((checkin, status)) => CheckinReport::success(
                checkin.message(),
                LeftDays::coerce(status.left_days()),
            ),
            Err(e) => {
                warn!("Checkin failed: {}", e);
                CheckinReport::failure(&e, &self.context)
            }
        };
        info!("{:?}", report.lines());
        Some(report)
    }

    async fn checkin_with(
        &self,
        cookie: &str,
    ) -> Result<(CheckinResponse, StatusResponse), CheckinError> {
        let headers = self.build_base_request_headers(cookie)?;

        let checkin_url = format!("{}{}", self.base_url, CHECKIN_PATH);
        let mut checkin_headers = headers.clone();
        // only the POST carries a body
        checkin_headers.insert(
            HeaderName::from_static("content-type"),
            HeaderValue::from_static("application/json"),
        );
        let res = self
            .client
            .post(&checkin_url)
            .headers(checkin_headers)
            .body(CHECKIN_BODY)
            .send()
            .await
            .map_err(|source| CheckinError::Request {
                url: checkin_url.clone(),
                source,
            })?;
        debug!("Checkin status: {}", res.status());
        let checkin = read_json(res, &checkin_url).await?;

        let url = format!("{}{}", self.base_url, STATUS_PATH);
        let res = self
            .client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|source| CheckinError::Request {
                url: url.clone(),
                source,
            })?;
        debug!("Status query status: {}", res.status());
        let status = StatusResponse::new(read_json(res, &url).await?);

        // both calls are made before either body is looked into
        if checkin.is_null() {
            return Err(CheckinError::NullBody { url: checkin_url });
        }
        if status.data().is_none() {
            return Err(CheckinError::MissingStatusData);
        }
        Ok((CheckinResponse::new(checkin), status))
    }

    fn build_base_request_headers(&self, cookie: &str) -> Result<HeaderMap, CheckinError> {
        let mut headers = HeaderMap::new();
        // old IE agent, the one the service has always accepted
        headers.insert(
            HeaderName::from_static("user-agent"),
            HeaderValue::from_static(USER_AGENT),
        );

        let referer = format!("{}{}", self.base_url, REFERER_PATH);
        headers.insert(
            HeaderName::from_static("referer"),
            HeaderValue::from_str(&referer).map_err(|_| CheckinError::InvalidHeader("referer"))?,
        );
        // raw cookie string from env, passed through untouched
        headers.insert(
            HeaderName::from_static("cookie"),
            HeaderValue::from_str(cookie).map_err(|_| CheckinError::InvalidHeader("cookie"))?,
        );
        Ok(headers)
    }
}

// Status codes are ignored: any JSON body is taken at face value.
async fn read_json(res: reqwest::Response, url: &str) -> Result<Value, CheckinError> {
    let body = res.text().await.map_err(|source| CheckinError::Request {
        url: url.to_string(),
        source,
    })?;
    // untyped on purpose, shape checks happen at lookup time
    serde_json::from_str(&body).map_err(|source| CheckinError::Decode {
        url: url.to_string(),
        source,
    })
}

use crate::drawing_support::MAX_STRINGABLE_SECS;
use core::time::Duration;
use derivative::Derivative;
use log::{info, warn};
use reqwest::{
    Client, ClientBuilder, Method, RequestBuilder, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue, InvalidHeaderValue},
};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use time::{OffsetDateTime, macros::format_description};

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct TeamRef {
    pub name: String,
}

#[derive(Derivative, Serialize, Deserialize)]
#[derivative(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[serde(from = "String", into = "String")]
pub enum MatchStatus {
    NotStarted,
    HalfTime,
    Finished,
    #[derivative(Default)]
    InProgress,
}

impl From<String> for MatchStatus {
    fn from(code: String) -> Self {
        match code.as_str() {
            "NS" => Self::NotStarted,
            "HT" => Self::HalfTime,
            "FT" => Self::Finished,
            _ => Self::InProgress,
        }
    }
}

impl From<MatchStatus> for String {
    fn from(status: MatchStatus) -> Self {
        match status {
            MatchStatus::NotStarted => "NS",
            MatchStatus::HalfTime => "HT",
            MatchStatus::Finished => "FT",
            MatchStatus::InProgress => "LIVE",
        }
        .to_string()
    }
}

impl core::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::Finished => write!(f, "Finished"),
            Self::HalfTime => write!(f, "Half Time"),
            Self::NotStarted => write!(f, "Not Started"),
            Self::InProgress => write!(f, "In Progress"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    pub id: u32,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
    #[serde(deserialize_with = "deser_with_null_to_default")]
    pub home_score: u16,
    #[serde(deserialize_with = "deser_with_null_to_default")]
    pub away_score: u16,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(default, deserialize_with = "deser_with_null_to_default")]
    pub status: MatchStatus,
    #[serde(default, deserialize_with = "deser_with_null_to_default")]
    pub current_time: u32,
    #[serde(default, deserialize_with = "deser_with_null_to_default")]
    pub referees: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "deser_with_null_to_default")]
    pub events: Vec<serde_json::Value>,
}

impl MatchSummary {
    pub fn time_display(&self) -> String {
        match self.status {
            MatchStatus::NotStarted => self
                .date
                .format(format_description!("[hour]:[minute]"))
                .unwrap_or_default(),
            MatchStatus::Finished => "FT".to_string(),
            MatchStatus::HalfTime | MatchStatus::InProgress => {
                let secs = self.current_time.min(MAX_STRINGABLE_SECS);
                format!("{}:{:02}", secs / 60, secs % 60)
            }
        }
    }

    pub fn date_display(&self) -> String {
        self.date
            .format(format_description!(
                "[month repr:short] [day], [year]"
            ))
            .unwrap_or_default()
    }

    pub fn score_display(&self) -> String {
        format!("{} - {}", self.home_score, self.away_score)
    }

    pub fn teams_display(&self) -> String {
        format!("{} vs {}", self.home_team.name, self.away_team.name)
    }
}

// Deserialize noramlly, but use the value's default if `null` is found
fn deser_with_null_to_default<'de, D, T: Deserialize<'de> + Default>(
    deserializer: D,
) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(|val| val.unwrap_or_default())
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to the stats backend failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("The stats backend answered with status {0}")]
    BadStatus(StatusCode),
    #[error("The access token can't be sent as a header: {0}")]
    InvalidToken(#[from] InvalidHeaderValue),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

pub struct StatsApiClient {
    base_url: String,
    access_token: Option<String>,
    client: Client,
}

impl StatsApiClient {
    pub fn new(
        base_url: &str,
        access_token: Option<&str>,
        require_https: bool,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let client = ClientBuilder::new()
            .https_only(require_https)
            .timeout(timeout)
            .build()?;

        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            base_url,
            access_token: access_token
                .filter(|t| !t.is_empty())
                .map(|t| t.to_string()),
            client,
        })
    }

    pub fn matches_url(&self) -> String {
        format!("{}matches/", self.base_url)
    }

    /// Single attempt, no retry
    pub fn list_matches(
        &self,
    ) -> impl std::future::Future<Output = ApiResult<Vec<MatchSummary>>> + use<> {
        let url = self.matches_url();
        let request = authenticated_request(&self.client, Method::GET, &url, &self.access_token);

        async move {
            let response = request?.send().await?;

            if response.status() == StatusCode::OK {
                let matches = response.json::<Vec<MatchSummary>>().await?;
                info!("Fetched {} matches from {url}", matches.len());
                Ok(matches)
            } else {
                warn!("Fetching matches failed, response: {response:?}");
                Err(ApiError::BadStatus(response.status()))
            }
        }
    }
}

fn authenticated_request(
    client: &Client,
    method: Method,
    url: &str,
    access_token: &Option<String>,
) -> ApiResult<RequestBuilder> {
    let mut request = client
        .request(method, url)
        .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(token) = access_token {
        request = request.header(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
    }
    Ok(request)
}

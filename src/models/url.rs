use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened URL as held by the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: u64,
}

impl LinkRecord {
    pub fn new(short_code: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
            original_url: original_url.into(),
            created_at: Utc::now(),
            clicks: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub custom_code: Option<String>,
}

impl CreateUrlRequest {
    /// Requested code, treating an empty string as "generate one for me"
    pub fn requested_code(&self) -> Option<&str> {
        self.custom_code.as_deref().filter(|code| !code.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UrlInfoResponse {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: u64,
}

impl From<LinkRecord> for UrlInfoResponse {
    fn from(record: LinkRecord) -> Self {
        Self {
            short_code: record.short_code,
            original_url: record.original_url,
            created_at: record.created_at,
            clicks: record.clicks,
        }
    }
}

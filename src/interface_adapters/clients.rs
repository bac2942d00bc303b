use crate::domain::{DirectoryError, GuestDirectory, GuestPage};
use crate::interface_adapters::protocol::{
    ApiErrorResponse, EventDetailResponse, GuestListResponse,
};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, InvalidHeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

// Thin wrapper around reqwest for the event platform's guest endpoints.
// The session cookie stands in for the browser's logged-in credentials and is
// sent on every request.
#[derive(Clone)]
pub struct LumaClient {
    http: Client,
    base_url: Url,
}

#[derive(Debug, Error)]
pub enum ClientInitError {
    #[error("invalid api base url: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("invalid session cookie: {0}")]
    Cookie(#[from] InvalidHeaderValue),
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

impl LumaClient {
    pub fn new(
        base_url: &str,
        session_cookie: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ClientInitError> {
        let mut base_url = Url::parse(base_url)?;
        // Joining relative endpoints onto a path without a trailing slash would drop
        // its last segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        if let Some(cookie) = session_cookie {
            let mut value = HeaderValue::from_str(cookie)?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let http = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Downloads an event page so its metadata can be inspected.
    pub async fn fetch_page_html(&self, page_url: &str) -> Result<String, DirectoryError> {
        let res = self
            .http
            .get(page_url)
            .send()
            .await
            .map_err(|err| DirectoryError::Transport(err.to_string()))?;
        let status = res.status();
        if !status.is_success() {
            return Err(DirectoryError::Upstream {
                status: status.as_u16(),
                message: None,
            });
        }
        res.text()
            .await
            .map_err(|err| DirectoryError::Decode(err.to_string()))
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, DirectoryError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|err| DirectoryError::Transport(format!("invalid endpoint url: {err}")))?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, DirectoryError> {
        let res = self
            .http
            .get(url.as_str())
            .send()
            .await
            .map_err(|err| DirectoryError::Transport(err.to_string()))?;
        let status = res.status();

        // Keep upstream status/message so callers can tell auth failures from outages.
        if !status.is_success() {
            let message = res
                .json::<ApiErrorResponse>()
                .await
                .ok()
                .map(|payload| payload.message);
            return Err(DirectoryError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        res.json::<T>()
            .await
            .map_err(|err| DirectoryError::Decode(err.to_string()))
    }
}

#[async_trait]
impl GuestDirectory for LumaClient {
    async fn fetch_ticket_key(&self, event_id: &str) -> Result<Option<String>, DirectoryError> {
        let url = self.endpoint("event/get", &[("event_api_id", event_id)])?;
        let res: EventDetailResponse = self.get_json(url).await?;
        Ok(res.into_ticket_key())
    }

    async fn fetch_guest_page(
        &self,
        event_id: &str,
        ticket_key: &str,
        page_size: u32,
        cursor: Option<&str>,
    ) -> Result<GuestPage, DirectoryError> {
        let page_size = page_size.to_string();
        let mut query = vec![
            ("event_api_id", event_id),
            ("ticket_key", ticket_key),
            ("pagination_limit", page_size.as_str()),
        ];
        if let Some(cursor) = cursor {
            query.push(("pagination_cursor", cursor));
        }

        let url = self.endpoint("event/get-guest-list", &query)?;
        let res: GuestListResponse = self.get_json(url).await?;
        Ok(res.into())
    }
}

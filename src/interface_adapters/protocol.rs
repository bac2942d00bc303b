use serde::Deserialize;

use crate::domain::{GuestPage, GuestRecord};

// Body of `GET /event/get`. Only the ticket key is of interest here.
#[derive(Debug, Deserialize)]
pub struct EventDetailResponse {
    #[serde(default)]
    pub guest_data: Option<EventGuestData>,
}

#[derive(Debug, Deserialize)]
pub struct EventGuestData {
    #[serde(default)]
    pub ticket_key: Option<String>,
}

impl EventDetailResponse {
    pub fn into_ticket_key(self) -> Option<String> {
        self.guest_data.and_then(|data| data.ticket_key)
    }
}

// Body of `GET /event/get-guest-list`.
#[derive(Debug, Deserialize)]
pub struct GuestListResponse {
    pub entries: Vec<GuestRecord>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl From<GuestListResponse> for GuestPage {
    fn from(res: GuestListResponse) -> Self {
        GuestPage {
            entries: res.entries,
            has_more: res.has_more,
            next_cursor: res.next_cursor,
        }
    }
}

// Error envelope the API returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub message: String,
}

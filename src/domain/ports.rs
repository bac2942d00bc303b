use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::entities::{GuestPage, StoredGuestState};
use crate::domain::errors::{DirectoryError, StoreError};

// Port for the remote event platform. Use cases depend on this trait, not on the
// reqwest client, so dependencies point inwards.
#[async_trait]
pub trait GuestDirectory: Send + Sync {
    // Resolves the per-event access token; `None` when the event exposes none.
    async fn fetch_ticket_key(&self, event_id: &str) -> Result<Option<String>, DirectoryError>;

    async fn fetch_guest_page(
        &self,
        event_id: &str,
        ticket_key: &str,
        page_size: u32,
        cursor: Option<&str>,
    ) -> Result<GuestPage, DirectoryError>;
}

// Port for the synced per-guest key-value store. Writes are per key; there is no
// multi-key transaction and no compare-and-swap.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    // Missing keys are simply absent from the returned map.
    async fn get_many(
        &self,
        keys: &[String],
    ) -> Result<HashMap<String, StoredGuestState>, StoreError>;

    async fn set(&self, key: &str, value: StoredGuestState) -> Result<(), StoreError>;
}

// Port for wherever an exported document is handed off to.
#[async_trait]
pub trait ClipboardSink: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), String>;
}

// Full guest list workflow: page context, ticket key, pagination, favorites, order.

use crate::domain::{FavoriteStore, GuestDirectory, GuestListError, MergedGuest};
use crate::use_cases::favorites::merge_favorites;
use crate::use_cases::fetch_guests::{FetchGuestsUseCase, FetchSettings};
use crate::use_cases::ordering::sort_guests;
use crate::use_cases::page_context::extract_event_id;

/// Guest list use case with injected directory and favorite store.
pub struct GetGuestListUseCase<D, S> {
    pub fetch: FetchGuestsUseCase<D>,
    pub store: S,
}

impl<D, S> GetGuestListUseCase<D, S>
where
    D: GuestDirectory,
    S: FavoriteStore,
{
    pub fn new(directory: D, store: S, settings: FetchSettings) -> Self {
        Self {
            fetch: FetchGuestsUseCase {
                directory,
                settings,
            },
            store,
        }
    }

    /// Runs the whole flow for the event the page HTML points at.
    pub async fn execute_for_page(&self, page_html: &str) -> Result<Vec<MergedGuest>, GuestListError> {
        let event_id = extract_event_id(page_html).ok_or(GuestListError::MissingEventId)?;
        self.execute(&event_id).await
    }

    #[tracing::instrument(name = "get_guest_list", skip(self))]
    pub async fn execute(&self, event_id: &str) -> Result<Vec<MergedGuest>, GuestListError> {
        if event_id.trim().is_empty() {
            return Err(GuestListError::MissingEventId);
        }

        let ticket_key = self.fetch.fetch_ticket_key(event_id).await?;
        let guests = self.fetch.fetch_guest_list(event_id, &ticket_key).await?;

        let mut merged = merge_favorites(&self.store, guests).await?;
        sort_guests(&mut merged);

        tracing::info!(
            guests = merged.len(),
            favorited = merged.iter().filter(|g| g.favorited()).count(),
            "guest list ready."
        );
        Ok(merged)
    }
}

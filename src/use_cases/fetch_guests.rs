// Ticket key resolution and sequential pagination over the remote guest list.

use std::time::Duration;

use crate::domain::{DirectoryError, GuestDirectory, GuestListError, GuestPage, GuestRecord};

/// Knobs for walking the guest list.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Entries requested per page.
    pub page_size: u32,
    /// Pause before each follow-up page request.
    pub page_delay: Duration,
    /// Extra attempts per page on transient failures (0 fails fast).
    pub max_retries: u32,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            page_size: 100,
            page_delay: Duration::from_millis(10),
            max_retries: 0,
        }
    }
}

/// Guest list fetch with an injected directory.
pub struct FetchGuestsUseCase<D> {
    pub directory: D,
    pub settings: FetchSettings,
}

impl<D> FetchGuestsUseCase<D>
where
    D: GuestDirectory,
{
    #[tracing::instrument(name = "fetch_ticket_key", skip(self))]
    pub async fn fetch_ticket_key(&self, event_id: &str) -> Result<String, GuestListError> {
        let ticket_key = self
            .directory
            .fetch_ticket_key(event_id)
            .await?
            .filter(|key| !key.is_empty())
            .ok_or(GuestListError::MissingTicketKey)?;

        tracing::debug!("ticket key resolved.");
        Ok(ticket_key)
    }

    /// Walks every page in server order. Any failed page aborts the whole fetch;
    /// nothing partial is returned.
    #[tracing::instrument(name = "fetch_guest_list", skip(self, ticket_key))]
    pub async fn fetch_guest_list(
        &self,
        event_id: &str,
        ticket_key: &str,
    ) -> Result<Vec<GuestRecord>, GuestListError> {
        let mut guests = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            if cursor.is_some() {
                tokio::time::sleep(self.settings.page_delay).await;
            }

            let page = self
                .fetch_page_with_retry(event_id, ticket_key, cursor.as_deref())
                .await?;
            pages += 1;
            tracing::debug!(
                page = pages,
                entries = page.entries.len(),
                has_more = page.has_more,
                "guest page received."
            );

            guests.extend(page.entries);

            if !page.has_more {
                break;
            }
            match page.next_cursor.filter(|next| !next.is_empty()) {
                Some(next) => cursor = Some(next),
                None => {
                    return Err(DirectoryError::Decode(
                        "page reported more results without a next cursor".to_string(),
                    )
                    .into());
                }
            }
        }

        tracing::info!(pages, guests = guests.len(), "guest list fetched.");
        Ok(guests)
    }

    async fn fetch_page_with_retry(
        &self,
        event_id: &str,
        ticket_key: &str,
        cursor: Option<&str>,
    ) -> Result<GuestPage, DirectoryError> {
        let mut attempt = 0;
        loop {
            let result = self
                .directory
                .fetch_guest_page(event_id, ticket_key, self.settings.page_size, cursor)
                .await;

            match result {
                Err(err) if err.is_transient() && attempt < self.settings.max_retries => {
                    attempt += 1;
                    tracing::warn!(error = %err, attempt, "guest page request failed, retrying.");
                    tokio::time::sleep(self.settings.page_delay * attempt).await;
                }
                other => return other,
            }
        }
    }
}

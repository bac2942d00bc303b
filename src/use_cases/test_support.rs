use std::collections::{HashMap, VecDeque};
use std::ops::Range;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    ClipboardSink, DirectoryError, FavoriteStore, GuestDirectory, GuestPage, GuestRecord,
    StoreError, StoredGuestState,
};

pub(crate) fn guest(id: &str, name: Option<&str>) -> GuestRecord {
    GuestRecord {
        api_id: id.to_string(),
        name: name.map(str::to_string),
        ..GuestRecord::default()
    }
}

// Page of sequentially numbered guests; `has_more` follows whether a cursor is given.
pub(crate) fn guests_page(ids: Range<usize>, next_cursor: Option<&str>) -> GuestPage {
    GuestPage {
        entries: ids
            .map(|i| guest(&format!("gst-{i:03}"), Some(&format!("Guest {i:03}"))))
            .collect(),
        has_more: next_cursor.is_some(),
        next_cursor: next_cursor.map(str::to_string),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PageRequest {
    pub event_id: String,
    pub ticket_key: String,
    pub page_size: u32,
    pub cursor: Option<String>,
    pub requested_at: tokio::time::Instant,
}

// Directory fake that serves scripted pages in order and records every call.
#[derive(Clone)]
pub(crate) struct ScriptedDirectory {
    ticket: Result<Option<String>, DirectoryError>,
    pages: Arc<Mutex<VecDeque<Result<GuestPage, DirectoryError>>>>,
    ticket_requests: Arc<Mutex<Vec<String>>>,
    page_requests: Arc<Mutex<Vec<PageRequest>>>,
}

impl ScriptedDirectory {
    pub(crate) fn new(ticket_key: Option<&str>) -> Self {
        Self {
            ticket: Ok(ticket_key.map(str::to_string)),
            pages: Arc::new(Mutex::new(VecDeque::new())),
            ticket_requests: Arc::new(Mutex::new(Vec::new())),
            page_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn with_page(self, page: Result<GuestPage, DirectoryError>) -> Self {
        self.pages.lock().expect("pages mutex poisoned").push_back(page);
        self
    }

    pub(crate) fn with_ticket_error(mut self, err: DirectoryError) -> Self {
        self.ticket = Err(err);
        self
    }

    pub(crate) fn ticket_requests(&self) -> Vec<String> {
        self.ticket_requests
            .lock()
            .expect("ticket mutex poisoned")
            .clone()
    }

    pub(crate) fn page_requests(&self) -> Vec<PageRequest> {
        self.page_requests
            .lock()
            .expect("requests mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl GuestDirectory for ScriptedDirectory {
    async fn fetch_ticket_key(&self, event_id: &str) -> Result<Option<String>, DirectoryError> {
        self.ticket_requests
            .lock()
            .expect("ticket mutex poisoned")
            .push(event_id.to_string());
        self.ticket.clone()
    }

    async fn fetch_guest_page(
        &self,
        event_id: &str,
        ticket_key: &str,
        page_size: u32,
        cursor: Option<&str>,
    ) -> Result<GuestPage, DirectoryError> {
        self.page_requests
            .lock()
            .expect("requests mutex poisoned")
            .push(PageRequest {
                event_id: event_id.to_string(),
                ticket_key: ticket_key.to_string(),
                page_size,
                cursor: cursor.map(str::to_string),
                requested_at: tokio::time::Instant::now(),
            });
        self.pages
            .lock()
            .expect("pages mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(DirectoryError::Decode("no scripted page left".to_string())))
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub get: bool,
    pub set: bool,
}

#[derive(Clone)]
pub(crate) struct RecordingFavoriteStore {
    entries: Arc<Mutex<HashMap<String, StoredGuestState>>>,
    get_calls: Arc<Mutex<Vec<Vec<String>>>>,
    failures: FailureFlags,
}

impl RecordingFavoriteStore {
    pub(crate) fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            get_calls: Arc::new(Mutex::new(Vec::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn insert_test_state(&self, key: impl Into<String>, state: StoredGuestState) {
        let mut guard = self.entries.lock().expect("entries mutex poisoned");
        guard.insert(key.into(), state);
    }

    pub(crate) fn insert_test_favorite(&self, key: impl Into<String>, favorited: bool) {
        self.insert_test_state(
            key,
            StoredGuestState {
                favorited: Some(favorited),
                ..StoredGuestState::default()
            },
        );
    }

    pub(crate) fn get_test_state(&self, key: &str) -> Option<StoredGuestState> {
        let guard = self.entries.lock().expect("entries mutex poisoned");
        guard.get(key).cloned()
    }

    pub(crate) fn get_calls(&self) -> Vec<Vec<String>> {
        self.get_calls.lock().expect("calls mutex poisoned").clone()
    }
}

#[async_trait]
impl FavoriteStore for RecordingFavoriteStore {
    async fn get_many(
        &self,
        keys: &[String],
    ) -> Result<HashMap<String, StoredGuestState>, StoreError> {
        self.get_calls
            .lock()
            .expect("calls mutex poisoned")
            .push(keys.to_vec());
        if self.failures.get {
            return Err(StoreError::Read("get failed".to_string()));
        }

        let guard = self.entries.lock().expect("entries mutex poisoned");
        Ok(keys
            .iter()
            .filter_map(|key| guard.get(key).map(|state| (key.clone(), state.clone())))
            .collect())
    }

    async fn set(&self, key: &str, value: StoredGuestState) -> Result<(), StoreError> {
        if self.failures.set {
            return Err(StoreError::Write("set failed".to_string()));
        }

        let mut guard = self.entries.lock().expect("entries mutex poisoned");
        guard.insert(key.to_string(), value);
        Ok(())
    }
}

// Clipboard fake that keeps every accepted document.
pub(crate) struct RecordingClipboard {
    accept: bool,
    written: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    pub(crate) fn accepting() -> Self {
        Self {
            accept: true,
            written: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn rejecting() -> Self {
        Self {
            accept: false,
            written: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn written(&self) -> Vec<String> {
        self.written.lock().expect("clipboard mutex poisoned").clone()
    }
}

#[async_trait]
impl ClipboardSink for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<(), String> {
        if !self.accept {
            return Err("clipboard unavailable".to_string());
        }
        self.written
            .lock()
            .expect("clipboard mutex poisoned")
            .push(text.to_string());
        Ok(())
    }
}

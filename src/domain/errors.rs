use thiserror::Error;

// Failures talking to the remote guest directory.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DirectoryError {
    #[error("guest api transport error: {0}")]
    Transport(String),
    #[error("guest api upstream error {status}{}", upstream_suffix(.message))]
    Upstream { status: u16, message: Option<String> },
    #[error("guest api response decode error: {0}")]
    Decode(String),
}

impl DirectoryError {
    /// Transport hiccups and 5xx responses may succeed when re-requested.
    pub fn is_transient(&self) -> bool {
        match self {
            DirectoryError::Transport(_) => true,
            DirectoryError::Upstream { status, .. } => *status >= 500,
            DirectoryError::Decode(_) => false,
        }
    }
}

fn upstream_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}

// Failures reported by the favorite key-value store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Error fetching data from storage: {0}")]
    Read(String),
    #[error("Error setting data: {0}")]
    Write(String),
}

// Domain-level errors for the guest list workflow. Any of these aborts the flow.
#[derive(Debug, Error)]
pub enum GuestListError {
    #[error("No event ID")]
    MissingEventId,
    #[error("No ticket key")]
    MissingTicketKey,
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

// Domain layer: guest records, local favorite state and the ports around them.

pub mod entities;
pub mod errors;
pub mod ports;

pub use entities::{GuestPage, GuestRecord, MergedGuest, SocialPlatform, StoredGuestState};
pub use errors::{DirectoryError, GuestListError, StoreError};
pub use ports::{ClipboardSink, FavoriteStore, GuestDirectory};

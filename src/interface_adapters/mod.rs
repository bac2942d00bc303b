// Interface adapters: the guest API client, its wire protocol, stores and sinks.

pub mod clients;
pub mod clipboard;
pub mod protocol;
pub mod stores;

pub use clients::{ClientInitError, LumaClient};
pub use clipboard::{FileSink, StdoutSink, SystemClipboard};
pub use stores::{InMemoryFavoriteStore, JsonFileFavoriteStore};

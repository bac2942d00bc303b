// Use cases layer: the guest list pipeline and the favorite toggle.

pub mod csv_export;
pub mod favorites;
pub mod fetch_guests;
pub mod guest_list;
pub mod ordering;
pub mod page_context;
pub mod view_model;

#[cfg(test)]
pub(crate) mod test_support;

pub use csv_export::{CSV_HEADER, copy_guest_csv, to_csv};
pub use favorites::{merge_favorites, toggle_favorite};
pub use fetch_guests::{FetchGuestsUseCase, FetchSettings};
pub use guest_list::GetGuestListUseCase;
pub use ordering::sort_guests;
pub use page_context::extract_event_id;
pub use view_model::{GuestListView, GuestView, guest_list_view};

// Joins fetched guests with locally stored favorite flags, and flips those flags.

use crate::domain::{FavoriteStore, GuestListError, GuestRecord, MergedGuest};

/// Reads every guest's local state in one batched call and attaches it.
/// A missing entry means "not favorited"; a failing read aborts the whole merge.
pub async fn merge_favorites<S>(
    store: &S,
    guests: Vec<GuestRecord>,
) -> Result<Vec<MergedGuest>, GuestListError>
where
    S: FavoriteStore + ?Sized,
{
    let keys: Vec<String> = guests.iter().map(|guest| guest.api_id.clone()).collect();
    let stored = store.get_many(&keys).await?;
    tracing::debug!(
        guests = keys.len(),
        stored = stored.len(),
        "favorite state loaded."
    );

    Ok(guests
        .into_iter()
        .map(|guest| {
            let local = stored.get(&guest.api_id).cloned().unwrap_or_default();
            MergedGuest::new(guest, local)
        })
        .collect())
}

/// Sets the `favorited` field of one guest's stored value, keeping any other fields.
///
/// This is a plain read-modify-write with no compare-and-swap: two contexts toggling
/// the same guest at once can interleave and the later write wins, so a fast
/// double-toggle may lose an update.
#[tracing::instrument(name = "toggle_favorite", skip(store))]
pub async fn toggle_favorite<S>(
    store: &S,
    guest_id: &str,
    favorited: bool,
) -> Result<(), GuestListError>
where
    S: FavoriteStore + ?Sized,
{
    let key = guest_id.to_string();
    let mut value = store
        .get_many(std::slice::from_ref(&key))
        .await?
        .remove(&key)
        .unwrap_or_default();
    value.favorited = Some(favorited);

    store.set(&key, value).await?;
    tracing::info!("favorite updated.");
    Ok(())
}

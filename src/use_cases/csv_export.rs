// CSV export of the guest list and its hand-off to a clipboard sink.

use crate::domain::{ClipboardSink, GuestRecord, SocialPlatform};

/// Header row. It is emitted verbatim; only data fields are quoted.
pub const CSV_HEADER: &str =
    "Name,Headline,Website,Instagram URL,LinkedIn URL,TikTok URL,Twitter URL,YouTube URL";

/// Encodes guests as CSV: header first, one row per guest, rows joined by `\n`
/// with no trailing newline.
pub fn to_csv<I, G>(guests: I) -> String
where
    I: IntoIterator<Item = G>,
    G: AsRef<GuestRecord>,
{
    let mut rows = vec![CSV_HEADER.to_string()];
    rows.extend(guests.into_iter().map(|guest| csv_row(guest.as_ref())));
    rows.join("\n")
}

fn csv_row(guest: &GuestRecord) -> String {
    let mut fields = vec![
        guest.name.clone().unwrap_or_default(),
        headline(guest.bio_short.as_deref().unwrap_or_default()),
        guest.website.clone().unwrap_or_default(),
    ];
    fields.extend(SocialPlatform::ALL.iter().map(|platform| {
        guest
            .handle(*platform)
            .map(|handle| platform.profile_url(handle))
            .unwrap_or_default()
    }));

    fields
        .iter()
        .map(|field| quote(field))
        .collect::<Vec<_>>()
        .join(",")
}

/// Biography with every CR and LF removed outright.
pub fn headline(bio: &str) -> String {
    bio.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Encodes the guests and writes the document to the sink. Failure is reported
/// as `false` and logged; it never aborts the caller.
pub async fn copy_guest_csv<S, I, G>(sink: &S, guests: I) -> bool
where
    S: ClipboardSink + ?Sized,
    I: IntoIterator<Item = G>,
    G: AsRef<GuestRecord>,
{
    let csv = to_csv(guests);
    match sink.write_text(&csv).await {
        Ok(()) => {
            tracing::info!(bytes = csv.len(), "guest csv copied.");
            true
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to copy guest csv.");
            false
        }
    }
}

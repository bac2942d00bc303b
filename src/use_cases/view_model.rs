// Pure mapping from ordered guests to what a list UI needs to draw them.

use serde::Serialize;

use crate::domain::{MergedGuest, SocialPlatform};

const PROFILE_BASE_URL: &str = "https://lu.ma/user/";
const CUSTOM_AVATAR_PREFIX: &str = "https://images.lumacdn.com/";
const DEFAULT_AVATAR_PREFIX: &str = "https://cdn.lu.ma/";
const DEFAULT_AVATAR_DIR: &str = "avatars-default/";
// 32px square thumbnails, doubled for high-dpi screens.
const AVATAR_RESIZE_OPTIONS: &str =
    "cdn-cgi/image/format=auto,fit=cover,dpr=2,background=white,quality=75,width=32,height=32";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestListView {
    pub title: String,
    pub guests: Vec<GuestView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestView {
    pub guest_id: String,
    pub profile_url: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub social_links: Vec<SocialLink>,
    pub favorited: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Instagram,
    Twitter,
    LinkedIn,
    Website,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialLink {
    pub kind: LinkKind,
    pub href: String,
}

pub fn guest_list_view(guests: &[MergedGuest]) -> GuestListView {
    GuestListView {
        title: format!("{} Guests", guests.len()),
        guests: guests.iter().map(guest_view).collect(),
    }
}

pub fn guest_view(merged: &MergedGuest) -> GuestView {
    let guest = &merged.guest;
    GuestView {
        guest_id: guest.api_id.clone(),
        profile_url: format!("{PROFILE_BASE_URL}{}", guest.api_id),
        name: guest.display_name().map(str::to_string),
        bio: guest.bio_short.clone().filter(|bio| !bio.is_empty()),
        avatar_url: guest.avatar_url.as_deref().and_then(avatar_thumbnail_url),
        social_links: social_links(merged),
        favorited: merged.favorited(),
    }
}

/// Rewrites a CDN avatar into its resized thumbnail URL. Avatars hosted
/// anywhere else get no thumbnail.
pub fn avatar_thumbnail_url(avatar_url: &str) -> Option<String> {
    if let Some(path) = avatar_url.strip_prefix(CUSTOM_AVATAR_PREFIX) {
        return Some(format!(
            "{CUSTOM_AVATAR_PREFIX}{AVATAR_RESIZE_OPTIONS}/{path}"
        ));
    }
    let path = avatar_url.strip_prefix(DEFAULT_AVATAR_PREFIX)?;
    let file = path.strip_prefix(DEFAULT_AVATAR_DIR).unwrap_or(path);
    Some(format!(
        "{DEFAULT_AVATAR_PREFIX}{AVATAR_RESIZE_OPTIONS}/{DEFAULT_AVATAR_DIR}{file}"
    ))
}

fn social_links(merged: &MergedGuest) -> Vec<SocialLink> {
    let guest = &merged.guest;
    let handles = [
        (LinkKind::Instagram, SocialPlatform::Instagram),
        (LinkKind::Twitter, SocialPlatform::Twitter),
        (LinkKind::LinkedIn, SocialPlatform::LinkedIn),
    ];

    let mut links: Vec<SocialLink> = handles
        .into_iter()
        .filter_map(|(kind, platform)| {
            guest.handle(platform).map(|handle| SocialLink {
                kind,
                href: platform.profile_url(handle),
            })
        })
        .collect();

    if let Some(website) = guest.website.as_deref().filter(|site| !site.is_empty()) {
        links.push(SocialLink {
            kind: LinkKind::Website,
            href: website.to_string(),
        });
    }
    links
}

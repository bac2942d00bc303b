use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// The serialization within this layer is a dependency leak, but a pragmatic one.
// Guest record as exposed by the event platform. Identity is `api_id`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GuestRecord {
    pub api_id: String,
    #[serde(default)]
    pub name: Option<String>,
    // Short biography; may contain line breaks.
    #[serde(default)]
    pub bio_short: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub instagram_handle: Option<String>,
    #[serde(default)]
    pub linkedin_handle: Option<String>,
    #[serde(default)]
    pub tiktok_handle: Option<String>,
    #[serde(default)]
    pub twitter_handle: Option<String>,
    #[serde(default)]
    pub youtube_handle: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl GuestRecord {
    /// Display name, treating an empty string the same as a missing one.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Stored handle for the given platform, ignoring empty strings.
    pub fn handle(&self, platform: SocialPlatform) -> Option<&str> {
        let handle = match platform {
            SocialPlatform::Instagram => &self.instagram_handle,
            SocialPlatform::LinkedIn => &self.linkedin_handle,
            SocialPlatform::TikTok => &self.tiktok_handle,
            SocialPlatform::Twitter => &self.twitter_handle,
            SocialPlatform::YouTube => &self.youtube_handle,
        };
        handle.as_deref().filter(|value| !value.is_empty())
    }
}

/// Platforms a guest can link a profile handle for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Instagram,
    LinkedIn,
    TikTok,
    Twitter,
    YouTube,
}

impl SocialPlatform {
    /// CSV column order.
    pub const ALL: [SocialPlatform; 5] = [
        SocialPlatform::Instagram,
        SocialPlatform::LinkedIn,
        SocialPlatform::TikTok,
        SocialPlatform::Twitter,
        SocialPlatform::YouTube,
    ];

    // LinkedIn handles arrive as paths ("/in/jane"), so its base has no trailing slash.
    pub fn base_url(self) -> &'static str {
        match self {
            SocialPlatform::Instagram => "https://instagram.com/",
            SocialPlatform::LinkedIn => "https://linkedin.com",
            SocialPlatform::TikTok => "https://tiktok.com/",
            SocialPlatform::Twitter => "https://x.com/",
            SocialPlatform::YouTube => "https://youtube.com/",
        }
    }

    /// Full profile URL for a stored handle.
    pub fn profile_url(self, handle: &str) -> String {
        match self {
            SocialPlatform::LinkedIn if !handle.starts_with('/') => {
                format!("{}/in/{handle}", self.base_url())
            }
            _ => format!("{}{handle}", self.base_url()),
        }
    }
}

// Locally persisted per-guest value object. Only `favorited` is ours to interpret;
// any other keys are carried through read-modify-write untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredGuestState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorited: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoredGuestState {
    pub fn is_favorited(&self) -> bool {
        self.favorited.unwrap_or(false)
    }
}

// Guest record joined with its local state. Built fresh per request, never persisted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MergedGuest {
    #[serde(flatten)]
    pub guest: GuestRecord,
    pub local: StoredGuestState,
}

impl MergedGuest {
    pub fn new(guest: GuestRecord, local: StoredGuestState) -> Self {
        Self { guest, local }
    }

    pub fn id(&self) -> &str {
        &self.guest.api_id
    }

    pub fn favorited(&self) -> bool {
        self.local.is_favorited()
    }
}

impl AsRef<GuestRecord> for MergedGuest {
    fn as_ref(&self) -> &GuestRecord {
        &self.guest
    }
}

impl AsRef<GuestRecord> for GuestRecord {
    fn as_ref(&self) -> &GuestRecord {
        self
    }
}

/// One page of the remote guest list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GuestPage {
    pub entries: Vec<GuestRecord>,
    pub has_more: bool,
    // Opaque continuation token; only meaningful while `has_more` is set.
    pub next_cursor: Option<String>,
}

// Reads the event identifier the hosting page embeds in its app-link metadata.

use once_cell::sync::Lazy;
use regex::Regex;

/// `name` of the meta tag carrying the app deep link.
pub const APP_LINK_META_NAME: &str = "apple-itunes-app";

static META_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid meta tag regex"));
static ATTRIBUTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid attribute regex")
});
static APP_ARGUMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"app-argument=luma://event/([^,]+)").expect("valid app-argument regex")
});

/// Extracts the event id from an HTML document, or `None` when the meta tag is
/// absent or its content does not carry an event deep link.
pub fn extract_event_id(html: &str) -> Option<String> {
    let content = app_link_content(html)?;
    // The capture stops at the next comma, so padding before it is trimmed.
    let id = APP_ARGUMENT_RE.captures(&content)?.get(1)?.as_str().trim();
    if id.is_empty() {
        return None;
    }
    Some(id.to_string())
}

// First matching meta tag wins, like `querySelector`.
fn app_link_content(html: &str) -> Option<String> {
    META_TAG_RE.find_iter(html).find_map(|tag| {
        let mut name = None;
        let mut content = None;
        for caps in ATTRIBUTE_RE.captures_iter(tag.as_str()) {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str());
            match caps[1].to_ascii_lowercase().as_str() {
                "name" => name = value,
                "content" => content = value,
                _ => {}
            }
        }
        if name != Some(APP_LINK_META_NAME) {
            return None;
        }
        Some(decode_entities(content.unwrap_or_default()))
    })
}

// Attribute values come HTML-escaped; only the entities that can appear in a URL matter.
fn decode_entities(value: &str) -> String {
    value
        .replace("&#x2F;", "/")
        .replace("&#47;", "/")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

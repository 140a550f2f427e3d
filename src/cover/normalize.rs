use once_cell::sync::Lazy;
use regex::Regex;

static RESOLUTION_640: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/640($|\?)").expect("valid resolution regex"));

static FILE_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\.[^.?]+)(\?|$)").expect("valid extension regex"));

/// Rewrite a cover candidate so it points at the original-resolution image.
///
/// Pure string rewriting: `&amp;` is unescaped, a trailing `/640` resolution
/// segment becomes `/0`, and URLs with neither segment get `/0` inserted
/// before the first extension-like suffix. Applying it twice is a no-op.
pub fn normalize_cover_url(raw: &str) -> String {
    let unescaped = raw.replace("&amp;", "&");
    let url = RESOLUTION_640
        .replace_all(&unescaped, "/0${1}")
        .into_owned();

    if url.contains("/0") || url.contains("/640") {
        return url;
    }

    FILE_EXTENSION.replace(&url, "/0${1}${2}").into_owned()
}

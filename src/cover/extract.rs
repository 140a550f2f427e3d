use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

static CDN_VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"var\s+msg_cdn_url\s*=\s*["']([^"']+)["']"#).expect("valid cdn variable regex")
});

static DESCRIPTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)msg_link_desc[^>]*>(.*?)</p>").expect("valid marker regex"));

static CDN_IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://mmbiz\.qpic\.cn/[^"'\s]+"#).expect("valid cdn image regex")
});

type Rule = fn(&str) -> Option<String>;

/// Heuristics in priority order. The first rule that yields a URL wins.
const RULES: &[(&str, Rule)] = &[
    ("msg_cdn_url", from_cdn_variable),
    ("og:image", from_og_image),
    ("msg_link_desc", from_description_marker),
    ("first_cdn_image", from_first_cdn_image),
];

/// Find the most likely cover image URL in an article page.
///
/// Returns the raw candidate; entity unescaping and resolution rewriting
/// happen in [`super::normalize`].
pub fn extract_cover_url(html: &str) -> Option<String> {
    RULES.iter().find_map(|(name, rule)| {
        let found = rule(html)?;
        tracing::debug!(rule = name, url = %found, "Cover candidate matched");
        Some(found)
    })
}

fn from_cdn_variable(html: &str) -> Option<String> {
    CDN_VARIABLE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn from_og_image(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"meta[property="og:image"]"#).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn from_description_marker(html: &str) -> Option<String> {
    let marker = DESCRIPTION_MARKER.find(html)?;
    CDN_IMAGE
        .find(&html[marker.start()..])
        .map(|m| m.as_str().to_string())
}

fn from_first_cdn_image(html: &str) -> Option<String> {
    CDN_IMAGE.find(html).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cdn_variable_wins_over_everything() {
        let html = r#"<html><head>
            <meta property="og:image" content="https://mmbiz.qpic.cn/og/640"/>
        </head><body>
            <img src="https://mmbiz.qpic.cn/first/640">
            <script>var msg_cdn_url = "https://mmbiz.qpic.cn/mp/abc/640?x=1";</script>
        </body></html>"#;
        assert_eq!(
            extract_cover_url(html).as_deref(),
            Some("https://mmbiz.qpic.cn/mp/abc/640?x=1")
        );
    }

    #[test]
    fn cdn_variable_accepts_single_quotes() {
        let html = "<script>var   msg_cdn_url='https://mmbiz.qpic.cn/q/640';</script>";
        assert_eq!(
            extract_cover_url(html).as_deref(),
            Some("https://mmbiz.qpic.cn/q/640")
        );
    }

    #[test]
    fn falls_back_to_og_image() {
        let html = r#"<html><head>
            <meta property="og:image" content="https://cdn.example.com/cover.png"/>
        </head><body><img src="https://mmbiz.qpic.cn/inline/640"></body></html>"#;
        assert_eq!(
            extract_cover_url(html).as_deref(),
            Some("https://cdn.example.com/cover.png")
        );
    }

    #[test]
    fn blank_og_image_is_skipped() {
        let html = r#"<html><head><meta property="og:image" content="  "/></head>
            <body><img src="https://mmbiz.qpic.cn/inline/640"></body></html>"#;
        assert_eq!(
            extract_cover_url(html).as_deref(),
            Some("https://mmbiz.qpic.cn/inline/640")
        );
    }

    #[test]
    fn description_marker_scopes_search_to_following_text() {
        let html = r#"<p>header https://mmbiz.qpic.cn/before/640</p>
            <p class="msg_link_desc">summary</p>
            <img src="https://mmbiz.qpic.cn/after/640">"#;
        assert_eq!(
            from_description_marker(html).as_deref(),
            Some("https://mmbiz.qpic.cn/after/640")
        );
    }

    #[test]
    fn description_marker_requires_closing_paragraph() {
        let html = r#"<div class="msg_link_desc">no paragraph end
            <img src="https://mmbiz.qpic.cn/after/640">"#;
        assert!(from_description_marker(html).is_none());
    }

    #[test]
    fn description_marker_wins_over_first_cdn_image() {
        let html = r#"<img src="https://mmbiz.qpic.cn/before/640">
            <p class="msg_link_desc">summary</p>
            <img src="https://mmbiz.qpic.cn/after/640">"#;
        assert_eq!(
            extract_cover_url(html).as_deref(),
            Some("https://mmbiz.qpic.cn/after/640")
        );
    }

    #[test]
    fn og_image_wins_over_description_marker() {
        let html = r#"<html><head>
            <meta property="og:image" content="https://cdn.example.com/og.png"/>
        </head><body>
            <p class="msg_link_desc">summary</p>
            <img src="https://mmbiz.qpic.cn/after/640">
        </body></html>"#;
        assert_eq!(
            extract_cover_url(html).as_deref(),
            Some("https://cdn.example.com/og.png")
        );
    }

    #[test]
    fn first_cdn_image_takes_first_occurrence() {
        let html = r#"<img src="https://mmbiz.qpic.cn/one/640"><img src="http://mmbiz.qpic.cn/two/640">"#;
        assert_eq!(
            extract_cover_url(html).as_deref(),
            Some("https://mmbiz.qpic.cn/one/640")
        );
    }

    #[test]
    fn cdn_image_stops_at_quote_or_whitespace() {
        let html = r#"data-src='https://mmbiz.qpic.cn/x/y.jpg?wx_fmt=jpeg' next"#;
        assert_eq!(
            extract_cover_url(html).as_deref(),
            Some("https://mmbiz.qpic.cn/x/y.jpg?wx_fmt=jpeg")
        );
    }

    #[test]
    fn returns_none_without_any_candidate() {
        let html = r#"<html><head><title>Nothing</title></head>
            <body><img src="https://example.com/a.png"></body></html>"#;
        assert!(extract_cover_url(html).is_none());
    }
}

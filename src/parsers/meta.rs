use crate::results::{ExtractionSource, MediaRecord};
use regex::Regex;
use std::sync::LazyLock;

pub const VIDEO_PROPERTY: &str = "og:video";
pub const IMAGE_PROPERTY: &str = "og:image";

static VIDEO_TAG: LazyLock<MetaTagPattern> = LazyLock::new(|| MetaTagPattern::new(VIDEO_PROPERTY));
static IMAGE_TAG: LazyLock<MetaTagPattern> = LazyLock::new(|| MetaTagPattern::new(IMAGE_PROPERTY));

/// Matches one `<meta>` property in raw markup, in either attribute order
struct MetaTagPattern {
    property_first: Regex,
    content_first: Regex,
}

impl MetaTagPattern {
    fn new(property: &str) -> Self {
        let property = regex::escape(property);
        let name = format!(r#"(?:property|name)\s*=\s*["']{property}["']"#);
        let content = r#"content\s*=\s*(?:"([^"]*)"|'([^']*)')"#;

        let property_first = format!(r"(?i)<meta\s(?:[^>]*?\s)?{name}(?:[^>]*?\s)?{content}");
        let content_first = format!(r"(?i)<meta\s(?:[^>]*?\s)?{content}(?:[^>]*?\s)?{name}");

        Self {
            property_first: Regex::new(&property_first).expect("Meta tag pattern should be valid"),
            content_first: Regex::new(&content_first).expect("Meta tag pattern should be valid"),
        }
    }

    /// Decoded content of the first matching tag, ignoring blank values
    fn find(&self, page: &str) -> Option<String> {
        let captures = [
            self.property_first.captures(page),
            self.content_first.captures(page),
        ];

        let value = captures
            .into_iter()
            .flatten()
            .filter_map(|caps| {
                let start = caps.get(0)?.start();
                let value = caps.get(1).or_else(|| caps.get(2))?.as_str();
                Some((start, value))
            })
            .min_by_key(|(start, _)| *start)
            .map(|(_, value)| html_escape::decode_html_entities(value).trim().to_string())?;

        if value.is_empty() { None } else { Some(value) }
    }
}

/// Builds a record from `og:video` / `og:image` tags
///
/// A video tag wins; the image tag then only supplies the thumbnail.
pub fn extract(page: &str) -> Option<MediaRecord> {
    if let Some(video_url) = VIDEO_TAG.find(page) {
        ::log::debug!("Found {} tag", VIDEO_PROPERTY);
        let thumbnail = IMAGE_TAG.find(page);
        return MediaRecord::video(video_url, thumbnail, ExtractionSource::MetadataTag);
    }

    let image_url = IMAGE_TAG.find(page)?;
    ::log::debug!("Found {} tag", IMAGE_PROPERTY);
    MediaRecord::image(image_url, ExtractionSource::MetadataTag)
}

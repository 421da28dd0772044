use crate::results::{ExtractionSource, MediaRecord};
use crate::utils::snippet;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;

/// Full page state assigned to `window._sharedData`
static SHARED_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)window\._sharedData\s*=\s*(\{.*?\})\s*;\s*</script>")
        .expect("Shared data pattern should be valid")
});

/// Call of `window.__additionalDataLoaded('<path>', {...})` up to the opening
/// brace of its second argument
static ADDITIONAL_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"window\.__additionalDataLoaded\(\s*(?:'[^']*'|"[^"]*")\s*,\s*(\{)"#)
        .expect("Additional data pattern should be valid")
});

static LD_JSON_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#)
        .expect("Linked data selector should be valid")
});

/// Keys the media node is published under, newest page builds last
const MEDIA_NODE_KEYS: [&str; 2] = ["shortcode_media", "xdt_shortcode_media"];

const VIDEO_TYPENAME: &str = "GraphVideo";

/// A single embedded-data shape: page text in, record out
pub type ShapeExtractor = fn(&str) -> Option<MediaRecord>;

/// Embedded-data shapes in priority order
pub const SHAPES: [(&str, ShapeExtractor); 3] = [
    ("shared_data", from_shared_data),
    ("additional_data", from_additional_data),
    ("linked_data", from_linked_data),
];

/// Try every embedded-data shape in order and return the first record found
pub fn extract(page: &str) -> Option<MediaRecord> {
    SHAPES.iter().find_map(|(name, shape)| {
        let record = shape(page);
        match &record {
            Some(record) => ::log::debug!("Shape {} matched: {}", name, record.url),
            None => ::log::trace!("Shape {} did not match", name),
        }
        record
    })
}

/// Shape A: `window._sharedData` page state
pub fn from_shared_data(page: &str) -> Option<MediaRecord> {
    let blob = SHARED_DATA_RE.captures(page)?.get(1)?.as_str();
    let root = decode("shared_data", blob)?;
    let graphql = root.pointer("/entry_data/PostPage/0/graphql")?;
    normalize_media_node(media_node(graphql)?)
}

/// Shape B: lazily loaded `__additionalDataLoaded` payload
pub fn from_additional_data(page: &str) -> Option<MediaRecord> {
    let start = ADDITIONAL_DATA_RE.captures(page)?.get(1)?.start();
    let root = decode_leading("additional_data", &page[start..])?;
    let graphql = root.get("graphql")?;
    normalize_media_node(media_node(graphql)?)
}

/// Shape C: `application/ld+json` blocks, first usable one wins
pub fn from_linked_data(page: &str) -> Option<MediaRecord> {
    let document = Html::parse_document(page);

    document.select(&LD_JSON_SELECTOR).find_map(|script| {
        let text = script.text().collect::<String>();
        let value = decode("linked_data", &text)?;
        linked_data_record(&value)
    })
}

/// Turns a media node into a record, or rejects it
///
/// Videos need `video_url`; an `is_video` flag alone is not enough. Images use
/// `display_url` and fall back to `thumbnail_src`.
pub fn normalize_media_node(node: &Value) -> Option<MediaRecord> {
    let is_video = node.get("is_video").is_some_and(is_truthy)
        || node.get("__typename").and_then(Value::as_str) == Some(VIDEO_TYPENAME);

    if is_video {
        let Some(url) = non_empty_str(node, "video_url") else {
            ::log::debug!("Video media node without video_url, rejecting");
            return None;
        };
        let thumbnail =
            non_empty_str(node, "display_url").or_else(|| non_empty_str(node, "thumbnail_src"));

        MediaRecord::video(
            url,
            thumbnail.map(str::to_string),
            ExtractionSource::StructuredData,
        )
    } else {
        let url =
            non_empty_str(node, "display_url").or_else(|| non_empty_str(node, "thumbnail_src"))?;
        MediaRecord::image(url, ExtractionSource::StructuredData)
    }
}

/// Reads top-level `video`/`image` fields of a decoded linked-data value
pub fn linked_data_record(value: &Value) -> Option<MediaRecord> {
    let item = match value {
        Value::Array(items) => items.first()?,
        other => other,
    };

    linked_data_video(item).or_else(|| linked_data_image(item))
}

fn linked_data_video(item: &Value) -> Option<MediaRecord> {
    let video = match item.get("video")? {
        Value::Array(videos) => videos.first()?,
        object @ Value::Object(_) => object,
        _ => return None,
    };

    let url = non_empty_str(video, "contentUrl")?;
    let thumbnail = video.get("thumbnailUrl").and_then(first_string);

    MediaRecord::video(
        url,
        thumbnail.map(str::to_string),
        ExtractionSource::StructuredData,
    )
}

fn linked_data_image(item: &Value) -> Option<MediaRecord> {
    let url = item.get("image").and_then(first_string)?;
    MediaRecord::image(url, ExtractionSource::StructuredData)
}

fn media_node(graphql: &Value) -> Option<&Value> {
    MEDIA_NODE_KEYS
        .iter()
        .find_map(|key| graphql.get(*key).filter(|node| node.is_object()))
}

fn decode(shape: &str, blob: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(blob) {
        Ok(value) => Some(value),
        Err(e) => {
            ::log::debug!(
                "Shape {} has malformed JSON ({}): {}",
                shape,
                e,
                snippet(blob, 120)
            );
            None
        }
    }
}

/// Decodes the JSON object at the start of `text`, ignoring whatever follows it
fn decode_leading(shape: &str, text: &str) -> Option<Value> {
    match serde_json::Deserializer::from_str(text)
        .into_iter::<Value>()
        .next()?
    {
        Ok(value) => Some(value),
        Err(e) => {
            ::log::debug!(
                "Shape {} has malformed JSON ({}): {}",
                shape,
                e,
                snippet(text, 120)
            );
            None
        }
    }
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// A non-empty string, the first usable entry of an array, or an object's `url`
fn first_string(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.trim()).filter(|s| !s.is_empty()),
        Value::Array(items) => items.first().and_then(first_string),
        Value::Object(_) => non_empty_str(value, "url"),
        _ => None,
    }
}

/// JavaScript truthiness, except that the string `"0"` counts as false
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

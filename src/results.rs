use serde::{Deserialize, Serialize};

/// Kind of media a post resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

/// Which extraction stage produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionSource {
    /// Embedded JSON in the page markup
    #[serde(rename = "json")]
    StructuredData,
    /// `og:` metadata tags
    #[serde(rename = "og_meta")]
    MetadataTag,
}

/// A single media reference extracted from a post page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    /// Image or video
    #[serde(rename = "type")]
    pub media_type: MediaType,

    /// Direct URL of the media
    pub url: String,

    /// Preview image, only ever set for videos
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Stage that produced this record
    pub source: ExtractionSource,
}

impl MediaRecord {
    /// Create an image record. Returns `None` when `url` is blank.
    pub fn image(url: impl Into<String>, source: ExtractionSource) -> Option<Self> {
        let url = non_blank(url.into())?;
        Some(Self {
            media_type: MediaType::Image,
            url,
            thumbnail: None,
            source,
        })
    }

    /// Create a video record. Returns `None` when `url` is blank; a blank
    /// thumbnail is dropped.
    pub fn video(
        url: impl Into<String>,
        thumbnail: Option<String>,
        source: ExtractionSource,
    ) -> Option<Self> {
        let url = non_blank(url.into())?;
        Some(Self {
            media_type: MediaType::Video,
            url,
            thumbnail: thumbnail.and_then(non_blank),
            source,
        })
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

pub mod meta;
pub mod structured;

#[cfg(test)]
mod tests;

use crate::results::MediaRecord;

/// Extraction stages, tried in the order of [`Stage::ORDER`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Embedded JSON blobs (page state, lazy-loaded data, linked data)
    StructuredData,
    /// `og:` metadata tags, used when structured data is missing or broken
    MetadataTag,
}

impl Stage {
    pub const ORDER: [Stage; 2] = [Stage::StructuredData, Stage::MetadataTag];

    /// Run this stage alone against raw page text
    pub fn extract(&self, page: &str) -> Option<MediaRecord> {
        match self {
            Stage::StructuredData => structured::extract(page),
            Stage::MetadataTag => meta::extract(page),
        }
    }
}

/// Main parser that runs each stage until one produces a record
pub struct Parser;

impl Parser {
    /// Extract a media record from raw page text
    pub fn extract(page: &str) -> Option<MediaRecord> {
        Stage::ORDER.iter().find_map(|stage| {
            let record = stage.extract(page);
            match &record {
                Some(record) => ::log::info!("{:?} stage found {:?} media", stage, record.media_type),
                None => ::log::debug!("{:?} stage found no media", stage),
            }
            record
        })
    }
}

//! Core data types

use serde::Serialize;

/// One structured record extracted from a single post page
///
/// Records are immutable once constructed: created by the record extractor,
/// carried through the results queue, and consumed once by the CSV sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Post title
    pub title: String,

    /// URL of the embedded video, empty when the post has no embed
    pub video_url: String,

    /// Post labels in document order
    pub tags: Vec<String>,
}

impl Record {
    /// Tags joined for the CSV tags column
    pub fn tags_joined(&self) -> String {
        self.tags.join(", ")
    }
}

use serde::{Deserialize, Serialize};

/// Normalize a title for lookup: trim surrounding whitespace and lowercase.
///
/// The same rule is applied to catalog titles at load time and to every
/// query, so the two sides can never drift apart.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// A catalog row as written by the offline builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    /// Display title, as originally authored.
    #[serde(alias = "song")]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

impl SongRecord {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: None,
        }
    }

    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }
}

/// A loaded catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Song {
    pub title: String,
    pub artist: Option<String>,

    /// Lookup form of `title`. Never displayed.
    pub normalized_key: String,

    /// Position in the catalog; also the row and column in the similarity matrix.
    pub row_index: usize,
}

impl Song {
    #[must_use]
    pub fn from_record(record: SongRecord, row_index: usize) -> Self {
        Self {
            normalized_key: normalize_title(&record.title),
            title: record.title,
            artist: record.artist,
            row_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  Song A "), "song a");
        assert_eq!(normalize_title("SONG A"), "song a");
        assert_eq!(normalize_title("\tMixed Case\n"), "mixed case");
    }

    #[test]
    fn test_normalize_keeps_inner_whitespace() {
        assert_eq!(normalize_title(" Two  Spaces "), "two  spaces");
    }

    #[test]
    fn test_song_from_record() {
        let song = Song::from_record(SongRecord::new(" Hey Jude ").with_artist("The Beatles"), 3);
        assert_eq!(song.title, " Hey Jude ");
        assert_eq!(song.normalized_key, "hey jude");
        assert_eq!(song.artist.as_deref(), Some("The Beatles"));
        assert_eq!(song.row_index, 3);
    }

    #[test]
    fn test_record_accepts_song_column() {
        let record: SongRecord =
            serde_json::from_str(r#"{"song": "Yesterday", "artist": "The Beatles"}"#).unwrap();
        assert_eq!(record.title, "Yesterday");
        assert_eq!(record.artist, Some("The Beatles".to_string()));
    }

    #[test]
    fn test_record_artist_is_optional() {
        let record: SongRecord = serde_json::from_str(r#"{"title": "Yesterday"}"#).unwrap();
        assert!(record.artist.is_none());
    }
}

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::model::song::{normalize_title, Song, SongRecord};

/// The ordered list of known songs.
///
/// Normalized keys are computed once at construction. When several songs
/// share a key, lookups resolve to the lowest row index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Vec<Song>,
    by_key: HashMap<String, usize>,
}

impl Catalog {
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = SongRecord>) -> Self {
        let songs: Vec<Song> = records
            .into_iter()
            .enumerate()
            .map(|(row_index, record)| Song::from_record(record, row_index))
            .collect();

        let mut by_key = HashMap::with_capacity(songs.len());
        for song in &songs {
            if let Entry::Vacant(slot) = by_key.entry(song.normalized_key.clone()) {
                slot.insert(song.row_index);
            } else {
                log::debug!(
                    "Duplicate catalog key {:?} at row {}; earlier row wins",
                    song.normalized_key,
                    song.row_index
                );
            }
        }

        Self { songs, by_key }
    }

    #[must_use]
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_records(titles.into_iter().map(SongRecord::new))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    #[must_use]
    pub fn get(&self, row_index: usize) -> Option<&Song> {
        self.songs.get(row_index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Song> {
        self.songs.iter()
    }

    /// Resolve a raw title to the row index of its first matching song.
    #[must_use]
    pub fn resolve(&self, title: &str) -> Option<usize> {
        self.by_key.get(&normalize_title(title)).copied()
    }

    /// Songs whose normalized key contains the normalized fragment, in catalog order.
    pub fn search<'a>(&'a self, fragment: &str) -> impl Iterator<Item = &'a Song> + 'a {
        let needle = normalize_title(fragment);
        self.songs
            .iter()
            .filter(move |song| song.normalized_key.contains(&needle))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Song;
    type IntoIter = std::slice::Iter<'a, Song>;

    fn into_iter(self) -> Self::IntoIter {
        self.songs.iter()
    }
}

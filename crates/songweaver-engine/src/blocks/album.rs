use serde::{Deserialize, Serialize};

use super::{Block, BlockKind, BlockValue, item_id};

pub const PLACEHOLDER_ALBUM_TITLE: &str = "New Album";
pub const PLACEHOLDER_ALBUM_ARTIST: &str = "Artist Name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlbumKind {
    Header,
    Tracklist,
}

impl BlockKind for AlbumKind {
    const ALL: &'static [Self] = &[AlbumKind::Header, AlbumKind::Tracklist];

    fn label(self) -> &'static str {
        match self {
            AlbumKind::Header => "Album Header",
            AlbumKind::Tracklist => "Tracklist",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            AlbumKind::Header => "album-header",
            AlbumKind::Tracklist => "album-tracklist",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumHeader {
    pub title: String,
    pub artist: String,
    /// Cover image as a data URI
    #[serde(rename = "coverArt", default)]
    pub cover_art: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub url: String,
    /// Name of the local file the url was loaded from
    #[serde(rename = "fileName", default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl Track {
    /// A new empty track numbered after `existing` tracks
    pub fn numbered(existing: usize) -> Self {
        Self {
            id: item_id("track"),
            title: format!("Track {}", existing + 1),
            url: String::new(),
            file_name: None,
        }
    }

    /// Point the track at a hand-edited url; any loaded file name no longer applies
    pub fn set_url(&mut self, url: String) {
        self.url = url;
        self.file_name = None;
    }

    /// Point the track at a local file
    pub fn set_file(&mut self, url: String, file_name: String) {
        self.url = url;
        self.file_name = Some(file_name);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum AlbumValue {
    #[serde(rename = "Album Header")]
    Header(AlbumHeader),
    Tracklist(Vec<Track>),
}

impl BlockValue for AlbumValue {
    type Kind = AlbumKind;

    fn kind(&self) -> AlbumKind {
        match self {
            AlbumValue::Header(_) => AlbumKind::Header,
            AlbumValue::Tracklist(_) => AlbumKind::Tracklist,
        }
    }

    fn default_for(kind: AlbumKind) -> Self {
        match kind {
            AlbumKind::Header => AlbumValue::Header(AlbumHeader {
                title: PLACEHOLDER_ALBUM_TITLE.to_string(),
                artist: PLACEHOLDER_ALBUM_ARTIST.to_string(),
                cover_art: None,
            }),
            AlbumKind::Tracklist => AlbumValue::Tracklist(Vec::new()),
        }
    }
}

/// The blocks a fresh album page starts with, names taken from settings
pub fn starter_album(album_name: &str, artist_name: &str) -> Vec<Block<AlbumValue>> {
    let mut header = Block::new(AlbumKind::Header);
    if let Some(synced) = synced_album_header(&header.value, album_name, artist_name) {
        header.value = synced;
    }
    vec![header, Block::new(AlbumKind::Tracklist)]
}

/// Header with placeholder title/artist replaced by the configured names.
/// `None` when nothing changes.
pub fn synced_album_header(
    value: &AlbumValue,
    album_name: &str,
    artist_name: &str,
) -> Option<AlbumValue> {
    let AlbumValue::Header(header) = value else {
        return None;
    };

    let mut synced = header.clone();
    if synced.title == PLACEHOLDER_ALBUM_TITLE && !album_name.is_empty() {
        synced.title = album_name.to_string();
    }
    if synced.artist == PLACEHOLDER_ALBUM_ARTIST && !artist_name.is_empty() {
        synced.artist = artist_name.to_string();
    }

    (synced != *header).then_some(AlbumValue::Header(synced))
}

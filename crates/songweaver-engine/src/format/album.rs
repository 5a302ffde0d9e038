use crate::blocks::Block;
use crate::blocks::album::{AlbumHeader, AlbumValue, Track};

/// What the album preview shows: the first header and the first tracklist
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumView<'a> {
    pub title: &'a str,
    pub artist: &'a str,
    pub has_cover: bool,
    pub tracks: &'a [Track],
}

impl<'a> AlbumView<'a> {
    pub fn from_blocks(blocks: &'a [Block<AlbumValue>]) -> Self {
        let header: Option<&AlbumHeader> = blocks.iter().find_map(|b| match &b.value {
            AlbumValue::Header(h) => Some(h),
            _ => None,
        });
        let tracks = blocks
            .iter()
            .find_map(|b| match &b.value {
                AlbumValue::Tracklist(t) => Some(t.as_slice()),
                _ => None,
            })
            .unwrap_or(&[]);

        Self {
            title: header.map_or("Album Title", |h| h.title.as_str()),
            artist: header.map_or("Artist Name", |h| h.artist.as_str()),
            has_cover: header.is_some_and(|h| h.cover_art.is_some()),
            tracks,
        }
    }

    /// Index after `current`, wrapping; the first track when nothing is selected
    pub fn next_track(&self, current: Option<usize>) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        Some(current.map_or(0, |i| (i + 1) % len))
    }

    /// Index before `current`, wrapping; the last track when nothing is selected
    pub fn previous_track(&self, current: Option<usize>) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        Some(current.map_or(len - 1, |i| (i + len - 1) % len))
    }
}

/// Plain-text album listing; `current` marks the track being browsed
pub fn album_text(blocks: &[Block<AlbumValue>], current: Option<usize>) -> String {
    let view = AlbumView::from_blocks(blocks);
    let mut lines = vec![view.title.to_string(), view.artist.to_string()];
    if view.has_cover {
        lines.push("[cover art attached]".to_string());
    }
    lines.push(String::new());

    for (i, track) in view.tracks.iter().enumerate() {
        let source = match (&track.file_name, track.url.is_empty()) {
            (Some(file), _) => format!(" ({file})"),
            (None, true) => " (no source)".to_string(),
            (None, false) => String::new(),
        };
        let marker = if current == Some(i) { "▶ " } else { "  " };
        lines.push(format!("{marker}{}. {}{source}", i + 1, track.title));
    }
    lines.join("\n")
}

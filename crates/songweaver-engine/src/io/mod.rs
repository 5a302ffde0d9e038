use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported media file: {0}")]
    UnsupportedMedia(PathBuf),
}

/// Read a text document
pub fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write a text document, creating parent directories
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    write_bytes(path, content.as_bytes())
}

pub fn write_bytes(path: &Path, content: &[u8]) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(path, content).map_err(IoError::Io)
}

/// Mime type for media the pages can attach, by file extension
pub fn media_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",
        _ => return None,
    };
    Some(mime)
}

/// Encode a local image or audio file as a `data:` URI
pub fn data_uri_from_file(path: &Path) -> Result<String, IoError> {
    let mime = media_type(path).ok_or_else(|| IoError::UnsupportedMedia(path.to_path_buf()))?;
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_dir, create_test_file};

    #[test]
    fn test_read_file_success() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "song.songweaver", "## Song Weaver Project File (JSON)");

        let content = read_file(&path).unwrap();
        assert_eq!(content, "## Song Weaver Project File (JSON)");
    }

    #[test]
    fn test_read_file_not_found() {
        let dir = create_test_dir();
        let result = read_file(&dir.path().join("missing.songweaver"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_write_file_creates_parent_directories() {
        let dir = create_test_dir();
        let path = dir.path().join("exports/2026/song-prompt.md");

        write_file(&path, "# Song Prompt").unwrap();

        assert_eq!(read_file(&path).unwrap(), "# Song Prompt");
        assert!(dir.path().join("exports/2026").is_dir());
    }

    #[test]
    fn test_write_file_overwrites_existing() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "promo-kit.md", "old");

        write_file(&path, "new").unwrap();

        assert_eq!(read_file(&path).unwrap(), "new");
    }

    #[test]
    fn test_data_uri_from_file() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "cover.PNG", "abc");

        let uri = data_uri_from_file(&path).unwrap();
        assert_eq!(uri, "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_data_uri_rejects_unknown_media() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "notes.txt", "abc");

        assert!(matches!(
            data_uri_from_file(&path),
            Err(IoError::UnsupportedMedia(_))
        ));
    }
}

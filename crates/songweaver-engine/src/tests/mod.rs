//! Shared fixtures for unit tests

use std::path::PathBuf;
use tempfile::TempDir;

use crate::blocks::prompt::{Duration, DurationUnit, PromptValue, Structure, Vocals};
use crate::blocks::{Block, BlockId};

pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// A small song with fixed ids: verse, genre, vocals, lyrics
pub fn sample_prompt_blocks() -> Vec<Block<PromptValue>> {
    vec![
        Block {
            id: BlockId::from("structure-1"),
            value: PromptValue::Structure(Structure {
                tag: "[Verse]".to_string(),
                duration: Duration {
                    value: 30,
                    unit: DurationUnit::Seconds,
                    enabled: true,
                },
            }),
        },
        Block {
            id: BlockId::from("genre-1"),
            value: PromptValue::Genre(vec!["Synthwave".to_string(), "Pop".to_string()]),
        },
        Block {
            id: BlockId::from("vocals-1"),
            value: PromptValue::Vocals(Vocals {
                tones: vec!["Breathy".to_string()],
                effects: vec![],
            }),
        },
        Block {
            id: BlockId::from("lyrics-1"),
            value: PromptValue::Lyrics(String::new()),
        },
    ]
}

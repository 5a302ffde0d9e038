//! Pure text rendering of block lists.
//!
//! Nothing in here touches the filesystem; exporters in [`crate::export`]
//! wrap these strings into documents.

pub mod album;
pub mod bio;

use crate::blocks::Block;
use crate::blocks::prompt::{PromptValue, Structure};

/// Separator between prompt fragments
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// Render one prompt block, or `None` when it contributes nothing.
pub fn format_block(value: &PromptValue) -> Option<String> {
    match value {
        PromptValue::Structure(structure) => format_structure(structure),
        PromptValue::Lyrics(text) | PromptValue::Custom(text) => non_empty(text).map(str::to_string),
        PromptValue::SoundEffect(text) => non_empty(text).map(|t| format!("*{t}*")),
        PromptValue::Genre(tags) => labelled("Genre", tags),
        PromptValue::Mood(tags) => labelled("Mood", tags),
        PromptValue::Dynamics(tags) => labelled("Dynamics", tags),
        PromptValue::Production(tags) => labelled("Production", tags),
        PromptValue::Instrumentation(tags) => labelled("Instrumentation", tags),
        PromptValue::Vocals(vocals) => {
            let parts: Vec<&String> = vocals.tones.iter().chain(&vocals.effects).collect();
            if parts.is_empty() {
                return None;
            }
            Some(format!("[Vocals: {}]", join(parts)))
        }
        PromptValue::Tempo(0) => None,
        PromptValue::Tempo(bpm) => Some(format!("[{bpm} BPM]")),
    }
}

fn format_structure(structure: &Structure) -> Option<String> {
    let tag = non_empty(&structure.tag)?;
    let duration = &structure.duration;
    if duration.enabled && duration.value > 0 {
        return Some(format!(
            "{tag} [{} {}]",
            duration.value,
            duration.unit.for_value(duration.value)
        ));
    }
    Some(tag.to_string())
}

fn labelled(label: &str, tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        return None;
    }
    Some(format!("[{label}: {}]", join(tags)))
}

fn join<S: AsRef<str>>(parts: impl IntoIterator<Item = S>) -> String {
    parts
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn non_empty(text: &str) -> Option<&str> {
    (!text.is_empty()).then_some(text)
}

/// Fragments of `blocks` in order, skipping blocks that contribute nothing
pub fn fragments<'a>(blocks: &'a [Block<PromptValue>]) -> impl Iterator<Item = String> + 'a {
    blocks.iter().filter_map(|b| format_block(&b.value))
}

/// The generated prompt: fragments separated by blank lines
pub fn generate_prompt(blocks: &[Block<PromptValue>]) -> String {
    fragments(blocks).collect::<Vec<_>>().join(FRAGMENT_SEPARATOR)
}

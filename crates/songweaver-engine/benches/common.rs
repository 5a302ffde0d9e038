// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use songweaver_engine::{Block, BlockKind, BlockValue, PromptKind, PromptValue};

/// A song of `sections` repetitions of every prompt block type
#[allow(dead_code)]
pub fn generate_song(sections: usize) -> Vec<Block<PromptValue>> {
    let mut blocks = Vec::with_capacity(sections * PromptKind::ALL.len());
    for section in 0..sections {
        for &kind in PromptKind::ALL {
            let value = match PromptValue::default_for(kind) {
                PromptValue::Lyrics(_) => PromptValue::Lyrics(format!("line {section}\nline two")),
                PromptValue::Genre(_) => PromptValue::Genre(vec!["Pop".into(), "Synthwave".into()]),
                other => other,
            };
            blocks.push(Block::with_value(value));
        }
    }
    blocks
}

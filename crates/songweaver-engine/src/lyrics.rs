//! Lyrics assistant.
//!
//! Builds a songwriting request from the blocks above a Lyrics block and
//! writes the generated text back into it. The text service itself sits
//! behind [`TextGenerator`]; requests may run on another thread, so the
//! assistant splits a generation into [`LyricsAssistant::start`] and
//! [`LyricsAssistant::finish`] and tracks which blocks are in flight.

use std::collections::HashSet;

use crate::blocks::prompt::PromptValue;
use crate::blocks::{Block, BlockId};
use crate::format::fragments;
use crate::store::BlockList;

pub const SYSTEM_INSTRUCTION: &str = "You are a creative songwriter. Your task is to write lyrics for a song part based on the provided musical context. Do not include any explanations, annotations, or the context tags in your response. Only return the raw text of the lyrics.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("No block with id {0}")]
    NotFound(BlockId),
    #[error("Block {0} is not a lyrics block")]
    NotLyrics(BlockId),
    #[error("Lyrics for {0} are already being generated")]
    AlreadyInFlight(BlockId),
    #[error("Generator failed: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub block_id: BlockId,
    pub system_instruction: String,
    pub prompt: String,
}

/// A text generation service
pub trait TextGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError>;
}

/// Build the request for the Lyrics block `id`
pub fn build_request(
    blocks: &[Block<PromptValue>],
    id: &BlockId,
) -> Result<GenerationRequest, GenerateError> {
    let index = blocks
        .iter()
        .position(|b| &b.id == id)
        .ok_or_else(|| GenerateError::NotFound(id.clone()))?;
    let PromptValue::Lyrics(existing) = &blocks[index].value else {
        return Err(GenerateError::NotLyrics(id.clone()));
    };
    let context_blocks = &blocks[..index];

    let context = fragments(context_blocks).collect::<Vec<_>>().join(", ");
    let section = context_blocks
        .iter()
        .rev()
        .find_map(|b| match &b.value {
            PromptValue::Structure(s) if !s.tag.is_empty() => Some(s.tag.as_str()),
            _ => None,
        })
        .unwrap_or("the current section");

    let mut prompt = format!(
        "Musical Context: {}.",
        if context.is_empty() { "None" } else { &context }
    );
    prompt.push_str(&format!("\nWrite lyrics for the following song part: {section}."));
    if !existing.is_empty() {
        prompt.push_str(&format!(
            "\nHere are the existing lyrics, please refine or continue them: \"{existing}\""
        ));
    }

    Ok(GenerationRequest {
        block_id: id.clone(),
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        prompt,
    })
}

#[derive(Debug, Default)]
pub struct LyricsAssistant {
    in_flight: HashSet<BlockId>,
}

impl LyricsAssistant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_generating(&self, id: &BlockId) -> bool {
        self.in_flight.contains(id)
    }

    pub fn any_generating(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Build a request for `id` and mark it in flight.
    ///
    /// Refused while a request for the same block is still running.
    pub fn start(
        &mut self,
        blocks: &[Block<PromptValue>],
        id: &BlockId,
    ) -> Result<GenerationRequest, GenerateError> {
        if self.in_flight.contains(id) {
            return Err(GenerateError::AlreadyInFlight(id.clone()));
        }
        let request = build_request(blocks, id)?;
        self.in_flight.insert(id.clone());
        log::info!("generating lyrics for {id}");
        Ok(request)
    }

    /// Apply the outcome of a request started with [`start`](Self::start).
    ///
    /// The in-flight marker is cleared either way. A block deleted while the
    /// request was running is skipped.
    pub fn finish(
        &mut self,
        list: &mut BlockList<PromptValue>,
        id: &BlockId,
        result: Result<String, GenerateError>,
    ) -> Result<(), GenerateError> {
        self.in_flight.remove(id);

        match result {
            Ok(text) => {
                if !list.update(id, PromptValue::Lyrics(text.trim().to_string())) {
                    log::debug!("lyrics block {id} went away before generation finished");
                }
                Ok(())
            }
            Err(e) => {
                log::error!("Error generating lyrics for {id}: {e}");
                Err(e)
            }
        }
    }

    /// Run a whole generation on the calling thread
    pub fn generate(
        &mut self,
        list: &mut BlockList<PromptValue>,
        id: &BlockId,
        generator: &dyn TextGenerator,
    ) -> Result<(), GenerateError> {
        let request = self.start(list.as_slice(), id)?;
        let result = generator.generate(&request);
        self.finish(list, id, result)
    }
}

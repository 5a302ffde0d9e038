//! `.songweaver` project files.
//!
//! A project file is markdown: a fenced JSON payload holding the blocks,
//! a fenced copy of the generated prompt for humans, and an attribution
//! footer. Only the first ```` ```json ```` fence is read back.

use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Branding;
use crate::blocks::Block;
use crate::blocks::prompt::PromptValue;
use crate::store::BlockList;

pub const PROJECT_VERSION: &str = "1.1";
pub const PROJECT_EXTENSION: &str = "songweaver";

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\n([\s\S]*?)\n```").expect("json fence regex"));

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Could not find JSON data in file")]
    MissingPayload,
    #[error("Invalid project JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid project file format: no blocks")]
    MissingBlocks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    #[serde(default)]
    pub version: String,
    pub blocks: Vec<Block<PromptValue>>,
    #[serde(rename = "savedAt", default)]
    pub saved_at: String,
}

impl ProjectFile {
    pub fn new(blocks: Vec<Block<PromptValue>>, saved_at: DateTime<Utc>) -> Self {
        Self {
            version: PROJECT_VERSION.to_string(),
            blocks,
            saved_at: saved_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Render a project file for `blocks` and their generated `prompt`
pub fn export_project(
    blocks: &[Block<PromptValue>],
    prompt: &str,
    branding: &Branding,
    saved_at: DateTime<Utc>,
) -> Result<String, ProjectError> {
    let project = ProjectFile::new(blocks.to_vec(), saved_at);
    let json = serde_json::to_string_pretty(&project)?;

    Ok(format!(
        "## Song Weaver Project File (JSON)\n```json\n{json}\n```\n\n## Generated Prompt\n```\n{prompt}\n```\n\n\n# Project saved with Song Weaver by {}\n# {}",
        branding.studio_name, branding.copyright
    ))
}

/// Parse a project file's payload
pub fn import_project(text: &str) -> Result<ProjectFile, ProjectError> {
    let payload = JSON_FENCE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .ok_or(ProjectError::MissingPayload)?;

    let data: serde_json::Value = serde_json::from_str(payload)?;
    match data.get("blocks") {
        Some(blocks) if !blocks.is_null() => {}
        _ => return Err(ProjectError::MissingBlocks),
    }
    Ok(serde_json::from_value(data)?)
}

/// Replace `list` with the blocks of a project file.
///
/// On error `list` is left as it was.
pub fn load_into(list: &mut BlockList<PromptValue>, text: &str) -> Result<(), ProjectError> {
    let project = import_project(text)?;
    log::info!(
        "loaded project v{} saved {} with {} blocks",
        project.version,
        project.saved_at,
        project.blocks.len()
    );
    list.replace_all(project.blocks);
    Ok(())
}

/// `song-weaver-project-<millis>.songweaver`
pub fn default_file_name(now: DateTime<Utc>) -> String {
    format!(
        "song-weaver-project-{}.{PROJECT_EXTENSION}",
        now.timestamp_millis()
    )
}

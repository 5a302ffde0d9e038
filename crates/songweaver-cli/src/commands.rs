//! Headless subcommands working on a saved project file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use songweaver_config::Settings;
use songweaver_engine::export::pdf::render_text_pdf;
use songweaver_engine::export::project::import_project;
use songweaver_engine::export::{PROMPT_MARKDOWN_FILE, PROMPT_PDF_FILE, prompt_markdown};
use songweaver_engine::io::{read_file, write_bytes, write_file};
use songweaver_engine::{Branding, generate_prompt};

pub fn branding(settings: &Settings) -> Branding {
    Branding {
        artist_name: settings.artist_name.clone(),
        studio_name: settings.studio_name.clone(),
        copyright: settings.copyright.clone(),
    }
}

fn load_prompt(file: &Path) -> Result<String> {
    let text = read_file(file).with_context(|| format!("reading {}", file.display()))?;
    let project = import_project(&text)
        .with_context(|| format!("Could not open or parse the project file {}", file.display()))?;
    Ok(generate_prompt(&project.blocks))
}

/// The generated prompt of a project file
pub fn render(file: &Path) -> Result<String> {
    load_prompt(file)
}

pub fn export_markdown(file: &Path, output: Option<&Path>, settings: &Settings) -> Result<PathBuf> {
    let prompt = load_prompt(file)?;
    let output = output.map_or_else(|| PathBuf::from(PROMPT_MARKDOWN_FILE), Path::to_path_buf);
    write_file(&output, &prompt_markdown(&prompt, &branding(settings)))?;
    log::info!("exported {}", output.display());
    Ok(output)
}

pub fn export_pdf(file: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let prompt = load_prompt(file)?;
    let output = output.map_or_else(|| PathBuf::from(PROMPT_PDF_FILE), Path::to_path_buf);
    let bytes = render_text_pdf("Song Prompt", &prompt)?;
    write_bytes(&output, &bytes)?;
    log::info!("exported {}", output.display());
    Ok(output)
}

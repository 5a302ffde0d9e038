//! Documents written out of the editor: project files, markdown exports,
//! the promo kit and PDFs.

pub mod pdf;
pub mod project;
pub mod promo;

pub const PROMPT_MARKDOWN_FILE: &str = "song-prompt.md";
pub const PROMPT_PDF_FILE: &str = "song-prompt.pdf";
pub const BIO_MARKDOWN_FILE: &str = "artist-bio.md";
pub const BIO_PDF_FILE: &str = "artist-bio.pdf";
pub const PROMO_KIT_FILE: &str = "promo-kit.md";

/// Attribution stamped into exported documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub artist_name: String,
    pub studio_name: String,
    pub copyright: String,
}

/// Markdown document holding a generated prompt
pub fn prompt_markdown(prompt: &str, branding: &Branding) -> String {
    format!(
        "# Song Prompt\n\nGenerated by Song Weaver by {}\n{}\n\n---\n\n```\n{prompt}\n```",
        branding.studio_name, branding.copyright
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_markdown() {
        let branding = Branding {
            artist_name: "Nova".to_string(),
            studio_name: "BioSpark Studios".to_string(),
            copyright: "© 2026 My Music".to_string(),
        };

        insta::assert_snapshot!(prompt_markdown("[Verse]\n\n[Genre: Pop]", &branding), @r"
        # Song Prompt

        Generated by Song Weaver by BioSpark Studios
        © 2026 My Music

        ---

        ```
        [Verse]

        [Genre: Pop]
        ```
        ");
    }
}

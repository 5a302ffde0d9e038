use serde::Serialize;

use super::Branding;
use crate::blocks::Block;
use crate::blocks::album::AlbumValue;
use crate::blocks::bio::BioValue;
use crate::blocks::prompt::PromptValue;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PromoKit<'a, S> {
    settings: &'a S,
    song_weaver_project: ProjectSection<'a>,
    artist_bio: BlocksSection<'a, BioValue>,
    album: BlocksSection<'a, AlbumValue>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectSection<'a> {
    blocks: &'a [Block<PromptValue>],
    generated_prompt: &'a str,
}

#[derive(Serialize)]
struct BlocksSection<'a, V> {
    blocks: &'a [Block<V>],
}

/// Everything the promo kit bundles
pub struct PromoKitInput<'a, S> {
    pub settings: &'a S,
    pub prompt_blocks: &'a [Block<PromptValue>],
    pub generated_prompt: &'a str,
    pub bio_blocks: &'a [Block<BioValue>],
    pub album_blocks: &'a [Block<AlbumValue>],
}

/// Render the promo kit: all three pages plus settings as one JSON object
/// inside a markdown wrapper.
pub fn promo_kit_markdown<S: Serialize>(
    input: &PromoKitInput<'_, S>,
    branding: &Branding,
) -> Result<String, serde_json::Error> {
    let kit = PromoKit {
        settings: input.settings,
        song_weaver_project: ProjectSection {
            blocks: input.prompt_blocks,
            generated_prompt: input.generated_prompt,
        },
        artist_bio: BlocksSection {
            blocks: input.bio_blocks,
        },
        album: BlocksSection {
            blocks: input.album_blocks,
        },
    };
    let json = serde_json::to_string_pretty(&kit)?;

    Ok(format!(
        "# Artist Promo Kit\n\nCreated with Song Weaver by {}\n\n## Data (JSON)\n\nThis data can be imported into other applications.\n\n```json\n{json}\n```\n\n---\n{}\n",
        branding.studio_name, branding.copyright
    ))
}

use crate::blocks::Block;
use crate::blocks::bio::BioValue;
use crate::export::Branding;

/// Render the bio page as a markdown document.
///
/// Images are not embedded; an attached image is marked with a
/// placeholder reference.
pub fn bio_markdown(blocks: &[Block<BioValue>], branding: &Branding) -> String {
    let mut md = format!("# {}\n\n", branding.artist_name);

    for block in blocks {
        match &block.value {
            BioValue::Header(header) => {
                md.push_str(&format!("## {}\n", header.name));
                if !header.tagline.is_empty() {
                    md.push_str(&format!("*{}*\n", header.tagline));
                }
                md.push('\n');
            }
            BioValue::Image(Some(_)) => md.push_str("![Artist Image](Image-Data-Attached)\n\n"),
            BioValue::Image(None) => {}
            BioValue::Text(text) => md.push_str(&format!("{text}\n\n")),
            BioValue::Links(links) => {
                md.push_str("## Links\n\n");
                for link in links {
                    md.push_str(&format!("* [{}]({})\n", link.platform, link.url));
                }
                md.push('\n');
            }
        }
    }

    md.push_str(&format!("---\n*{}*", branding.copyright));
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::bio::{BioHeader, Link};

    fn branding() -> Branding {
        Branding {
            artist_name: "Nova".to_string(),
            studio_name: "BioSpark Studios".to_string(),
            copyright: "© 2026 Nova".to_string(),
        }
    }

    #[test]
    fn test_bio_markdown_renders_blocks_in_order() {
        let blocks = vec![
            Block::with_value(BioValue::Header(BioHeader {
                name: "Nova".to_string(),
                tagline: "Dream pop from the coast".to_string(),
            })),
            Block::with_value(BioValue::Image(Some("data:image/png;base64,AAAA".to_string()))),
            Block::with_value(BioValue::Text("Started in a garage.".to_string())),
            Block::with_value(BioValue::Links(vec![Link {
                id: "l1".to_string(),
                platform: "Bandcamp".to_string(),
                url: "https://nova.bandcamp.com".to_string(),
            }])),
        ];

        insta::assert_snapshot!(bio_markdown(&blocks, &branding()), @r"
        # Nova

        ## Nova
        *Dream pop from the coast*

        ![Artist Image](Image-Data-Attached)

        Started in a garage.

        ## Links

        * [Bandcamp](https://nova.bandcamp.com)

        ---
        *© 2026 Nova*
        ");
    }

    #[test]
    fn test_missing_image_and_tagline_are_skipped() {
        let blocks = vec![
            Block::with_value(BioValue::Header(BioHeader {
                name: "Intro".to_string(),
                tagline: String::new(),
            })),
            Block::with_value(BioValue::Image(None)),
        ];

        let md = bio_markdown(&blocks, &branding());

        assert_eq!(md, "# Nova\n\n## Intro\n\n---\n*© 2026 Nova*");
    }
}

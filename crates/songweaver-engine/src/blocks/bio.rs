use serde::{Deserialize, Serialize};

use super::{Block, BlockKind, BlockValue, item_id};

/// Name shown on the starter header until the artist name is configured
pub const PLACEHOLDER_ARTIST_NAME: &str = "Your Artist Name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BioKind {
    Header,
    Image,
    Text,
    Links,
}

impl BlockKind for BioKind {
    const ALL: &'static [Self] = &[BioKind::Header, BioKind::Image, BioKind::Text, BioKind::Links];

    fn label(self) -> &'static str {
        match self {
            BioKind::Header => "Header",
            BioKind::Image => "Image",
            BioKind::Text => "Text Block",
            BioKind::Links => "Links",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            BioKind::Header => "header",
            BioKind::Image => "image",
            BioKind::Text => "text",
            BioKind::Links => "links",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BioHeader {
    pub name: String,
    #[serde(default)]
    pub tagline: String,
}

/// A platform link on the bio page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub platform: String,
    pub url: String,
}

impl Link {
    pub fn new() -> Self {
        Self {
            id: item_id("link"),
            platform: "Website".to_string(),
            url: "https://".to_string(),
        }
    }
}

impl Default for Link {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum BioValue {
    Header(BioHeader),
    /// Image as a data URI, if one was attached
    Image(Option<String>),
    #[serde(rename = "Text Block")]
    Text(String),
    Links(Vec<Link>),
}

impl BlockValue for BioValue {
    type Kind = BioKind;

    fn kind(&self) -> BioKind {
        match self {
            BioValue::Header(_) => BioKind::Header,
            BioValue::Image(_) => BioKind::Image,
            BioValue::Text(_) => BioKind::Text,
            BioValue::Links(_) => BioKind::Links,
        }
    }

    fn default_for(kind: BioKind) -> Self {
        match kind {
            BioKind::Header => BioValue::Header(BioHeader {
                name: "New Section".to_string(),
                tagline: String::new(),
            }),
            BioKind::Image => BioValue::Image(None),
            BioKind::Text => BioValue::Text("New text block...".to_string()),
            BioKind::Links => BioValue::Links(Vec::new()),
        }
    }
}

/// The blocks a fresh bio page starts with
pub fn starter_bio(artist_name: &str) -> Vec<Block<BioValue>> {
    let name = if artist_name.is_empty() {
        PLACEHOLDER_ARTIST_NAME
    } else {
        artist_name
    };

    vec![
        Block::with_value(BioValue::Header(BioHeader {
            name: name.to_string(),
            tagline: "Your tagline or genre".to_string(),
        })),
        Block::with_value(BioValue::Image(None)),
        Block::with_value(BioValue::Text(
            "Write your artist biography here. Talk about your history, your music, and what makes you unique."
                .to_string(),
        )),
        Block::with_value(BioValue::Links(Vec::new())),
    ]
}

/// Header with the artist name filled in, if the current name is still empty
/// or the placeholder. `None` when nothing changes.
pub fn synced_bio_header(value: &BioValue, artist_name: &str) -> Option<BioValue> {
    let BioValue::Header(header) = value else {
        return None;
    };
    if !header.name.is_empty() && header.name != PLACEHOLDER_ARTIST_NAME {
        return None;
    }

    let name = if artist_name.is_empty() {
        PLACEHOLDER_ARTIST_NAME
    } else {
        artist_name
    };
    if header.name == name {
        return None;
    }

    Some(BioValue::Header(BioHeader {
        name: name.to_string(),
        tagline: header.tagline.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_starter_bio_uses_placeholder_without_artist() {
        let blocks = starter_bio("");
        let kinds: Vec<_> = blocks.iter().map(|b| b.kind()).collect();

        assert_eq!(
            kinds,
            vec![BioKind::Header, BioKind::Image, BioKind::Text, BioKind::Links]
        );
        assert!(matches!(
            &blocks[0].value,
            BioValue::Header(h) if h.name == PLACEHOLDER_ARTIST_NAME
        ));
    }

    #[test]
    fn test_sync_replaces_placeholder_only() {
        let placeholder = BioValue::Header(BioHeader {
            name: PLACEHOLDER_ARTIST_NAME.to_string(),
            tagline: "Synthwave".to_string(),
        });
        let custom = BioValue::Header(BioHeader {
            name: "The Band".to_string(),
            tagline: String::new(),
        });

        let synced = synced_bio_header(&placeholder, "Nova").unwrap();
        assert!(matches!(synced, BioValue::Header(ref h) if h.name == "Nova" && h.tagline == "Synthwave"));
        assert!(synced_bio_header(&custom, "Nova").is_none());
        assert!(synced_bio_header(&BioValue::Text("x".into()), "Nova").is_none());
    }

    #[test]
    fn test_image_without_data_serializes_as_null() {
        let block = Block {
            id: "Image-1".into(),
            value: BioValue::Image(None),
        };

        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({ "id": "Image-1", "type": "Image", "value": null })
        );

        let back: Block<BioValue> = serde_json::from_value(json!({
            "id": "Image-1", "type": "Image", "value": null
        }))
        .unwrap();
        assert_eq!(back, block);
    }
}

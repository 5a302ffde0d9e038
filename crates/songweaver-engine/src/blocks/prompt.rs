use serde::{Deserialize, Serialize};

use super::{BlockKind, BlockValue};

/// Song prompt block types, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    Structure,
    Lyrics,
    Genre,
    Mood,
    Dynamics,
    Production,
    Instrumentation,
    Vocals,
    Tempo,
    SoundEffect,
    Custom,
}

impl BlockKind for PromptKind {
    const ALL: &'static [Self] = &[
        PromptKind::Structure,
        PromptKind::Lyrics,
        PromptKind::Genre,
        PromptKind::Mood,
        PromptKind::Dynamics,
        PromptKind::Production,
        PromptKind::Instrumentation,
        PromptKind::Vocals,
        PromptKind::Tempo,
        PromptKind::SoundEffect,
        PromptKind::Custom,
    ];

    fn label(self) -> &'static str {
        match self {
            PromptKind::Structure => "Structure",
            PromptKind::Lyrics => "Lyrics",
            PromptKind::Genre => "Genre",
            PromptKind::Mood => "Mood & Atmosphere",
            PromptKind::Dynamics => "Dynamics & Rhythm",
            PromptKind::Production => "Production Style",
            PromptKind::Instrumentation => "Instrumentation",
            PromptKind::Vocals => "Vocals",
            PromptKind::Tempo => "Tempo",
            PromptKind::SoundEffect => "Sound Effect",
            PromptKind::Custom => "Custom Tag",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            PromptKind::Structure => "structure",
            PromptKind::Lyrics => "lyrics",
            PromptKind::Genre => "genre",
            PromptKind::Mood => "mood",
            PromptKind::Dynamics => "dynamics",
            PromptKind::Production => "production",
            PromptKind::Instrumentation => "instrumentation",
            PromptKind::Vocals => "vocals",
            PromptKind::Tempo => "tempo",
            PromptKind::SoundEffect => "sound-effect",
            PromptKind::Custom => "custom",
        }
    }
}

/// Unit of a section duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Seconds,
    Minutes,
}

impl DurationUnit {
    /// Plural form, as stored
    pub fn as_str(self) -> &'static str {
        match self {
            DurationUnit::Seconds => "seconds",
            DurationUnit::Minutes => "minutes",
        }
    }

    /// Unit name agreeing with `value`
    pub fn for_value(self, value: u32) -> &'static str {
        match (self, value) {
            (DurationUnit::Seconds, 1) => "second",
            (DurationUnit::Minutes, 1) => "minute",
            _ => self.as_str(),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            DurationUnit::Seconds => DurationUnit::Minutes,
            DurationUnit::Minutes => DurationUnit::Seconds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duration {
    pub value: u32,
    pub unit: DurationUnit,
    pub enabled: bool,
}

/// A song section tag such as `[Chorus]`, optionally timed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    pub tag: String,
    pub duration: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocals {
    #[serde(default)]
    pub tones: Vec<String>,
    #[serde(default)]
    pub effects: Vec<String>,
}

/// Lowest and highest tempo the editor offers
pub const TEMPO_RANGE: std::ops::RangeInclusive<u32> = 40..=220;

/// Value of a song prompt block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum PromptValue {
    Structure(Structure),
    Lyrics(String),
    Genre(Vec<String>),
    #[serde(rename = "Mood & Atmosphere")]
    Mood(Vec<String>),
    #[serde(rename = "Dynamics & Rhythm")]
    Dynamics(Vec<String>),
    #[serde(rename = "Production Style")]
    Production(Vec<String>),
    Instrumentation(Vec<String>),
    Vocals(Vocals),
    Tempo(u32),
    #[serde(rename = "Sound Effect")]
    SoundEffect(String),
    #[serde(rename = "Custom Tag")]
    Custom(String),
}

impl PromptValue {
    /// The tag selection of the set-valued kinds
    pub fn tags(&self) -> Option<&Vec<String>> {
        match self {
            PromptValue::Genre(tags)
            | PromptValue::Mood(tags)
            | PromptValue::Dynamics(tags)
            | PromptValue::Production(tags)
            | PromptValue::Instrumentation(tags) => Some(tags),
            _ => None,
        }
    }

    pub fn tags_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            PromptValue::Genre(tags)
            | PromptValue::Mood(tags)
            | PromptValue::Dynamics(tags)
            | PromptValue::Production(tags)
            | PromptValue::Instrumentation(tags) => Some(tags),
            _ => None,
        }
    }

    /// Free text of the string-valued kinds
    pub fn text(&self) -> Option<&str> {
        match self {
            PromptValue::Lyrics(text) | PromptValue::SoundEffect(text) | PromptValue::Custom(text) => {
                Some(text)
            }
            _ => None,
        }
    }

    /// Same kind, new text. `None` for kinds that do not hold free text.
    pub fn with_text(&self, text: String) -> Option<Self> {
        match self {
            PromptValue::Lyrics(_) => Some(PromptValue::Lyrics(text)),
            PromptValue::SoundEffect(_) => Some(PromptValue::SoundEffect(text)),
            PromptValue::Custom(_) => Some(PromptValue::Custom(text)),
            _ => None,
        }
    }
}

impl BlockValue for PromptValue {
    type Kind = PromptKind;

    fn kind(&self) -> PromptKind {
        match self {
            PromptValue::Structure(_) => PromptKind::Structure,
            PromptValue::Lyrics(_) => PromptKind::Lyrics,
            PromptValue::Genre(_) => PromptKind::Genre,
            PromptValue::Mood(_) => PromptKind::Mood,
            PromptValue::Dynamics(_) => PromptKind::Dynamics,
            PromptValue::Production(_) => PromptKind::Production,
            PromptValue::Instrumentation(_) => PromptKind::Instrumentation,
            PromptValue::Vocals(_) => PromptKind::Vocals,
            PromptValue::Tempo(_) => PromptKind::Tempo,
            PromptValue::SoundEffect(_) => PromptKind::SoundEffect,
            PromptValue::Custom(_) => PromptKind::Custom,
        }
    }

    fn default_for(kind: PromptKind) -> Self {
        match kind {
            PromptKind::Structure => PromptValue::Structure(Structure {
                tag: "[Verse]".to_string(),
                duration: Duration {
                    value: 30,
                    unit: DurationUnit::Seconds,
                    enabled: false,
                },
            }),
            PromptKind::Lyrics => PromptValue::Lyrics(String::new()),
            PromptKind::Genre => PromptValue::Genre(Vec::new()),
            PromptKind::Mood => PromptValue::Mood(Vec::new()),
            PromptKind::Dynamics => PromptValue::Dynamics(Vec::new()),
            PromptKind::Production => PromptValue::Production(Vec::new()),
            PromptKind::Instrumentation => PromptValue::Instrumentation(Vec::new()),
            PromptKind::Vocals => PromptValue::Vocals(Vocals::default()),
            PromptKind::Tempo => PromptValue::Tempo(120),
            PromptKind::SoundEffect => PromptValue::SoundEffect("wind blowing".to_string()),
            PromptKind::Custom => PromptValue::Custom("[custom-tag: value]".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::Block;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_every_kind_defaults_to_its_own_variant() {
        for &kind in PromptKind::ALL {
            assert_eq!(PromptValue::default_for(kind).kind(), kind);
        }
    }

    #[test]
    fn test_serialized_shape_matches_project_files() {
        let block = Block {
            id: "Structure-1700000000000".into(),
            value: PromptValue::Structure(Structure {
                tag: "[Chorus]".to_string(),
                duration: Duration {
                    value: 1,
                    unit: DurationUnit::Minutes,
                    enabled: true,
                },
            }),
        };

        let value = serde_json::to_value(&block).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "Structure-1700000000000",
                "type": "Structure",
                "value": {
                    "tag": "[Chorus]",
                    "duration": { "value": 1, "unit": "minutes", "enabled": true }
                }
            })
        );
    }

    #[test]
    fn test_deserializes_labels_with_spaces() {
        let block: Block<PromptValue> = serde_json::from_value(json!({
            "id": "Mood & Atmosphere-1",
            "type": "Mood & Atmosphere",
            "value": ["Ethereal", "Haunting"]
        }))
        .unwrap();

        assert_eq!(block.kind(), PromptKind::Mood);
        assert_eq!(
            block.value,
            PromptValue::Mood(vec!["Ethereal".to_string(), "Haunting".to_string()])
        );
    }

    #[test]
    fn test_vocals_missing_lists_default_to_empty() {
        let block: Block<PromptValue> = serde_json::from_value(json!({
            "id": "Vocals-1",
            "type": "Vocals",
            "value": { "tones": ["Breathy"] }
        }))
        .unwrap();

        assert_eq!(
            block.value,
            PromptValue::Vocals(Vocals {
                tones: vec!["Breathy".to_string()],
                effects: vec![],
            })
        );
    }

    #[test]
    fn test_with_text_keeps_kind() {
        let effect = PromptValue::default_for(PromptKind::SoundEffect);
        let updated = effect.with_text("thunder".to_string()).unwrap();

        assert_eq!(updated, PromptValue::SoundEffect("thunder".to_string()));
        assert!(PromptValue::Tempo(90).with_text("x".to_string()).is_none());
    }
}

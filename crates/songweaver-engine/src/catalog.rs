//! Option lists offered by the block editors.

use crate::blocks::prompt::PromptKind;

pub const STRUCTURE_TAGS: &[&str] = &[
    "[Intro]",
    "[Short Instrumental Intro]",
    "[Verse]",
    "[Pre-Chorus]",
    "[Chorus]",
    "[Hook]",
    "[Bridge]",
    "[Interlude]",
    "[Break]",
    "[Percussion Break]",
    "[Bass Drop]",
    "[Guitar Solo]",
    "[Haunting Piano Interlude]",
    "[Funky Saxophone Break]",
    "[Orchestral Buildup]",
    "[Slap Bass Groove]",
    "[Tribal Drum Break]",
    "[Dubstep Bass Drop]",
    "[Outro]",
    "[End]",
    "[Fade Out]",
    "[Big Finish]",
];

pub const GENRES: &[&str] = &[
    "Pop",
    "Synth Pop",
    "Disco Funk",
    "Electronic",
    "Dance",
    "Trap",
    "Hip-Hop",
    "Rap",
    "Rock",
    "Indie Rock",
    "Metal",
    "Arabian Rock",
    "R&B",
    "Soul",
    "Country",
    "Folk",
    "Latin",
    "Jazz",
    "Blues",
    "World Music",
    "Classical",
    "Orchestral",
    "Experimental",
    "Fusion",
    "80s Synthwave",
    "Cyberpunk",
];

pub const MOODS_AND_ATMOSPHERES: &[&str] = &[
    "Ambient",
    "Ethereal",
    "Haunting",
    "Euphoric",
    "Tranquil",
    "Melancholic",
    "Nostalgic",
    "Tense",
    "Serene",
    "Aggressive",
    "Confident",
    "Desperate",
    "Sultry",
    "Airy",
    "Dense",
    "Fluid",
    "Smooth",
    "Rough",
    "Crisp",
    "Vibrant",
    "Shimmering",
];

pub const DYNAMICS_AND_RHYTHM: &[&str] = &[
    "Layered",
    "Crescendoing",
    "Rhythmic",
    "Percussive",
    "Syncopated",
    "Melodic",
    "Harmonic",
    "Polyphonic",
    "Staccato",
    "Ascending",
    "Descending",
    "Arhythmic",
    "Fast-paced",
    "Slow",
    "High-energy",
];

pub const PRODUCTION_STYLES: &[&str] = &[
    "Polished",
    "Raw",
    "Lo-fi",
    "High-Fidelity",
    "Masterpiece",
    "Perfectly Recorded",
];

pub const INSTRUMENTS: &[&str] = &[
    "Acoustic Guitar",
    "Electric Guitar",
    "Bass Guitar",
    "Slap Bass",
    "Drums",
    "Tribal Drums",
    "Synthesizers",
    "Piano",
    "Keyboard",
    "Organ",
    "Strings",
    "Violin",
    "Cello",
    "Brass Ensemble",
    "Trumpet",
    "Saxophone",
    "Flute",
    "Orchestra",
    "808s",
];

pub const VOCAL_TONES: &[&str] = &[
    "Low-pitched",
    "High-pitched",
    "Whispered",
    "Gravelly",
    "Airy",
    "Breathy",
    "Crisp",
    "Deep",
    "Smooth",
    "Sultry",
    "Haunting",
    "Euphoric",
    "Melancholic",
    "Aggressive",
    "Confident",
    "Desperate",
];

pub const VOCAL_EFFECTS: &[&str] = &[
    "Vibrato-heavy",
    "Staccato",
    "Operatic",
    "Ethereal",
    "Auto-tuned",
    "Distorted",
    "Reverbed",
    "Echoed",
    "Layered Vocals",
    "Chopped Vocals",
    "Pitch-shifted",
    "Vocoder",
    "Robotized",
    "Lo-fi Vocals",
];

/// Options for the set-valued prompt kinds
pub fn tag_options(kind: PromptKind) -> &'static [&'static str] {
    match kind {
        PromptKind::Genre => GENRES,
        PromptKind::Mood => MOODS_AND_ATMOSPHERES,
        PromptKind::Dynamics => DYNAMICS_AND_RHYTHM,
        PromptKind::Production => PRODUCTION_STYLES,
        PromptKind::Instrumentation => INSTRUMENTS,
        _ => &[],
    }
}

/// Step through the structure tags, wrapping at either end.
/// Unknown tags restart from the first entry.
pub fn cycle_structure_tag(current: &str, forward: bool) -> &'static str {
    let len = STRUCTURE_TAGS.len();
    let next = match STRUCTURE_TAGS.iter().position(|t| *t == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    STRUCTURE_TAGS[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_structure_tag_wraps() {
        assert_eq!(cycle_structure_tag("[Intro]", false), "[Big Finish]");
        assert_eq!(cycle_structure_tag("[Big Finish]", true), "[Intro]");
        assert_eq!(cycle_structure_tag("[Verse]", true), "[Pre-Chorus]");
        assert_eq!(cycle_structure_tag("[Unknown]", true), "[Intro]");
    }

    #[test]
    fn test_only_set_kinds_have_options() {
        assert!(!tag_options(PromptKind::Genre).is_empty());
        assert!(tag_options(PromptKind::Lyrics).is_empty());
    }
}

//! Field-level editing of block values and settings.
//!
//! A card is shown as a list of [`Field`]s. Text fields are edited through
//! the input line, tag fields through an option picker, and a few fields
//! (tempo, structure tag, duration) also step with `+`/`-`.

use std::path::{Path, PathBuf};

use songweaver_config::{Settings, Theme};
use songweaver_engine::catalog::{self, VOCAL_EFFECTS, VOCAL_TONES, cycle_structure_tag};
use songweaver_engine::io::{IoError, data_uri_from_file};
use songweaver_engine::{
    AlbumValue, BioValue, BlockValue, Link, PromptValue, TEMPO_RANGE, Track, toggle_tag,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Text,
    Tag,
    Duration,
    DurationUnit,
    Tempo,
    Tags,
    VocalTones,
    VocalEffects,
    Name,
    Tagline,
    Image,
    LinkPlatform(String),
    LinkUrl(String),
    Title,
    Artist,
    CoverArt,
    TrackTitle(String),
    TrackUrl(String),
    TrackFile(String),
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Text => "Text",
            Field::Tag => "Tag",
            Field::Duration => "Duration",
            Field::DurationUnit => "Unit",
            Field::Tempo => "BPM",
            Field::Tags => "Selected",
            Field::VocalTones => "Tones",
            Field::VocalEffects => "Effects",
            Field::Name => "Name",
            Field::Tagline => "Tagline",
            Field::Image => "Image",
            Field::LinkPlatform(_) => "Platform",
            Field::LinkUrl(_) => "URL",
            Field::Title => "Title",
            Field::Artist => "Artist",
            Field::CoverArt => "Cover",
            Field::TrackTitle(_) => "Track",
            Field::TrackUrl(_) => "URL",
            Field::TrackFile(_) => "File",
        }
    }

    /// Edited by toggling options rather than typing
    pub fn is_picker(&self) -> bool {
        matches!(self, Field::Tags | Field::VocalTones | Field::VocalEffects)
    }

    /// Typed input is a path to a local file
    pub fn takes_path(&self) -> bool {
        matches!(self, Field::Image | Field::CoverArt | Field::TrackFile(_))
    }

    /// Id of the link or track this field belongs to
    pub fn item_id(&self) -> Option<&str> {
        match self {
            Field::LinkPlatform(id)
            | Field::LinkUrl(id)
            | Field::TrackTitle(id)
            | Field::TrackUrl(id)
            | Field::TrackFile(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("Tempo must be between {min} and {max} BPM")]
    TempoOutOfRange { min: u32, max: u32 },
    #[error("Unknown theme '{0}'")]
    UnknownTheme(String),
    #[error(transparent)]
    Media(#[from] IoError),
    #[error("Field does not apply to this block")]
    NoSuchField,
}

/// A block value the terminal UI knows how to edit
pub trait Editable: BlockValue {
    /// Add refuses a kind the list already holds
    const UNIQUE_KINDS: bool = false;

    fn fields(&self) -> Vec<Field>;

    fn read(&self, field: &Field) -> String;

    fn write(&mut self, field: &Field, input: &str) -> Result<(), EditError>;

    fn options(&self, _field: &Field) -> &'static [&'static str] {
        &[]
    }

    fn selected_options(&self, _field: &Field) -> &[String] {
        &[]
    }

    fn toggle_option(&mut self, _field: &Field, _option: &str) -> bool {
        false
    }

    /// Step a numeric or cyclic field; `false` when the field has no steps
    fn step(&mut self, _field: &Field, _forward: bool) -> bool {
        false
    }

    /// Flip a boolean or two-state field
    fn switch(&mut self, _field: &Field) -> bool {
        false
    }

    /// Append a nested item (link, track)
    fn add_item(&mut self) -> bool {
        false
    }

    fn remove_item(&mut self, _item_id: &str) -> bool {
        false
    }
}

fn parse_number(input: &str) -> Result<u32, EditError> {
    input
        .trim()
        .parse()
        .map_err(|_| EditError::NotANumber(input.trim().to_string()))
}

fn join_or_none(tags: &[String]) -> String {
    if tags.is_empty() {
        "(none)".to_string()
    } else {
        tags.join(", ")
    }
}

fn attached(value: &Option<String>) -> String {
    match value {
        Some(_) => "attached".to_string(),
        None => "none".to_string(),
    }
}

/// Data URI for a path, or `None` when the input is blank
fn media_input(input: &str) -> Result<Option<String>, EditError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let path = shellexpand::tilde(input).into_owned();
    Ok(Some(data_uri_from_file(Path::new(&path))?))
}

impl Editable for PromptValue {
    fn fields(&self) -> Vec<Field> {
        match self {
            PromptValue::Structure(_) => vec![Field::Tag, Field::Duration, Field::DurationUnit],
            PromptValue::Lyrics(_) | PromptValue::SoundEffect(_) | PromptValue::Custom(_) => {
                vec![Field::Text]
            }
            PromptValue::Genre(_)
            | PromptValue::Mood(_)
            | PromptValue::Dynamics(_)
            | PromptValue::Production(_)
            | PromptValue::Instrumentation(_) => vec![Field::Tags],
            PromptValue::Vocals(_) => vec![Field::VocalTones, Field::VocalEffects],
            PromptValue::Tempo(_) => vec![Field::Tempo],
        }
    }

    fn read(&self, field: &Field) -> String {
        match (self, field) {
            (PromptValue::Structure(s), Field::Tag) => s.tag.clone(),
            (PromptValue::Structure(s), Field::Duration) => {
                let state = if s.duration.enabled { "on" } else { "off" };
                format!("{} ({state})", s.duration.value)
            }
            (PromptValue::Structure(s), Field::DurationUnit) => s.duration.unit.as_str().to_string(),
            (PromptValue::Vocals(v), Field::VocalTones) => join_or_none(&v.tones),
            (PromptValue::Vocals(v), Field::VocalEffects) => join_or_none(&v.effects),
            (PromptValue::Tempo(bpm), Field::Tempo) => bpm.to_string(),
            (value, Field::Tags) => value.tags().map(|t| join_or_none(t)).unwrap_or_default(),
            (value, Field::Text) => value.text().unwrap_or_default().to_string(),
            _ => String::new(),
        }
    }

    fn write(&mut self, field: &Field, input: &str) -> Result<(), EditError> {
        match (self, field) {
            (PromptValue::Structure(s), Field::Tag) => s.tag = input.to_string(),
            (PromptValue::Structure(s), Field::Duration) => {
                s.duration.value = parse_number(input)?;
                s.duration.enabled = true;
            }
            (PromptValue::Tempo(bpm), Field::Tempo) => {
                let value = parse_number(input)?;
                if !TEMPO_RANGE.contains(&value) {
                    return Err(EditError::TempoOutOfRange {
                        min: *TEMPO_RANGE.start(),
                        max: *TEMPO_RANGE.end(),
                    });
                }
                *bpm = value;
            }
            (value, Field::Text) => {
                *value = value
                    .with_text(input.to_string())
                    .ok_or(EditError::NoSuchField)?;
            }
            _ => return Err(EditError::NoSuchField),
        }
        Ok(())
    }

    fn options(&self, field: &Field) -> &'static [&'static str] {
        match field {
            Field::Tags => catalog::tag_options(self.kind()),
            Field::VocalTones => VOCAL_TONES,
            Field::VocalEffects => VOCAL_EFFECTS,
            _ => &[],
        }
    }

    fn selected_options(&self, field: &Field) -> &[String] {
        match (self, field) {
            (PromptValue::Vocals(v), Field::VocalTones) => &v.tones,
            (PromptValue::Vocals(v), Field::VocalEffects) => &v.effects,
            (value, Field::Tags) => value.tags().map(Vec::as_slice).unwrap_or(&[]),
            _ => &[],
        }
    }

    fn toggle_option(&mut self, field: &Field, option: &str) -> bool {
        let selected = match (self, field) {
            (PromptValue::Vocals(v), Field::VocalTones) => &mut v.tones,
            (PromptValue::Vocals(v), Field::VocalEffects) => &mut v.effects,
            (value, Field::Tags) => match value.tags_mut() {
                Some(tags) => tags,
                None => return false,
            },
            _ => return false,
        };
        toggle_tag(selected, option);
        true
    }

    fn step(&mut self, field: &Field, forward: bool) -> bool {
        match (self, field) {
            (PromptValue::Tempo(bpm), Field::Tempo) => {
                let next = if forward { bpm.saturating_add(1) } else { bpm.saturating_sub(1) };
                *bpm = next.clamp(*TEMPO_RANGE.start(), *TEMPO_RANGE.end());
                true
            }
            (PromptValue::Structure(s), Field::Tag) => {
                s.tag = cycle_structure_tag(&s.tag, forward).to_string();
                true
            }
            (PromptValue::Structure(s), Field::Duration) => {
                s.duration.value = if forward {
                    s.duration.value.saturating_add(1)
                } else {
                    s.duration.value.saturating_sub(1).max(1)
                };
                true
            }
            (PromptValue::Structure(s), Field::DurationUnit) => {
                s.duration.unit = s.duration.unit.toggled();
                true
            }
            _ => false,
        }
    }

    fn switch(&mut self, field: &Field) -> bool {
        match (self, field) {
            (PromptValue::Structure(s), Field::Duration) => {
                s.duration.enabled = !s.duration.enabled;
                true
            }
            (PromptValue::Structure(s), Field::DurationUnit) => {
                s.duration.unit = s.duration.unit.toggled();
                true
            }
            _ => false,
        }
    }
}

impl Editable for BioValue {
    fn fields(&self) -> Vec<Field> {
        match self {
            BioValue::Header(_) => vec![Field::Name, Field::Tagline],
            BioValue::Image(_) => vec![Field::Image],
            BioValue::Text(_) => vec![Field::Text],
            BioValue::Links(links) => links
                .iter()
                .flat_map(|l| [Field::LinkPlatform(l.id.clone()), Field::LinkUrl(l.id.clone())])
                .collect(),
        }
    }

    fn read(&self, field: &Field) -> String {
        match (self, field) {
            (BioValue::Header(h), Field::Name) => h.name.clone(),
            (BioValue::Header(h), Field::Tagline) => h.tagline.clone(),
            (BioValue::Image(image), Field::Image) => attached(image),
            (BioValue::Text(text), Field::Text) => text.clone(),
            (BioValue::Links(links), Field::LinkPlatform(id)) => links
                .iter()
                .find(|l| &l.id == id)
                .map(|l| l.platform.clone())
                .unwrap_or_default(),
            (BioValue::Links(links), Field::LinkUrl(id)) => links
                .iter()
                .find(|l| &l.id == id)
                .map(|l| l.url.clone())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn write(&mut self, field: &Field, input: &str) -> Result<(), EditError> {
        match (self, field) {
            (BioValue::Header(h), Field::Name) => h.name = input.to_string(),
            (BioValue::Header(h), Field::Tagline) => h.tagline = input.to_string(),
            (BioValue::Image(image), Field::Image) => *image = media_input(input)?,
            (BioValue::Text(text), Field::Text) => *text = input.to_string(),
            (BioValue::Links(links), Field::LinkPlatform(id)) => {
                let link = links.iter_mut().find(|l| &l.id == id).ok_or(EditError::NoSuchField)?;
                link.platform = input.to_string();
            }
            (BioValue::Links(links), Field::LinkUrl(id)) => {
                let link = links.iter_mut().find(|l| &l.id == id).ok_or(EditError::NoSuchField)?;
                link.url = input.to_string();
            }
            _ => return Err(EditError::NoSuchField),
        }
        Ok(())
    }

    fn add_item(&mut self) -> bool {
        match self {
            BioValue::Links(links) => {
                links.push(Link::new());
                true
            }
            _ => false,
        }
    }

    fn remove_item(&mut self, item_id: &str) -> bool {
        match self {
            BioValue::Links(links) => {
                let before = links.len();
                links.retain(|l| l.id != item_id);
                links.len() != before
            }
            _ => false,
        }
    }
}

fn find_track<'a>(tracks: &'a [Track], id: &str) -> Option<&'a Track> {
    tracks.iter().find(|t| t.id == id)
}

impl Editable for AlbumValue {
    const UNIQUE_KINDS: bool = true;

    fn fields(&self) -> Vec<Field> {
        match self {
            AlbumValue::Header(_) => vec![Field::Title, Field::Artist, Field::CoverArt],
            AlbumValue::Tracklist(tracks) => tracks
                .iter()
                .flat_map(|t| {
                    [
                        Field::TrackTitle(t.id.clone()),
                        Field::TrackUrl(t.id.clone()),
                        Field::TrackFile(t.id.clone()),
                    ]
                })
                .collect(),
        }
    }

    fn read(&self, field: &Field) -> String {
        match (self, field) {
            (AlbumValue::Header(h), Field::Title) => h.title.clone(),
            (AlbumValue::Header(h), Field::Artist) => h.artist.clone(),
            (AlbumValue::Header(h), Field::CoverArt) => attached(&h.cover_art),
            (AlbumValue::Tracklist(tracks), Field::TrackTitle(id)) => find_track(tracks, id)
                .map(|t| t.title.clone())
                .unwrap_or_default(),
            (AlbumValue::Tracklist(tracks), Field::TrackUrl(id)) => find_track(tracks, id)
                .map(|t| t.url.clone())
                .unwrap_or_default(),
            (AlbumValue::Tracklist(tracks), Field::TrackFile(id)) => find_track(tracks, id)
                .and_then(|t| t.file_name.clone())
                .unwrap_or_else(|| "none".to_string()),
            _ => String::new(),
        }
    }

    fn write(&mut self, field: &Field, input: &str) -> Result<(), EditError> {
        match (self, field) {
            (AlbumValue::Header(h), Field::Title) => h.title = input.to_string(),
            (AlbumValue::Header(h), Field::Artist) => h.artist = input.to_string(),
            (AlbumValue::Header(h), Field::CoverArt) => h.cover_art = media_input(input)?,
            (AlbumValue::Tracklist(tracks), field) => {
                let id = field.item_id().ok_or(EditError::NoSuchField)?;
                let track = tracks.iter_mut().find(|t| t.id == id).ok_or(EditError::NoSuchField)?;
                match field {
                    Field::TrackTitle(_) => track.title = input.to_string(),
                    Field::TrackUrl(_) => track.set_url(input.to_string()),
                    Field::TrackFile(_) => {
                        let expanded = shellexpand::tilde(input.trim()).into_owned();
                        let path = std::fs::canonicalize(&expanded)
                            .map_err(|_| IoError::NotFound(PathBuf::from(&expanded)))?;
                        let file_name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        track.set_file(format!("file://{}", path.display()), file_name);
                    }
                    _ => return Err(EditError::NoSuchField),
                }
            }
            _ => return Err(EditError::NoSuchField),
        }
        Ok(())
    }

    fn add_item(&mut self) -> bool {
        match self {
            AlbumValue::Tracklist(tracks) => {
                tracks.push(Track::numbered(tracks.len()));
                true
            }
            _ => false,
        }
    }

    fn remove_item(&mut self, item_id: &str) -> bool {
        match self {
            AlbumValue::Tracklist(tracks) => {
                let before = tracks.len();
                tracks.retain(|t| t.id != item_id);
                tracks.len() != before
            }
            _ => false,
        }
    }
}

/// An editable line on the settings page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    Theme,
    ArtistName,
    StudioName,
    AlbumName,
    Copyright,
    StudioLogo,
    ArtistLogo,
    StudioBio,
    StudioWebsite,
    StudioEmail,
    StudioPhone,
    SplashBackground,
    ServerAddress,
    GeneratorCommand,
}

impl SettingField {
    pub const ALL: &'static [SettingField] = &[
        SettingField::Theme,
        SettingField::ArtistName,
        SettingField::StudioName,
        SettingField::AlbumName,
        SettingField::Copyright,
        SettingField::StudioLogo,
        SettingField::ArtistLogo,
        SettingField::StudioBio,
        SettingField::StudioWebsite,
        SettingField::StudioEmail,
        SettingField::StudioPhone,
        SettingField::SplashBackground,
        SettingField::ServerAddress,
        SettingField::GeneratorCommand,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingField::Theme => "Theme",
            SettingField::ArtistName => "Artist name",
            SettingField::StudioName => "Studio name",
            SettingField::AlbumName => "Album name",
            SettingField::Copyright => "Copyright",
            SettingField::StudioLogo => "Studio logo",
            SettingField::ArtistLogo => "Artist logo",
            SettingField::StudioBio => "Studio bio",
            SettingField::StudioWebsite => "Studio website",
            SettingField::StudioEmail => "Studio email",
            SettingField::StudioPhone => "Studio phone",
            SettingField::SplashBackground => "Splash background",
            SettingField::ServerAddress => "Server address",
            SettingField::GeneratorCommand => "Generator command",
        }
    }

    pub fn takes_path(self) -> bool {
        matches!(
            self,
            SettingField::StudioLogo | SettingField::ArtistLogo | SettingField::SplashBackground
        )
    }

    pub fn read(self, settings: &Settings) -> String {
        match self {
            SettingField::Theme => settings.theme.name().to_string(),
            SettingField::ArtistName => settings.artist_name.clone(),
            SettingField::StudioName => settings.studio_name.clone(),
            SettingField::AlbumName => settings.album_name.clone(),
            SettingField::Copyright => settings.copyright.clone(),
            SettingField::StudioLogo => attached(&settings.studio_logo),
            SettingField::ArtistLogo => attached(&settings.artist_logo),
            SettingField::StudioBio => settings.studio_bio.clone(),
            SettingField::StudioWebsite => settings.studio_website.clone(),
            SettingField::StudioEmail => settings.studio_email.clone(),
            SettingField::StudioPhone => settings.studio_phone.clone(),
            SettingField::SplashBackground => attached(&settings.splash_background),
            SettingField::ServerAddress => settings.server_address.clone(),
            SettingField::GeneratorCommand => settings.generator_command.clone().unwrap_or_default(),
        }
    }

    pub fn write(self, settings: &mut Settings, input: &str) -> Result<(), EditError> {
        match self {
            SettingField::Theme => {
                let name = input.trim().to_ascii_lowercase();
                settings.theme = Theme::ALL
                    .iter()
                    .copied()
                    .find(|t| t.name() == name)
                    .ok_or(EditError::UnknownTheme(name))?;
            }
            SettingField::ArtistName => settings.artist_name = input.to_string(),
            SettingField::StudioName => settings.studio_name = input.to_string(),
            SettingField::AlbumName => settings.album_name = input.to_string(),
            SettingField::Copyright => settings.copyright = input.to_string(),
            SettingField::StudioLogo => settings.studio_logo = media_input(input)?,
            SettingField::ArtistLogo => settings.artist_logo = media_input(input)?,
            SettingField::StudioBio => settings.studio_bio = input.to_string(),
            SettingField::StudioWebsite => settings.studio_website = input.to_string(),
            SettingField::StudioEmail => settings.studio_email = input.to_string(),
            SettingField::StudioPhone => settings.studio_phone = input.to_string(),
            SettingField::SplashBackground => settings.splash_background = media_input(input)?,
            SettingField::ServerAddress => settings.server_address = input.to_string(),
            SettingField::GeneratorCommand => {
                let command = input.trim();
                settings.generator_command = (!command.is_empty()).then(|| command.to_string());
            }
        }
        Ok(())
    }
}

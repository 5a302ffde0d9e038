use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::{Context, Result};
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use songweaver_config::Settings;
use songweaver_engine::export::pdf::render_text_pdf;
use songweaver_engine::export::project::{default_file_name, export_project, load_into};
use songweaver_engine::export::promo::{PromoKitInput, promo_kit_markdown};
use songweaver_engine::export::{
    BIO_MARKDOWN_FILE, BIO_PDF_FILE, PROMO_KIT_FILE, PROMPT_MARKDOWN_FILE, PROMPT_PDF_FILE,
    prompt_markdown,
};
use songweaver_engine::format::album::AlbumView;
use songweaver_engine::format::bio::bio_markdown;
use songweaver_engine::io::{read_file, write_bytes, write_file};
use songweaver_engine::{
    AlbumValue, BioValue, BlockId, Branding, CardBounds, DragController, GenerateError,
    LyricsAssistant, PromptValue, TextGenerator, generate_prompt, starter_album, starter_bio,
    synced_album_header, synced_bio_header,
};

use crate::commands::branding;
use crate::edit::{Field, SettingField};
use crate::generator::CommandGenerator;
use crate::page::{PageOps, PageState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageId {
    Weaver,
    Bio,
    Album,
    Settings,
}

impl PageId {
    pub const ALL: &'static [PageId] = &[PageId::Weaver, PageId::Bio, PageId::Album, PageId::Settings];

    pub fn title(self) -> &'static str {
        match self {
            PageId::Weaver => "Song Weaver",
            PageId::Bio => "Artist Bio",
            PageId::Album => "Album",
            PageId::Settings => "Settings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Cards,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputTarget {
    Field(Field),
    Setting(SettingField),
    OpenProject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Input { target: InputTarget, buffer: String },
    Picker { field: Field, cursor: usize },
    ConfirmNew,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub error: bool,
}

/// Finished lyrics request coming back from a worker thread
struct Generation {
    id: BlockId,
    result: Result<String, GenerateError>,
}

/// The three block pages
pub struct Pages {
    pub weaver: PageState<PromptValue>,
    pub bio: PageState<BioValue>,
    pub album: PageState<AlbumValue>,
}

impl Pages {
    pub fn get(&self, page: PageId) -> Option<&dyn PageOps> {
        match page {
            PageId::Weaver => Some(&self.weaver),
            PageId::Bio => Some(&self.bio),
            PageId::Album => Some(&self.album),
            PageId::Settings => None,
        }
    }

    pub fn get_mut(&mut self, page: PageId) -> Option<&mut dyn PageOps> {
        match page {
            PageId::Weaver => Some(&mut self.weaver),
            PageId::Bio => Some(&mut self.bio),
            PageId::Album => Some(&mut self.album),
            PageId::Settings => None,
        }
    }
}

pub struct App {
    pub page: PageId,
    pub focus: Focus,
    pub mode: Mode,
    pub pages: Pages,
    pub settings: Settings,
    pub settings_path: PathBuf,
    pub settings_cursor: usize,
    pub drag: DragController,
    /// Screen area of each card from the last draw, by list index
    pub card_areas: Vec<Rect>,
    pub project_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    /// Track highlighted in the album preview
    pub album_track: Option<usize>,
    pub status: Option<Status>,
    pub assistant: LyricsAssistant,
    pub should_quit: bool,
    generations_tx: Sender<Generation>,
    generations_rx: Receiver<Generation>,
}

impl App {
    pub fn new(settings: Settings, settings_path: PathBuf, output_dir: PathBuf) -> Self {
        let (generations_tx, generations_rx) = mpsc::channel();
        let pages = Pages {
            weaver: PageState::new(Vec::new()),
            bio: PageState::new(starter_bio(&settings.artist_name)),
            album: PageState::new(starter_album(&settings.album_name, &settings.artist_name)),
        };

        Self {
            page: PageId::Weaver,
            focus: Focus::Cards,
            mode: Mode::Normal,
            pages,
            settings,
            settings_path,
            settings_cursor: 0,
            drag: DragController::new(),
            card_areas: Vec::new(),
            project_path: None,
            output_dir,
            album_track: None,
            status: None,
            assistant: LyricsAssistant::new(),
            should_quit: false,
            generations_tx,
            generations_rx,
        }
    }

    pub fn prompt(&self) -> String {
        generate_prompt(self.pages.weaver.list.as_slice())
    }

    pub fn branding(&self) -> Branding {
        branding(&self.settings)
    }

    fn info(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::info!("{text}");
        self.status = Some(Status { text, error: false });
    }

    fn error(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::error!("{text}");
        self.status = Some(Status { text, error: true });
    }

    /// Replace the prompt page with a project file
    pub fn open_project(&mut self, path: &Path) -> Result<()> {
        let text = read_file(path).with_context(|| format!("reading {}", path.display()))?;
        load_into(&mut self.pages.weaver.list, &text)
            .with_context(|| format!("Could not open or parse the project file {}", path.display()))?;
        self.pages.weaver.select(0);
        self.project_path = Some(path.to_path_buf());
        self.page = PageId::Weaver;
        Ok(())
    }

    fn open_project_reporting(&mut self, path: &Path) {
        match self.open_project(path) {
            Ok(()) => self.info(format!("Opened {}", path.display())),
            Err(e) => self.error(format!("Error: {e:#}")),
        }
    }

    pub fn save_project(&mut self) -> Result<PathBuf> {
        let now = Utc::now();
        let path = self
            .project_path
            .clone()
            .unwrap_or_else(|| self.output_dir.join(default_file_name(now)));
        let text = export_project(
            self.pages.weaver.list.as_slice(),
            &self.prompt(),
            &self.branding(),
            now,
        )?;
        write_file(&path, &text)?;
        self.project_path = Some(path.clone());
        Ok(path)
    }

    pub fn export_markdown(&mut self) -> Result<Option<PathBuf>> {
        let (name, text) = match self.page {
            PageId::Weaver => (PROMPT_MARKDOWN_FILE, prompt_markdown(&self.prompt(), &self.branding())),
            PageId::Bio => (
                BIO_MARKDOWN_FILE,
                bio_markdown(self.pages.bio.list.as_slice(), &self.branding()),
            ),
            PageId::Album | PageId::Settings => return Ok(None),
        };
        let path = self.output_dir.join(name);
        write_file(&path, &text)?;
        Ok(Some(path))
    }

    pub fn export_pdf(&mut self) -> Result<Option<PathBuf>> {
        let (name, title, text) = match self.page {
            PageId::Weaver => (PROMPT_PDF_FILE, "Song Prompt", self.prompt()),
            PageId::Bio => (
                BIO_PDF_FILE,
                "Artist Bio",
                bio_markdown(self.pages.bio.list.as_slice(), &self.branding()),
            ),
            PageId::Album | PageId::Settings => return Ok(None),
        };
        let bytes = render_text_pdf(title, &text)?;
        let path = self.output_dir.join(name);
        write_bytes(&path, &bytes)?;
        Ok(Some(path))
    }

    pub fn export_promo_kit(&mut self) -> Result<PathBuf> {
        let prompt = self.prompt();
        let input = PromoKitInput {
            settings: &self.settings,
            prompt_blocks: self.pages.weaver.list.as_slice(),
            generated_prompt: &prompt,
            bio_blocks: self.pages.bio.list.as_slice(),
            album_blocks: self.pages.album.list.as_slice(),
        };
        let text = promo_kit_markdown(&input, &self.branding())?;
        let path = self.output_dir.join(PROMO_KIT_FILE);
        write_file(&path, &text)?;
        Ok(path)
    }

    /// Move the album preview cursor one track, wrapping at either end
    pub fn step_album_track(&mut self, forward: bool) {
        let view = AlbumView::from_blocks(self.pages.album.list.as_slice());
        let current = self.album_track.filter(|&i| i < view.tracks.len());
        self.album_track = if forward {
            view.next_track(current)
        } else {
            view.previous_track(current)
        };
    }

    /// Carry artist and album names into headers still holding placeholders
    pub fn sync_settings(&mut self) {
        let artist = self.settings.artist_name.clone();
        let album = self.settings.album_name.clone();

        let bio_updates: Vec<_> = self
            .pages
            .bio
            .list
            .iter()
            .filter_map(|b| synced_bio_header(&b.value, &artist).map(|v| (b.id.clone(), v)))
            .collect();
        for (id, value) in bio_updates {
            self.pages.bio.list.update(&id, value);
        }

        let album_updates: Vec<_> = self
            .pages
            .album
            .list
            .iter()
            .filter_map(|b| synced_album_header(&b.value, &album, &artist).map(|v| (b.id.clone(), v)))
            .collect();
        for (id, value) in album_updates {
            self.pages.album.list.update(&id, value);
        }
    }

    pub fn save_settings(&mut self) {
        match self.settings.save_to_path(&self.settings_path) {
            Ok(()) => self.info(format!("Settings saved to {}", self.settings_path.display())),
            Err(e) => self.error(format!("Failed to save settings: {e:#}")),
        }
    }

    /// Start generating lyrics for the selected block on a worker thread
    pub fn request_lyrics(&mut self) {
        let Some(command) = self.settings.generator_command.clone() else {
            self.error("Set a generator command in settings to enable lyrics generation");
            return;
        };
        let weaver = &self.pages.weaver;
        let Some(id) = weaver.selected().and_then(|i| weaver.id_at(i)) else {
            return;
        };

        let request = match self.assistant.start(weaver.list.as_slice(), &id) {
            Ok(request) => request,
            Err(e) => {
                self.error(e.to_string());
                return;
            }
        };

        let tx = self.generations_tx.clone();
        let generator = CommandGenerator::new(command);
        thread::spawn(move || {
            let result = generator.generate(&request);
            // The receiver only goes away when the app exits
            let _ = tx.send(Generation {
                id: request.block_id,
                result,
            });
        });
        self.info("Generating lyrics...");
    }

    /// Apply finished lyrics requests
    pub fn poll_generations(&mut self) {
        while let Ok(generation) = self.generations_rx.try_recv() {
            let result = self.assistant.finish(
                &mut self.pages.weaver.list,
                &generation.id,
                generation.result,
            );
            match result {
                Ok(()) => self.info("Lyrics updated"),
                Err(e) => self.error(format!("Error generating lyrics: {e}")),
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.mode.clone() {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Input { target, buffer } => self.handle_input_key(key, target, buffer),
            Mode::Picker { field, cursor } => self.handle_picker_key(key, field, cursor),
            Mode::ConfirmNew => {
                if key.code == KeyCode::Char('y') {
                    self.pages.weaver.list.clear();
                    self.pages.weaver.select(0);
                    self.project_path = None;
                    self.info("Started a new project");
                } else {
                    self.status = None;
                }
                self.mode = Mode::Normal;
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.page = PageId::ALL[index];
                self.drag.cancel();
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Sidebar => Focus::Cards,
                    Focus::Cards => Focus::Sidebar,
                }
            }
            KeyCode::Esc => self.drag.cancel(),
            KeyCode::Char('o') => {
                self.mode = Mode::Input {
                    target: InputTarget::OpenProject,
                    buffer: String::new(),
                }
            }
            KeyCode::Char('n') => {
                self.mode = Mode::ConfirmNew;
                self.info("Start a new project? Unsaved changes will be lost. (y/n)");
            }
            KeyCode::Char('s') if self.page == PageId::Settings => self.save_settings(),
            KeyCode::Char('s') => match self.save_project() {
                Ok(path) => self.info(format!("Saved {}", path.display())),
                Err(e) => self.error(format!("Failed to save project: {e:#}")),
            },
            KeyCode::Char('m') => match self.export_markdown() {
                Ok(Some(path)) => self.info(format!("Exported {}", path.display())),
                Ok(None) => self.info("Nothing to export as markdown on this page"),
                Err(e) => self.error(format!("Markdown export failed: {e:#}")),
            },
            KeyCode::Char('p') => match self.export_pdf() {
                Ok(Some(path)) => self.info(format!("Exported {}", path.display())),
                Ok(None) => self.info("Nothing to export as PDF on this page"),
                Err(e) => self.error(format!("PDF export failed: {e:#}")),
            },
            KeyCode::Char('P') => match self.export_promo_kit() {
                Ok(path) => self.info(format!("Exported {}", path.display())),
                Err(e) => self.error(format!("Promo kit export failed: {e:#}")),
            },
            KeyCode::Char('.') if self.page == PageId::Album => self.step_album_track(true),
            KeyCode::Char(',') if self.page == PageId::Album => self.step_album_track(false),
            _ if self.page == PageId::Settings => self.handle_settings_key(key),
            _ if self.focus == Focus::Sidebar => self.handle_sidebar_key(key),
            _ => self.handle_cards_key(key),
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        let len = SettingField::ALL.len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.settings_cursor = (self.settings_cursor + 1) % len,
            KeyCode::Up | KeyCode::Char('k') => self.settings_cursor = (self.settings_cursor + len - 1) % len,
            KeyCode::Enter => {
                let field = SettingField::ALL[self.settings_cursor];
                if field == SettingField::Theme {
                    self.settings.theme = self.settings.theme.next();
                    return;
                }
                let buffer = if field.takes_path() {
                    String::new()
                } else {
                    field.read(&self.settings)
                };
                self.mode = Mode::Input {
                    target: InputTarget::Setting(field),
                    buffer,
                };
            }
            _ => {}
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        let Some(page) = self.pages.get_mut(self.page) else {
            return;
        };
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => page.sidebar_step(true),
            KeyCode::Up | KeyCode::Char('k') => page.sidebar_step(false),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let label = page.kind_labels()[page.sidebar()];
                if page.add_highlighted().is_some() {
                    self.sync_settings();
                    self.info(format!("Added {label}"));
                } else {
                    self.info(format!("This page already has a {label} block"));
                }
            }
            _ => {}
        }
    }

    fn handle_cards_key(&mut self, key: KeyEvent) {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        if key.code == KeyCode::Char('g') {
            if self.page == PageId::Weaver {
                self.request_lyrics();
            }
            return;
        }

        let Some(page) = self.pages.get_mut(self.page) else {
            return;
        };
        match key.code {
            KeyCode::Up if shift => {
                page.nudge_selected(true);
            }
            KeyCode::Down if shift => {
                page.nudge_selected(false);
            }
            KeyCode::Char('K') => {
                page.nudge_selected(true);
            }
            KeyCode::Char('J') => {
                page.nudge_selected(false);
            }
            KeyCode::Down | KeyCode::Char('j') => page.select_step(true),
            KeyCode::Up | KeyCode::Char('k') => page.select_step(false),
            KeyCode::Right | KeyCode::Char('l') => page.field_step(true),
            KeyCode::Left | KeyCode::Char('h') => page.field_step(false),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char(']') => {
                page.step_current(true);
            }
            KeyCode::Char('-') | KeyCode::Char('[') => {
                page.step_current(false);
            }
            KeyCode::Char(' ') => {
                page.switch_current();
            }
            KeyCode::Char('i') => {
                page.add_item();
            }
            KeyCode::Char('X') => {
                page.remove_current_item();
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                page.remove_selected();
            }
            KeyCode::Enter => {
                let Some(field) = page.current_field() else {
                    return;
                };
                self.mode = if field.is_picker() {
                    Mode::Picker { field, cursor: 0 }
                } else {
                    let buffer = if field.takes_path() {
                        String::new()
                    } else {
                        page.read_current().unwrap_or_default()
                    };
                    Mode::Input {
                        target: InputTarget::Field(field),
                        buffer,
                    }
                };
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent, target: InputTarget, mut buffer: String) {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                return;
            }
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => buffer.push('\n'),
            KeyCode::Enter => {
                self.mode = Mode::Normal;
                self.commit_input(target, &buffer);
                return;
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => {}
        }
        self.mode = Mode::Input { target, buffer };
    }

    fn commit_input(&mut self, target: InputTarget, buffer: &str) {
        match target {
            InputTarget::Field(field) => {
                let Some(page) = self.pages.get_mut(self.page) else {
                    return;
                };
                if let Err(e) = page.write_current(&field, buffer) {
                    self.error(e.to_string());
                }
            }
            InputTarget::Setting(field) => match field.write(&mut self.settings, buffer) {
                Ok(()) => {
                    self.sync_settings();
                    self.info("Settings updated (press s to save)");
                }
                Err(e) => self.error(e.to_string()),
            },
            InputTarget::OpenProject => {
                let path = shellexpand::tilde(buffer.trim()).into_owned();
                self.open_project_reporting(Path::new(&path));
            }
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent, field: Field, mut cursor: usize) {
        let Some(page) = self.pages.get_mut(self.page) else {
            self.mode = Mode::Normal;
            return;
        };
        let options = page.options(&field);
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.mode = Mode::Normal;
                return;
            }
            KeyCode::Down | KeyCode::Char('j') if !options.is_empty() => {
                cursor = (cursor + 1) % options.len();
            }
            KeyCode::Up | KeyCode::Char('k') if !options.is_empty() => {
                cursor = (cursor + options.len() - 1) % options.len();
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(option) = options.get(cursor) {
                    page.toggle_option(&field, option);
                }
            }
            _ => {}
        }
        self.mode = Mode::Picker { field, cursor };
    }

    fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.card_areas.iter().position(|area| area.contains(position))
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.mode != Mode::Normal {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(index) = self.card_at(mouse.column, mouse.row) else {
                    return;
                };
                let Some(page) = self.pages.get_mut(self.page) else {
                    return;
                };
                page.select(index);
                if let Some(id) = page.id_at(index) {
                    self.focus = Focus::Cards;
                    self.drag.begin(id, index);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) if self.drag.is_dragging() => {
                let Some(index) = self.card_at(mouse.column, mouse.row) else {
                    return;
                };
                let area = self.card_areas[index];
                let bounds = CardBounds::new(area.y as f32, area.bottom() as f32);
                let Some(page) = self.pages.get_mut(self.page) else {
                    return;
                };
                let pointer_y = Some(mouse.row as f32 + 0.5);
                if let Some(moved) = self.drag.hover(page.reorder(), index, bounds, pointer_y) {
                    page.select(moved.to);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag.drop();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use songweaver_engine::{BioHeader, BlockKind, PromptKind};
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> App {
        App::new(
            Settings::default(),
            dir.path().join("settings.toml"),
            dir.path().to_path_buf(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn add_prompt_block(app: &mut App, kind: PromptKind) -> BlockId {
        let index = PromptKind::ALL.iter().position(|k| *k == kind).unwrap();
        app.focus = Focus::Sidebar;
        while app.pages.weaver.sidebar() != index {
            press(app, KeyCode::Down);
        }
        press(app, KeyCode::Enter);
        app.focus = Focus::Cards;
        app.pages.weaver.list.as_slice().last().unwrap().id.clone()
    }

    fn mouse(kind: MouseEventKind, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column: 5,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_typing_into_lyrics_updates_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        add_prompt_block(&mut app, PromptKind::Lyrics);

        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Neon rain");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.prompt(), "Neon rain");
    }

    #[test]
    fn test_picker_toggles_genres() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        add_prompt_block(&mut app, PromptKind::Genre);

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Esc);

        let genres = songweaver_engine::catalog::GENRES;
        assert_eq!(app.prompt(), format!("[Genre: {}, {}]", genres[0], genres[1]));
    }

    #[test]
    fn test_mouse_drag_reorders_cards() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        for _ in 0..5 {
            add_prompt_block(&mut app, PromptKind::Tempo);
        }
        let ids: Vec<BlockId> = app.pages.weaver.list.iter().map(|b| b.id.clone()).collect();
        app.card_areas = (0..5).map(|i| Rect::new(0, i * 4, 40, 4)).collect();

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 13));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 1));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 1));

        let order: Vec<BlockId> = app.pages.weaver.list.iter().map(|b| b.id.clone()).collect();
        assert_eq!(
            order,
            vec![
                ids[3].clone(),
                ids[0].clone(),
                ids[1].clone(),
                ids[2].clone(),
                ids[4].clone()
            ]
        );
        assert_eq!(app.pages.weaver.selected(), Some(0));
        assert!(!app.drag.is_dragging());
    }

    #[test]
    fn test_drag_waits_for_midpoint() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        for _ in 0..3 {
            add_prompt_block(&mut app, PromptKind::Tempo);
        }
        let first = app.pages.weaver.id_at(0).unwrap();
        app.card_areas = (0..3).map(|i| Rect::new(0, i * 4, 40, 4)).collect();

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1));
        // Upper half of the next card: no swap yet
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 4));
        assert_eq!(app.pages.weaver.id_at(0), Some(first.clone()));

        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 7));
        assert_eq!(app.pages.weaver.id_at(1), Some(first));
    }

    #[test]
    fn test_save_then_open_project() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        add_prompt_block(&mut app, PromptKind::Structure);
        add_prompt_block(&mut app, PromptKind::Tempo);
        let before = app.pages.weaver.list.snapshot();

        press(&mut app, KeyCode::Char('s'));
        let path = app.project_path.clone().unwrap();
        assert!(path.starts_with(dir.path()));

        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.pages.weaver.len(), 0);

        app.open_project(&path).unwrap();
        assert_eq!(app.pages.weaver.list.as_slice(), &before[..]);
    }

    #[test]
    fn test_open_invalid_project_reports_and_keeps_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        add_prompt_block(&mut app, PromptKind::Tempo);
        let broken = dir.path().join("broken.songweaver");
        std::fs::write(&broken, "no json here").unwrap();

        press(&mut app, KeyCode::Char('o'));
        type_text(&mut app, broken.to_str().unwrap());
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.pages.weaver.len(), 1);
        assert!(app.status.as_ref().unwrap().error);
    }

    #[test]
    fn test_exports_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        add_prompt_block(&mut app, PromptKind::Tempo);

        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('P'));
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('m'));

        let prompt_md = std::fs::read_to_string(dir.path().join("song-prompt.md")).unwrap();
        assert!(prompt_md.contains("[120 BPM]"));
        assert!(dir.path().join("song-prompt.pdf").exists());
        assert!(dir.path().join("promo-kit.md").exists());
        let bio_md = std::fs::read_to_string(dir.path().join("artist-bio.md")).unwrap();
        assert!(bio_md.contains("## Your Artist Name"));
    }

    #[test]
    fn test_artist_name_setting_syncs_headers() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);

        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Nova");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.settings.artist_name, "Nova");
        assert_eq!(
            app.pages.bio.list.as_slice()[0].value,
            BioValue::Header(BioHeader {
                name: "Nova".to_string(),
                tagline: "Your tagline or genre".to_string(),
            })
        );
        let AlbumValue::Header(header) = &app.pages.album.list.as_slice()[0].value else {
            panic!("album starts with a header");
        };
        assert_eq!(header.artist, "Nova");

        press(&mut app, KeyCode::Char('s'));
        let saved = Settings::load_from_path(dir.path().join("settings.toml")).unwrap().unwrap();
        assert_eq!(saved.artist_name, "Nova");
    }

    #[test]
    fn test_album_track_cursor_wraps() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('.'));
        assert_eq!(app.album_track, None);

        app.pages.album.select(1);
        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Char('i'));

        press(&mut app, KeyCode::Char('.'));
        assert_eq!(app.album_track, Some(0));
        press(&mut app, KeyCode::Char(','));
        assert_eq!(app.album_track, Some(1));
        press(&mut app, KeyCode::Char('.'));
        assert_eq!(app.album_track, Some(0));
    }

    #[test]
    fn test_generation_requires_command() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        add_prompt_block(&mut app, PromptKind::Lyrics);

        press(&mut app, KeyCode::Char('g'));

        assert!(app.status.as_ref().unwrap().error);
        assert!(!app.assistant.any_generating());
    }

    #[test]
    fn test_generation_round_trip_through_worker() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.settings.generator_command = Some("cat >/dev/null; echo '  Neon rain  '".to_string());
        let id = add_prompt_block(&mut app, PromptKind::Lyrics);

        press(&mut app, KeyCode::Char('g'));
        assert!(app.assistant.is_generating(&id));
        press(&mut app, KeyCode::Char('g'));
        assert!(app.status.as_ref().unwrap().error);

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        while app.assistant.any_generating() && std::time::Instant::now() < deadline {
            app.poll_generations();
            thread::sleep(std::time::Duration::from_millis(10));
        }

        assert_eq!(
            app.pages.weaver.list.get(&id).unwrap().value,
            PromptValue::Lyrics("Neon rain".to_string())
        );
    }
}

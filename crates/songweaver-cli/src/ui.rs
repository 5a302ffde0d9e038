use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use songweaver_engine::format::album::album_text;
use songweaver_engine::format::bio::bio_markdown;

use crate::app::{App, Focus, InputTarget, Mode, PageId};
use crate::edit::{Field, SettingField};
use crate::page::{Card, PageOps};

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let primary = rgb(app.settings.theme.primary());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let titles: Vec<String> = PageId::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| format!("{} {}", i + 1, page.title()))
        .collect();
    let selected_tab = PageId::ALL.iter().position(|p| *p == app.page).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected_tab)
        .highlight_style(Style::default().fg(primary).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, rows[0]);

    if app.page == PageId::Settings {
        app.card_areas.clear();
        draw_settings(f, app, rows[1]);
    } else {
        draw_page(f, app, rows[1]);
    }

    draw_status(f, app, rows[2]);
    f.render_widget(Paragraph::new(help_line(app)), rows[3]);

    match app.mode.clone() {
        Mode::Input { target, buffer } => draw_input(f, app, &target, &buffer),
        Mode::Picker { field, cursor } => draw_picker(f, app, &field, cursor),
        Mode::Normal | Mode::ConfirmNew => {}
    }
}

fn draw_page(f: &mut Frame, app: &mut App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(45),
            Constraint::Percentage(35),
        ])
        .split(area);

    let primary = rgb(app.settings.theme.primary());
    let accent = rgb(app.settings.theme.accent());

    let Some(page) = app.pages.get(app.page) else {
        return;
    };

    // Sidebar of block kinds
    let items: Vec<ListItem> = page
        .kind_labels()
        .into_iter()
        .map(|label| ListItem::new(format!("+ {label}")))
        .collect();
    let sidebar_focused = app.focus == Focus::Sidebar;
    let mut sidebar_state = ListState::default();
    sidebar_state.select(Some(page.sidebar()));
    let sidebar = List::new(items)
        .block(bordered("Blocks", sidebar_focused, primary))
        .highlight_style(if sidebar_focused {
            Style::default().bg(primary).fg(Color::Black)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        });
    f.render_stateful_widget(sidebar, columns[0], &mut sidebar_state);

    let cards = page.cards();
    let selected = page.selected();
    let field = page.field_index();
    let ids: Vec<_> = (0..cards.len()).filter_map(|i| page.id_at(i)).collect();

    let preview = match app.page {
        PageId::Weaver => app.prompt(),
        PageId::Bio => bio_markdown(app.pages.bio.list.as_slice(), &app.branding()),
        PageId::Album => album_text(app.pages.album.list.as_slice(), app.album_track),
        PageId::Settings => String::new(),
    };

    // Stacked cards, scrolled so the selected one is visible
    let container = bordered(app.page.title(), !sidebar_focused, primary);
    let inner = container.inner(columns[1]);
    f.render_widget(container, columns[1]);

    app.card_areas = vec![Rect::default(); cards.len()];
    if cards.is_empty() {
        let hint = Paragraph::new("Add blocks from the sidebar (Tab, then Enter)")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, inner);
    }

    let heights: Vec<u16> = cards.iter().map(card_height).collect();
    let first = first_visible(&heights, selected.unwrap_or(0), inner.height);
    let mut y = inner.y;
    for (index, card) in cards.iter().enumerate().skip(first) {
        if y >= inner.bottom() {
            break;
        }
        let height = heights[index].min(inner.bottom() - y);
        let card_area = Rect::new(inner.x, y, inner.width, height);
        app.card_areas[index] = card_area;
        y += height;

        let is_selected = selected == Some(index);
        let id = &ids[index];
        let dragging = app.drag.is_dragging_id(id);
        let generating = app.page == PageId::Weaver && app.assistant.is_generating(id);

        let mut title = format!(" {} ", card.title);
        if generating {
            title.push_str("(generating...) ");
        }
        if dragging {
            title.push_str("↕ ");
        }
        let border_style = if dragging {
            Style::default().fg(accent).add_modifier(Modifier::DIM)
        } else if is_selected {
            Style::default().fg(accent)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let lines: Vec<Line> = card
            .lines
            .iter()
            .enumerate()
            .map(|(i, (label, value))| {
                let style = if is_selected && i == field && !sidebar_focused {
                    Style::default().bg(primary).fg(Color::Black)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
                    Span::styled(first_line(value), style),
                ])
            })
            .collect();

        let widget = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );
        f.render_widget(widget, card_area);
    }

    let preview = Paragraph::new(preview)
        .block(Block::default().borders(Borders::ALL).title("Preview"))
        .wrap(Wrap { trim: false });
    f.render_widget(preview, columns[2]);
}

fn card_height(card: &Card) -> u16 {
    card.lines.len() as u16 + 2
}

/// First card to draw so that `selected` ends inside `height`
fn first_visible(heights: &[u16], selected: usize, height: u16) -> usize {
    let mut used = 0u16;
    let mut first = selected.min(heights.len().saturating_sub(1));
    for index in (0..=first).rev() {
        let Some(h) = heights.get(index) else {
            break;
        };
        if used + h > height && index != first {
            break;
        }
        used += h;
        first = index;
    }
    first
}

/// Multi-line values show their first line only
fn first_line(value: &str) -> String {
    match value.split_once('\n') {
        Some((first, _)) => format!("{first} …"),
        None => value.to_string(),
    }
}

fn bordered(title: &str, focused: bool, primary: Color) -> Block<'static> {
    let style = if focused {
        Style::default().fg(primary)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title.to_string())
}

fn draw_settings(f: &mut Frame, app: &App, area: Rect) {
    let primary = rgb(app.settings.theme.primary());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let items: Vec<ListItem> = SettingField::ALL
        .iter()
        .map(|field| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<18}", field.label()), Style::default().fg(Color::Gray)),
                Span::raw(first_line(&field.read(&app.settings))),
            ]))
        })
        .collect();
    let mut state = ListState::default();
    state.select(Some(app.settings_cursor));
    let list = List::new(items)
        .block(bordered("Settings", true, primary))
        .highlight_style(Style::default().bg(primary).fg(Color::Black));
    f.render_stateful_widget(list, columns[0], &mut state);

    let about = vec![
        Line::from(format!("Settings file: {}", app.settings_path.display())),
        Line::from(""),
        Line::from("Enter edits a value, Enter on Theme cycles it."),
        Line::from("Logo and background fields take an image path."),
        Line::from("The generator command reads the lyrics request on"),
        Line::from("stdin and prints lyrics on stdout."),
        Line::from(""),
        Line::from("s saves the settings."),
    ];
    let about = Paragraph::new(about)
        .block(Block::default().borders(Borders::ALL).title("About"))
        .wrap(Wrap { trim: true });
    f.render_widget(about, columns[1]);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status {
        Some(status) => {
            let color = if status.error { Color::Red } else { Color::Green };
            Line::from(Span::styled(status.text.clone(), Style::default().fg(color)))
        }
        None => match &app.project_path {
            Some(path) => Line::from(format!("Project: {}", path.display())),
            None => Line::from("Project: (unsaved)"),
        },
    };
    f.render_widget(Paragraph::new(line), area);
}

fn help_line(app: &App) -> Line<'static> {
    let text = match (&app.mode, app.page, app.focus) {
        (Mode::Input { .. }, _, _) => "Enter: Apply | Alt+Enter: Newline | Esc: Cancel",
        (Mode::Picker { .. }, _, _) => "↑/↓: Move | Space/Enter: Toggle | Esc: Done",
        (Mode::ConfirmNew, _, _) => "y: Start new project | any other key: Cancel",
        (Mode::Normal, PageId::Settings, _) => "q: Quit | 1-4: Pages | ↑/↓: Move | Enter: Edit | s: Save settings",
        (Mode::Normal, _, Focus::Sidebar) => "q: Quit | 1-4: Pages | Tab: Cards | ↑/↓: Move | Enter: Add block",
        (Mode::Normal, PageId::Weaver, Focus::Cards) => {
            "q: Quit | Tab: Sidebar | Enter: Edit | ←/→: Field | K/J: Move | x: Delete | g: Lyrics | s: Save | o: Open | n: New | m/p: Export"
        }
        (Mode::Normal, PageId::Album, Focus::Cards) => {
            "q: Quit | Tab: Sidebar | Enter: Edit | ←/→: Field | K/J: Move | i/X: Add/remove track | ,/.: Browse tracks | P: Promo kit"
        }
        (Mode::Normal, _, Focus::Cards) => {
            "q: Quit | Tab: Sidebar | Enter: Edit | ←/→: Field | K/J: Move | x: Delete | i/X: Add/remove item | m/p/P: Export"
        }
    };
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}

fn popup(area: Rect, width_percent: u16, height: u16) -> Rect {
    let width = area.width * width_percent / 100;
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_input(f: &mut Frame, app: &App, target: &InputTarget, buffer: &str) {
    let title = match target {
        InputTarget::Field(field) => format!("Edit {}", field.label()),
        InputTarget::Setting(field) => format!("Edit {}", field.label()),
        InputTarget::OpenProject => "Open project file".to_string(),
    };
    let line_count = buffer.lines().count().max(1) as u16;
    let area = popup(f.area(), 70, line_count + 2);

    let mut text = buffer.to_string();
    text.push('█');
    let input = Paragraph::new(text)
        .block(bordered(&title, true, rgb(app.settings.theme.primary())))
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, area);
    f.render_widget(input, area);
}

fn draw_picker(f: &mut Frame, app: &App, field: &Field, cursor: usize) {
    let Some(page) = app.pages.get(app.page) else {
        return;
    };
    let options = page.options(field);
    let chosen = page.selected_options(field);

    let items: Vec<ListItem> = options
        .iter()
        .map(|option| {
            let mark = if chosen.iter().any(|c| c == option) { "[x]" } else { "[ ]" };
            ListItem::new(format!("{mark} {option}"))
        })
        .collect();
    let primary = rgb(app.settings.theme.primary());
    let area = popup(f.area(), 50, options.len() as u16 + 2);
    let mut state = ListState::default();
    state.select(Some(cursor));
    let list = List::new(items)
        .block(bordered(&format!("Choose {}", field.label()), true, primary))
        .highlight_style(Style::default().bg(primary).fg(Color::Black));
    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}

//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::{App, AppMode, FormField};
use crate::render::{PromptList, UNKNOWN_FOLDER, escape_display};
use crate::theme::Palette;
use components::{base_style, render_dialog_framework, render_input_widget};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let palette = app.theme.palette();
    frame.render_widget(Block::default().style(base_style(&palette)), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Min(10),   // 列表
            Constraint::Length(8), // 详情
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0], &palette);
    render_prompt_list(frame, app, chunks[1], &palette);
    render_details(frame, app, chunks[2], &palette);
    render_help(frame, app, chunks[3], &palette);

    if app.mode == AppMode::AddingPrompt {
        render_add_dialog(frame, app, &palette);
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let line = Line::from(vec![
        Span::styled(
            "Prompt Organizer",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[t] {}", app.theme.glyph()),
            Style::default().fg(palette.muted),
        ),
    ]);
    let title = Paragraph::new(line)
        .style(base_style(palette))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_prompt_list(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let block = Block::default().title("Prompts").borders(Borders::ALL);

    let cards = match &app.prompt_list {
        PromptList::Placeholder(message) => {
            let placeholder = Paragraph::new(*message)
                .style(base_style(palette).fg(palette.muted))
                .block(block);
            frame.render_widget(placeholder, area);
            return;
        }
        PromptList::Cards(cards) => cards,
    };

    let items: Vec<ListItem> = cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let title_style = if i == app.selected_index {
                Style::default()
                    .fg(palette.highlight)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default()
                    .fg(palette.foreground)
                    .add_modifier(Modifier::BOLD)
            };

            ListItem::new(vec![
                Line::from(Span::styled(card.title.clone(), title_style)),
                Line::from(Span::styled(
                    format!("Folder: {}", card.folder_name),
                    Style::default().fg(palette.accent),
                )),
                Line::from(Span::styled(
                    card.preview.clone(),
                    Style::default().fg(palette.muted),
                )),
            ])
        })
        .collect();

    let list = List::new(items).style(base_style(palette)).block(block);

    let mut state = ListState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_details(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let content = match app.selected_prompt() {
        Some(prompt) => {
            let created = prompt
                .created_at()
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| prompt.date_created.clone());
            let folder = app
                .data
                .folder_name(prompt.folder_id)
                .map(escape_display)
                .unwrap_or_else(|| UNKNOWN_FOLDER.to_string());

            format!(
                "Title: {}\nFolder: {}  Created: {}\n{}",
                escape_display(&prompt.title),
                folder,
                created,
                escape_display(&prompt.body)
            )
        }
        None => String::new(),
    };

    let details = Paragraph::new(content)
        .style(base_style(palette))
        .block(Block::default().title("Details").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(details, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let help_text = match app.mode {
        AppMode::Normal => "[a] Add  [t] Theme  [j/k] Navigate  [q] Quit",
        AppMode::AddingPrompt => "[Tab] Next field  [←/→] Folder  [Enter] Save  [Esc] Cancel",
    };

    let text = match app.message.as_deref() {
        Some(message) if !message.is_empty() => format!("{}  |  {}", help_text, message),
        _ => help_text.to_string(),
    };

    let help = Paragraph::new(text)
        .style(base_style(palette).fg(palette.muted))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_add_dialog(frame: &mut Frame, app: &App, palette: &Palette) {
    let area = centered_rect(70, 60, frame.area());
    let inner = render_dialog_framework(frame, area, "Add New Prompt", palette);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(inner);

    let focus = app.form.focus;
    render_input_widget(
        frame,
        chunks[0],
        "Title",
        &escape_display(&app.form.title),
        focus == FormField::Title,
        palette,
    );
    render_input_widget(
        frame,
        chunks[1],
        "Body",
        &escape_display(&app.form.body),
        focus == FormField::Body,
        palette,
    );

    let folder_label = app
        .selected_folder_option()
        .map(|option| format!("< {} >", option.label))
        .unwrap_or_default();
    render_input_widget(
        frame,
        chunks[2],
        "Folder",
        &folder_label,
        focus == FormField::Folder,
        palette,
    );
}

use gitact_core::app::LoadSource;
use gitact_core::domain::format_number;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};
use super::model::{TuiModel, ViewMode};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const DESCRIPTION_WIDTH: usize = 80;

/// Column widths of the repository table
const TABLE_WIDTHS: [u16; 5] = [25, 8, 8, 12, 12];

const SHORT_HELP: &str = "↑/k up • ↓/j down • / search • c clone • x copy url • o open • tab switch view • r refresh • ? more • q quit";

const FULL_HELP: [&str; 5] = [
    "↑/k ↓/j move      pgup/pgdn page     home/end jump",
    "tab/→/l next view      shift-tab/←/h previous view",
    "/ search (list view)      esc dismiss notification / quit",
    "c copy clone command      x copy url      o open in browser",
    "r refresh      ? toggle help      q/ctrl-c quit",
];

/// The View component of MVU - responsible for rendering the model
pub struct TuiView;

impl TuiView {
    /// Render the entire TUI based on the current model state
    pub fn render(model: &TuiModel, frame: &mut Frame) {
        let size = frame.area();

        if !model.is_ready() {
            Self::render_loading(model, frame, size);
            return;
        }

        let notification_rows = if model.notification.current().is_some() { 1 } else { 0 };
        let search_rows = if model.input.active { 1 } else { 0 };
        let help_rows = if model.ui_state.show_help { FULL_HELP.len() as u16 } else { 1 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                 // Header
                Constraint::Length(notification_rows), // Notification bar
                Constraint::Length(search_rows),       // Search bar
                Constraint::Min(0),                    // Main content
                Constraint::Length(help_rows),         // Key help
            ])
            .split(size);

        Self::render_header(model, frame, chunks[0]);
        Self::render_notification(model, frame, chunks[1]);
        if model.input.active {
            Self::render_search_bar(model, frame, chunks[2]);
        }

        match model.mode {
            ViewMode::RepositoryList => Self::render_repo_list(model, frame, chunks[3]),
            ViewMode::RepositoryTable => Self::render_repo_table(model, frame, chunks[3]),
            ViewMode::Statistics => Self::render_stats(model, frame, chunks[3]),
            ViewMode::ActivityFeed => Self::render_activity(model, frame, chunks[3]),
        }

        Self::render_help(model, frame, chunks[4]);
    }

    /// Spinner plus one line per data source
    fn render_loading(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let spinner = SPINNER_FRAMES[model.ui_state.spinner_frame % SPINNER_FRAMES.len()];
        let source_line = |source: LoadSource| {
            let loaded = model.load.slot(source).is_done();
            let (mark, text) = match (source, loaded) {
                (LoadSource::Repositories, true) => ("✅", "Repositories loaded"),
                (LoadSource::Repositories, false) => ("⏳", "Loading repositories..."),
                (LoadSource::Events, true) => ("✅", "Activity loaded"),
                (LoadSource::Events, false) => ("⏳", "Loading activity..."),
            };
            Line::from(format!("{} {}", mark, text))
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(spinner, Style::default().fg(Color::Magenta)),
                Span::raw(format!(" Loading GitHub data for {}...", model.username)),
            ]),
            Line::from(""),
            source_line(LoadSource::Repositories),
            source_line(LoadSource::Events),
        ];

        if let Some(notification) = model.notification.current() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                notification.message.clone(),
                notification_style(notification.success),
            )));
        }

        let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn render_header(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                format!("🐙 GitHub Dashboard - {}", model.username),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(model.totals_line()),
            Line::from(model.mode.indicator()),
        ];

        let header = Paragraph::new(lines)
            .style(Style::default().fg(Color::White).bg(Color::Indexed(57)));
        frame.render_widget(header, area);
    }

    fn render_notification(model: &TuiModel, frame: &mut Frame, area: Rect) {
        if let Some(notification) = model.notification.current() {
            let bar = Paragraph::new(notification.message.as_str())
                .style(notification_style(notification.success));
            frame.render_widget(bar, area);
        }
    }

    fn render_search_bar(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
            Span::raw(model.input.text.as_str()),
            Span::styled("█", Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_repo_list(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let repos = model.projection.repositories();
        let items: Vec<ListItem> = model
            .repo_list
            .items
            .iter()
            .filter_map(|&i| repos.get(i))
            .map(|repo| {
                let description = truncate(repo.description_or_empty(), DESCRIPTION_WIDTH);
                let description = if description.is_empty() { "No description".to_string() } else { description };
                ListItem::new(vec![
                    Line::from(Span::styled(
                        format!("{} ⭐ {}", repo.name, format_number(repo.stars)),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("🍴 {} • {}", format_number(repo.forks), description),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(model.repo_list.title.as_str()))
            .highlight_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
            .highlight_symbol("│ ");

        let mut state = ListState::default().with_selected(Some(model.repo_list.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_repo_table(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let header = Row::new(["Name", "Stars", "Forks", "Language", "Updated"])
            .style(Style::default().add_modifier(Modifier::UNDERLINED));

        let rows = model
            .table
            .rows
            .iter()
            .map(|row| Row::new(row.iter().zip(TABLE_WIDTHS).map(|(cell, width)| truncate(cell, width as usize))));

        let table = Table::new(rows, TABLE_WIDTHS.map(Constraint::Length))
            .header(header)
            .block(Block::default().borders(Borders::ALL))
            .row_highlight_style(Style::default().fg(Color::Indexed(229)).bg(Color::Indexed(57)));

        let mut state = TableState::default().with_selected(Some(model.table.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_stats(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = model.stats.lines.iter().map(|l| Line::from(l.as_str())).collect();
        let scroll = u16::try_from(model.stats.scroll).unwrap_or(u16::MAX);

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn render_activity(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = model
            .projection
            .events()
            .iter()
            .map(|event| {
                ListItem::new(vec![
                    Line::from(event.summary()),
                    Line::from(Span::styled(
                        event.created_at.format("%Y-%m-%d %H:%M").to_string(),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(model.activity_list.title.as_str()))
            .highlight_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
            .highlight_symbol("│ ");

        let mut state = ListState::default().with_selected(Some(model.activity_list.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_help(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let style = Style::default().fg(Color::DarkGray);
        let lines: Vec<Line> = if model.ui_state.show_help {
            FULL_HELP.iter().map(|l| Line::from(Span::styled(*l, style))).collect()
        } else {
            vec![Line::from(Span::styled(SHORT_HELP, style))]
        };
        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn notification_style(success: bool) -> Style {
    if success {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        Style::default().fg(Color::White).bg(Color::Red)
    }
}

/// Cut `text` to at most `max` characters, ending in "..." when cut
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str("...");
    cut
}

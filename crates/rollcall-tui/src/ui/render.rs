use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use rollcall_core::models::{GroupAssignment, GroupByMode, SortMode};

use crate::app::{App, AppState, LoadState};

use super::styles::Theme;

/// Shown when the roster loads but holds no names.
pub const EMPTY_ROSTER_MESSAGE: &str = "No student names found in the sheet.";

pub fn render(frame: &mut Frame, app: &App) {
    let theme = Theme::for_mode(app.options.dark_mode);
    frame.render_widget(Block::default().style(theme.base_style()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Mode toggles and group picker
            Constraint::Min(5),    // Roster columns
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, &theme, chunks[0]);
    render_controls(frame, app, &theme, chunks[1]);
    render_main_content(frame, app, &theme, chunks[2]);
    render_status_bar(frame, app, &theme, chunks[3]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame, &theme);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame, &theme);
    }
}

fn render_title_bar(frame: &mut Frame, theme: &Theme, area: Rect) {
    let title = "  Attendance";
    let date = Local::now().format("%A, %B %-d, %Y").to_string();
    let help_hint = "[?] Help";

    let padding = (area.width as usize).saturating_sub(title.len() + date.len() + help_hint.len() + 4);
    let left_pad = padding / 2;

    let title_line = Line::from(vec![
        Span::styled(title, theme.title_style()),
        Span::raw(" ".repeat(left_pad)),
        Span::styled(date, theme.item_style()),
        Span::raw(" ".repeat(padding - left_pad)),
        Span::styled(help_hint, theme.muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

/// Push `label: a | b` with the active choice highlighted.
fn push_toggle<'a>(spans: &mut Vec<Span<'a>>, theme: &Theme, label: &'a str, choices: [(&'a str, bool); 2]) {
    spans.push(Span::styled(label, theme.item_style()));
    for (i, (text, selected)) in choices.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", theme.muted_style()));
        }
        spans.push(Span::styled(text, theme.choice_style(selected)));
    }
    spans.push(Span::raw("    "));
}

fn render_controls(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let options = &app.options;

    let mut modes = vec![Span::raw(" ")];
    push_toggle(
        &mut modes,
        theme,
        "[g] Group by: ",
        [
            (GroupByMode::Group.label(), options.group_by_mode == GroupByMode::Group),
            (GroupByMode::Alpha.label(), options.group_by_mode == GroupByMode::Alpha),
        ],
    );
    push_toggle(
        &mut modes,
        theme,
        "[s] Sort by: ",
        [
            (SortMode::Last.label(), options.sort_mode == SortMode::Last),
            (SortMode::First.label(), options.sort_mode == SortMode::First),
        ],
    );
    push_toggle(
        &mut modes,
        theme,
        "[t] Theme: ",
        [("Dark", options.dark_mode), ("Light", !options.dark_mode)],
    );

    let mut picker = vec![Span::styled(" [x/1-0] Group Number: ", theme.item_style())];
    for (i, choice) in GroupAssignment::choices().enumerate() {
        if i > 0 {
            picker.push(Span::raw(" "));
        }
        picker.push(Span::styled(
            choice.to_string(),
            theme.choice_style(choice == app.selected_group),
        ));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border_style());

    let paragraph = Paragraph::new(vec![Line::from(modes), Line::from(picker)]).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let message = match &app.load_state {
        LoadState::Loading => Some(Line::from(Span::styled(" Loading students…", theme.muted_style()))),
        LoadState::Failed(msg) => Some(Line::from(Span::styled(format!(" {}", msg), theme.error_style()))),
        LoadState::Loaded(_) if app.layout.is_empty() => {
            Some(Line::from(Span::styled(format!(" {}", EMPTY_ROSTER_MESSAGE), theme.muted_style())))
        }
        LoadState::Loaded(_) => None,
    };

    if let Some(line) = message {
        let paragraph = Paragraph::new(vec![Line::from(""), line]).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    }

    let count = app.layout.column_count();
    let constraints = vec![Constraint::Ratio(1, count as u32); count];
    let column_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (col, column_area) in column_areas.iter().enumerate() {
        render_column(frame, app, theme, col, *column_area);
    }
}

fn render_column(frame: &mut Frame, app: &App, theme: &Theme, col: usize, area: Rect) {
    let Some(buckets) = app.layout.columns.get(col) else {
        return;
    };

    let mut lines = Vec::new();
    let mut cursor_line = 0;
    let mut row_index = 0;

    for (i, bucket) in buckets.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(format!(" {}", bucket.label), theme.bucket_style())));

        for row in &bucket.rows {
            let at_cursor = col == app.cursor_col && row_index == app.cursor_row;
            if at_cursor {
                cursor_line = lines.len();
            }

            let mark = if row.checked { "[x]" } else { "[ ]" };
            let (mark_style, name_style) = if at_cursor {
                (theme.cursor_style(), theme.cursor_style())
            } else if row.checked {
                (theme.checked_style(), theme.item_style())
            } else {
                (theme.muted_style(), theme.item_style())
            };

            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(mark, mark_style),
                Span::styled(format!(" {}", row.display), name_style),
            ]));
            row_index += 1;
        }
    }

    // Keep the cursor row on screen.
    let height = area.height as usize;
    let offset = if col == app.cursor_col && height > 0 {
        cursor_line.saturating_sub(height - 1)
    } else {
        0
    };

    let block = if col + 1 < app.layout.column_count() {
        Block::default()
            .borders(Borders::RIGHT)
            .border_style(theme.border_style())
    } else {
        Block::default()
    };

    let paragraph = Paragraph::new(lines).block(block).scroll((offset as u16, 0));
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let shortcuts = "[space] toggle | [enter] submit | [r]eload | [q]uit";

    let (left_text, left_style) = match app.status {
        Some(ref msg) if msg.is_error => (format!(" {} ", msg.text), theme.error_style()),
        Some(ref msg) => (format!(" {} ", msg.text), theme.success_style()),
        None => (
            format!(" {} selected, Group: {} ", app.selected_count(), app.selected_group),
            theme.muted_style(),
        ),
    };

    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, theme.muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line)
        .style(theme.status_bar_style())
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn help_line<'a>(theme: &Theme, key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), theme.help_key_style()),
        Span::styled(desc, theme.help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame, theme: &Theme) {
    let area = centered_rect_fixed(50, 22, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  Rollcall", theme.title_style())),
        Line::from(Span::styled(format!("  version {}", version), theme.muted_style())),
        Line::from(""),
        Line::from(Span::styled(" Roster", theme.highlight_style())),
        help_line(theme, "↑/↓ j/k", "Move within a column"),
        help_line(theme, "←/→ h/l", "Move between columns"),
        help_line(theme, "Space", "Check / uncheck student"),
        help_line(theme, "Enter", "Submit checked students"),
        help_line(theme, "r", "Reload roster"),
        Line::from(""),
        Line::from(Span::styled(" Options", theme.highlight_style())),
        help_line(theme, "g", "Group by group number / A-Z"),
        help_line(theme, "s", "Sort by last / first name"),
        help_line(theme, "t", "Dark / light theme"),
        help_line(theme, "x", "Group number: Do Not Change"),
        help_line(theme, "1-9, 0", "Group number 1-9, 10"),
        Line::from(""),
        help_line(theme, "q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", theme.muted_style()),
            Span::styled("?", theme.help_key_style()),
            Span::styled(" or ", theme.muted_style()),
            Span::styled("Esc", theme.help_key_style()),
            Span::styled(" to close", theme.muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.title_style())
        .style(theme.base_style());

    let paragraph = Paragraph::new(help_text).block(block);

    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame, theme: &Theme) {
    let area = centered_rect_fixed(42, 7, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            theme.highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", theme.muted_style()),
            Span::styled("[Y]", theme.help_key_style()),
            Span::styled(" to quit, ", theme.muted_style()),
            Span::styled("[N]", theme.help_key_style()),
            Span::styled(" to cancel", theme.muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.title_style())
        .style(theme.base_style());

    let paragraph = Paragraph::new(lines).block(block);

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use rollcall_core::{Config, MemoryStore};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_centered_rect_fixed() {
        let outer = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect_fixed(50, 20, outer), Rect::new(25, 10, 50, 20));
        let small = Rect::new(0, 0, 30, 10);
        assert_eq!(centered_rect_fixed(50, 20, small), Rect::new(0, 0, 30, 10));
    }

    #[test]
    fn test_render_config_error() {
        let app = App::new(Config::default(), Box::new(MemoryStore::new()), 100);
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("Configuration error:"));
    }
}

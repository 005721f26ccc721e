use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use super::app::{DiaryApp, Focus};
use crate::store::Status;
use crate::task::Priority;

const HEADER: &str = "Welcome to Your Personal Task Diary!";

/// Draw the UI.
pub(super) fn draw_ui(f: &mut Frame, app: &DiaryApp) {
    let size = f.area();
    f.render_widget(Clear, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form + table
            Constraint::Length(2), // Notice + help
        ])
        .split(size);

    draw_header(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(chunks[1]);

    draw_form(f, body[0], app);
    draw_table(f, body[1], app);
    draw_footer(f, chunks[2], app);

    if app.confirm_delete {
        draw_delete_modal(f, size);
    }
}

/// Draw the greeting and the active filter.
fn draw_header(f: &mut Frame, area: Rect, app: &DiaryApp) {
    let line = Line::from(vec![
        Span::styled(
            HEADER,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("Filter by Priority: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.filter.to_string(), Style::default().fg(Color::Yellow)),
    ]);

    let header = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(header, area);
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { Color::Yellow } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(Color::White))
}

/// Draw the entry form: title, description, due date, priority.
fn draw_form(f: &mut Frame, area: Rect, app: &DiaryApp) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Write New Entry ")
        .title_style(Style::default().fg(Color::White));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let date_title = format!("Due Date ({})", app.store.date_format().pattern());
    let text_fields = [
        (Focus::Title, "Title", app.form.title.as_str(), rows[0]),
        (Focus::Description, "Description", app.form.description.as_str(), rows[1]),
        (Focus::DueDate, date_title.as_str(), app.form.due_date.as_str(), rows[2]),
    ];

    for (focus, title, text, area) in text_fields {
        let focused = app.focus == focus;
        f.render_widget(Paragraph::new(text).block(field_block(title, focused)), area);
        if focused {
            let width = text.chars().count() as u16;
            let x = (area.x + 1 + width).min(area.right().saturating_sub(2));
            f.set_cursor_position(Position::new(x, area.y + 1));
        }
    }

    let priorities: Vec<Span> = Priority::ALL
        .iter()
        .flat_map(|p| {
            let style = if *p == app.form.priority {
                priority_style(*p).add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            [Span::styled(format!(" {} ", p), style), Span::raw(" ")]
        })
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(priorities))
            .block(field_block("Priority", app.focus == Focus::Priority)),
        rows[3],
    );

    let hint = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Add task   [Esc] Go to list",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(hint, rows[4]);
}

fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::default().fg(Color::Magenta),
        Priority::Medium => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::Gray),
    }
}

fn status_style(status: Status) -> Style {
    match status {
        Status::WellDone => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Status::Due => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Status::Upcoming => Style::default().fg(Color::Cyan),
    }
}

/// Draw the task table in view order.
fn draw_table(f: &mut Frame, area: Rect, app: &DiaryApp) {
    let header = Row::new(["Title", "Due Date", "Priority", "Status"]).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .rows
        .iter()
        .map(|row| {
            Row::new([
                Cell::from(row.title.as_str()),
                Cell::from(row.due_date.as_str()),
                Cell::from(row.priority.as_str()).style(priority_style(row.priority)),
                Cell::from(row.status.as_str()).style(status_style(row.status)),
            ])
        })
        .collect();

    let border = if app.focus == Focus::Table {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" Your Tasks ({}) ", app.rows.len()))
            .title_style(Style::default().fg(Color::White)),
    )
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(app.selected);
    f.render_stateful_widget(table, area, &mut state);
}

/// Draw the notice line and key help.
fn draw_footer(f: &mut Frame, area: Rect, app: &DiaryApp) {
    let notice = match &app.notice {
        Some(n) if n.is_error => Line::from(Span::styled(
            n.text.as_str(),
            Style::default().fg(Color::Red),
        )),
        Some(n) => Line::from(Span::styled(
            n.text.as_str(),
            Style::default().fg(Color::Green),
        )),
        None => Line::from(""),
    };

    let help = if app.focus == Focus::Table {
        "[\u{2191}\u{2193}] select  [Space] toggle  [d] delete  [f] filter  [s] save  [l] load  [a] add  [q] quit"
    } else {
        "[Tab] next field  [Ctrl+S] save  [Ctrl+C] quit"
    };

    let footer = Paragraph::new(vec![
        notice,
        Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))),
    ]);
    f.render_widget(footer, area);
}

/// Draw the delete confirmation modal.
fn draw_delete_modal(f: &mut Frame, area: Rect) {
    let modal_width = 48u16;
    let modal_height = 6u16;
    let x = (area.width.saturating_sub(modal_width)) / 2;
    let y = (area.height.saturating_sub(modal_height)) / 2;
    let modal_area = Rect::new(
        x,
        y,
        modal_width.min(area.width),
        modal_height.min(area.height),
    );

    f.render_widget(Clear, modal_area);

    let modal_text = vec![
        Line::from(""),
        Line::from("Are you sure you want to delete this task?"),
        Line::from(""),
        Line::from(Span::styled("[Y]es  [N]o", Style::default().fg(Color::Cyan))),
    ];

    let modal = Paragraph::new(modal_text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Confirm Delete ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        );

    f.render_widget(modal, modal_area);
}

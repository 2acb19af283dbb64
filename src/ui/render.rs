// src/ui/render.rs - draws one frame of the chat page
use crate::chat::{ChatSession, Sender, TranscriptEntry};
use crate::input::editor::LineEditor;
use crate::view::OptionLabel;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const MIN_WIDTH: u16 = 30;
const MIN_HEIGHT: u16 = 12;

pub fn draw(frame: &mut Frame, session: &ChatSession, editor: &LineEditor) {
    let size = frame.size();
    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(size);

    draw_header(frame, session, chunks[0]);
    draw_transcript(frame, session, chunks[1]);
    draw_translation(frame, session, chunks[2]);
    draw_input(frame, session, editor, chunks[3]);
    draw_hints(frame, session, chunks[4]);

    if let Some(text) = session.notice_text() {
        draw_notice(frame, &text, &session.labels().notice_dismiss, size);
    }
}

fn option_label<'a>(options: &'a [OptionLabel], value: &'a str) -> &'a str {
    options
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label.as_str())
        .unwrap_or(value)
}

fn draw_header(frame: &mut Frame, session: &ChatSession, area: Rect) {
    let labels = session.labels();
    let active = session.active_locale().unwrap_or_default();
    let mut interface = option_label(&labels.interface_languages, active).to_string();
    if let Some(pending) = session.pending_locale() {
        interface = format!("{} → {}", interface, option_label(&labels.interface_languages, pending));
    }

    let line = Line::from(vec![
        Span::styled(
            labels.title.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(labels.interface_label.clone(), Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
        Span::raw(interface),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn entry_line(entry: &TranscriptEntry) -> Line<'static> {
    let (marker, color) = match entry.sender {
        Sender::User => ("›", Color::Green),
        Sender::Counterpart => ("‹", Color::Yellow),
    };
    Line::from(vec![
        Span::styled(
            entry.sent_at.format("%H:%M:%S ").to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("{} ", marker), Style::default().fg(color)),
        Span::raw(entry.content.clone()),
    ])
}

fn draw_transcript(frame: &mut Frame, session: &ChatSession, area: Rect) {
    let transcript = session.transcript();
    let height = area.height.saturating_sub(2) as usize;
    let visible = transcript.len().saturating_sub(transcript.scroll_offset());

    let lines: Vec<Line> = transcript
        .entries()
        .take(visible)
        .skip(visible.saturating_sub(height))
        .map(entry_line)
        .collect();

    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_translation(frame: &mut Frame, session: &ChatSession, area: Rect) {
    let labels = session.labels();
    let title = format!(
        " {} {} ",
        labels.target_label,
        option_label(&labels.targets, session.target())
    );
    let body = match session.translation_display() {
        Some(text) => Span::raw(text),
        None => Span::styled(
            labels.translation_placeholder.clone(),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(
        Paragraph::new(Line::from(body))
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_input(frame: &mut Frame, session: &ChatSession, editor: &LineEditor, area: Rect) {
    let labels = session.labels();
    let input = session.input();
    let enabled = session.input_enabled();

    let body = if input.is_empty() {
        Span::styled(labels.input_placeholder.clone(), Style::default().fg(Color::DarkGray))
    } else if enabled {
        Span::raw(input.to_string())
    } else {
        Span::styled(input.to_string(), Style::default().fg(Color::DarkGray))
    };

    let border = if session.can_send() { Color::White } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", labels.send_button))
        .title(
            ratatui::widgets::block::Title::from(format!(" {} ", labels.char_count))
                .alignment(Alignment::Right),
        );

    let inner_width = area.width.saturating_sub(2) as usize;
    let column = editor.cursor_column(input);
    let scroll = column.saturating_sub(inner_width.saturating_sub(1)) as u16;
    frame.render_widget(Paragraph::new(Line::from(body)).block(block).scroll((0, scroll)), area);

    if enabled && session.notice().is_none() && editor.cursor().is_visible() {
        frame.set_cursor(area.x + 1 + column as u16 - scroll, area.y + 1);
    }
}

fn draw_hints(frame: &mut Frame, session: &ChatSession, area: Rect) {
    let hints = &session.labels().hints;
    let text = [
        &hints.send,
        &hints.translate,
        &hints.combine,
        &hints.target,
        &hints.interface,
        &hints.quit,
    ]
    .iter()
    .map(|h| h.as_str())
    .collect::<Vec<_>>()
    .join("  ·  ");

    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_notice(frame: &mut Frame, text: &str, dismiss: &str, size: Rect) {
    let area = centered(size, 60, 7);
    let lines = vec![
        Line::from(text.to_string()),
        Line::from(""),
        Line::from(Span::styled(dismiss.to_string(), Style::default().fg(Color::DarkGray))),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn centered(size: Rect, percent_x: u16, height: u16) -> Rect {
    let width = (u32::from(size.width) * u32::from(percent_x.min(100)) / 100) as u16;
    Rect {
        x: size.x + (size.width - width) / 2,
        y: size.y + size.height.saturating_sub(height) / 2,
        width,
        height: height.min(size.height),
    }
}

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::content::Mode;
use crate::session::{CharState, Phase};

const HORIZONTAL_MARGIN: u16 = 5;

pub const LOADING_TEXT: &str = "Loading...";
pub const PARAGRAPH_ERROR_TEXT: &str = "Error fetching paragraph. Try again.";
pub const IMAGE_ERROR_TEXT: &str = "Error fetching image. Try again.";
const IMAGE_HINT_TEXT: &str = "Type the image description from memory";
const LEGEND_TEXT: &str = "(enter) new / (tab) mode / (esc)ape";
const RETRY_LEGEND_TEXT: &str = "(enter) retry / (tab) mode / (esc)ape";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.session.phase {
            Phase::Empty | Phase::Loading => render_notice(
                LOADING_TEXT,
                Style::default()
                    .add_modifier(Modifier::BOLD | Modifier::DIM),
                LEGEND_TEXT,
                area,
                buf,
            ),
            Phase::Error => {
                // Image failures revert to the plain text display too;
                // only the message names the provider that failed.
                let message = match self.session.mode {
                    Mode::Text => PARAGRAPH_ERROR_TEXT,
                    Mode::Image => IMAGE_ERROR_TEXT,
                };
                render_notice(
                    message,
                    Style::default()
                        .fg(Color::Red)
                        .add_modifier(Modifier::BOLD),
                    RETRY_LEGEND_TEXT,
                    area,
                    buf,
                );
            }
            Phase::Ready | Phase::Typing | Phase::Complete => render_session(self, area, buf),
        }
    }
}

fn render_notice(message: &str, style: Style, legend: &str, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(area.height / 2),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(Span::styled(message, style))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        legend,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[3], buf);
}

fn render_session(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let underlined_dim_bold_style = Style::default()
        .patch(dim_bold_style)
        .add_modifier(Modifier::UNDERLINED);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let target_width = session.target_text().width();
    let target_lines = if target_width <= max_chars_per_line as usize {
        1
    } else {
        ((target_width as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
    };

    // image mode shows the resolved URL and the typed line instead of a
    // char-by-char target
    let body_lines = match session.mode {
        Mode::Text => target_lines,
        Mode::Image => 3,
    };

    let top_pad = (area.height.saturating_sub(body_lines + 2)) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(top_pad),
            Constraint::Length(body_lines),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    match session.mode {
        Mode::Text => {
            let spans = session
                .target_text()
                .chars()
                .enumerate()
                .map(|(idx, c)| match session.char_state(idx) {
                    CharState::Correct => Span::styled(c.to_string(), green_bold_style),
                    CharState::Incorrect => Span::styled(
                        match c {
                            ' ' => "·".to_owned(),
                            c => c.to_string(),
                        },
                        red_bold_style,
                    ),
                    CharState::Untyped if idx == session.cursor_pos() => {
                        Span::styled(c.to_string(), underlined_dim_bold_style)
                    }
                    CharState::Untyped => Span::styled(c.to_string(), dim_bold_style),
                })
                .collect::<Vec<Span>>();

            Paragraph::new(Line::from(spans))
                .alignment(if target_lines == 1 {
                    Alignment::Center
                } else {
                    Alignment::Left
                })
                .wrap(Wrap { trim: true })
                .render(chunks[1], buf);
        }
        Mode::Image => {
            let image_line = session
                .image_url
                .as_deref()
                .unwrap_or("[ no image ]")
                .to_string();

            let lines = vec![
                Line::from(Span::styled(image_line, dim_bold_style)),
                Line::from(Span::styled(IMAGE_HINT_TEXT, italic_style)),
                Line::from(Span::styled(session.typed_text(), bold_style)),
            ];

            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(chunks[1], buf);
        }
    }

    let completion_marker = if session.is_complete() {
        " (Complete!)"
    } else {
        ""
    };
    let metrics_line = format!(
        "{:.0} wpm{}   {:.0}% acc   {} errors",
        session.wpm, completion_marker, session.accuracy, session.error_count
    );

    Paragraph::new(Span::styled(metrics_line, bold_style))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    Paragraph::new(Span::styled(LEGEND_TEXT, italic_style)).render(chunks[5], buf);
}

//! Rendering: output surface, prompt line, status bar, palette overlay.

use lumen_shell::markup::unescape;
use lumen_shell::{FeedbackKind, OutputNode, PaletteRow};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app_state::AppState;

pub fn draw(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_output(frame, chunks[0], state);
    draw_prompt(frame, chunks[1], state);
    draw_status(frame, chunks[2], state);

    if state.palette.is_open() {
        draw_palette(frame, frame.area(), state);
    }
}

fn accent_color(state: &AppState) -> Color {
    state
        .session
        .config
        .accent_color(&state.session.accent)
        .and_then(parse_hex)
        .unwrap_or(Color::Magenta)
}

fn parse_hex(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn feedback_color(kind: FeedbackKind) -> Color {
    match kind {
        FeedbackKind::Error => Color::Red,
        FeedbackKind::Success => Color::Green,
        FeedbackKind::Warning => Color::Yellow,
        FeedbackKind::Info => Color::Blue,
    }
}

/// Unpack a markup string into styled spans. The vocabulary is fixed
/// (`<mark>`, accent/dim/kbd spans); anything else renders literally.
fn markup_spans(markup: &str, accent: Color) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut stack: Vec<Style> = vec![Style::default()];
    let mut remaining = markup;
    while !remaining.is_empty() {
        match remaining.find('<') {
            Some(0) => {
                let Some(close) = remaining.find('>') else {
                    push_text(&mut spans, remaining, *stack.last().unwrap());
                    break;
                };
                let tag = &remaining[1..close];
                if tag.starts_with('/') {
                    if stack.len() > 1 {
                        stack.pop();
                    }
                } else if tag.starts_with("mark") {
                    stack.push(
                        Style::default()
                            .fg(accent)
                            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    );
                } else if tag.contains("accent") {
                    stack.push(Style::default().fg(accent));
                } else if tag.contains("dim") {
                    stack.push(Style::default().fg(Color::DarkGray));
                } else if tag.contains("kbd") {
                    stack.push(Style::default().add_modifier(Modifier::BOLD));
                } else {
                    stack.push(*stack.last().unwrap());
                }
                remaining = &remaining[close + 1..];
            },
            Some(idx) => {
                push_text(&mut spans, &remaining[..idx], *stack.last().unwrap());
                remaining = &remaining[idx..];
            },
            None => {
                push_text(&mut spans, remaining, *stack.last().unwrap());
                break;
            },
        }
    }
    if spans.is_empty() {
        spans.push(Span::raw(""));
    }
    spans
}

fn push_text(spans: &mut Vec<Span<'static>>, text: &str, style: Style) {
    if !text.is_empty() {
        spans.push(Span::styled(unescape(text), style));
    }
}

fn node_lines(node: &OutputNode, state: &AppState, accent: Color, lines: &mut Vec<Line<'static>>) {
    match node {
        OutputNode::Command { timestamp, raw } => {
            lines.push(Line::from(vec![
                Span::styled(format!("[{timestamp}] "), Style::default().fg(Color::DarkGray)),
                Span::styled("$ ", Style::default().fg(accent).add_modifier(Modifier::BOLD)),
                Span::styled(raw.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ]));
        },
        OutputNode::Text(text) => {
            for part in text.split('\n') {
                lines.push(Line::raw(part.to_string()));
            }
        },
        OutputNode::Line(markup) => {
            for part in markup.split('\n') {
                lines.push(Line::from(markup_spans(part, accent)));
            }
        },
        OutputNode::Banner(art) => {
            for part in art.lines() {
                lines.push(Line::styled(part.to_string(), Style::default().fg(accent)));
            }
        },
        OutputNode::Feedback { kind, body, details } => {
            let color = feedback_color(*kind);
            lines.push(Line::styled(
                format!("{} {}", kind.icon(), kind.title()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::raw(body.clone()));
            if let Some(details) = details {
                lines.push(Line::styled(
                    details.clone(),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        },
        OutputNode::Progress { message, percent } => {
            let filled = usize::from(*percent) / 10;
            let bar = format!("{}{}", "#".repeat(filled), "-".repeat(10 - filled));
            lines.push(Line::raw(format!("\u{27F3} {message} [{bar}] {percent}%")));
        },
        OutputNode::Typed { id, text } => {
            let visible = match state.session.typing.revealed_for(*id) {
                Some(n) => text.chars().take(n).collect::<String>(),
                None => text.clone(),
            };
            lines.push(Line::raw(visible));
        },
        OutputNode::Block(children) => {
            let mut inner = Vec::new();
            for child in children {
                node_lines(child, state, accent, &mut inner);
            }
            for line in inner {
                let mut spans = vec![Span::styled(
                    "\u{2502} ",
                    Style::default().fg(Color::DarkGray),
                )];
                spans.extend(line.spans);
                lines.push(Line::from(spans));
            }
        },
    }
}

fn draw_output(frame: &mut Frame, area: Rect, state: &AppState) {
    let accent = accent_color(state);
    let mut lines = Vec::new();
    for node in state.surface.nodes() {
        node_lines(node, state, accent, &mut lines);
    }
    // Pin the view to the bottom of the scrollback.
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let scroll = total.saturating_sub(area.height);
    frame.render_widget(Paragraph::new(Text::from(lines)).scroll((scroll, 0)), area);
}

fn draw_prompt(frame: &mut Frame, area: Rect, state: &AppState) {
    let accent = accent_color(state);
    let line = Line::from(vec![
        Span::styled("$ ", Style::default().fg(accent).add_modifier(Modifier::BOLD)),
        Span::raw(state.input_buf.clone()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
    if !state.palette.is_open() {
        let col = 2 + u16::try_from(state.input_buf.chars().count()).unwrap_or(u16::MAX);
        let x = (area.x + col).min(area.right().saturating_sub(1));
        frame.set_cursor_position((x, area.y));
    }
}

fn draw_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let mode = if state.palette.is_open() {
        "palette"
    } else {
        "normal"
    };
    let line = Line::from(vec![
        Span::styled(" theme: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            state.session.accent.clone(),
            Style::default().fg(accent_color(state)),
        ),
        Span::styled(format!("  mode: {mode}"), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_palette(frame: &mut Frame, area: Rect, state: &AppState) {
    if area.width < 20 || area.height < 7 {
        return;
    }
    let accent = accent_color(state);

    let width = (area.width * 70 / 100).clamp(20, 90);
    let height = (area.height * 60 / 100).max(7);
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 3,
        width,
        height,
    );

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            " Command Palette ({} commands) ",
            state.palette.total_items()
        ))
        .border_style(Style::default().fg(accent).add_modifier(Modifier::BOLD));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    if inner.height < 2 {
        return;
    }

    let query_area = Rect::new(inner.x, inner.y, inner.width, 1);
    let query_line = Line::from(vec![
        Span::styled("> ", Style::default().fg(accent).add_modifier(Modifier::BOLD)),
        Span::raw(state.palette_input.clone()),
    ]);
    frame.render_widget(Paragraph::new(query_line), query_area);
    let col = 2 + u16::try_from(state.palette_input.chars().count()).unwrap_or(u16::MAX);
    let x = (query_area.x + col).min(query_area.right().saturating_sub(1));
    frame.set_cursor_position((x, query_area.y));

    let list_area = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
    let rows = state
        .palette
        .rows(&state.registry, &state.session.recent_tail());

    let mut lines = Vec::new();
    let mut active_line = 0;
    for row in &rows {
        match row {
            PaletteRow::Category(label) => lines.push(Line::styled(
                label.clone(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )),
            PaletteRow::Item(item) => {
                if item.active {
                    active_line = lines.len();
                }
                let marker_style = if item.active {
                    Style::default().fg(accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let mut spans = vec![Span::styled(
                    if item.active { "> " } else { "  " },
                    marker_style,
                )];
                spans.extend(markup_spans(&item.markup, accent));
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    item.description.clone(),
                    Style::default().fg(Color::DarkGray),
                ));
                if item.recent {
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled(
                        "Recent",
                        Style::default().fg(accent).add_modifier(Modifier::ITALIC),
                    ));
                }
                lines.push(Line::from(spans));
            },
            PaletteRow::Empty => lines.push(Line::styled(
                "No commands found",
                Style::default().fg(Color::DarkGray),
            )),
        }
    }

    // Keep the active row visible.
    let visible = usize::from(list_area.height);
    let scroll = u16::try_from(active_line.saturating_add(1).saturating_sub(visible)).unwrap_or(0);
    frame.render_widget(
        Paragraph::new(Text::from(lines)).scroll((scroll, 0)),
        list_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_accepts_rgb() {
        assert_eq!(parse_hex("#9b87f5"), Some(Color::Rgb(0x9b, 0x87, 0xf5)));
        assert_eq!(parse_hex("9b87f5"), None);
        assert_eq!(parse_hex("#zzz"), None);
    }

    #[test]
    fn markup_spans_unpack_nested_vocabulary() {
        let spans = markup_spans(
            "<span class=\"dim\">hi</span> plain <mark class=\"match-highlight\">x</mark>",
            Color::Cyan,
        );
        let text: String = spans.iter().map(|s| s.content.clone()).collect();
        assert_eq!(text, "hi plain x");
    }

    #[test]
    fn markup_spans_unescape_entities() {
        let spans = markup_spans("a &lt;tag&gt; &amp; more", Color::Cyan);
        let text: String = spans.iter().map(|s| s.content.clone()).collect();
        assert_eq!(text, "a <tag> & more");
    }

    #[test]
    fn markup_spans_survive_unbalanced_tags() {
        let spans = markup_spans("</span>text<span", Color::Cyan);
        let text: String = spans.iter().map(|s| s.content.clone()).collect();
        assert!(text.contains("text"));
    }
}

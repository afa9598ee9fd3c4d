use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::application::{ConversationWidget, BANNER_TEXT};
use crate::domain::{Message, MessageId, Role};

const USER_COLOR: Color = Color::Cyan;
const ASSISTANT_COLOR: Color = Color::Green;
const ERROR_COLOR: Color = Color::Red;
const INPUT_HEIGHT: u16 = 3;

/// Draw the widget and return the height of the message viewport.
pub fn render(frame: &mut Frame, widget: &mut ConversationWidget) -> usize {
    let banner_height = u16::from(widget.banner_visible());
    let [banner_area, messages_area, status_area, input_area] = Layout::vertical([
        Constraint::Length(banner_height),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(INPUT_HEIGHT),
    ])
    .areas(frame.area());

    if widget.banner_visible() {
        frame.render_widget(
            Paragraph::new(BANNER_TEXT).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
            banner_area,
        );
    }

    let viewport = render_messages(frame, widget, messages_area);
    render_status(frame, widget, status_area);
    render_input(frame, widget, input_area);

    viewport
}

fn render_messages(frame: &mut Frame, widget: &mut ConversationWidget, area: Rect) -> usize {
    let block = Block::bordered().title(" Chat ");
    let inner = block.inner(area);
    let height = inner.height as usize;

    let (lines, blocks) = message_lines(widget.visible_messages(), inner.width as usize);
    let top = widget.scroll_mut().sync(&blocks, height);
    let shown: Vec<Line> = lines.into_iter().skip(top).take(height).collect();

    frame.render_widget(Paragraph::new(shown).block(block), area);
    height
}

fn render_status(frame: &mut Frame, widget: &ConversationWidget, area: Rect) {
    let line = if widget.is_pending() {
        Line::from(Span::styled(
            "Waiting for a reply...",
            Style::default().add_modifier(Modifier::BOLD),
        ))
    } else if let Some(notification) = widget.notification() {
        Line::from(Span::styled(
            format!("{}: {}", notification.title(), notification.description()),
            Style::default().fg(ERROR_COLOR),
        ))
    } else if !widget.scroll().is_auto_scroll() {
        Line::from(Span::styled(
            "Scrolled up. End to follow new messages.",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(
            "Enter to send. Esc to quit.",
            Style::default().fg(Color::DarkGray),
        ))
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_input(frame: &mut Frame, widget: &ConversationWidget, area: Rect) {
    let style = if widget.is_pending() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let block = Block::bordered().title(" Type your message ");
    let inner = block.inner(area);

    // Keep the tail of a long draft in view.
    let draft = widget.draft_input();
    let width = inner.width as usize;
    let draft_len = draft.chars().count();
    let visible: String = draft
        .chars()
        .skip(draft_len.saturating_sub(width.saturating_sub(1)))
        .collect();

    frame.render_widget(Paragraph::new(visible.as_str()).style(style).block(block), area);

    if !widget.is_pending() && inner.width > 0 {
        let x = inner.x + visible.chars().count() as u16;
        frame.set_cursor_position((x, inner.y));
    }
}

fn role_label(role: Role) -> (&'static str, Style) {
    match role {
        Role::User => ("You: ", Style::default().fg(USER_COLOR)),
        Role::Assistant => ("AI: ", Style::default().fg(ASSISTANT_COLOR)),
        Role::System => ("System: ", Style::default().fg(Color::DarkGray)),
    }
}

/// Lay out messages as wrapped lines, one blank line between messages.
///
/// Also returns how many lines each message took, its leading blank line
/// included.
fn message_lines(
    messages: &[Message],
    width: usize,
) -> (Vec<Line<'static>>, Vec<(MessageId, usize)>) {
    let mut lines = Vec::new();
    let mut blocks = Vec::with_capacity(messages.len());

    for (i, message) in messages.iter().enumerate() {
        let start = lines.len();
        if i > 0 {
            lines.push(Line::default());
        }

        let (label, style) = role_label(message.role());
        let text = format!("{}{}", label, message.content());
        for (j, row) in wrap_text(&text, width).into_iter().enumerate() {
            if j == 0 && row.starts_with(label) {
                let rest = row[label.len()..].to_string();
                lines.push(Line::from(vec![
                    Span::styled(label, style.add_modifier(Modifier::BOLD)),
                    Span::raw(rest),
                ]));
            } else {
                lines.push(Line::from(row));
            }
        }
        blocks.push((message.id(), lines.len() - start));
    }

    (lines, blocks)
}

/// Greedy word wrap by character count. Words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for source in text.split('\n') {
        let mut current = String::new();
        let mut len = 0;

        for word in source.split(' ') {
            let word_len = word.chars().count();
            if len > 0 && len + 1 + word_len > width {
                lines.push(std::mem::take(&mut current));
                len = 0;
            }
            if len > 0 {
                current.push(' ');
                len += 1;
            }
            for c in word.chars() {
                if len == width {
                    lines.push(std::mem::take(&mut current));
                    len = 0;
                }
                current.push(c);
                len += 1;
            }
        }

        lines.push(current);
    }

    lines
}

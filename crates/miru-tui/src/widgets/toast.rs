//! Toast widget — a transient one-line notification in the top-right
//! corner, auto-dismissed by the app shell after a fixed duration.
//!
//! Used for load failures and skipped-record warnings. Toasts never block
//! input; the interaction that caused one can simply be retried.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget},
};

pub struct Toast<'a> {
    message: &'a str,
    theme: &'a Theme,
}

impl<'a> Toast<'a> {
    pub fn new(message: &'a str, theme: &'a Theme) -> Self {
        Self { message, theme }
    }
}

impl Widget for Toast<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Display width: East Asian wide chars take two cells
        let width = (self.message.chars().map(char_width).sum::<usize>() + 2) as u16;
        let width = width.min(area.width);
        let rect = Rect {
            x: area.right().saturating_sub(width + 1),
            y: area.y + 1,
            width,
            height: 1,
        };

        Clear.render(rect, buf);
        Paragraph::new(Line::from(Span::styled(
            format!(" {} ", self.message),
            self.theme.toast_error,
        )))
        .render(rect, buf);
    }
}

/// Rough display-cell width of a char: 2 for CJK ranges, 1 otherwise.
/// Close enough for sizing a toast box.
fn char_width(c: char) -> usize {
    match c as u32 {
        0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F | 0xFF00..=0xFF60 | 0xFFE0..=0xFFE6 => 2,
        _ => 1,
    }
}

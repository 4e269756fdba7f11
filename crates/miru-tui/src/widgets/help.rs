//! Help popup — centred floating overlay listing all keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

pub struct HelpPopup<'a> {
    _theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { _theme: theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(80, 20, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" miru — keybindings (? to close) ")
            .border_style(Style::default().add_modifier(Modifier::BOLD));

        let inner = block.inner(popup);
        block.render(popup, buf);

        const BINDINGS: &[(&str, &str)] = &[
            ("q  /  Ctrl+c", "Quit"),
            ("1 / 2 / 3", "Switch tab: gallery / models / about"),
            ("Tab", "Cycle focus: gallery ↔ search"),
            ("/", "Focus the search bar"),
            ("Escape", "Close overlay / leave the search bar"),
            ("↑ k  /  ↓ j", "Move the gallery cursor"),
            ("PageUp  /  Ctrl+u", "Scroll the gallery up"),
            ("PageDown / Ctrl+d", "Scroll the gallery down"),
            ("G", "Jump back to the first result"),
            ("Enter", "Open the detail view"),
            ("s", "Cycle sort: newest → oldest → title"),
            ("m", "Cycle model facet"),
            ("c", "Clear the search query"),
            ("1-9 (in detail)", "Search by that tag"),
            (":", "Command bar (:sort, :model, :search, …)"),
            ("?", "Toggle this help popup"),
        ];

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<22}", key),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

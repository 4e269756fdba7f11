//! Gallery widget — the scrollable card list filling the main pane.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one card (scrolls view if needed) |
//! | `↓` / `j` | Move cursor down one card |
//! | `PageUp` / `Ctrl+u` | Scroll up one page |
//! | `PageDown` / `Ctrl+d` | Scroll down one page |
//! | `G` | Jump back to the first result |
//! | `Enter` | Open the detail view for the highlighted card |
//!
//! # Scroll semantics
//!
//! `scroll_offset` = number of results hidden above the window (0 = top).
//! `cursor` = absolute index into `results`. The cursor is always kept
//! within the visible window; moving it past the edge auto-scrolls.
//!
//! The widget holds catalog *indices*, not record references, so the
//! result sequence never borrows the catalog it lives next to.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use miru_core::{Catalog, ImageRecord};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct GalleryState {
    /// Catalog indices of the current result sequence, in result order.
    pub results: Vec<usize>,
    /// Absolute index into `results` of the highlighted card.
    pub cursor: usize,
    /// Number of results hidden above the window (0 = top).
    pub scroll_offset: usize,
    /// Cached from the last render so `handle()` can do cursor-aware
    /// scrolling.
    last_visible: Cell<usize>,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            last_visible: Cell::new(20),
        }
    }
}

impl GalleryState {
    /// Replace the result sequence after a filter-state change. The cursor
    /// is clamped and the window adjusted so it stays visible.
    pub fn set_results(&mut self, results: Vec<usize>) {
        self.results = results;
        let last = self.results.len().saturating_sub(1);
        self.cursor = self.cursor.min(last);
        self.scroll_offset = self.scroll_offset.min(last);
        self.keep_cursor_visible();
    }

    /// Catalog index of the highlighted card, if any.
    pub fn selected(&self) -> Option<usize> {
        self.results.get(self.cursor).copied()
    }

    fn visible(&self) -> usize {
        self.last_visible.get().max(1)
    }

    fn keep_cursor_visible(&mut self) {
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + self.visible() {
            self.scroll_offset = self.cursor + 1 - self.visible();
        }
    }

    /// Handle a navigation event from the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.results.len();
        if total == 0 {
            return;
        }

        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                self.keep_cursor_visible();
                tracing::debug!(cursor = self.cursor, "gallery: cursor up");
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + 1 < total {
                    self.cursor += 1;
                }
                self.keep_cursor_visible();
                tracing::debug!(cursor = self.cursor, "gallery: cursor down");
            }
            AppEvent::ScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(PAGE_STEP);
                self.cursor = self.cursor.saturating_sub(PAGE_STEP);
                self.keep_cursor_visible();
                tracing::debug!(
                    scroll_offset = self.scroll_offset,
                    cursor = self.cursor,
                    "gallery: page up"
                );
            }
            AppEvent::ScrollDown => {
                let last = total - 1;
                self.scroll_offset = (self.scroll_offset + PAGE_STEP).min(last);
                self.cursor = (self.cursor + PAGE_STEP).min(last);
                self.keep_cursor_visible();
                tracing::debug!(
                    scroll_offset = self.scroll_offset,
                    cursor = self.cursor,
                    "gallery: page down"
                );
            }
            AppEvent::ScrollToTop => {
                self.cursor = 0;
                self.scroll_offset = 0;
                tracing::debug!("gallery: jumped to top");
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct Gallery<'a> {
    state: &'a GalleryState,
    catalog: &'a Catalog,
    /// Trimmed, lower-cased query — used to highlight matched title spans.
    needle: &'a str,
    focused: bool,
    show_prompts: bool,
    date_format: &'a str,
    theme: &'a Theme,
}

impl<'a> Gallery<'a> {
    pub fn new(
        state: &'a GalleryState,
        catalog: &'a Catalog,
        needle: &'a str,
        focused: bool,
        show_prompts: bool,
        date_format: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            state,
            catalog,
            needle,
            focused,
            show_prompts,
            date_format,
            theme,
        }
    }

    fn rows_per_card(&self) -> usize {
        if self.show_prompts {
            2
        } else {
            1
        }
    }
}

impl Widget for Gallery<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title(format!(" Gallery — {}件 ", self.state.results.len()))
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.state.results.is_empty() {
            render_empty_state(inner, buf, self.theme);
            return;
        }

        let rows = self.rows_per_card();
        let visible = (inner.height as usize / rows).max(1);
        // Cache for handle() — safe because draw always runs before handle()
        self.state.last_visible.set(visible);

        let total = self.state.results.len();
        let start = self.state.scroll_offset.min(total.saturating_sub(1));
        let end = (start + visible).min(total);

        let records = self.catalog.records();
        let mut lines: Vec<Line<'static>> = Vec::with_capacity((end - start) * rows);
        for (row, &idx) in self.state.results[start..end].iter().enumerate() {
            let record = &records[idx];
            let highlighted = self.focused && start + row == self.state.cursor;
            lines.extend(render_card(
                record,
                self.needle,
                highlighted,
                self.show_prompts,
                self.date_format,
                self.theme,
            ));
        }

        // Split inner into text (fill) + 1-column scrollbar strip.
        let text_area = Rect {
            width: inner.width.saturating_sub(1),
            ..inner
        };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Paragraph::new(lines).render(text_area, buf);

        let mut sb_state = ScrollbarState::new(total)
            .position(start)
            .viewport_content_length(visible);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

// ---------------------------------------------------------------------------
// Card rendering
// ---------------------------------------------------------------------------

fn render_card(
    record: &ImageRecord,
    needle: &str,
    highlighted: bool,
    show_prompts: bool,
    date_format: &str,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut first: Vec<Span<'static>> = Vec::new();

    first.extend(highlight_title(&record.title, needle, theme));
    first.push(Span::styled(
        format!("  [{}]", record.model_name),
        theme.model_style(&record.model_name),
    ));
    first.push(Span::styled(
        format!("  {}", record.created_at.format(date_format)),
        theme.date,
    ));

    let mut line = Line::from(first);
    if highlighted {
        line = line.patch_style(Style::default().add_modifier(Modifier::REVERSED));
    }
    let mut lines = vec![line];

    if show_prompts {
        let mut second: Vec<Span<'static>> = vec![Span::styled(
            format!("  {}", record.prompt),
            Style::default().add_modifier(Modifier::DIM),
        )];
        for tag in &record.tags {
            second.push(Span::styled(format!("  #{tag}"), theme.tag));
        }
        let mut line = Line::from(second);
        if highlighted {
            line = line.patch_style(Style::default().add_modifier(Modifier::REVERSED));
        }
        lines.push(line);
    }

    lines
}

/// Split a title into spans with the matched search substring highlighted.
///
/// The match position comes from the lower-cased title, so the byte range
/// is only guaranteed to line up with the original when lower-casing did
/// not change byte lengths (true for ASCII and for Japanese, which has no
/// case). When the range does not fall on char boundaries in the original,
/// fall back to an unhighlighted title.
fn highlight_title(title: &str, needle: &str, theme: &Theme) -> Vec<Span<'static>> {
    let plain = || vec![Span::styled(title.to_string(), theme.title)];

    if needle.is_empty() {
        return plain();
    }
    let Some(pos) = title.to_lowercase().find(needle) else {
        return plain();
    };
    let (Some(before), Some(matched), Some(after)) = (
        title.get(..pos),
        title.get(pos..pos + needle.len()),
        title.get(pos + needle.len()..),
    ) else {
        return plain();
    };

    vec![
        Span::styled(before.to_string(), theme.title),
        Span::styled(matched.to_string(), theme.search_highlight),
        Span::styled(after.to_string(), theme.title),
    ]
}

fn render_empty_state(area: Rect, buf: &mut Buffer, theme: &Theme) {
    let lines = vec![
        Line::default(),
        Line::from(Span::styled("画像が見つかりません", theme.empty)).centered(),
        Line::from(Span::styled("検索条件を変更してお試しください", theme.empty)).centered(),
    ];
    Paragraph::new(lines).render(area, buf);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(n: usize) -> GalleryState {
        let mut state = GalleryState::default();
        state.set_results((0..n).collect());
        state.last_visible.set(5);
        state
    }

    #[test]
    fn cursor_moves_and_window_follows() {
        let mut state = state_with(20);
        for _ in 0..7 {
            state.handle(&AppEvent::Nav(Direction::Down));
        }
        assert_eq!(state.cursor, 7);
        // Window of 5 must have scrolled to keep row 7 visible
        assert!(state.scroll_offset >= 3);

        state.handle(&AppEvent::ScrollToTop);
        assert_eq!((state.cursor, state.scroll_offset), (0, 0));
    }

    #[test]
    fn cursor_stops_at_the_ends() {
        let mut state = state_with(3);
        state.handle(&AppEvent::Nav(Direction::Up));
        assert_eq!(state.cursor, 0);
        for _ in 0..10 {
            state.handle(&AppEvent::Nav(Direction::Down));
        }
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn set_results_clamps_cursor() {
        let mut state = state_with(20);
        state.cursor = 15;
        state.set_results(vec![3, 1]);
        assert_eq!(state.cursor, 1);
        assert_eq!(state.selected(), Some(1));

        state.set_results(Vec::new());
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn events_on_empty_results_are_noops() {
        let mut state = GalleryState::default();
        state.handle(&AppEvent::Nav(Direction::Down));
        state.handle(&AppEvent::ScrollDown);
        assert_eq!(state.cursor, 0);
        assert_eq!(state.selected(), None);
    }
}

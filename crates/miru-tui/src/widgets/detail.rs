//! Detail view — centred floating overlay showing every field of one
//! record, including the generation parameters.
//!
//! Opened with `Enter` on a gallery card; dismissed with `Escape`, `q`, or
//! `Enter`. Tags are listed with digit indices — pressing the digit
//! replaces the search query with that tag's literal text and returns to
//! the gallery.

use crate::theme::Theme;
use miru_core::{AssetRef, ImageRecord};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};

pub struct DetailView<'a> {
    record: &'a ImageRecord,
    asset: &'a AssetRef,
    date_format: &'a str,
    theme: &'a Theme,
}

impl<'a> DetailView<'a> {
    pub fn new(
        record: &'a ImageRecord,
        asset: &'a AssetRef,
        date_format: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            record,
            asset,
            date_format,
            theme,
        }
    }
}

impl Widget for DetailView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(72, 22, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(format!(" {} ", self.record.title))
            .title_style(self.theme.title)
            .border_style(self.theme.border_focused);

        let inner = block.inner(popup);
        block.render(popup, buf);

        let record = self.record;
        let dim = Style::default().add_modifier(Modifier::DIM);
        let label = |text: &str| Span::styled(format!("{text:<10}"), dim);

        let mut lines: Vec<Line> = Vec::new();

        // Model block — name, architecture, specialty, resolution
        let mut model_spans = vec![
            label("Model"),
            Span::styled(record.model_name.clone(), self.theme.model_style(&record.model_name)),
        ];
        if let Some(arch) = &record.architecture {
            model_spans.push(Span::raw(format!(" ({arch})")));
        }
        lines.push(Line::from(model_spans));
        if let Some(specialty) = &record.specialty {
            lines.push(Line::from(vec![label(""), Span::raw(specialty.clone())]));
        }
        let resolution = record.base_resolution.as_deref().unwrap_or("N/A");
        lines.push(Line::from(vec![
            label("解像度"),
            Span::raw(resolution.to_string()),
        ]));

        lines.push(Line::from(vec![
            label("Created"),
            Span::styled(record.created_at.format(self.date_format).to_string(), self.theme.date),
        ]));

        // Asset path degrades to a placeholder marker, never an error
        let asset_line = match self.asset {
            AssetRef::File(path) => Span::raw(path.display().to_string()),
            AssetRef::Placeholder => Span::styled("（画像ファイルなし）", self.theme.empty),
        };
        lines.push(Line::from(vec![label("File"), asset_line]));

        lines.push(Line::default());
        lines.push(Line::from(vec![label("Prompt"), Span::raw(record.prompt.clone())]));
        let negative = if record.negative_prompt.is_empty() {
            "なし".to_string()
        } else {
            record.negative_prompt.clone()
        };
        lines.push(Line::from(vec![label("Negative"), Span::raw(negative)]));

        // Parameters grid
        lines.push(Line::default());
        let p = &record.parameters;
        lines.push(Line::from(vec![
            label("Params"),
            Span::raw(format!(
                "Steps {}   CFG Scale {}   Seed {}   Sampler {}",
                p.steps, p.cfg_scale, p.seed, p.sampler
            )),
        ]));

        // Tags with digit indices for tag-to-query selection
        if !record.tags.is_empty() {
            lines.push(Line::default());
            let mut tag_spans = vec![label("Tags")];
            for (i, tag) in record.tags.iter().enumerate().take(9) {
                tag_spans.push(Span::styled(format!("[{}]{tag}  ", i + 1), self.theme.tag));
            }
            lines.push(Line::from(tag_spans));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "1-9: タグで検索   Esc: 閉じる",
            dim,
        )));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
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

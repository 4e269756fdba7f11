//! Models view — the static `2:models` tab summarising every model that
//! appears in the catalog: badge colour, image count, and the descriptive
//! metadata shown in the detail modal.

use crate::theme::Theme;
use miru_core::Catalog;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

pub struct ModelsView<'a> {
    catalog: &'a Catalog,
    theme: &'a Theme,
}

impl<'a> ModelsView<'a> {
    pub fn new(catalog: &'a Catalog, theme: &'a Theme) -> Self {
        Self { catalog, theme }
    }
}

impl Widget for ModelsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Models ")
            .border_style(self.theme.border_unfocused);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.catalog.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "モデル情報がありません",
                self.theme.empty,
            )))
            .render(inner, buf);
            return;
        }

        let dim = Style::default().add_modifier(Modifier::DIM);
        let mut lines: Vec<Line> = Vec::new();

        // First-seen order, matching the facet cycle order in the gallery
        for name in self.catalog.model_names() {
            let records: Vec<_> = self
                .catalog
                .records()
                .iter()
                .filter(|r| r.model_name == name)
                .collect();
            // model_names() only yields names present in the catalog
            let Some(first) = records.first() else { continue };

            let mut header = vec![
                Span::styled(name.to_string(), self.theme.model_style(name).add_modifier(Modifier::BOLD)),
                Span::styled(format!("  {}枚", records.len()), dim),
            ];
            if let Some(arch) = &first.architecture {
                header.push(Span::raw(format!("  ({arch})")));
            }
            lines.push(Line::from(header));

            let specialty = first.specialty.as_deref().unwrap_or("モデル情報");
            let resolution = first.base_resolution.as_deref().unwrap_or("N/A");
            lines.push(Line::from(vec![
                Span::raw(format!("  {specialty}")),
                Span::styled(format!("  解像度: {resolution}"), dim),
            ]));
            lines.push(Line::default());
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

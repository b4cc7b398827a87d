use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::data::reports::{ProductSales, ReportData};
use crate::ui::{border_style, chart_layout, title_style, Theme};

use super::bars::{scaled_bar, truncate_label};
use super::placeholder;

const INSIGHT: &str = "Insight: the most-purchased products point at the categories \
and brands customers want most, steering marketing spend and stock planning.";

const LABEL_WIDTH: usize = 26;

/// Horizontal bar ranking of the ten best-selling products
pub struct TopProductsChart;

impl TopProductsChart {
    pub fn render(frame: &mut Frame, area: Rect, report: &ReportData<Vec<ProductSales>>) {
        let block = Block::default()
            .title(" 1. Top-Selling Products ")
            .title_style(title_style(true))
            .borders(Borders::ALL)
            .border_style(border_style(false));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (chart_area, caption_area) = chart_layout(inner);
        render_caption(frame, caption_area);

        let Some(rows) = report.as_ready() else {
            placeholder::no_data(frame, chart_area);
            return;
        };

        let max = rows.iter().map(|r| r.count).max().unwrap_or(1).max(1) as f64;
        let bar_width = (chart_area.width as usize)
            .saturating_sub(LABEL_WIDTH + 10)
            .max(8);

        let lines: Vec<Line> = rows
            .iter()
            .map(|row| {
                // Join misses and null categories keep a null label
                let label = row.category.as_deref().unwrap_or("(uncategorized)");
                Line::from(vec![
                    Span::styled(
                        format!(" {:<width$}", truncate_label(label, LABEL_WIDTH), width = LABEL_WIDTH),
                        Style::default().fg(Theme::FG),
                    ),
                    Span::styled(
                        scaled_bar(row.count as f64, max, bar_width),
                        Style::default().fg(Theme::BAR),
                    ),
                    Span::styled(
                        format!(" {:>6}", row.count),
                        Style::default().fg(Theme::SAPPHIRE),
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), chart_area);
    }
}

fn render_caption(frame: &mut Frame, area: Rect) {
    let caption = Paragraph::new(INSIGHT)
        .style(Style::default().fg(Theme::CAPTION))
        .wrap(Wrap { trim: true });
    frame.render_widget(caption, area);
}

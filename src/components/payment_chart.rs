use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::data::reports::{PaymentShare, ReportData};
use crate::ui::{border_style, chart_layout, series_color, title_style, Theme};

use super::bars::scaled_bar;
use super::placeholder;

const INSIGHT: &str = "Insight: the dominant payment methods mirror how customers \
prefer to check out, showing where a smoother transaction flow pays off.";

const LABEL_WIDTH: usize = 14;

/// Proportional share breakdown of payment types with percentage labels
pub struct PaymentChart;

impl PaymentChart {
    pub fn render(frame: &mut Frame, area: Rect, report: &ReportData<Vec<PaymentShare>>) {
        let block = Block::default()
            .title(" 3. Payment Method Distribution ")
            .title_style(title_style(true))
            .borders(Borders::ALL)
            .border_style(border_style(false));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (chart_area, caption_area) = chart_layout(inner);
        render_caption(frame, caption_area);

        let Some(shares) = report.as_ready() else {
            placeholder::no_data(frame, chart_area);
            return;
        };

        let bar_width = (chart_area.width as usize)
            .saturating_sub(LABEL_WIDTH + 18)
            .max(8);

        let lines: Vec<Line> = shares
            .iter()
            .enumerate()
            .map(|(i, share)| {
                let color = series_color(i);
                Line::from(vec![
                    Span::styled(
                        format!(" {:<width$}", share.payment_type, width = LABEL_WIDTH),
                        Style::default().fg(Theme::FG),
                    ),
                    Span::styled(
                        scaled_bar(share.percent, 100.0, bar_width),
                        Style::default().fg(color),
                    ),
                    Span::styled(
                        format!(" {:>5.1}%", share.percent),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  ({})", share.count),
                        Style::default().fg(Theme::FG_DARK),
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

use ratatui::{
    prelude::*,
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
};

use crate::data::reports::{ReportData, TrendPoint};
use crate::ui::{border_style, chart_layout, title_style, Theme};

use super::placeholder;

pub const MONTHLY_INSIGHT: &str = "Insight: the seasonal swing singles out the \
high-demand months, the ones to stock up and promote for.";

/// Line chart of order counts per time bucket (month or ISO week)
pub struct TrendChart;

impl TrendChart {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        report: &ReportData<Vec<TrendPoint>>,
        title: &str,
        caption: Option<&'static str>,
        color: Color,
    ) {
        let block = Block::default()
            .title(title.to_string())
            .title_style(title_style(true))
            .borders(Borders::ALL)
            .border_style(border_style(false));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // The weekly trend carries no caption; give the chart the full area
        let chart_area = match caption {
            Some(text) => {
                let (chart_area, caption_area) = chart_layout(inner);
                let widget = Paragraph::new(text)
                    .style(Style::default().fg(Theme::CAPTION))
                    .wrap(Wrap { trim: true });
                frame.render_widget(widget, caption_area);
                chart_area
            }
            None => inner,
        };

        let Some(points) = report.as_ready() else {
            placeholder::no_data(frame, chart_area);
            return;
        };

        let data: Vec<(f64, f64)> = points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.count as f64))
            .collect();

        let max_x = (points.len().saturating_sub(1)).max(1) as f64;
        let max_y = points.iter().map(|p| p.count).max().unwrap_or(1).max(1) as f64;

        let datasets = vec![Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(&data)];

        let chart = Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Theme::FG_DARK))
                    .bounds([0.0, max_x])
                    .labels(x_labels(points)),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Theme::FG_DARK))
                    .bounds([0.0, max_y])
                    .labels(y_labels(max_y)),
            );

        frame.render_widget(chart, chart_area);
    }
}

/// First, middle, and last bucket labels along the x axis
fn x_labels(points: &[TrendPoint]) -> Vec<String> {
    match points.len() {
        0 => vec![],
        1 => vec![points[0].label.clone()],
        2 => vec![points[0].label.clone(), points[1].label.clone()],
        n => vec![
            points[0].label.clone(),
            points[n / 2].label.clone(),
            points[n - 1].label.clone(),
        ],
    }
}

fn y_labels(max_y: f64) -> Vec<String> {
    vec![
        "0".to_string(),
        format!("{}", (max_y / 2.0).round() as u64),
        format!("{}", max_y as u64),
    ]
}

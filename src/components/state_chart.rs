use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
};

use crate::data::reports::{GeoScope, ReportData, StateCount};
use crate::ui::{border_style, chart_layout, title_style, Theme};

use super::placeholder;

const INSIGHT: &str = "Insight: the states with the densest footprint show where \
demand concentrates, informing delivery coverage and regional campaigns.";

/// Vertical bar chart of geolocation rows per state, ordered by state code
pub struct StateChart;

impl StateChart {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        report: &ReportData<Vec<StateCount>>,
        scope: GeoScope,
    ) {
        let block = Block::default()
            .title(format!(" 2. Geographic Distribution ({}) ", scope.as_str()))
            .title_style(title_style(true))
            .borders(Borders::ALL)
            .border_style(border_style(false));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (chart_area, caption_area) = chart_layout(inner);
        render_caption(frame, caption_area);

        let Some(counts) = report.as_ready() else {
            placeholder::no_data(frame, chart_area);
            return;
        };

        let bars: Vec<Bar> = counts
            .iter()
            .map(|c| {
                Bar::default()
                    .value(c.count)
                    .label(Line::from(c.state.clone()))
                    .style(Style::default().fg(Theme::BAR_ALT))
                    .value_style(Style::default().fg(Theme::BG).bg(Theme::BAR_ALT))
            })
            .collect();

        let chart = BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(3)
            .bar_gap(1);

        frame.render_widget(chart, chart_area);
    }
}

fn render_caption(frame: &mut Frame, area: Rect) {
    let caption = Paragraph::new(INSIGHT)
        .style(Style::default().fg(Theme::CAPTION))
        .wrap(Wrap { trim: true });
    frame.render_widget(caption, area);
}

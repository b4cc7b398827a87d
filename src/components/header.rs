use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use crate::data::DataContext;
use crate::ui::Theme;

/// Header component with title and dataset stats
pub struct Header;

impl Header {
    pub fn render(frame: &mut Frame, area: Rect, ctx: &DataContext) {
        use crate::ui::layout::header_layout;

        let (title_area, stats_area) = header_layout(area);

        // Title
        let title = Paragraph::new(" Marketboard ")
            .style(Style::default().fg(Theme::BLUE).add_modifier(Modifier::BOLD));
        frame.render_widget(title, title_area);

        let (min_date, max_date) = ctx.date_extent();

        let spans = vec![
            Span::styled("ORDERS ", Style::default().fg(Theme::FG_DARK)),
            Span::styled(format_count(ctx.orders.len()), Style::default().fg(Theme::GREEN)),
            Span::styled(" │ ", Style::default().fg(Theme::BORDER)),
            Span::styled("ITEMS ", Style::default().fg(Theme::FG_DARK)),
            Span::styled(
                format_count(ctx.order_items.len()),
                Style::default().fg(Theme::SAPPHIRE),
            ),
            Span::styled(" │ ", Style::default().fg(Theme::BORDER)),
            Span::styled("PAYMENTS ", Style::default().fg(Theme::FG_DARK)),
            Span::styled(
                format_count(ctx.payments.len()),
                Style::default().fg(Theme::PEACH),
            ),
            Span::styled(" │ ", Style::default().fg(Theme::BORDER)),
            Span::styled(
                format!("{} → {}", min_date.format("%Y-%m-%d"), max_date.format("%Y-%m-%d")),
                Style::default().fg(Theme::FG),
            ),
        ];

        let stats_line = Line::from(spans);
        let stats_widget = Paragraph::new(stats_line).alignment(Alignment::Right);
        frame.render_widget(stats_widget, stats_area);
    }
}

/// Format a count with thousands separators
fn format_count(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().rev().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result.chars().rev().collect()
}

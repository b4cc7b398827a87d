use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::config::AppConfig;
use crate::data::reports::GeoScope;
use crate::data::FilterSelection;
use crate::ui::{border_style, title_style, Theme};

const WELCOME: &str = "Welcome! Explore marketplace sales, payments, and customer \
geography. Adjust the filters to drill into any slice of the data.";

/// Side panel: branding image slot, welcome text, active filters, attribution
pub struct SidePanel;

impl SidePanel {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        config: &AppConfig,
        selection: &FilterSelection,
        geo_scope: GeoScope,
        image_present: bool,
    ) {
        let block = Block::default()
            .title(" E-commerce Dashboard ")
            .title_style(title_style(false))
            .borders(Borders::ALL)
            .border_style(border_style(false));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Image slot
                Constraint::Length(4), // Welcome text
                Constraint::Min(7),    // Active filters
                Constraint::Length(4), // Attribution
            ])
            .split(inner);

        Self::render_image_slot(frame, chunks[0], config, image_present);

        let welcome = Paragraph::new(WELCOME)
            .style(Style::default().fg(Theme::FG_DARK))
            .wrap(Wrap { trim: true });
        frame.render_widget(welcome, chunks[1]);

        Self::render_filters(frame, chunks[2], selection, geo_scope);
        Self::render_attribution(frame, chunks[3], config);
    }

    fn render_image_slot(frame: &mut Frame, area: Rect, config: &AppConfig, present: bool) {
        let file_name = config
            .image
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| config.image.display().to_string());

        let line = if present {
            Line::from(vec![
                Span::styled("▣ ", Style::default().fg(Theme::GREEN)),
                Span::styled(file_name, Style::default().fg(Theme::FG_DARK)),
            ])
        } else {
            Line::from(vec![
                Span::styled("✕ ", Style::default().fg(Theme::RED)),
                Span::styled(
                    format!("{} (missing)", file_name),
                    Style::default().fg(Theme::OVERLAY),
                ),
            ])
        };

        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_filters(
        frame: &mut Frame,
        area: Rect,
        selection: &FilterSelection,
        geo_scope: GeoScope,
    ) {
        let label = Style::default().fg(Theme::FG_DARK);
        let value = Style::default().fg(Theme::CYAN);

        let lines = vec![
            Line::styled("Filters", Style::default().fg(Theme::MAUVE).bold()),
            Line::from(vec![
                Span::styled("Range:    ", label),
                Span::styled(
                    format!(
                        "{} → {}",
                        selection.start_date.format("%Y-%m-%d"),
                        selection.end_date.format("%Y-%m-%d")
                    ),
                    value,
                ),
            ]),
            Line::from(vec![
                Span::styled("Category: ", label),
                Span::styled(selection.category.label().to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Payment:  ", label),
                Span::styled(selection.payment.label().to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("State:    ", label),
                Span::styled(selection.state.label().to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Geo map:  ", label),
                Span::styled(geo_scope.as_str(), Style::default().fg(Theme::YELLOW)),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_attribution(frame: &mut Frame, area: Rect, config: &AppConfig) {
        let developer = &config.developer;
        let mut lines = Vec::new();

        if !developer.is_empty() {
            lines.push(Line::styled(
                "Developer",
                Style::default().fg(Theme::MAUVE).bold(),
            ));
            if !developer.name.is_empty() {
                lines.push(Line::styled(
                    developer.name.clone(),
                    Style::default().fg(Theme::FG),
                ));
            }
            if !developer.github.is_empty() {
                lines.push(Line::styled(
                    developer.github.clone(),
                    Style::default().fg(Theme::SKY),
                ));
            }
            if !developer.linkedin.is_empty() {
                lines.push(Line::styled(
                    developer.linkedin.clone(),
                    Style::default().fg(Theme::SKY),
                ));
            }
        } else {
            lines.push(Line::styled(
                concat!("marketboard v", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Theme::OVERLAY),
            ));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::{centered_modal, Theme};

/// Help modal component
pub struct HelpModal;

impl HelpModal {
    pub fn render(frame: &mut Frame, area: Rect) {
        let modal_area = centered_modal(area, 60, 18);

        // Clear the background
        frame.render_widget(Clear, modal_area);

        let help_text = vec![
            Line::styled("Keyboard Shortcuts", Style::default().bold().fg(Color::Cyan)),
            Line::raw(""),
            Line::from(vec![
                Span::styled("  ←/→ h/l ", Style::default().fg(Color::Yellow)),
                Span::raw("Previous / next report section"),
            ]),
            Line::from(vec![
                Span::styled("  1-5     ", Style::default().fg(Color::Yellow)),
                Span::raw("Jump to a report section"),
            ]),
            Line::from(vec![
                Span::styled("  f       ", Style::default().fg(Color::Yellow)),
                Span::raw("Edit filters (dates, category, payment, state)"),
            ]),
            Line::from(vec![
                Span::styled("  g       ", Style::default().fg(Color::Yellow)),
                Span::raw("Toggle geographic scope (all states / selected)"),
            ]),
            Line::from(vec![
                Span::styled("  Tab/↑↓  ", Style::default().fg(Color::Yellow)),
                Span::raw("Move between filter fields"),
            ]),
            Line::from(vec![
                Span::styled("  Enter   ", Style::default().fg(Color::Yellow)),
                Span::raw("Apply filters"),
            ]),
            Line::from(vec![
                Span::styled("  Esc     ", Style::default().fg(Color::Yellow)),
                Span::raw("Cancel / close modal"),
            ]),
            Line::from(vec![
                Span::styled("  q       ", Style::default().fg(Color::Yellow)),
                Span::raw("Quit"),
            ]),
            Line::raw(""),
            Line::styled("Press Esc to close", Style::default().fg(Color::DarkGray)),
        ];

        let block = Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::MODAL_BORDER))
            .style(Style::default().bg(Theme::MODAL_BG));

        let paragraph = Paragraph::new(help_text).block(block);

        frame.render_widget(paragraph, modal_area);
    }
}

use ratatui::{prelude::*, widgets::Paragraph};

use crate::ui::Theme;

/// Rendered in place of any chart whose input matched zero rows
pub fn no_data(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }

    let message = Paragraph::new("no data for this selection")
        .style(
            Style::default()
                .fg(Theme::NO_DATA)
                .add_modifier(Modifier::ITALIC),
        )
        .alignment(Alignment::Center);

    let centered = Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: 1,
    };
    frame.render_widget(message, centered);
}

use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use crate::ui::{key_desc_span, key_span, Theme};

/// Keybinding definition
pub struct KeyBinding {
    pub key: &'static str,
    pub desc: &'static str,
}

/// Status bar component (bottom of screen) - keybindings only
pub struct StatusBar;

impl StatusBar {
    /// Get keybindings for the dashboard view
    pub fn dashboard_keybindings() -> Vec<KeyBinding> {
        vec![
            KeyBinding { key: "←→", desc: "section" },
            KeyBinding { key: "1-5", desc: "jump" },
            KeyBinding { key: "f", desc: "filters" },
            KeyBinding { key: "g", desc: "geo scope" },
            KeyBinding { key: "?", desc: "help" },
            KeyBinding { key: "q", desc: "quit" },
        ]
    }

    /// Get keybindings for the filter form
    pub fn filter_keybindings() -> Vec<KeyBinding> {
        vec![
            KeyBinding { key: "Tab/↑↓", desc: "field" },
            KeyBinding { key: "←→", desc: "option" },
            KeyBinding { key: "type", desc: "edit date" },
            KeyBinding { key: "Enter", desc: "apply" },
            KeyBinding { key: "Esc", desc: "cancel" },
        ]
    }

    pub fn render(frame: &mut Frame, area: Rect, view: &str) {
        let keybindings = match view {
            "filter" => Self::filter_keybindings(),
            _ => Self::dashboard_keybindings(),
        };

        let mut spans: Vec<Span> = Vec::new();
        for kb in keybindings {
            spans.push(key_span(kb.key));
            spans.push(key_desc_span(kb.desc));
        }

        let keys_line = Line::from(spans);
        let keys_widget = Paragraph::new(keys_line)
            .style(Style::default().bg(Theme::BG_DARK))
            .alignment(Alignment::Center);
        frame.render_widget(keys_widget, area);
    }
}

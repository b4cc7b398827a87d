use chrono::NaiveDate;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::data::{DataContext, FilterSelection, Selector};
use crate::ui::{border_style, Theme};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields of the filter form, in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    StartDate,
    EndDate,
    Category,
    Payment,
    State,
}

const FIELDS: [FilterField; 5] = [
    FilterField::StartDate,
    FilterField::EndDate,
    FilterField::Category,
    FilterField::Payment,
    FilterField::State,
];

/// Interactive filter editor; option index 0 is always the sentinel "All"
#[derive(Debug, Clone)]
pub struct FilterForm {
    pub start_input: String,
    pub end_input: String,
    pub category_options: Vec<String>,
    pub payment_options: Vec<String>,
    pub state_options: Vec<String>,
    pub category_idx: usize,
    pub payment_idx: usize,
    pub state_idx: usize,
    pub selected_field: usize,
    pub error: Option<String>,
}

impl FilterForm {
    pub fn new(selection: &FilterSelection, ctx: &DataContext) -> Self {
        let category_options = ctx.category_options();
        let payment_options = ctx.payment_options();
        let state_options = ctx.state_options();

        Self {
            start_input: selection.start_date.format(DATE_FORMAT).to_string(),
            end_input: selection.end_date.format(DATE_FORMAT).to_string(),
            category_idx: selector_index(&selection.category, &category_options),
            payment_idx: selector_index(&selection.payment, &payment_options),
            state_idx: selector_index(&selection.state, &state_options),
            category_options,
            payment_options,
            state_options,
            selected_field: 0,
            error: None,
        }
    }

    pub fn field(&self) -> FilterField {
        FIELDS[self.selected_field]
    }

    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % FIELDS.len();
    }

    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = FIELDS.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    pub fn type_char(&mut self, c: char) {
        if !c.is_ascii_digit() && c != '-' {
            return;
        }
        match self.field() {
            FilterField::StartDate => push_date_char(&mut self.start_input, c),
            FilterField::EndDate => push_date_char(&mut self.end_input, c),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.field() {
            FilterField::StartDate => {
                self.start_input.pop();
            }
            FilterField::EndDate => {
                self.end_input.pop();
            }
            _ => {}
        }
    }

    /// Cycle the focused select field forward through All + its options
    pub fn cycle_right(&mut self) {
        match self.field() {
            FilterField::Category => {
                self.category_idx = (self.category_idx + 1) % (self.category_options.len() + 1)
            }
            FilterField::Payment => {
                self.payment_idx = (self.payment_idx + 1) % (self.payment_options.len() + 1)
            }
            FilterField::State => {
                self.state_idx = (self.state_idx + 1) % (self.state_options.len() + 1)
            }
            _ => {}
        }
    }

    /// Cycle the focused select field backward
    pub fn cycle_left(&mut self) {
        match self.field() {
            FilterField::Category => {
                self.category_idx = cycle_back(self.category_idx, self.category_options.len())
            }
            FilterField::Payment => {
                self.payment_idx = cycle_back(self.payment_idx, self.payment_options.len())
            }
            FilterField::State => {
                self.state_idx = cycle_back(self.state_idx, self.state_options.len())
            }
            _ => {}
        }
    }

    /// Build a selection from the form. An inverted range is allowed (it
    /// simply matches nothing); an unparseable date is an error.
    pub fn to_selection(&self) -> Result<FilterSelection, String> {
        let start_date = NaiveDate::parse_from_str(self.start_input.trim(), DATE_FORMAT)
            .map_err(|_| format!("invalid start date '{}', expected YYYY-MM-DD", self.start_input))?;
        let end_date = NaiveDate::parse_from_str(self.end_input.trim(), DATE_FORMAT)
            .map_err(|_| format!("invalid end date '{}', expected YYYY-MM-DD", self.end_input))?;

        Ok(FilterSelection {
            start_date,
            end_date,
            category: selector_at(self.category_idx, &self.category_options),
            payment: selector_at(self.payment_idx, &self.payment_options),
            state: selector_at(self.state_idx, &self.state_options),
        })
    }

    fn option_label(idx: usize, options: &[String]) -> &str {
        if idx == 0 {
            Selector::ALL_LABEL
        } else {
            &options[idx - 1]
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Filter Data ")
            .title_style(Style::default().fg(Theme::CYAN).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(border_style(true));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Start date
                Constraint::Length(3), // End date
                Constraint::Length(3), // Category
                Constraint::Length(3), // Payment
                Constraint::Length(3), // State
                Constraint::Min(2),    // Error / hint
            ])
            .split(inner);

        render_text_field(
            frame,
            chunks[0],
            "Start date",
            &self.start_input,
            self.field() == FilterField::StartDate,
        );
        render_text_field(
            frame,
            chunks[1],
            "End date",
            &self.end_input,
            self.field() == FilterField::EndDate,
        );
        render_select_field(
            frame,
            chunks[2],
            "Category",
            Self::option_label(self.category_idx, &self.category_options),
            self.field() == FilterField::Category,
        );
        render_select_field(
            frame,
            chunks[3],
            "Payment",
            Self::option_label(self.payment_idx, &self.payment_options),
            self.field() == FilterField::Payment,
        );
        render_select_field(
            frame,
            chunks[4],
            "State",
            Self::option_label(self.state_idx, &self.state_options),
            self.field() == FilterField::State,
        );

        if let Some(ref error) = self.error {
            let message = Paragraph::new(error.as_str())
                .style(Style::default().fg(Theme::RED))
                .wrap(ratatui::widgets::Wrap { trim: true });
            frame.render_widget(message, chunks[5]);
        }
    }
}

fn push_date_char(input: &mut String, c: char) {
    if input.len() < 10 {
        input.push(c);
    }
}

fn cycle_back(idx: usize, option_count: usize) -> usize {
    if idx == 0 {
        option_count
    } else {
        idx - 1
    }
}

fn selector_index(selector: &Selector, options: &[String]) -> usize {
    match selector {
        Selector::All => 0,
        Selector::Only(value) => options
            .iter()
            .position(|o| o == value)
            .map(|p| p + 1)
            .unwrap_or(0),
    }
}

fn selector_at(idx: usize, options: &[String]) -> Selector {
    if idx == 0 {
        Selector::All
    } else {
        Selector::Only(options[idx - 1].clone())
    }
}

fn render_text_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Theme::CYAN)
        } else {
            Style::default().fg(Theme::BORDER)
        });

    let display_value = if focused {
        format!("{}│", value)
    } else {
        value.to_string()
    };

    let text = Paragraph::new(display_value)
        .style(Style::default().fg(if focused { Theme::FG } else { Theme::FG_DARK }))
        .block(block);
    frame.render_widget(text, area);
}

fn render_select_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Theme::CYAN)
        } else {
            Style::default().fg(Theme::BORDER)
        });

    let display_value = if focused {
        format!("◂ {} ▸", value)
    } else {
        value.to_string()
    };

    let text = Paragraph::new(display_value)
        .style(Style::default().fg(if focused { Theme::FG } else { Theme::FG_DARK }))
        .block(block);
    frame.render_widget(text, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testkit;

    fn form_ctx() -> DataContext {
        testkit::context(
            vec![
                testkit::order("o1", "c1", "2017-01-05 09:30:00"),
                testkit::order("o2", "c2", "2017-02-15 14:00:00"),
            ],
            vec![
                testkit::product("p1", Some("toys")),
                testkit::product("p2", Some("electronics")),
            ],
            vec![],
            vec![testkit::payment("o1", "credit_card")],
            vec![testkit::geo("SP")],
        )
    }

    #[test]
    fn test_form_starts_from_current_selection() {
        let ctx = form_ctx();
        let selection = FilterSelection::full_extent(&ctx);
        let form = FilterForm::new(&selection, &ctx);

        assert_eq!(form.start_input, "2017-01-05");
        assert_eq!(form.end_input, "2017-02-15");
        assert_eq!(form.category_idx, 0);
        assert_eq!(form.to_selection().unwrap(), selection);
    }

    #[test]
    fn test_cycling_wraps_through_all() {
        let ctx = form_ctx();
        let selection = FilterSelection::full_extent(&ctx);
        let mut form = FilterForm::new(&selection, &ctx);

        // Move to the category field and cycle through All -> 2 options -> All
        form.selected_field = 2;
        form.cycle_right();
        assert_eq!(form.category_idx, 1);
        form.cycle_right();
        form.cycle_right();
        assert_eq!(form.category_idx, 0);
        form.cycle_left();
        assert_eq!(form.category_idx, 2);
    }

    #[test]
    fn test_selected_option_round_trips() {
        let ctx = form_ctx();
        let selection = FilterSelection::full_extent(&ctx);
        let mut form = FilterForm::new(&selection, &ctx);

        form.selected_field = 2;
        form.cycle_right(); // "electronics" (sorted ascending)

        let built = form.to_selection().unwrap();
        assert_eq!(built.category, Selector::Only("electronics".to_string()));
    }

    #[test]
    fn test_bad_date_is_an_error_not_a_panic() {
        let ctx = form_ctx();
        let selection = FilterSelection::full_extent(&ctx);
        let mut form = FilterForm::new(&selection, &ctx);

        form.start_input = "2017-13-99".to_string();
        assert!(form.to_selection().is_err());
    }

    #[test]
    fn test_date_editing_accepts_digits_and_dashes_only() {
        let ctx = form_ctx();
        let selection = FilterSelection::full_extent(&ctx);
        let mut form = FilterForm::new(&selection, &ctx);

        form.start_input.clear();
        for c in "2017-01-05x!".chars() {
            form.type_char(c);
        }
        assert_eq!(form.start_input, "2017-01-05");

        form.backspace();
        assert_eq!(form.start_input, "2017-01-0");
    }

    #[test]
    fn test_inverted_range_is_accepted() {
        let ctx = form_ctx();
        let selection = FilterSelection::full_extent(&ctx);
        let mut form = FilterForm::new(&selection, &ctx);

        form.start_input = "2018-01-01".to_string();
        form.end_input = "2017-01-01".to_string();
        let built = form.to_selection().unwrap();
        assert!(built.start_date > built.end_date);
    }
}

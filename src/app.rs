use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Tabs};
use tracing::warn;

use crate::action::Action;
use crate::components::trend_chart::MONTHLY_INSIGHT;
use crate::components::{
    FilterForm, Header, HelpModal, PaymentChart, SidePanel, StateChart, StatusBar,
    TopProductsChart, TrendChart,
};
use crate::config::AppConfig;
use crate::data::{build_reports, DataContext, FilterSelection, GeoScope, ReportBundle};
use crate::ui::{body_layout, main_layout, selected_style, Theme};

/// Current view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Dashboard,
    Filter,
}

/// Active modal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    None,
    Help,
}

/// The five numbered report sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTab {
    TopProducts,
    Geography,
    Payments,
    MonthlyTrend,
    WeeklyTrend,
}

impl ReportTab {
    pub const ALL: [ReportTab; 5] = [
        ReportTab::TopProducts,
        ReportTab::Geography,
        ReportTab::Payments,
        ReportTab::MonthlyTrend,
        ReportTab::WeeklyTrend,
    ];

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let index = self.index();
        if index == 0 {
            Self::ALL[Self::ALL.len() - 1]
        } else {
            Self::ALL[index - 1]
        }
    }

    pub fn short_title(&self) -> &'static str {
        match self {
            ReportTab::TopProducts => "1 Products",
            ReportTab::Geography => "2 Geography",
            ReportTab::Payments => "3 Payments",
            ReportTab::MonthlyTrend => "4 Monthly",
            ReportTab::WeeklyTrend => "5 Weekly",
        }
    }
}

/// Main application state
pub struct App {
    pub config: AppConfig,

    // Loaded once at startup, read-only for the process lifetime
    pub ctx: DataContext,

    // Filter state
    pub selection: FilterSelection,
    pub geo_scope: GeoScope,
    pub filter_form: Option<FilterForm>,

    // Last computed reports for the current selection
    pub reports: ReportBundle,

    // View state
    pub report_tab: ReportTab,
    pub view_mode: ViewMode,
    pub modal: ModalState,
    pub should_quit: bool,

    pub image_present: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let ctx = DataContext::load(&config.data_dir)?;
        Ok(Self::with_context(config, ctx))
    }

    pub fn with_context(config: AppConfig, ctx: DataContext) -> Self {
        let image_present = config.image.exists();
        if !image_present {
            warn!(image = %config.image.display(), "side panel image not found");
        }

        let selection = FilterSelection::full_extent(&ctx);
        let geo_scope = GeoScope::default();
        let reports = build_reports(&ctx, &selection, geo_scope);

        Self {
            config,
            ctx,
            selection,
            geo_scope,
            filter_form: None,
            reports,
            report_tab: ReportTab::TopProducts,
            view_mode: ViewMode::Dashboard,
            modal: ModalState::None,
            should_quit: false,
            image_present,
        }
    }

    /// Re-run the pure report pipeline for the current selection
    pub fn rebuild_reports(&mut self) {
        self.reports = build_reports(&self.ctx, &self.selection, self.geo_scope);
    }

    pub fn open_filter_form(&mut self) {
        self.filter_form = Some(FilterForm::new(&self.selection, &self.ctx));
        self.view_mode = ViewMode::Filter;
    }

    pub fn cancel_filter_form(&mut self) {
        self.filter_form = None;
        self.view_mode = ViewMode::Dashboard;
    }

    /// Apply the filter form; an invalid date keeps the form open with the
    /// error shown and the previous selection active
    pub fn apply_filter_form(&mut self) {
        if let Some(form) = &mut self.filter_form {
            match form.to_selection() {
                Ok(selection) => {
                    self.selection = selection;
                    self.rebuild_reports();
                    self.filter_form = None;
                    self.view_mode = ViewMode::Dashboard;
                }
                Err(message) => form.error = Some(message),
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,

            Action::NextReport => self.report_tab = self.report_tab.next(),
            Action::PrevReport => self.report_tab = self.report_tab.prev(),
            Action::JumpToReport(index) => {
                if let Some(tab) = ReportTab::from_index(index) {
                    self.report_tab = tab;
                }
            }

            Action::OpenFilter => self.open_filter_form(),

            Action::ToggleGeoScope => {
                self.geo_scope = self.geo_scope.toggle();
                self.rebuild_reports();
            }

            Action::ShowHelp => self.modal = ModalState::Help,
            Action::CloseModal => self.modal = ModalState::None,

            Action::None => {}
        }
    }

    pub fn render(&self, frame: &mut ratatui::Frame) {
        // Set background color
        let bg_block = Block::default().style(Style::default().bg(Theme::BG));
        frame.render_widget(bg_block, frame.area());

        let (header_area, body, footer) = main_layout(frame.area());

        Header::render(frame, header_area, &self.ctx);

        let (side_area, chart_area) = body_layout(body);

        // Side panel doubles as the filter editor while the form is open
        match (&self.view_mode, &self.filter_form) {
            (ViewMode::Filter, Some(form)) => form.render(frame, side_area),
            _ => SidePanel::render(
                frame,
                side_area,
                &self.config,
                &self.selection,
                self.geo_scope,
                self.image_present,
            ),
        }

        self.render_reports(frame, chart_area);

        let view_str = match self.view_mode {
            ViewMode::Dashboard => "dashboard",
            ViewMode::Filter => "filter",
        };
        StatusBar::render(frame, footer, view_str);

        if self.modal == ModalState::Help {
            HelpModal::render(frame, frame.area());
        }
    }

    fn render_reports(&self, frame: &mut ratatui::Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Section tabs
                Constraint::Min(0),    // Chart
            ])
            .split(area);

        let titles: Vec<&'static str> = ReportTab::ALL.iter().map(|t| t.short_title()).collect();
        let tabs = Tabs::new(titles)
            .select(self.report_tab.index())
            .style(Style::default().fg(Theme::FG_DARK))
            .highlight_style(selected_style())
            .divider("│");
        frame.render_widget(tabs, chunks[0]);

        match self.report_tab {
            ReportTab::TopProducts => {
                TopProductsChart::render(frame, chunks[1], &self.reports.top_products)
            }
            ReportTab::Geography => StateChart::render(
                frame,
                chunks[1],
                &self.reports.state_distribution,
                self.geo_scope,
            ),
            ReportTab::Payments => {
                PaymentChart::render(frame, chunks[1], &self.reports.payment_distribution)
            }
            ReportTab::MonthlyTrend => TrendChart::render(
                frame,
                chunks[1],
                &self.reports.monthly_trend,
                " 4. Monthly Order Trend ",
                Some(MONTHLY_INSIGHT),
                Theme::TREND,
            ),
            ReportTab::WeeklyTrend => TrendChart::render(
                frame,
                chunks[1],
                &self.reports.weekly_trend,
                " 5. Weekly Order Trend ",
                None,
                Theme::BLUE,
            ),
        }
    }
}

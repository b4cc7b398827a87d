/// Actions that can be performed in the application
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    // Report navigation
    NextReport,
    PrevReport,
    JumpToReport(usize),

    // Filters
    OpenFilter,
    ToggleGeoScope,

    // Modals
    ShowHelp,
    CloseModal,

    // App control
    Quit,

    // No action
    None,
}

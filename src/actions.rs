use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    OpenPanel,
    // Escape path: closes exactly the topmost panel
    CloseTopPanel,
    CloseFocusedPanel,
    // Immediate teardown, same as clicking the backdrop
    CloseAllPanels,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::OpenPanel => "Open panel",
            Action::CloseTopPanel => "Close top panel (Esc)",
            Action::CloseFocusedPanel => "Close focused panel",
            Action::CloseAllPanels => "Dismiss all panels",
        };
        write!(f, "{}", s)
    }
}

use serde::Serialize;

/// The pages of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum View {
    Home,
    MovieDetails,
    Actors,
    Averages,
    BudgetEvolution,
}

impl View {
    /// Menu order.
    pub const ALL: [View; 5] = [
        View::Home,
        View::MovieDetails,
        View::Actors,
        View::Averages,
        View::BudgetEvolution,
    ];

    pub fn index(self) -> usize {
        match self {
            View::Home => 0,
            View::MovieDetails => 1,
            View::Actors => 2,
            View::Averages => 3,
            View::BudgetEvolution => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<View> {
        View::ALL.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::MovieDetails => "Movie details",
            View::Actors => "Actors",
            View::Averages => "Averages by country",
            View::BudgetEvolution => "Budget evolution by year",
        }
    }
}

/// Something the user did in the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Open(View),
    MenuIndex(usize),
    Quit,
}

/// What to do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Show(View),
    Exit,
}

/// The next page given the current one and an event.
///
/// An out-of-range menu index keeps the current page.
pub fn next(current: View, event: NavEvent) -> Navigation {
    match event {
        NavEvent::Open(view) => Navigation::Show(view),
        NavEvent::MenuIndex(index) => Navigation::Show(View::from_index(index).unwrap_or(current)),
        NavEvent::Quit => Navigation::Exit,
    }
}

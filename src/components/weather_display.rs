use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Component, RecentSearches, RecentSearchesProps, SearchBar, SearchBarProps, WeatherBody,
    WeatherBodyProps,
};
use crate::action::Action;
use crate::state::AppState;

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Props for WeatherDisplay - read-only view of state
pub struct WeatherDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main screen: search bar, recent searches, display region, key hints
#[derive(Default)]
pub struct WeatherDisplay {
    search: SearchBar,
}

impl WeatherDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

fn search_props(state: &AppState, is_focused: bool) -> SearchBarProps<'_> {
    SearchBarProps {
        query: &state.input,
        label: state.search_label(),
        searching: state.searching,
        has_selection: state.history_selected.is_some(),
        refresh_city: state.refresh_city(),
        is_focused,
        on_change: Action::SearchInputChange,
        on_submit: Action::SearchSubmit,
    }
}

impl Component<Action> for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let is_focused = props.is_focused && !props.state.confirm_clear;
        self.search
            .handle_event(event, search_props(props.state, is_focused))
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherDisplayProps<'_>) {
        let state = props.state;
        let recent = RecentSearchesProps {
            history: &state.history,
            selected: state.history_selected,
            storage_error: state.storage_error.as_deref(),
        };

        let chunks = Layout::vertical([
            Constraint::Length(3),               // Search bar
            Constraint::Length(recent.height()), // Recent searches
            Constraint::Min(1),                  // Display region
            Constraint::Length(1),               // Help bar
        ])
        .split(area);

        let is_focused = props.is_focused && !state.confirm_clear;
        self.search
            .render(frame, chunks[0], search_props(state, is_focused));

        let mut recent_list = RecentSearches;
        recent_list.render(frame, chunks[1], recent);

        let mut body = WeatherBody;
        body.render(frame, chunks[2], WeatherBodyProps { state });

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[3],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "search"),
                    StatusBarHint::new("↑↓", "recent"),
                    StatusBarHint::new("ctrl+r", "refresh"),
                    StatusBarHint::new("ctrl+x", "clear history"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;

pub const PLACEHOLDER: &str = "Enter a city name...";

/// City text input plus the search control
pub struct SearchBar {
    input: TextInput,
}

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    /// "Search" or "Searching..."
    pub label: &'a str,
    /// Control is disabled while a fetch is in flight
    pub searching: bool,
    /// A recent search is highlighted; Enter searches it instead of the input
    pub has_selection: bool,
    /// City Ctrl+R fetches again, if any
    pub refresh_city: Option<&'a str>,
    pub is_focused: bool,
    // Action constructors
    pub on_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// The reducer clears the query after a submit; start the cursor over with it.
    fn sync(&mut self, query: &str) {
        if query.is_empty() {
            self.input = TextInput::new();
        }
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return vec![Action::Quit],
            KeyCode::Char('c') if ctrl => return vec![Action::Quit],
            KeyCode::Char('x') if ctrl => return vec![Action::HistoryClearRequest],
            KeyCode::Char('r') if ctrl => {
                return props
                    .refresh_city
                    .map(|city| Action::WeatherFetch(city.to_string()))
                    .into_iter()
                    .collect();
            }
            KeyCode::Enter => {
                if props.has_selection {
                    return vec![Action::HistoryActivate];
                }
                return vec![(props.on_submit)(props.query.to_string())];
            }
            KeyCode::Down => return vec![Action::HistorySelectNext],
            KeyCode::Up => return vec![Action::HistorySelectPrev],
            _ => {}
        }

        // All other keys go to the input
        self.sync(props.query);
        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::all(1),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let label_width = props.label.chars().count() as u16 + 6;
        let chunks = Layout::horizontal([
            Constraint::Min(10),             // Input
            Constraint::Length(label_width), // Search control
        ])
        .split(area);

        self.sync(props.query);
        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::all(1),
                    bg: Some(Color::Rgb(50, 50, 60)),
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, chunks[0], input_props);

        let style = if props.searching {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        };
        let button = Paragraph::new(vec![
            Line::default(),
            Line::from(Span::styled(format!("[ {} ]", props.label), style)).centered(),
        ]);
        frame.render_widget(button, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use tui_dispatch::testing::*;

    fn props(query: &str, has_selection: bool) -> SearchBarProps<'_> {
        SearchBarProps {
            query,
            label: "Search",
            searching: false,
            has_selection,
            refresh_city: None,
            is_focused: true,
            on_change: Action::SearchInputChange,
            on_submit: Action::SearchSubmit,
        }
    }

    fn press(
        bar: &mut SearchBar,
        code: KeyCode,
        modifiers: KeyModifiers,
        props: SearchBarProps<'_>,
    ) -> Vec<Action> {
        let event = EventKind::Key(KeyEvent::new(code, modifiers));
        bar.handle_event(&event, props).into_iter().collect()
    }

    #[test]
    fn test_enter_submits_query() {
        let mut bar = SearchBar::new();
        let actions = press(
            &mut bar,
            KeyCode::Enter,
            KeyModifiers::NONE,
            props("Paris", false),
        );
        actions.assert_count(1);
        actions.assert_first(Action::SearchSubmit("Paris".into()));
    }

    #[test]
    fn test_enter_with_selection_activates_history() {
        let mut bar = SearchBar::new();
        let actions = press(&mut bar, KeyCode::Enter, KeyModifiers::NONE, props("", true));
        actions.assert_first(Action::HistoryActivate);
    }

    #[test]
    fn test_arrows_navigate_history() {
        let mut bar = SearchBar::new();
        press(&mut bar, KeyCode::Down, KeyModifiers::NONE, props("", false))
            .assert_first(Action::HistorySelectNext);
        press(&mut bar, KeyCode::Up, KeyModifiers::NONE, props("", false))
            .assert_first(Action::HistorySelectPrev);
    }

    #[test]
    fn test_ctrl_x_requests_clear() {
        let mut bar = SearchBar::new();
        let actions = press(
            &mut bar,
            KeyCode::Char('x'),
            KeyModifiers::CONTROL,
            props("", false),
        );
        actions.assert_first(Action::HistoryClearRequest);
    }

    #[test]
    fn test_ctrl_r_refreshes_last_city() {
        let mut bar = SearchBar::new();
        let mut with_city = props("", false);
        with_city.refresh_city = Some("Oslo");
        press(&mut bar, KeyCode::Char('r'), KeyModifiers::CONTROL, with_city)
            .assert_first(Action::WeatherFetch("Oslo".into()));

        press(&mut bar, KeyCode::Char('r'), KeyModifiers::CONTROL, props("", false))
            .assert_empty();
    }

    #[test]
    fn test_quit_keys() {
        let mut bar = SearchBar::new();
        press(&mut bar, KeyCode::Esc, KeyModifiers::NONE, props("", false))
            .assert_first(Action::Quit);
        press(&mut bar, KeyCode::Char('c'), KeyModifiers::CONTROL, props("", false))
            .assert_first(Action::Quit);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut bar = SearchBar::new();
        let mut unfocused = props("Paris", false);
        unfocused.is_focused = false;
        press(&mut bar, KeyCode::Enter, KeyModifiers::NONE, unfocused).assert_empty();
    }

    #[test]
    fn test_render_shows_label() {
        let mut render = RenderHarness::new(50, 3);
        let mut bar = SearchBar::new();

        let output = render.render_to_string_plain(|frame| {
            let mut p = props("", false);
            p.label = "Searching...";
            p.searching = true;
            bar.render(frame, frame.area(), p);
        });

        assert!(output.contains("[ Searching... ]"), "got:\n{}", output);
    }
}

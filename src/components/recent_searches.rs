use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::history::SearchHistory;

/// One-line list of recent searches; hidden when there are none.
pub struct RecentSearches;

pub struct RecentSearchesProps<'a> {
    pub history: &'a SearchHistory,
    pub selected: Option<usize>,
    pub storage_error: Option<&'a str>,
}

impl RecentSearchesProps<'_> {
    /// Rows needed: one for the list, one for a storage error.
    pub fn height(&self) -> u16 {
        u16::from(!self.history.is_empty()) + u16::from(self.storage_error.is_some())
    }
}

impl Component<Action> for RecentSearches {
    type Props<'a> = RecentSearchesProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let mut lines = Vec::with_capacity(2);

        if !props.history.is_empty() {
            let mut spans = vec![Span::styled(" Recent: ", Style::default().fg(Color::DarkGray))];
            for (index, city) in props.history.entries().iter().enumerate() {
                if index > 0 {
                    spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
                }
                let style = if props.selected == Some(index) {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                spans.push(Span::styled(city.clone(), style));
            }
            lines.push(Line::from(spans));
        }

        if let Some(error) = props.storage_error {
            lines.push(Line::from(Span::styled(
                format!(" Could not save history: {}", error),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            )));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    #[test]
    fn test_height() {
        let empty = SearchHistory::new();
        let props = RecentSearchesProps {
            history: &empty,
            selected: None,
            storage_error: None,
        };
        assert_eq!(props.height(), 0);

        let history = SearchHistory::from_entries(vec!["Oslo".into()]);
        let props = RecentSearchesProps {
            history: &history,
            selected: None,
            storage_error: Some("denied"),
        };
        assert_eq!(props.height(), 2);
    }

    #[test]
    fn test_render_lists_cities_in_order() {
        let mut render = RenderHarness::new(60, 2);
        let history = SearchHistory::from_entries(vec!["Oslo".into(), "Rome".into()]);

        let output = render.render_to_string_plain(|frame| {
            let props = RecentSearchesProps {
                history: &history,
                selected: Some(1),
                storage_error: Some("permission denied"),
            };
            RecentSearches.render(frame, frame.area(), props);
        });

        assert!(output.contains("Recent: Oslo · Rome"), "got:\n{}", output);
        assert!(output.contains("permission denied"));
    }
}

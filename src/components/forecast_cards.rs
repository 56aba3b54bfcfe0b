use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use super::Component;
use super::weather_body::temperature_color;
use crate::action::Action;
use crate::icons;
use crate::state::ForecastEntry;

pub const FORECAST_TITLE: &str = "5-Day Forecast";

/// Title row + bordered card (2 borders + 4 lines).
pub const FORECAST_HEIGHT: u16 = 7;

const CARD_WIDTH: u16 = 16;

pub struct ForecastCards;

pub struct ForecastCardsProps<'a> {
    pub entries: &'a [ForecastEntry],
}

impl Component<Action> for ForecastCards {
    type Props<'a> = ForecastCardsProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Title
            Constraint::Min(0),    // Cards
        ])
        .split(area);

        let title = Line::from(Span::styled(
            FORECAST_TITLE,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .centered();
        frame.render_widget(Paragraph::new(title), chunks[0]);

        if props.entries.is_empty() {
            let empty = Line::from(Span::styled(
                "No forecast available",
                Style::default().fg(Color::DarkGray),
            ))
            .centered();
            frame.render_widget(Paragraph::new(empty), chunks[1]);
            return;
        }

        let columns = Layout::horizontal(
            props
                .entries
                .iter()
                .map(|_| Constraint::Max(CARD_WIDTH)),
        )
        .flex(Flex::Center)
        .split(chunks[1]);

        for (entry, column) in props.entries.iter().zip(columns.iter()) {
            render_card(frame, *column, entry);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, entry: &ForecastEntry) {
    let block = Block::bordered().border_style(Style::default().fg(Color::DarkGray));
    let lines = vec![
        Line::from(entry.day.clone().bold()).centered(),
        Line::from(icons::weather_emoji(&entry.icon)).centered(),
        Line::from(Span::styled(
            format!("{}°C", entry.temperature),
            Style::default().fg(temperature_color(entry.temperature)),
        ))
        .centered(),
        Line::from(Span::styled(
            entry.description.clone(),
            Style::default().fg(Color::Gray),
        ))
        .centered(),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

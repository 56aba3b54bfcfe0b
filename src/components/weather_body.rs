use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use tui_dispatch::DataResource;

use super::forecast_cards::FORECAST_HEIGHT;
use super::{Component, ERROR_ICON, ForecastCards, ForecastCardsProps};
use crate::action::Action;
use crate::icons;
use crate::state::{AppState, WeatherReport};

pub const APP_TITLE: &str = "SkyFetch";
pub const WELCOME_MESSAGE: &str = "Search any city to see weather & 5-day forecast";
pub const LOADING_MESSAGE: &str = "Loading weather...";

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Rows of the current-conditions block: city, icon, temperature, description.
const CURRENT_HEIGHT: u16 = 4;

/// The display region: welcome, loading, error or weather + forecast
pub struct WeatherBody;

pub struct WeatherBodyProps<'a> {
    pub state: &'a AppState,
}

impl Component<Action> for WeatherBody {
    type Props<'a> = WeatherBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        match WeatherView::from_state(props.state) {
            WeatherView::Welcome => render_welcome(frame, area),
            WeatherView::Loading => render_loading(frame, area, props.state.tick_count),
            WeatherView::Error(error) => render_error(frame, area, error),
            WeatherView::Ready(report) => render_ready(frame, area, report),
        }
    }
}

fn render_welcome(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Max(6),    // Banner
        Constraint::Length(1), // blank
        Constraint::Length(1), // Subtitle
    ])
    .flex(Flex::Center)
    .split(area);

    let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(Fill::Linear(LinearGradient::horizontal(
            ArtColor::rgb(100, 180, 255),
            ArtColor::rgb(255, 220, 100),
        )));
    frame.render_widget(ArtBox::new(&renderer, APP_TITLE), chunks[0]);

    let subtitle = Line::from(Span::styled(
        WELCOME_MESSAGE,
        Style::default().fg(Color::Gray),
    ))
    .centered();
    frame.render_widget(Paragraph::new(subtitle), chunks[2]);
}

fn render_loading(frame: &mut Frame, area: Rect, tick_count: u32) {
    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);

    let frame_index = tick_count as usize % SPINNER_FRAMES.len();
    let line = Line::from(vec![
        Span::styled(SPINNER_FRAMES[frame_index], Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(LOADING_MESSAGE, Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(line), chunks[0]);
}

fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // icon
        Constraint::Length(1), // "Error"
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // hint
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(ERROR_ICON).centered()),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                "Error",
                Style::default().fg(Color::Red).bold(),
            )])
            .centered(),
        ),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                error.to_string(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            )])
            .centered(),
        ),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Type a city and press ", Style::default().fg(Color::DarkGray)),
                Span::styled("Enter", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to try again", Style::default().fg(Color::DarkGray)),
            ])
            .centered(),
        ),
        chunks[4],
    );
}

fn render_ready(frame: &mut Frame, area: Rect, report: &WeatherReport) {
    let chunks = Layout::vertical([
        Constraint::Length(CURRENT_HEIGHT),
        Constraint::Length(1), // blank
        Constraint::Length(FORECAST_HEIGHT),
    ])
    .flex(Flex::Center)
    .split(area);

    let current = &report.current;
    let lines = vec![
        Line::from(Span::styled(
            current.city.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(icons::weather_emoji(&current.icon)).centered(),
        Line::from(Span::styled(
            format!("{}°C", current.temperature),
            Style::default()
                .fg(temperature_color(current.temperature))
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(Span::styled(
            current.description.clone(),
            Style::default().fg(Color::Gray),
        ))
        .centered(),
    ];
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let mut cards = ForecastCards;
    cards.render(
        frame,
        chunks[2],
        ForecastCardsProps {
            entries: &report.forecast,
        },
    );
}

// ============================================================================
// Helpers
// ============================================================================

enum WeatherView<'a> {
    Welcome,
    Loading,
    Error(&'a str),
    Ready(&'a WeatherReport),
}

impl<'a> WeatherView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        match &state.display {
            DataResource::Failed(error) => WeatherView::Error(error),
            DataResource::Loaded(report) => WeatherView::Ready(report),
            DataResource::Loading => WeatherView::Loading,
            DataResource::Empty => WeatherView::Welcome,
        }
    }
}

/// Same bands as a thermometer: icy, cool, mild, warm, hot.
pub fn temperature_color(celsius: i32) -> Color {
    match celsius {
        t if t < 0 => Color::Rgb(150, 200, 255),
        t if t < 15 => Color::Rgb(100, 180, 255),
        t if t < 25 => Color::Rgb(100, 200, 150),
        t if t < 35 => Color::Rgb(255, 180, 80),
        _ => Color::Rgb(255, 60, 60),
    }
}

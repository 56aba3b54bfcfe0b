use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, centered_rect,
};

use super::Component;
use crate::action::Action;

const COMPACT_PROMPT: &str = "Clear history?";

/// Yes/no guard in front of clearing the recent searches
pub struct ConfirmDialog {
    modal: Modal,
}

pub struct ConfirmDialogProps {
    pub is_open: bool,
    pub is_focused: bool,
    /// Number of cities that would be forgotten
    pub count: usize,
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl ConfirmDialog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for ConfirmDialog {
    type Props<'a> = ConfirmDialogProps;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_open || !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    Some(Action::HistoryClearConfirm)
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    Some(Action::HistoryClearCancel)
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if !props.is_open || area.width == 0 || area.height == 0 {
            return;
        }
        if area.width < 20 || area.height < 7 {
            render_compact(frame, area);
            return;
        }

        let modal_area = centered_rect(44, 7, area);
        let count = props.count;
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let noun = if count == 1 { "city" } else { "cities" };
            let lines = vec![
                Line::from(Span::styled(
                    "Clear recent searches?",
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .centered(),
                Line::from(Span::styled(
                    format!("{} {} will be forgotten.", count, noun),
                    Style::default().fg(Color::Gray),
                ))
                .centered(),
                Line::default(),
                Line::from(vec![
                    Span::styled("y", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                    Span::styled(" clear   ", Style::default().fg(Color::DarkGray)),
                    Span::styled("n", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                    Span::styled(" keep", Style::default().fg(Color::DarkGray)),
                ])
                .centered(),
            ];
            frame.render_widget(Paragraph::new(lines), content_area);
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(Color::Rgb(35, 35, 45)),
                        padding: Padding::all(1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::HistoryClearCancel,
                render_content: &mut render_content,
            },
        );
    }
}

/// Single-line prompt for terminals too small for the modal.
fn render_compact(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            COMPACT_PROMPT,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" y/n", Style::default().fg(Color::Cyan)),
    ]);
    let row = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };
    frame.render_widget(Clear, row);
    frame.render_widget(Paragraph::new(line), row);
}

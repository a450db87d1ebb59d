//! TUI rendering for clicktrack

mod beats;
mod settings;
mod transport;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use clicktrack::MetronomeConfig;

use beats::{render_beats, render_phase};
use settings::render_settings;
use transport::render_transport;

/// Everything one frame needs
pub struct View<'a> {
    pub config: &'a MetronomeConfig,
    pub running: bool,
    pub beat_index: usize,
    pub phase: f32,
    /// A beat was dispatched moments ago
    pub flash: bool,
    pub status: Option<&'a str>,
}

pub fn render(frame: &mut Frame, view: &View) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Transport bar
            Constraint::Length(5), // Beat boxes
            Constraint::Length(3), // Measure phase
            Constraint::Min(9),    // Settings
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    render_transport(frame, chunks[0], view);
    render_beats(frame, chunks[1], view);
    render_phase(frame, chunks[2], view);
    render_settings(frame, chunks[3], view.config);

    let help = match view.status {
        Some(status) => Paragraph::new(format!(" {status}")).style(Style::default().fg(Color::Yellow)),
        None => Paragraph::new(
            " [Space] Start/Stop  [+/-] BPM  [T] Tap  [1-9] Accent  [S] Save  [R] Reset  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(help, chunks[4]);
}

//! Transport bar widget - tempo, play state and lock

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use clicktrack::sequencing::tempo_ms;

use super::View;

pub fn render_transport(frame: &mut Frame, area: Rect, view: &View) {
    let block = Block::default().title(" clicktrack ").borders(Borders::ALL);
    let config = view.config;

    let play_symbol = if view.running { "▶" } else { "■" };
    let play_state_str = if view.running { "Running" } else { "Stopped" };

    let mut spans = vec![
        Span::styled(
            format!(" BPM: {}  ", config.bpm()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{:.0} ms/beat  ", tempo_ms(config.bpm(), config.meter())),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{} {}  ", play_symbol, play_state_str),
            Style::default().fg(if view.running { Color::Green } else { Color::Yellow }),
        ),
        Span::styled(
            format!("{}  {}", config.meter(), config.subdivision()),
            Style::default().fg(Color::White),
        ),
    ];

    if config.tempo_locked() {
        spans.push(Span::styled("  LOCKED", Style::default().fg(Color::Red)));
    }
    if config.training().enabled {
        spans.push(Span::styled("  TRAINING", Style::default().fg(Color::Magenta)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

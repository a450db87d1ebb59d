//! Settings panel - every adjustable field with its key

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use clicktrack::MetronomeConfig;

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

fn row(key: &str, name: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" [{key:^9}] "), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{name:<14}"), Style::default().fg(Color::White)),
        Span::styled(value, Style::default().fg(Color::Cyan)),
    ])
}

pub fn render_settings(frame: &mut Frame, area: Rect, config: &MetronomeConfig) {
    let poly = config.poly();
    let training = config.training();

    let lines = vec![
        row("M", "Meter", config.meter().to_string()),
        row("D", "Subdivision", config.subdivision().to_string()),
        row("[ ]", "Swing", format!("{}%", config.swing())),
        row("P", "Polyrhythm", on_off(poly.enabled).to_owned()),
        row(
            ", . O ( )",
            "  pulse",
            format!("{} × {}  vol {}%", poly.beats, poly.subdivision, poly.volume),
        ),
        row(
            "N < > G H",
            "Training",
            format!("{}  +{} every {}", on_off(training.enabled), training.step, training.every),
        ),
        row("L", "Tempo lock", on_off(config.tempo_locked()).to_owned()),
        row("V", "Visual pulse", on_off(config.visual_pulse()).to_owned()),
        row("{ }", "Volume", format!("{}%", config.volume())),
    ];

    let paragraph =
        Paragraph::new(lines).block(Block::default().title(" Settings ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

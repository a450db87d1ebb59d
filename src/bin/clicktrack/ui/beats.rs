//! Beat indicator and measure phase gauge

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::View;

pub fn render_beats(frame: &mut Frame, area: Rect, view: &View) {
    let outer = Block::default().title(" Beats ").borders(Borders::ALL);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let accents = view.config.accents();
    let beats = view.config.meter().beats_per_measure().max(1);
    let constraints = vec![Constraint::Ratio(1, beats as u32); beats];
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    for (beat, cell) in cells.iter().enumerate() {
        let current = view.running && beat == view.beat_index;
        let accented = accents.is_accented(beat);

        let mut style = Style::default().fg(if accented { Color::Yellow } else { Color::Gray });
        if current {
            style = style.add_modifier(Modifier::BOLD);
            if view.flash {
                style = style.bg(if accented { Color::Red } else { Color::Blue });
            }
        }

        let label = if accented {
            format!("{}>", beat + 1)
        } else {
            format!("{}", beat + 1)
        };
        frame.render_widget(Paragraph::new(label).style(style).centered(), *cell);
    }
}

pub fn render_phase(frame: &mut Frame, area: Rect, view: &View) {
    let ratio = (view.phase as f64 / 100.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(Block::default().title(" Measure ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(format!("{:.0}%", view.phase));
    frame.render_widget(gauge, area);
}

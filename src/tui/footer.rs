use crate::app::{AppState, NARROW_WIDTH_THRESHOLD};
use crate::tui::palette::Palette;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let narrow = area.width < NARROW_WIDTH_THRESHOLD;
    let esc = if state.error_banner().is_some() {
        "dismiss"
    } else {
        "quit"
    };

    let hints: Vec<(&str, &str)> = if narrow {
        vec![
            ("⏎", "search"),
            ("↑↓", "sel"),
            ("^O", "open"),
            ("^T", "theme"),
            ("Esc", esc),
        ]
    } else {
        vec![
            ("type", "username"),
            ("Enter", "search now"),
            ("↑↓", "select"),
            ("^O", "open in browser"),
            ("^U", "clear"),
            ("^T", "theme"),
            ("Esc", esc),
        ]
    };

    let mut spans: Vec<Span> = Vec::new();
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(*key, palette.key_hint));
        spans.push(Span::styled(format!(" {desc}"), palette.muted));
    }

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(palette.card_border),
    );
    f.render_widget(footer, area);
}

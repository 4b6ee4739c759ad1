use crate::app::AppState;
use crate::tui::palette::Palette;
use crate::tui::spinner;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub const HEADER_HEIGHT: u16 = 4;

pub fn render(f: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let title = Line::from(vec![
        Span::styled(" Hacktoberfest Progress Tracker ", palette.title),
        Span::styled(
            format!(
                "hacktrack v{}+{} ",
                env!("CARGO_PKG_VERSION"),
                env!("BUILD_NUMBER")
            ),
            palette.muted,
        ),
        Span::styled(format!("[{}]", state.theme.label()), palette.accent),
    ]);

    let mut input = vec![
        Span::styled(" Username: ", palette.muted),
        Span::styled(state.username.as_str(), palette.input),
        Span::styled("▏", palette.accent),
    ];
    if state.username.is_empty() {
        input.push(Span::styled("Enter GitHub username", palette.muted));
    }
    if state.loading {
        input.push(Span::raw("  "));
        input.push(Span::styled(
            spinner::loading_label(state.spinner_frame),
            palette.accent,
        ));
    }

    let avatar = match &state.avatar_url {
        Some(url) => Line::from(vec![
            Span::styled(" Avatar: ", palette.muted),
            Span::styled(url.as_str(), palette.link),
        ]),
        None => Line::default(),
    };

    let header = Paragraph::new(vec![title, Line::from(input), avatar]).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(palette.card_border),
    );
    f.render_widget(header, area);
}

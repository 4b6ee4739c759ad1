use crate::app::AppState;
use crate::tui::palette::Palette;
use crate::tui::{cards, footer, header};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render(f: &mut Frame, state: &AppState) {
    let palette = Palette::for_theme(state.theme);
    let area = f.area();
    f.render_widget(Block::default().style(palette.root), area);

    let banner_height = if state.error_banner().is_some() { 3 } else { 0 };
    let [header_area, progress_area, banner_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(header::HEADER_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(banner_height),
        Constraint::Min(1),
        Constraint::Length(2),
    ])
    .areas(area);

    header::render(f, header_area, state, &palette);
    render_progress(f, progress_area, state, &palette);
    if let Some(err) = state.error_banner() {
        render_error_banner(f, banner_area, err, &palette);
    }
    cards::render(f, body_area, state, &palette);
    footer::render(f, footer_area, state, &palette);
}

fn render_progress(f: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let line = Line::from(vec![
        Span::styled(" Progress: ", palette.title),
        Span::styled(state.progress_message(), palette.accent),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_error_banner(f: &mut Frame, area: Rect, message: &str, palette: &Palette) {
    let banner = Paragraph::new(message.to_owned())
        .style(palette.error)
        .block(
            Block::default()
                .title(" Error ")
                .title_bottom(" Esc to dismiss ")
                .borders(Borders::ALL)
                .border_style(palette.error),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(banner, area);
}

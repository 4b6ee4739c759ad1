use crate::app::{AppState, NARROW_WIDTH_THRESHOLD, WIDE_WIDTH_THRESHOLD};
use crate::github::models::PullRequest;
use crate::tui::palette::Palette;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Border plus title, repository and date lines.
pub const CARD_HEIGHT: u16 = 5;

pub fn column_count(width: u16) -> usize {
    if width < NARROW_WIDTH_THRESHOLD {
        1
    } else if width < WIDE_WIDTH_THRESHOLD {
        2
    } else {
        3
    }
}

/// First grid row to draw so the selected card stays on screen.
pub fn first_visible_row(selected: usize, columns: usize, visible_rows: usize) -> usize {
    let selected_row = selected / columns.max(1);
    let visible_rows = visible_rows.max(1);
    (selected_row + 1).saturating_sub(visible_rows)
}

pub fn render(f: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    if state.pull_requests.is_empty() {
        if let Some(msg) = state.empty_message() {
            let p = Paragraph::new(msg)
                .style(palette.title)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            f.render_widget(p, area);
        }
        return;
    }
    if area.height < CARD_HEIGHT || area.width < 4 {
        return;
    }

    let columns = column_count(area.width);
    let visible_rows = (area.height / CARD_HEIGHT) as usize;
    let first_row = first_visible_row(state.selected, columns, visible_rows);
    let col_width = area.width / columns as u16;

    for (idx, pr) in state.pull_requests.iter().enumerate().skip(first_row * columns) {
        let row = idx / columns - first_row;
        if row >= visible_rows {
            break;
        }
        let col = idx % columns;
        let card_area = Rect {
            x: area.x + col as u16 * col_width,
            y: area.y + row as u16 * CARD_HEIGHT,
            width: col_width,
            height: CARD_HEIGHT,
        };
        render_card(f, card_area, pr, idx == state.selected, palette);
    }
}

fn render_card(f: &mut Frame, area: Rect, pr: &PullRequest, selected: bool, palette: &Palette) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let border = if selected {
        palette.card_selected
    } else {
        palette.card_border
    };

    let lines = vec![
        Line::from(Span::styled(truncate(&pr.title, inner_width), palette.link)),
        Line::from(Span::styled(
            truncate(&format!("Repository: {}", pr.repository_name()), inner_width),
            palette.muted,
        )),
        Line::from(Span::styled(
            truncate(&format!("Created at: {}", pr.created_local_date()), inner_width),
            palette.muted,
        )),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(card, area);
}

/// Cuts `s` to at most `max` display columns, marking the cut with an ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let cw = c.width().unwrap_or(0);
        if width + cw + 1 > max {
            break;
        }
        out.push(c);
        width += cw;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn columns_by_width() {
        assert_eq!(column_count(40), 1);
        assert_eq!(column_count(NARROW_WIDTH_THRESHOLD), 2);
        assert_eq!(column_count(119), 2);
        assert_eq!(column_count(WIDE_WIDTH_THRESHOLD), 3);
    }

    #[test]
    fn first_row_keeps_selection_visible() {
        assert_eq!(first_visible_row(0, 2, 3), 0);
        assert_eq!(first_visible_row(5, 2, 3), 0);
        assert_eq!(first_visible_row(6, 2, 3), 1);
        assert_eq!(first_visible_row(9, 1, 2), 8);
    }

    #[test]
    fn first_row_zero_visible_rows() {
        assert_eq!(first_visible_row(3, 1, 0), 3);
    }

    #[test]
    fn truncate_short_untouched() {
        assert_eq!(truncate("Fix typo", 20), "Fix typo");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("Fix typo in README", 8), "Fix typ…");
    }

    #[test]
    fn truncate_wide_chars() {
        // each CJK char is two columns
        assert_eq!(truncate("修复文档错误", 5), "修复…");
    }

    #[test]
    fn truncate_zero() {
        assert_eq!(truncate("abc", 0), "");
    }
}

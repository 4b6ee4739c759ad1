use crate::settings::Theme;
use ratatui::style::{Color, Modifier, Style};

/// Styles for one theme. Built from the current `Theme` each frame and passed
/// down to every render function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Background and foreground of the whole screen.
    pub root: Style,
    pub title: Style,
    pub input: Style,
    pub card_border: Style,
    pub card_selected: Style,
    pub link: Style,
    pub muted: Style,
    pub accent: Style,
    pub key_hint: Style,
    pub error: Style,
}

const DARK_BG: Color = Color::Rgb(33, 37, 41);
const DARK_FG: Color = Color::Rgb(248, 249, 250);

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                root: Style::default().bg(Color::White).fg(Color::Black),
                title: Style::default()
                    .fg(Color::Rgb(52, 58, 64))
                    .add_modifier(Modifier::BOLD),
                input: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
                card_border: Style::default().fg(Color::Gray),
                card_selected: Style::default().fg(Color::Blue),
                link: Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
                muted: Style::default().fg(Color::DarkGray),
                accent: Style::default().fg(Color::Magenta),
                key_hint: Style::default().fg(Color::Blue),
                error: Style::default().fg(Color::Red),
            },
            Theme::Dark => Self {
                root: Style::default().bg(DARK_BG).fg(DARK_FG),
                title: Style::default().fg(DARK_FG).add_modifier(Modifier::BOLD),
                input: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                card_border: Style::default().fg(Color::DarkGray),
                card_selected: Style::default().fg(Color::Cyan),
                link: Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::UNDERLINED),
                muted: Style::default().fg(Color::Gray),
                accent: Style::default().fg(Color::Yellow),
                key_hint: Style::default().fg(Color::Cyan),
                error: Style::default().fg(Color::LightRed),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_pairs_are_exclusive() {
        let light = Palette::for_theme(Theme::Light);
        let dark = Palette::for_theme(Theme::Dark);
        assert_ne!(light.root, dark.root);
        assert_ne!(light.link, dark.link);
    }

    #[test]
    fn double_toggle_restores_palette() {
        let theme = Theme::Dark;
        assert_eq!(
            Palette::for_theme(theme.toggled().toggled()),
            Palette::for_theme(theme)
        );
    }
}

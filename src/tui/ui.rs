use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::editor::{FormEditor, Mode, Severity, TextInput};
use crate::schema::{self, FieldKind};

use super::theme::{theme, Theme};

const BANNER: [&str; 6] = [
    r" ____       _                      ____       _",
    r"|  _ \ _ __(_)___ _ __ ___        |  _ \ ___ | | __ _ _   _",
    r"| |_) | '__| / __| '_ ` _ \ _____| |_) / _ \| |/ _` | | | |",
    r"|  __/| |  | \__ \ | | | | |_____|  _ <  __/| | (_| | |_| |",
    r"|_|   |_|  |_|___/_| |_| |_|     |_| \_\___|_|\__,_|\__, |",
    r"                                                      |___/",
];

const LABEL_WIDTH: usize = 22;

pub(super) fn render(f: &mut Frame, editor: &FormEditor) {
    let area = f.area();
    if area.height < 10 || area.width < 40 {
        f.render_widget(Paragraph::new("Terminal too small"), area);
        return;
    }

    let theme = theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.dim))
        .title(Span::styled(
            " Prism-Relay Settings ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let banner_width = BANNER.iter().map(|l| l.len()).max().unwrap_or(0) as u16;
    let show_banner = banner_enabled(editor)
        && inner.height >= BANNER.len() as u16 + 14
        && inner.width >= banner_width + 4;
    let banner_height = if show_banner {
        BANNER.len() as u16 + 1
    } else {
        0
    };

    let [banner_area, dots_area, tabs_area, fields_area, status_area, help_area] =
        Layout::vertical([
            Constraint::Length(banner_height),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

    if show_banner {
        let lines: Vec<Line> = BANNER
            .iter()
            .map(|l| {
                Line::styled(
                    *l,
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
            })
            .collect();
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), banner_area);
    }

    f.render_widget(Paragraph::new(dots_line(editor, &theme)), dots_area);
    f.render_widget(Paragraph::new(tabs_line(editor, &theme)), tabs_area);
    f.render_widget(
        Paragraph::new(field_lines(editor, &theme, fields_area.width)),
        fields_area,
    );

    if let Some(status) = editor.status() {
        let color = match status.severity {
            Severity::Info => theme.value,
            Severity::Ok => theme.ok,
            Severity::Warn => theme.warn,
        };
        f.render_widget(
            Paragraph::new(Line::styled(
                format!(" {}", truncate_to_width(&status.message, status_area.width)),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            status_area,
        );
    }

    let help = if editor.mode() == Mode::EditingText {
        " Type to edit  |  Enter confirm  |  Esc cancel"
    } else {
        " Up/Dn navigate  |  </> cycle  |  Enter edit  |  Tab switch  |  s save  |  t test  |  * secrets  |  q exit"
    };
    f.render_widget(
        Paragraph::new(Line::styled(
            truncate_to_width(help, help_area.width),
            Style::default().fg(theme.warn),
        )),
        help_area,
    );
}

fn banner_enabled(editor: &FormEditor) -> bool {
    editor
        .cfg()
        .get("show_splash")
        .map(|v| v != "false")
        .unwrap_or(true)
}

fn dots_line(editor: &FormEditor, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    match editor.probe_results() {
        Some(results) => {
            for result in results {
                let (dot, color) = if result.healthy {
                    ("●", theme.ok)
                } else {
                    ("○", theme.err)
                };
                spans.push(Span::styled(
                    format!("{dot} {}   ", result.provider),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ));
            }
        }
        None => spans.push(Span::styled(
            "checking providers...".to_string(),
            Style::default().fg(theme.dim),
        )),
    }
    Line::from(spans)
}

fn tabs_line(editor: &FormEditor, theme: &Theme) -> Line<'static> {
    let active_style = if theme.no_color {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
            .fg(ratatui::style::Color::Black)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD)
    };

    let mut spans = vec![Span::raw("  ")];
    for (i, tab) in schema::tabs().iter().enumerate() {
        if i == editor.tab_idx() {
            spans.push(Span::styled(format!("[ {} ]", tab.title), active_style));
        } else {
            spans.push(Span::styled(
                format!("  {}  ", tab.title),
                Style::default().fg(theme.dim),
            ));
        }
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn field_lines(editor: &FormEditor, theme: &Theme, width: u16) -> Vec<Line<'static>> {
    let tab = editor.current_tab();
    let editing = editor.mode() == Mode::EditingText;
    let value_width = width.saturating_sub(LABEL_WIDTH as u16 + 10);

    let mut lines = vec![Line::default()];
    for (i, field) in tab.fields.iter().enumerate() {
        let selected = i == editor.field_idx();
        let pointer_style = Style::default()
            .fg(theme.warn)
            .add_modifier(Modifier::BOLD);
        let label_style = if selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let mut spans = vec![
            Span::styled(if selected { " > " } else { "   " }, pointer_style),
            Span::styled(format!("{:<LABEL_WIDTH$}", field.label), label_style),
        ];

        if editing && selected {
            spans.extend(edit_spans(editor.input(), theme));
        } else {
            match field.kind {
                FieldKind::Choice => {
                    let arrow_style = Style::default().fg(theme.warn);
                    spans.push(Span::styled(if selected { "< " } else { "  " }, arrow_style));
                    spans.push(Span::styled(
                        truncate_to_width(&editor.display_value(field), value_width),
                        value_style(theme.value, selected),
                    ));
                    if selected {
                        spans.push(Span::styled(" >", arrow_style));
                    }
                }
                FieldKind::Text | FieldKind::Secret => {
                    let set = !editor.field_value(field).is_empty();
                    let color = if set { theme.value } else { theme.err };
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled(
                        truncate_to_width(&editor.display_value(field), value_width),
                        value_style(color, selected),
                    ));
                }
            }
        }

        lines.push(Line::from(spans));
        lines.push(Line::default());
    }
    lines
}

fn value_style(color: ratatui::style::Color, selected: bool) -> Style {
    let style = Style::default().fg(color);
    if selected {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn edit_spans(input: &TextInput, theme: &Theme) -> Vec<Span<'static>> {
    let chars: Vec<char> = input.value.chars().collect();
    let cursor = input.cursor.min(chars.len());
    let before: String = chars[..cursor].iter().collect();
    let (at, after) = if cursor < chars.len() {
        (
            chars[cursor].to_string(),
            chars[cursor + 1..].iter().collect::<String>(),
        )
    } else {
        (" ".to_string(), String::new())
    };

    let style = Style::default()
        .fg(theme.value)
        .add_modifier(Modifier::UNDERLINED);
    vec![
        Span::styled(before, style),
        Span::styled(at, style.add_modifier(Modifier::REVERSED)),
        Span::styled(after, style),
    ]
}

fn truncate_to_width(text: &str, width: u16) -> String {
    let width = width as usize;
    if width == 0 {
        return String::new();
    }
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }
    if width == 1 {
        return "…".to_string();
    }

    let mut out = String::new();
    let mut used = 0usize;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefgh", 5), "abcd…");
        assert_eq!(truncate_to_width("anything", 1), "…");
        assert_eq!(truncate_to_width("anything", 0), "");
    }
}

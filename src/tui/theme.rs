use ratatui::style::Color;

pub struct Theme {
    pub accent: Color,
    pub dim: Color,
    pub ok: Color,
    pub warn: Color,
    pub err: Color,
    pub value: Color,
    pub no_color: bool,
}

pub fn theme() -> Theme {
    let no_color = std::env::var_os("NO_COLOR").is_some();
    if no_color {
        Theme {
            accent: Color::Reset,
            dim: Color::Reset,
            ok: Color::Reset,
            warn: Color::Reset,
            err: Color::Reset,
            value: Color::Reset,
            no_color,
        }
    } else {
        Theme {
            accent: Color::Magenta,
            dim: Color::DarkGray,
            ok: Color::Green,
            warn: Color::Yellow,
            err: Color::Red,
            value: Color::Cyan,
            no_color,
        }
    }
}

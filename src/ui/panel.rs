// Boxed panels for success/error messages and the main menu

use colored::{Color, Colorize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Style applied to a whole panel line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Normal,
    Bold,
    Dim,
}

/// A line whose display width is measured on `plain` while `rendered`
/// (which may hold ANSI codes) is what gets printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLine {
    plain: String,
    rendered: String,
}

impl PanelLine {
    pub fn styled(text: &str, style: LineStyle) -> Self {
        let rendered = match style {
            LineStyle::Normal => text.to_string(),
            LineStyle::Bold => text.bold().to_string(),
            LineStyle::Dim => text.dimmed().to_string(),
        };
        Self {
            plain: text.to_string(),
            rendered,
        }
    }

    pub fn raw(plain: String, rendered: String) -> Self {
        Self { plain, rendered }
    }

    pub fn width(&self) -> usize {
        UnicodeWidthStr::width(self.plain.as_str())
    }
}

/// Split `text` into pieces no wider than `width` columns
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for source in text.lines() {
        let mut current = String::new();
        let mut current_width = 0;

        for ch in source.chars() {
            let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if current_width + ch_width > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }

        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Render a rounded box around `lines`, no wider than `max_width` columns
pub fn render_panel(title: Option<&str>, lines: &[PanelLine], border: Color, max_width: usize) -> Vec<String> {
    let title_width = title.map(|t| UnicodeWidthStr::width(t) + 2).unwrap_or(0);
    let content_width = lines
        .iter()
        .map(PanelLine::width)
        .max()
        .unwrap_or(0)
        .max(title_width)
        .min(max_width.saturating_sub(4));

    let horizontal = "─".repeat(content_width + 2);
    let mut output = Vec::with_capacity(lines.len() + 2);

    match title {
        Some(title) => {
            let fill = (content_width + 1).saturating_sub(title_width);
            output.push(format!(
                "{}{}{}{}",
                "╭─".color(border),
                format!(" {} ", title).color(border).bold(),
                "─".repeat(fill).color(border),
                "╮".color(border)
            ));
        }
        None => output.push(format!("{}{}{}", "╭".color(border), horizontal.color(border), "╮".color(border))),
    }

    for line in lines {
        let padding = content_width.saturating_sub(line.width());
        output.push(format!(
            "{} {}{} {}",
            "│".color(border),
            line.rendered,
            " ".repeat(padding),
            "│".color(border)
        ));
    }

    output.push(format!("{}{}{}", "╰".color(border), horizontal.color(border), "╯".color(border)));
    output
}

// Full-screen pieces: header, main menu grid and the file listing

use crate::commands::{Command, Group};
use crate::core::ScanEntry;
use crate::error::Result;
use crate::ui::formatters::format_size;
use crate::ui::panel::{render_panel, PanelLine};
use crate::ui::prompts::terminal_width;
use crate::utils::icons::get_file_icon;
use colored::{Color, Colorize};
use crossterm::{cursor, execute, terminal};
use std::io;
use unicode_width::UnicodeWidthStr;

const HEADER_ART: &[&str] = &[
    " ██████╗ ██████╗ ███╗   ██╗██╗   ██╗███████╗██████╗ ████████╗ ██████╗ ██████╗ ",
    "██╔════╝██╔═══██╗████╗  ██║██║   ██║██╔════╝██╔══██╗╚══██╔══╝██╔═══██╗██╔══██╗",
    "██║     ██║   ██║██╔██╗ ██║██║   ██║█████╗  ██████╔╝   ██║   ██║   ██║██████╔╝",
    "██║     ██║   ██║██║╚██╗██║██║   ██║██╔══╝  ██╔══██╗   ██║   ██║   ██║██╔══██╗",
    "╚██████╗╚██████╔╝██║ ╚████║╚██████╔╝███████╗██║  ██║   ██║   ╚██████╔╝██║  ██║",
    " ╚═════╝ ╚═════╝ ╚═╝  ╚═══╝ ╚═════╝ ╚══════╝╚═╝  ╚═╝   ╚═╝    ╚═════╝ ╚═╝  ╚═╝",
];

const COLUMN_GAP: &str = "    ";

pub fn clear_screen() -> Result<()> {
    execute!(io::stdout(), terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
    Ok(())
}

fn center(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(UnicodeWidthStr::width(text)) / 2;
    format!("{}{}", " ".repeat(padding), text)
}

fn pad_right(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{}{}", text, " ".repeat(padding))
}

/// Logo, version line and an optional screen title, closed by a rule
pub fn header_lines(subtitle: Option<&str>, width: usize) -> Vec<String> {
    let mut lines = vec![String::new()];

    for art in HEADER_ART {
        lines.push(center(art, width).cyan().bold().to_string());
    }

    let version = format!("CLI Edition v{}", env!("CARGO_PKG_VERSION"));
    lines.push(String::new());
    lines.push(center(&version, width).dimmed().to_string());

    if let Some(title) = subtitle {
        lines.push(center(title, width).white().bold().to_string());
    }

    lines.push("─".repeat(width));
    lines
}

/// Clear the terminal and draw the header
pub fn print_header(subtitle: Option<&str>) -> Result<()> {
    clear_screen()?;
    for line in header_lines(subtitle, terminal_width()) {
        println!("{}", line);
    }
    Ok(())
}

/// One cell of the menu grid: plain text for measuring, styled text for printing
struct Cell {
    plain: String,
    rendered: String,
}

impl Cell {
    fn empty() -> Self {
        Cell {
            plain: String::new(),
            rendered: String::new(),
        }
    }

    fn padded(&self, width: usize) -> (String, String) {
        let padding = " ".repeat(width.saturating_sub(UnicodeWidthStr::width(self.plain.as_str())));
        (
            format!("{}{}", self.plain, padding),
            format!("{}{}", self.rendered, padding),
        )
    }
}

fn group_column(group: Group) -> Vec<Cell> {
    let commands: Vec<Command> = group.commands().collect();
    let first_width = commands
        .iter()
        .map(|c| UnicodeWidthStr::width(format!("[{}] {}", c.code(), c.menu_cells().0).as_str()))
        .max()
        .unwrap_or(0);

    let mut cells = vec![Cell {
        plain: group.title().to_string(),
        rendered: group.title().bold().to_string(),
    }];

    for command in commands {
        let (name, detail) = command.menu_cells();
        let code = format!("[{}]", command.code());
        let first = pad_right(&format!("{} {}", code, name), first_width);
        let rendered_first = format!("{}{}", code.cyan(), &first[code.len()..]);
        cells.push(Cell {
            plain: format!("{}  {}", first, detail),
            rendered: format!("{}  {}", rendered_first, detail),
        });
    }

    cells
}

/// The main menu: one column per group inside a dim panel, then the exit hint
pub fn menu_lines(width: usize) -> Vec<String> {
    let columns: Vec<Vec<Cell>> = Group::ALL.iter().map(|g| group_column(*g)).collect();
    let widths: Vec<usize> = columns
        .iter()
        .map(|cells| {
            cells
                .iter()
                .map(|c| UnicodeWidthStr::width(c.plain.as_str()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);

    let mut lines = Vec::with_capacity(rows);
    for row in 0..rows {
        let mut plain = Vec::with_capacity(columns.len());
        let mut rendered = Vec::with_capacity(columns.len());
        for (column, width) in columns.iter().zip(&widths) {
            let empty = Cell::empty();
            let (p, r) = column.get(row).unwrap_or(&empty).padded(*width);
            plain.push(p);
            rendered.push(r);
        }
        lines.push(PanelLine::raw(
            plain.join(COLUMN_GAP),
            rendered.join(COLUMN_GAP),
        ));
        // Blank line under the group titles
        if row == 0 {
            lines.push(PanelLine::raw(String::new(), String::new()));
        }
    }

    let mut output = render_panel(None, &lines, Color::BrightBlack, width);
    output.push(format!("[{}] Exit", Command::Quit.code()).dimmed().to_string());
    output
}

/// Listing of candidate files: icon, name and size
pub fn file_table_lines(entries: &[ScanEntry]) -> Vec<String> {
    let name_width = entries
        .iter()
        .map(|e| UnicodeWidthStr::width(e.name.as_str()))
        .max()
        .unwrap_or(0)
        .max("File name".len());

    let mut lines = vec![
        "Available files in the folder".white().bold().to_string(),
        String::new(),
        format!("    {}  {}", pad_right("File name", name_width), "Size").bold().to_string(),
        format!("    {}", "─".repeat(name_width + 12)).dimmed().to_string(),
    ];

    for entry in entries {
        lines.push(format!(
            " {}  {}  {}",
            get_file_icon(&entry.name),
            pad_right(&entry.name, name_width).cyan(),
            format_size(entry.size).dimmed()
        ));
    }

    lines
}

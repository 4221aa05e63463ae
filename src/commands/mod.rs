// Command handlers module
//
// Every menu entry is one `Command` variant; what it does is described by
// its `Action`. The menu, the grid on screen and the dispatcher all read the
// same table.

pub mod convert;
pub mod download;
pub mod menu;

use crate::core::{AppPaths, ImageCodec, MediaEngine, Platform, ProcessRunner};

pub use menu::{Menu, MenuOutcome};

/// Column of the menu grid a command is listed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Media,
    Images,
    Audio,
}

impl Group {
    pub const ALL: [Group; 3] = [Group::Media, Group::Images, Group::Audio];

    pub fn title(&self) -> &'static str {
        match self {
            Group::Media => "Media",
            Group::Images => "Images",
            Group::Audio => "Audio",
        }
    }

    /// Commands listed under this group, in menu order
    pub fn commands(&self) -> impl Iterator<Item = Command> + '_ {
        Command::ALL.into_iter().filter(move |c| c.group() == Some(*self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    YouTube,
    SoundCloud,
    Spotify,
    JpgToPng,
    PngToJpg,
    WebpToPng,
    PngToIco,
    Mp3ToM4a,
    M4aToMp3,
    WavToMp3,
    Mp3ToOgg,
    OggToMp3,
    Quit,
}

/// What running a command does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Exit,
    Download(Platform),
    ConvertImage {
        target: &'static str,
    },
    ConvertAudio {
        target: &'static str,
        options: &'static [&'static str],
    },
}

const MP3_OPTIONS: &[&str] = &["-b:a", "192k"];

impl Command {
    pub const ALL: [Command; 13] = [
        Command::YouTube,
        Command::SoundCloud,
        Command::Spotify,
        Command::JpgToPng,
        Command::PngToJpg,
        Command::WebpToPng,
        Command::PngToIco,
        Command::Mp3ToM4a,
        Command::M4aToMp3,
        Command::WavToMp3,
        Command::Mp3ToOgg,
        Command::OggToMp3,
        Command::Quit,
    ];

    /// Look up the command typed at the menu prompt. Only the exit token is
    /// case-insensitive; surrounding whitespace is not stripped.
    pub fn parse(input: &str) -> Option<Command> {
        if input.eq_ignore_ascii_case("q") {
            return Some(Command::Quit);
        }
        Command::ALL.into_iter().find(|c| c.code() == input)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Command::YouTube => "1",
            Command::SoundCloud => "2",
            Command::Spotify => "3",
            Command::JpgToPng => "11",
            Command::PngToJpg => "12",
            Command::WebpToPng => "13",
            Command::PngToIco => "14",
            Command::Mp3ToM4a => "21",
            Command::M4aToMp3 => "22",
            Command::WavToMp3 => "23",
            Command::Mp3ToOgg => "24",
            Command::OggToMp3 => "25",
            Command::Quit => "q",
        }
    }

    /// The two cells shown in the menu grid after the code
    pub fn menu_cells(&self) -> (&'static str, &'static str) {
        match self {
            Command::YouTube => (Platform::YouTube.name(), "Download"),
            Command::SoundCloud => (Platform::SoundCloud.name(), "Download"),
            Command::Spotify => (Platform::Spotify.name(), "Download"),
            Command::JpgToPng => ("JPG", "-> PNG"),
            Command::PngToJpg => ("PNG", "-> JPG"),
            Command::WebpToPng => ("WEBP", "-> PNG"),
            Command::PngToIco => ("PNG", "-> ICO"),
            Command::Mp3ToM4a => ("MP3", "-> M4A"),
            Command::M4aToMp3 => ("M4A", "-> MP3"),
            Command::WavToMp3 => ("WAV", "-> MP3"),
            Command::Mp3ToOgg => ("MP3", "-> OGG"),
            Command::OggToMp3 => ("OGG", "-> MP3"),
            Command::Quit => ("Exit", ""),
        }
    }

    /// Title used on the action's own screen, e.g. "JPG -> PNG"
    pub fn label(&self) -> String {
        match self.group() {
            Some(Group::Media) => format!("{} download", self.menu_cells().0),
            Some(_) => {
                let (source, target) = self.menu_cells();
                format!("{} {}", source, target)
            }
            None => self.menu_cells().0.to_string(),
        }
    }

    pub fn group(&self) -> Option<Group> {
        match self {
            Command::YouTube | Command::SoundCloud | Command::Spotify => Some(Group::Media),
            Command::JpgToPng | Command::PngToJpg | Command::WebpToPng | Command::PngToIco => Some(Group::Images),
            Command::Mp3ToM4a | Command::M4aToMp3 | Command::WavToMp3 | Command::Mp3ToOgg | Command::OggToMp3 => {
                Some(Group::Audio)
            }
            Command::Quit => None,
        }
    }

    pub fn action(&self) -> Action {
        match self {
            Command::YouTube => Action::Download(Platform::YouTube),
            Command::SoundCloud => Action::Download(Platform::SoundCloud),
            Command::Spotify => Action::Download(Platform::Spotify),
            Command::JpgToPng | Command::WebpToPng => Action::ConvertImage { target: "png" },
            Command::PngToJpg => Action::ConvertImage { target: "jpg" },
            Command::PngToIco => Action::ConvertImage { target: "ico" },
            Command::Mp3ToM4a => Action::ConvertAudio {
                target: "m4a",
                options: &["-c:a", "aac"],
            },
            Command::Mp3ToOgg => Action::ConvertAudio {
                target: "ogg",
                options: &["-c:a", "libvorbis"],
            },
            Command::M4aToMp3 | Command::WavToMp3 | Command::OggToMp3 => Action::ConvertAudio {
                target: "mp3",
                options: MP3_OPTIONS,
            },
            Command::Quit => Action::Exit,
        }
    }
}

/// Collaborators shared by every action, built once at startup
pub struct Context {
    pub paths: AppPaths,
    pub engine: Box<dyn MediaEngine>,
    pub runner: Box<dyn ProcessRunner>,
    pub codec: Box<dyn ImageCodec>,
}

/// Result of an action that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionReport {
    /// Something was written; the message goes into the success panel
    Saved(String),
    /// The user backed out, or there was nothing to work on
    Skipped,
}

use std::str::FromStr;

use thiserror::Error;

use crate::settings_panel::SizePreset;

/// Requested clock size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeRequest {
    /// One of the canned sizes
    Preset(SizePreset),
    /// Free-form text, validated when applied
    Custom(String),
}

/// A line of user input while the clock runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// `theme <name>`
    Theme(String),
    /// `top on|off`
    AlwaysOnTop(bool),
    /// `digital on|off`
    Digital(bool),
    /// `size small|medium|large|xlarge|<px>`
    Size(SizeRequest),
    /// `reset`
    Reset,
    /// `settings`
    Settings,
    /// `themes`
    Themes,
    /// `exit` or `quit`
    Exit,
}

/// Why an input line is not a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    /// Blank line
    #[error("empty command")]
    Empty,

    /// First word is not a command
    #[error("unknown command '{0}' (try: theme, top, digital, size, reset, settings, themes, exit)")]
    Unknown(String),

    /// The command needs an argument
    #[error("'{command}' needs an argument")]
    MissingArgument {
        /// Command that was given without one
        command: &'static str,
    },

    /// A toggle got something other than on/off
    #[error("expected on or off, got '{0}'")]
    BadToggle(String),
}

impl FromStr for UiCommand {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandParseError::Empty),
            "theme" => argument("theme", rest).map(|name| UiCommand::Theme(name.to_string())),
            "top" => toggle("top", rest).map(UiCommand::AlwaysOnTop),
            "digital" => toggle("digital", rest).map(UiCommand::Digital),
            "size" => {
                let size = argument("size", rest)?;
                Ok(UiCommand::Size(match size.parse::<SizePreset>() {
                    Ok(preset) => SizeRequest::Preset(preset),
                    Err(()) => SizeRequest::Custom(size.to_string()),
                }))
            }
            "reset" => Ok(UiCommand::Reset),
            "settings" => Ok(UiCommand::Settings),
            "themes" => Ok(UiCommand::Themes),
            "exit" | "quit" => Ok(UiCommand::Exit),
            _ => Err(CommandParseError::Unknown(word.to_string())),
        }
    }
}

fn argument<'a>(command: &'static str, rest: &'a str) -> Result<&'a str, CommandParseError> {
    if rest.is_empty() {
        Err(CommandParseError::MissingArgument { command })
    } else {
        Ok(rest)
    }
}

fn toggle(command: &'static str, rest: &str) -> Result<bool, CommandParseError> {
    match argument(command, rest)?.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => Err(CommandParseError::BadToggle(other.to_string())),
    }
}

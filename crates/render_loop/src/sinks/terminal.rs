//! TerminalSink - redraws an analog dial with the digital time and date

use std::collections::HashMap;
use std::io::{self, Stdout, Write};

use colored::{Color, Colorize};
use contracts::{ContractError, DisplaySink, DisplayState, Theme};
use tracing::{debug, instrument};

use crate::dial::{Dial, TickRing};

// Cursor control; colors go through `colored`
const CLEAR_SCREEN: &str = "\x1b[2J";
const CURSOR_HOME: &str = "\x1b[H";
const CLEAR_LINE: &str = "\x1b[K";
const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";

/// Rows from the dial center to its rim
pub const DEFAULT_RADIUS: usize = 8;

/// Foreground and background of one screen region
pub type ColorPair = (Color, Color);

/// Colors of the face and the text block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub face: Option<ColorPair>,
    pub text: Option<ColorPair>,
}

impl Palette {
    /// `System` keeps the terminal's own colors
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::System => Self {
                face: None,
                text: None,
            },
            Theme::Dark => Self {
                face: Some((Color::BrightWhite, Color::Black)),
                text: Some((Color::BrightCyan, Color::Black)),
            },
            Theme::Light => Self {
                face: Some((Color::Black, Color::BrightWhite)),
                text: Some((Color::Blue, Color::BrightWhite)),
            },
        }
    }

    /// Paint `text` with `colors`, or leave it plain
    pub fn paint(colors: Option<ColorPair>, text: &str) -> String {
        match colors {
            Some((fg, bg)) if !text.is_empty() => text.color(fg).on_color(bg).to_string(),
            _ => text.to_string(),
        }
    }
}

/// Sink that draws each frame on a character terminal
pub struct TerminalSink<W: Write + Send> {
    name: String,
    out: W,
    dial: Dial,
    palette: Palette,
    started: bool,
}

impl TerminalSink<Stdout> {
    /// Draw on stdout
    pub fn stdout(name: impl Into<String>, theme: Theme, radius: usize) -> Self {
        Self::with_writer(name, theme, radius, io::stdout())
    }

    /// Create from params map (`radius`, optional)
    pub fn from_params(
        name: impl Into<String>,
        theme: Theme,
        params: &HashMap<String, String>,
    ) -> Result<Self, ContractError> {
        let name = name.into();
        let radius = match params.get("radius") {
            Some(raw) => parse_radius(raw).ok_or_else(|| {
                ContractError::config_validation(
                    format!("sinks.{name}.params.radius"),
                    format!("expected an integer between 2 and 40, got '{raw}'"),
                )
            })?,
            None => DEFAULT_RADIUS,
        };
        Ok(Self::stdout(name, theme, radius))
    }
}

/// Parse the `radius` parameter
pub fn parse_radius(raw: &str) -> Option<usize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|r| (2..=40).contains(r))
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn with_writer(name: impl Into<String>, theme: Theme, radius: usize, out: W) -> Self {
        Self {
            name: name.into(),
            out,
            dial: Dial::new(radius, &TickRing::build()),
            palette: Palette::for_theme(theme),
            started: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn draw(&mut self, state: &DisplayState) -> io::Result<()> {
        let mut frame = String::new();
        if !self.started {
            frame.push_str(HIDE_CURSOR);
            frame.push_str(CLEAR_SCREEN);
            self.started = true;
        }
        frame.push_str(CURSOR_HOME);

        for row in self.dial.render(state) {
            push_line(&mut frame, self.palette.face, &row);
        }
        push_line(&mut frame, None, "");
        push_line(&mut frame, self.palette.text, &state.digital_text);
        push_line(&mut frame, self.palette.text, &state.date_text);
        push_line(&mut frame, self.palette.text, &state.zone);

        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.started {
            self.out.write_all(SHOW_CURSOR.as_bytes())?;
            self.started = false;
        }
        self.out.flush()
    }
}

fn push_line(frame: &mut String, colors: Option<ColorPair>, text: &str) {
    frame.push_str(&Palette::paint(colors, text));
    frame.push_str(CLEAR_LINE);
    frame.push_str("\r\n");
}

impl<W: Write + Send> DisplaySink for TerminalSink<W> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn render(&mut self, state: &DisplayState) -> Result<(), ContractError> {
        self.draw(state)
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))
    }

    async fn flush(&mut self) -> Result<(), ContractError> {
        self.out
            .flush()
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))
    }

    #[instrument(name = "terminal_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        self.restore()
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))?;
        debug!(sink = %self.name, "TerminalSink closed");
        Ok(())
    }
}

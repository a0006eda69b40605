// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Color utilities.

pub use colored::Color;

use crate::Level;

const RESET: &str = "\x1b[0m";

/// Colors for different log levels.
#[derive(Debug, Clone)]
pub struct LevelColor {
    /// Color for debug level logs.
    pub debug: Color,
    /// Color for info level logs.
    pub info: Color,
    /// Color for warning level logs.
    pub warn: Color,
    /// Color for error level logs.
    pub error: Color,
    /// Color for fatal level logs.
    pub fatal: Color,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            debug: Color::Cyan,
            info: Color::Green,
            warn: Color::Yellow,
            error: Color::Red,
            fatal: Color::Magenta,
        }
    }
}

impl LevelColor {
    /// Return the color of the log level.
    pub fn color_of(&self, level: Level) -> Color {
        match level {
            Level::Debug => self.debug,
            Level::Info => self.info,
            Level::Warn => self.warn,
            Level::Error => self.error,
            Level::Fatal => self.fatal,
        }
    }

    /// Wrap `text` in the ANSI foreground sequence of the log level.
    pub fn paint(&self, level: Level, text: &str) -> String {
        paint(self.color_of(level), text)
    }
}

/// Wrap `text` in the ANSI foreground sequence of `color`, followed by a reset.
///
/// Unlike [`colored::Colorize`], this does not consult the terminal or the `CLICOLOR` family of
/// environment variables. Whether to color is decided by the logger configuration.
pub(crate) fn paint(color: Color, text: &str) -> String {
    format!("\x1b[{}m{text}{RESET}", color.to_fg_str())
}

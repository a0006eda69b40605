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

//! Clilog is a minimal logger for command-line programs. It filters log calls by level and
//! renders each line through a template, with optional colors and timestamps.
//!
//! # Overview
//!
//! There is a single global logger. It is usable without any setup: records at [`Level::Info`]
//! and above are written to stderr with the [`DEFAULT_FORMAT`](layout::DEFAULT_FORMAT) template,
//! e.g. `W 2025/01/01 00:00:00.000 disk almost full` with a colored timestamp.
//!
//! # Examples
//!
//! Log with the level macros:
//!
//! ```
//! clilog::set_level(clilog::Level::Debug);
//!
//! clilog::debug!("starting up");
//! clilog::debug!("initializing {}", "subsystems");
//! clilog::warn!("deprecated feature in use");
//! clilog::error!("could not read config file");
//! ```
//!
//! Customize the output with a template:
//!
//! ```
//! clilog::set_format(r#"[{{ level }}] {{ time | timef("%H:%M:%S") }} {{ message }}"#).unwrap();
//! clilog::set_disable_color(true);
//!
//! clilog::info!("Hello clilog!");
//! ```
//!
//! Forward records of the `log` crate:
//!
//! ```
//! clilog::bridge::setup_log_crate();
//!
//! log::info!("This is an info message.");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod bridge;
pub mod color;
pub mod layout;
pub mod record;

mod error;
mod level;
mod logger;

pub use append::Append;
pub use error::Error;
pub use layout::Layout;
pub use level::Level;
pub use logger::*;

/// Log a message at the given level.
///
/// ```
/// use clilog::Level;
///
/// clilog::log!(Level::Warn, "{} retries left", 3);
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)+) => {
        $crate::log($level, ::std::format_args!($($arg)+))
    };
}

/// Log a message at [`Level::Debug`].
///
/// ```
/// clilog::debug!("connecting to {}", "localhost");
/// ```
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::log($crate::Level::Debug, ::std::format_args!($($arg)+))
    };
}

/// Log a message at [`Level::Info`].
///
/// ```
/// clilog::info!("listening on port {}", 8080);
/// ```
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::log($crate::Level::Info, ::std::format_args!($($arg)+))
    };
}

/// Log a message at [`Level::Warn`].
///
/// ```
/// clilog::warn!("deprecated feature in use");
/// ```
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::log($crate::Level::Warn, ::std::format_args!($($arg)+))
    };
}

/// Log a message at [`Level::Error`].
///
/// ```
/// clilog::error!("could not read {}", "config.toml");
/// ```
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::log($crate::Level::Error, ::std::format_args!($($arg)+))
    };
}

/// Log a message at [`Level::Fatal`], then exit the process with status 1.
///
/// ```no_run
/// clilog::fatal!("cannot continue without {}", "a config file");
/// ```
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::fatal(::std::format_args!($($arg)+))
    };
}

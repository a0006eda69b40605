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

//! The global logger and the functions to configure it.

use std::fmt;
use std::sync::Arc;
use std::sync::LazyLock;
use std::sync::RwLock;

use crate::Append;
use crate::Error;
use crate::Layout;
use crate::Level;
use crate::layout::TemplateLayout;

mod builder;
mod config;
#[allow(clippy::module_inception)]
mod logger;

pub use self::builder::Builder;
pub use self::builder::builder;
pub use self::config::Config;
pub(crate) use self::logger::Logger;
use self::logger::validate_timestamp_format;

// the lock only guards swapping the snapshot; rendering and writing run without it, so a
// message, layout or appender may log again
static LOGGER: LazyLock<RwLock<Arc<Logger>>> =
    LazyLock::new(|| RwLock::new(Arc::new(Logger::default())));

/// Return a snapshot of the current configuration.
fn current() -> Arc<Logger> {
    LOGGER.read().unwrap_or_else(|e| e.into_inner()).clone()
}

/// Replace the configuration with a modified copy, returning the previous one.
fn update(f: impl FnOnce(&mut Logger)) -> Arc<Logger> {
    let mut guard = LOGGER.write().unwrap_or_else(|e| e.into_inner());
    let mut logger = Logger::clone(&guard);
    f(&mut logger);
    crate::bridge::sync_max_level(logger.level);
    std::mem::replace(&mut *guard, Arc::new(logger))
}

/// Set the minimum level of records to emit. Default to [`Level::Info`].
///
/// # Examples
///
/// ```
/// use clilog::Level;
///
/// clilog::set_level(Level::Debug);
/// assert_eq!(clilog::level(), Level::Debug);
/// ```
pub fn set_level(level: Level) {
    update(|logger| logger.level = level);
}

/// Return the minimum level of records to emit.
pub fn level() -> Level {
    current().level
}

/// Return whether a record at `level` would be emitted.
pub fn enabled(level: Level) -> bool {
    current().enabled(level)
}

/// Replace the template used to render each line.
///
/// The template is validated before it is installed; on error the current layout is kept. See
/// [`TemplateLayout`] for the template syntax.
///
/// # Errors
///
/// Return an error if the template cannot be parsed or fails to render a sample record.
///
/// # Examples
///
/// ```
/// clilog::set_format("[{{ level }}] {{ message }}").unwrap();
/// assert!(clilog::set_format("{{ unknown }}").is_err());
/// ```
pub fn set_format(template: &str) -> Result<(), Error> {
    let layout = TemplateLayout::new(template)?;
    set_layout(layout);
    Ok(())
}

/// Replace the layout used to render each line.
pub fn set_layout(layout: impl Into<Box<dyn Layout>>) {
    let layout: Box<dyn Layout> = layout.into();
    let layout = Arc::<dyn Layout>::from(layout);
    update(|logger| logger.layout = layout);
}

/// Set the strftime format used when a template renders `{{ time }}` without `timef`.
///
/// Default to [`DEFAULT_TIMESTAMP_FORMAT`](crate::record::DEFAULT_TIMESTAMP_FORMAT). On error the
/// current format is kept.
///
/// # Errors
///
/// Return an error if the format string is not a valid strftime format.
pub fn set_timestamp_format(format: &str) -> Result<(), Error> {
    validate_timestamp_format(format)?;
    update(|logger| logger.timestamp_format = format.to_string());
    Ok(())
}

/// Disable or re-enable ANSI colors in the output. Colors are enabled by default.
pub fn set_disable_color(disable: bool) {
    update(|logger| logger.color = !disable);
}

/// Replace the output of the logger. Default to [`Stderr`](crate::append::Stderr).
///
/// The previous output is flushed before it is dropped.
pub fn set_output(append: impl Into<Box<dyn Append>>) {
    let append: Box<dyn Append> = append.into();
    let append = Arc::<dyn Append>::from(append);
    let previous = update(|logger| logger.append = append);
    let _ = previous.append.flush();
}

/// Log a message at `level`. Prefer the level macros, e.g. [`info!`](crate::info).
///
/// Logging at [`Level::Fatal`] with this function does not exit; see [`fatal`].
pub fn log(level: Level, args: fmt::Arguments) {
    current().log(level, args);
}

/// Log a message at [`Level::Fatal`], flush the output, and exit the process with status 1.
///
/// Prefer the [`fatal!`](crate::fatal) macro.
pub fn fatal(args: fmt::Arguments) -> ! {
    let logger = current();
    logger.log(Level::Fatal, args);
    logger.flush();
    std::process::exit(1)
}

/// Flush the output of the logger.
pub fn flush() {
    current().flush();
}

/// Install all settings at once, in a single swap.
fn install(settings: builder::Settings) {
    let append = settings.append.map(Arc::<dyn Append>::from);
    let replaces_append = append.is_some();
    let previous = update(|logger| {
        if let Some(level) = settings.level {
            logger.level = level;
        }
        if let Some(layout) = settings.layout {
            logger.layout = Arc::from(layout);
        }
        if let Some(format) = settings.timestamp_format {
            logger.timestamp_format = format;
        }
        if let Some(disable) = settings.disable_color {
            logger.color = !disable;
        }
        if let Some(append) = append {
            logger.append = append;
        }
    });

    if replaces_append {
        previous.flush();
    }
}

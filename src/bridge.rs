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

//! A bridge to forward logs from the `log` crate to clilog.

use std::sync::OnceLock;

use log::LevelFilter;

use crate::Error;
use crate::Level;

// the most verbose level the installed bridge lets through; unset until installed
static MAX_LEVEL_CAP: OnceLock<LevelFilter> = OnceLock::new();

#[derive(Debug)]
struct LogCrateLogger {
    filter: Option<env_filter::Filter>,
}

impl LogCrateLogger {
    fn accepts(&self, metadata: &log::Metadata) -> bool {
        self.filter
            .as_ref()
            .is_none_or(|filter| filter.enabled(metadata))
    }

    fn max_level(&self) -> LevelFilter {
        self.filter
            .as_ref()
            .map_or(LevelFilter::Trace, |filter| filter.filter())
    }
}

impl log::Log for LogCrateLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        crate::enabled(Level::from(metadata.level())) && self.accepts(metadata)
    }

    fn log(&self, record: &log::Record) {
        if self.accepts(record.metadata()) {
            crate::log(Level::from(record.level()), *record.args());
        }
    }

    fn flush(&self) {
        crate::flush();
    }
}

fn install(logger: LogCrateLogger) -> Result<(), Error> {
    let cap = logger.max_level();
    log::set_boxed_logger(Box::new(logger)).map_err(|err| {
        Error::new("failed to set up the log crate global logger").with_source(err)
    })?;

    let _ = MAX_LEVEL_CAP.set(cap);
    sync_max_level(crate::level());
    Ok(())
}

/// Keep [`log::max_level`] in line with the level of the global logger, once the bridge is set up.
pub(crate) fn sync_max_level(level: Level) {
    if let Some(cap) = MAX_LEVEL_CAP.get() {
        log::set_max_level(level.to_level_filter().min(*cap));
    }
}

/// Set up the log crate global logger.
///
/// This function calls [`log::set_boxed_logger`] and all logs from the log crate will be
/// forwarded to clilog's global logger. `Trace` records are logged as [`Level::Debug`].
///
/// [`log::max_level`] is kept in line with [`set_level`](crate::set_level) afterwards.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// if let Err(err) = clilog::bridge::try_setup_log_crate() {
///     eprintln!("failed to setup log crate: {err}");
/// }
/// log::info!("forwarded to clilog");
/// ```
pub fn try_setup_log_crate() -> Result<(), Error> {
    install(LogCrateLogger { filter: None })
}

/// Set up the log crate global logger, forwarding only the records that match `directives`.
///
/// `directives` use the `RUST_LOG` syntax of [`env_filter`], e.g. `info,my_crate::db=debug`.
///
/// # Errors
///
/// Return an error if the directives cannot be parsed, or if the log crate global logger has
/// already been set.
///
/// # Examples
///
/// ```
/// clilog::bridge::try_setup_log_crate_with_filter("warn,my_app=debug").unwrap();
/// ```
pub fn try_setup_log_crate_with_filter(directives: &str) -> Result<(), Error> {
    let filter = parse_filter(directives)?;
    install(LogCrateLogger {
        filter: Some(filter),
    })
}

/// Set up the log crate global logger.
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// clilog::bridge::setup_log_crate();
/// ```
pub fn setup_log_crate() {
    if let Err(err) = try_setup_log_crate() {
        panic!(
            "clilog::bridge::setup_log_crate must be called before the log crate global logger initialized: {err}"
        );
    }
}

fn parse_filter(directives: &str) -> Result<env_filter::Filter, Error> {
    let filter = env_filter::Builder::new()
        .try_parse(directives)
        .map_err(|err| {
            Error::new("failed to parse log filter directives")
                .with_context("directives", directives)
                .with_source(err)
        })?
        .build();
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(level: log::Level, target: &str) -> log::Metadata<'_> {
        log::Metadata::builder().level(level).target(target).build()
    }

    #[test]
    fn test_accepts_everything_without_filter() {
        let logger = LogCrateLogger { filter: None };
        assert!(logger.accepts(&metadata(log::Level::Trace, "anything")));
        assert_eq!(logger.max_level(), LevelFilter::Trace);
    }

    #[test]
    fn test_accepts_by_directives() {
        let logger = LogCrateLogger {
            filter: Some(parse_filter("warn,my_app::db=debug").unwrap()),
        };

        assert!(logger.accepts(&metadata(log::Level::Warn, "hyper")));
        assert!(!logger.accepts(&metadata(log::Level::Info, "hyper")));
        assert!(logger.accepts(&metadata(log::Level::Debug, "my_app::db")));
        assert!(!logger.accepts(&metadata(log::Level::Trace, "my_app::db")));
        assert_eq!(logger.max_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_directives() {
        let err = parse_filter("my_app=loud").unwrap_err();
        assert_eq!(err.message(), "failed to parse log filter directives");
    }
}

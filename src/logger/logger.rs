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

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use jiff::Zoned;

use crate::Append;
use crate::Error;
use crate::Layout;
use crate::Level;
use crate::append::Stderr;
use crate::layout::TemplateLayout;
use crate::record::DEFAULT_TIMESTAMP_FORMAT;
use crate::record::Record;

/// The configuration of the global logger.
///
/// Callers never hold a `Logger`: every log call goes through the global instance. It is a
/// separate type so that the logging path can be exercised in isolation.
///
/// A `Logger` is immutable once published. Setters clone it, change the copy and swap it in.
#[derive(Debug, Clone)]
pub(crate) struct Logger {
    pub(crate) level: Level,
    pub(crate) color: bool,
    pub(crate) timestamp_format: String,
    pub(crate) layout: Arc<dyn Layout>,
    pub(crate) append: Arc<dyn Append>,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            level: Level::default(),
            color: true,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            layout: Arc::new(TemplateLayout::default()),
            append: Arc::new(Stderr::default()),
        }
    }
}

impl Logger {
    pub(crate) fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    /// Log `args` at `level` with the current time, reporting failures on stderr.
    pub(crate) fn log(&self, level: Level, args: fmt::Arguments) {
        if !self.enabled(level) {
            return;
        }

        let now = Zoned::now();
        if let Err(err) = self.log_at(level, &now, args) {
            handle_log_error(level, args, err);
        }
    }

    /// Render and append a record at the given time. The level is not checked.
    pub(crate) fn log_at(
        &self,
        level: Level,
        time: &Zoned,
        args: fmt::Arguments,
    ) -> Result<(), Error> {
        let record = Record::builder(level, time, args)
            .timestamp_format(&self.timestamp_format)
            .color(self.color)
            .build();

        let mut line = self.layout.format(&record)?;
        line.push(b'\n');
        self.append.append(&line)
    }

    pub(crate) fn flush(&self) {
        if let Err(err) = self.append.flush() {
            handle_flush_error(err);
        }
    }
}

/// Check that `format` is a usable strftime format by formatting the current time with it.
pub(crate) fn validate_timestamp_format(format: &str) -> Result<(), Error> {
    jiff::fmt::strtime::format(format, &Zoned::now())
        .map(|_| ())
        .map_err(|err| {
            Error::new("invalid timestamp format")
                .with_context("format", format)
                .with_source(err)
        })
}

fn handle_log_error(level: Level, args: fmt::Arguments, error: Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform logging.
    Attempted to log: {args}
    Level: {level:?}
    Error: {error:?}
"###,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular logging.
    Attempted to log: {args}
    Level: {level:?}
    Error: {error:?}
    Fallback error: {fallback_error}
"###,
    );
}

fn handle_flush_error(error: Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform flush.
    Error: {error:?}
"###,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular flush.
    Error: {error:?}
    Fallback error: {fallback_error}
"###,
    );
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use jiff::tz::TimeZone;

    use super::*;
    use crate::append::Buffer;
    use crate::layout::CustomLayout;
    use crate::layout::DEFAULT_FORMAT_NO_COLOR;

    fn jan1() -> Zoned {
        date(2025, 1, 1).at(0, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap()
    }

    fn logger(level: Level, template: &str, buffer: &Buffer) -> Logger {
        Logger {
            level,
            layout: Arc::new(TemplateLayout::new(template).unwrap()),
            append: Arc::new(buffer.clone()),
            ..Logger::default()
        }
    }

    /// Mirror of `Logger::log` with a fixed clock.
    fn log_jan1(logger: &Logger, level: Level, args: fmt::Arguments) {
        if logger.enabled(level) {
            logger.log_at(level, &jan1(), args).unwrap();
        }
    }

    #[test]
    fn test_level_filtering() {
        let cases = [
            (
                "basic log",
                Level::Info,
                Level::Info,
                "I 2025/01/01 00:00:00.000 Hello!\n",
            ),
            ("drop debug when set to info", Level::Info, Level::Debug, ""),
            (
                "log debug when set to debug",
                Level::Debug,
                Level::Debug,
                "D 2025/01/01 00:00:00.000 Hello!\n",
            ),
            (
                "log fatal when set to error",
                Level::Error,
                Level::Fatal,
                "F 2025/01/01 00:00:00.000 Hello!\n",
            ),
            ("drop warn when set to fatal", Level::Fatal, Level::Warn, ""),
        ];

        for (description, current, level, expected) in cases {
            let buffer = Buffer::default();
            let logger = logger(current, DEFAULT_FORMAT_NO_COLOR, &buffer);
            log_jan1(&logger, level, format_args!("Hello!"));
            assert_eq!(buffer.contents(), expected, "{description}");
        }
    }

    #[test]
    fn test_color_follows_logger_setting() {
        let buffer = Buffer::default();
        let mut logger = logger(Level::Info, "{{ level | abbrev | color(level) }}", &buffer);

        log_jan1(&logger, Level::Error, format_args!("boom"));
        logger.color = false;
        log_jan1(&logger, Level::Error, format_args!("boom"));

        assert_eq!(buffer.lines(), ["\x1b[31mE\x1b[0m", "E"]);
    }

    #[test]
    fn test_timestamp_format_is_used_for_bare_time() {
        let buffer = Buffer::default();
        let mut logger = logger(Level::Info, "{{ time }} {{ message }}", &buffer);
        logger.timestamp_format = "%Y-%m-%dT%H:%M:%S".to_string();

        log_jan1(&logger, Level::Info, format_args!("{} + {} = {}", 1, 2, 3));
        assert_eq!(buffer.contents(), "2025-01-01T00:00:00 1 + 2 = 3\n");
    }

    #[test]
    fn test_layout_error_is_returned() {
        let buffer = Buffer::default();
        let logger = Logger {
            layout: Arc::new(CustomLayout::new(|_| Err(Error::new("layout failed")))),
            append: Arc::new(buffer.clone()),
            ..Logger::default()
        };

        let err = logger
            .log_at(Level::Info, &jan1(), format_args!("Hello!"))
            .unwrap_err();
        assert_eq!(err.message(), "layout failed");
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn test_log_reports_layout_error_and_returns() {
        let buffer = Buffer::default();
        let logger = Logger {
            layout: Arc::new(CustomLayout::new(|_| Err(Error::new("layout failed")))),
            append: Arc::new(buffer.clone()),
            ..Logger::default()
        };

        logger.log(Level::Error, format_args!("Hello!"));
        logger.log(Level::Fatal, format_args!("still running"));
        assert!(buffer.contents().is_empty());
    }

    #[derive(Debug)]
    struct BrokenPipe;

    impl Append for BrokenPipe {
        fn append(&self, _: &[u8]) -> Result<(), Error> {
            Err(Error::from_io_error(std::io::ErrorKind::BrokenPipe.into()))
        }

        fn flush(&self) -> Result<(), Error> {
            Err(Error::new("flush failed"))
        }
    }

    #[test]
    fn test_log_reports_append_error_and_returns() {
        let logger = Logger {
            append: Arc::new(BrokenPipe),
            ..Logger::default()
        };

        logger.log(Level::Warn, format_args!("Hello!"));
        logger.flush();
    }

    #[test]
    fn test_log_uses_current_time() {
        let buffer = Buffer::default();
        let logger = logger(Level::Debug, r#"{{ time | timef("%Y") }}"#, &buffer);
        let year = Zoned::now().year();

        logger.log(Level::Debug, format_args!("ignored"));
        let logged: i16 = buffer.contents().trim().parse().unwrap();
        assert!(logged >= year);
    }

    #[test]
    fn test_validate_timestamp_format() {
        assert!(validate_timestamp_format("%Y/%m/%d %H:%M:%S.%3f").is_ok());
        assert!(validate_timestamp_format("no directives at all").is_ok());

        let err = validate_timestamp_format("%Y %").unwrap_err();
        assert_eq!(err.message(), "invalid timestamp format");
    }
}

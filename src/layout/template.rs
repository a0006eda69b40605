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
use std::sync::Arc;

use colored::Color;
use jiff::Zoned;
use minijinja::Environment;
use minijinja::ErrorKind;
use minijinja::UndefinedBehavior;
use minijinja::context;
use minijinja::value::Object;
use minijinja::value::ObjectRepr;
use minijinja::value::Value;

use crate::Error;
use crate::Level;
use crate::color;
use crate::color::LevelColor;
use crate::layout::Layout;
use crate::record::Record;

/// The default template: level code, colored timestamp with milliseconds, message.
///
/// ```text
/// W 2025/01/01 00:00:00.000 disk almost full
/// ```
pub const DEFAULT_FORMAT: &str =
    r#"{{ level | abbrev }} {{ time | timef("%Y/%m/%d %H:%M:%S.%3f") | color(level) }} {{ message }}"#;

/// [`DEFAULT_FORMAT`] without any color.
pub const DEFAULT_FORMAT_NO_COLOR: &str =
    r#"{{ level | abbrev }} {{ time | timef("%Y/%m/%d %H:%M:%S.%3f") }} {{ message }}"#;

const TEMPLATE_NAME: &str = "log";

/// A layout that renders each record through a user supplied template.
///
/// Templates use the [minijinja] syntax. The following variables are available:
///
/// * `level`: the level of the record, rendered as its padded name, e.g. `INFO `.
/// * `time`: the time of the record, rendered with the record's timestamp format.
/// * `message`: the message of the record.
///
/// And the following filters:
///
/// * `abbrev`: turns a level into its single-letter code, e.g. `{{ level | abbrev }}` gives `I`.
/// * `timef(format)`: formats a time with a strftime-like format string, e.g.
///   `{{ time | timef("%H:%M") }}`. See [jiff::fmt::strtime] for the supported directives.
/// * `color(level)`: wraps the input in the ANSI color of the given level, e.g.
///   `{{ message | color(level) }}`. No-op when color is disabled.
///
/// Referring to an undefined variable is an error. Templates are validated when the layout is
/// created by rendering a sample record, so a layout that was created successfully renders every
/// record.
///
/// # Examples
///
/// ```
/// use clilog::layout::TemplateLayout;
///
/// let layout = TemplateLayout::new("[{{ level }}] {{ message }}").unwrap();
/// assert!(TemplateLayout::new("{{ level ").is_err());
/// ```
pub struct TemplateLayout {
    source: String,
    env: Environment<'static>,
    colors: LevelColor,
}

impl fmt::Debug for TemplateLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateLayout")
            .field("source", &self.source)
            .field("colors", &self.colors)
            .finish()
    }
}

impl Default for TemplateLayout {
    fn default() -> Self {
        TemplateLayout::new(DEFAULT_FORMAT)
            .expect("the default template must be a valid template")
    }
}

impl TemplateLayout {
    /// Parse and validate the template.
    ///
    /// # Errors
    ///
    /// Return an error if the template cannot be parsed, or if rendering a sample record fails,
    /// e.g., the template refers to an unknown variable or filter.
    pub fn new(template: impl Into<String>) -> Result<Self, Error> {
        let source = template.into();

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_filter("abbrev", abbrev);
        env.add_filter("timef", timef);
        env.add_filter("color", paint);
        env.add_template_owned(TEMPLATE_NAME, source.clone())
            .map_err(|err| {
                Error::new("failed to parse log template")
                    .with_context("template", &source)
                    .with_source(err)
            })?;

        let layout = TemplateLayout {
            source,
            env,
            colors: LevelColor::default(),
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Return the template source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Customize the colors of all levels.
    pub fn colors(mut self, colors: LevelColor) -> Self {
        self.colors = colors;
        self
    }

    /// Customize the color of the debug log level. Default to cyan.
    pub fn debug_color(mut self, color: Color) -> Self {
        self.colors.debug = color;
        self
    }

    /// Customize the color of the info log level. Default to green.
    pub fn info_color(mut self, color: Color) -> Self {
        self.colors.info = color;
        self
    }

    /// Customize the color of the warn log level. Default to yellow.
    pub fn warn_color(mut self, color: Color) -> Self {
        self.colors.warn = color;
        self
    }

    /// Customize the color of the error log level. Default to red.
    pub fn error_color(mut self, color: Color) -> Self {
        self.colors.error = color;
        self
    }

    /// Customize the color of the fatal log level. Default to magenta.
    pub fn fatal_color(mut self, color: Color) -> Self {
        self.colors.fatal = color;
        self
    }

    fn validate(&self) -> Result<(), Error> {
        let now = Zoned::now();
        let record = Record::builder(Level::Debug, &now, format_args!("test message")).build();
        self.render(&record).map(|_| ()).map_err(|err| {
            Error::new("invalid log template")
                .with_context("template", &self.source)
                .with_source(err)
        })
    }

    fn render(&self, record: &Record) -> Result<String, minijinja::Error> {
        let level = record.level();
        let color = record.color().then(|| self.colors.color_of(level));

        let template = self.env.get_template(TEMPLATE_NAME)?;
        template.render(context! {
            level => Value::from_object(LevelValue { level, color }),
            time => Value::from_object(TimeValue {
                time: record.time().clone(),
                format: record.timestamp_format().to_string(),
            }),
            message => record.args().to_string(),
        })
    }
}

impl Layout for TemplateLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let text = self.render(record).map_err(|err| {
            Error::new("failed to render log template")
                .with_context("template", &self.source)
                .with_source(err)
        })?;
        Ok(text.into_bytes())
    }
}

/// The `level` of a record as seen by the template engine.
#[derive(Debug)]
struct LevelValue {
    level: Level,
    // none if color is disabled
    color: Option<Color>,
}

impl Object for LevelValue {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Plain
    }

    fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.level.name())
    }
}

/// The `time` of a record as seen by the template engine.
#[derive(Debug)]
struct TimeValue {
    time: Zoned,
    format: String,
}

impl Object for TimeValue {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Plain
    }

    fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = jiff::fmt::strtime::format(&self.format, &self.time).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

fn expect_level<'a>(value: &'a Value, filter: &str) -> Result<&'a LevelValue, minijinja::Error> {
    value.downcast_object_ref::<LevelValue>().ok_or_else(|| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("{filter} expects a level, found {}", value.kind()),
        )
    })
}

fn abbrev(value: &Value) -> Result<String, minijinja::Error> {
    let level = expect_level(value, "abbrev")?;
    Ok(level.level.code().to_string())
}

fn timef(value: &Value, format: &str) -> Result<String, minijinja::Error> {
    let time = value.downcast_object_ref::<TimeValue>().ok_or_else(|| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("timef expects a time, found {}", value.kind()),
        )
    })?;

    jiff::fmt::strtime::format(format, &time.time).map_err(|err| {
        minijinja::Error::new(ErrorKind::InvalidOperation, "failed to format time").with_source(err)
    })
}

fn paint(value: &Value, level: &Value) -> Result<String, minijinja::Error> {
    let level = expect_level(level, "color")?;
    let text = value.to_string();
    Ok(match level.color {
        Some(c) => color::paint(c, &text),
        None => text,
    })
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use jiff::tz::TimeZone;

    use super::*;

    fn jan1() -> Zoned {
        date(2025, 1, 1).at(0, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap()
    }

    fn format(layout: &TemplateLayout, level: Level, color: bool) -> String {
        let time = jan1();
        let record = Record::builder(level, &time, format_args!("Hello!"))
            .color(color)
            .build();
        String::from_utf8(layout.format(&record).unwrap()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_templates() {
        let cases = [
            ("foo{{", "failed to parse log template"),
            ("{% if %}", "failed to parse log template"),
            ("{{ foobar }}", "invalid log template"),
            (r#"{{ time | timef(123) }}"#, "invalid log template"),
            (r#"{{ time | timef("%Y %") }}"#, "invalid log template"),
            (r#"{{ message | timef("%Y") }}"#, "invalid log template"),
            (r#"{{ time | abbrev }}"#, "invalid log template"),
            (r#"{{ message | color(message) }}"#, "invalid log template"),
        ];

        for (template, expected) in cases {
            let err = TemplateLayout::new(template).unwrap_err();
            assert_eq!(err.message(), expected, "{template}");
            assert!(err.to_string().contains(template), "{template}");
            assert_eq!(err.sources().len(), 1, "{template}");
        }
    }

    #[test]
    fn test_new_rejects_unknown_filter() {
        // filters are resolved when rendering, so the sample render catches it
        let err = TemplateLayout::new("{{ time | foobar }}").unwrap_err();
        assert_eq!(err.message(), "invalid log template");
        assert!(err.to_string().contains("unknown filter"), "{err}");
    }

    #[test]
    fn test_new_accepts_valid_templates() {
        let cases = [
            "{{ time }}",
            r#"{{ time | timef("%Y") }}"#,
            "{{ level }} {{ message | upper }}",
            "plain text without any placeholder",
            DEFAULT_FORMAT,
            DEFAULT_FORMAT_NO_COLOR,
        ];

        for template in cases {
            let layout = TemplateLayout::new(template);
            assert!(layout.is_ok(), "{template}: {:?}", layout.unwrap_err());
        }
    }

    #[test]
    fn test_format() {
        let cases = [
            (
                r#"{{ level | abbrev }} {{ time | timef("%Y") }} {{ message }}"#,
                Level::Info,
                "I 2025 Hello!",
            ),
            (
                r#"{{ level | abbrev }} {{ time | timef("%Y") | color(level) }} {{ message }}"#,
                Level::Info,
                "I \x1b[32m2025\x1b[0m Hello!",
            ),
            ("{{ level }} {{ message }}", Level::Info, "INFO  Hello!"),
            (
                "{{ level | color(level) }}|",
                Level::Debug,
                "\x1b[36mDEBUG\x1b[0m|",
            ),
            (
                DEFAULT_FORMAT,
                Level::Warn,
                "W \x1b[33m2025/01/01 00:00:00.000\x1b[0m Hello!",
            ),
            (
                DEFAULT_FORMAT,
                Level::Error,
                "E \x1b[31m2025/01/01 00:00:00.000\x1b[0m Hello!",
            ),
            (
                DEFAULT_FORMAT,
                Level::Fatal,
                "F \x1b[35m2025/01/01 00:00:00.000\x1b[0m Hello!",
            ),
            (
                DEFAULT_FORMAT_NO_COLOR,
                Level::Debug,
                "D 2025/01/01 00:00:00.000 Hello!",
            ),
        ];

        for (template, level, expected) in cases {
            let layout = TemplateLayout::new(template).unwrap();
            assert_eq!(format(&layout, level, true), expected, "{template}");
        }
    }

    #[test]
    fn test_format_without_color() {
        let layout = TemplateLayout::default();
        assert_eq!(
            format(&layout, Level::Warn, false),
            "W 2025/01/01 00:00:00.000 Hello!"
        );
    }

    #[test]
    fn test_custom_level_color() {
        let layout = TemplateLayout::new("{{ message | color(level) }}")
            .unwrap()
            .info_color(Color::Blue);
        assert_eq!(format(&layout, Level::Info, true), "\x1b[34mHello!\x1b[0m");
        assert_eq!(format(&layout, Level::Warn, true), "\x1b[33mHello!\x1b[0m");
    }

    #[test]
    fn test_bare_time_uses_record_timestamp_format() {
        let layout = TemplateLayout::new("{{ time }} {{ message }}").unwrap();
        let time = jan1();

        let record = Record::builder(Level::Info, &time, format_args!("Hello!")).build();
        let bytes = layout.format(&record).unwrap();
        insta::assert_snapshot!(String::from_utf8(bytes).unwrap(), @"2025/01/01 00:00:00.000 Hello!");

        let record = Record::builder(Level::Info, &time, format_args!("Hello!"))
            .timestamp_format("%H:%M")
            .build();
        let bytes = layout.format(&record).unwrap();
        insta::assert_snapshot!(String::from_utf8(bytes).unwrap(), @"00:00 Hello!");
    }

    #[test]
    fn test_source() {
        let layout = TemplateLayout::new("{{ message }}").unwrap();
        assert_eq!(layout.source(), "{{ message }}");
        assert_eq!(TemplateLayout::default().source(), DEFAULT_FORMAT);
    }
}

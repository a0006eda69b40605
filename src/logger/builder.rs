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

use super::Config;
use super::install;
use super::logger::validate_timestamp_format;
use crate::Append;
use crate::Error;
use crate::Layout;
use crate::Level;
use crate::layout::TemplateLayout;

/// Create a new empty [`Builder`] to configure the global logger in one go.
///
/// Settings that are not configured keep their current value.
///
/// ```rust
/// use clilog::Level;
///
/// clilog::builder()
///     .level(Level::Debug)
///     .format("{{ level | abbrev }} {{ message }}")
///     .disable_color(true)
///     .apply();
/// ```
pub fn builder() -> Builder {
    Builder::default()
}

/// A builder for configuring the global logger. See also [`builder`] for a fluent API.
///
/// Nothing is validated until [`try_apply`](Builder::try_apply), which either installs every
/// setting or none of them.
///
/// ## Examples
///
/// Combine explicit settings with the environment:
///
/// ```rust
/// use clilog::Config;
/// use clilog::Level;
///
/// let config = Config::from_env().unwrap_or_default();
/// clilog::Builder::new()
///     .level(Level::Warn)
///     .config(config)
///     .try_apply()
///     .unwrap();
/// ```
#[must_use = "call `apply` or `try_apply` to configure the global logger"]
#[derive(Debug, Default)]
pub struct Builder {
    level: Option<Level>,
    layout: Option<PendingLayout>,
    timestamp_format: Option<String>,
    disable_color: Option<bool>,
    append: Option<Box<dyn Append>>,
}

enum PendingLayout {
    Template(String),
    Layout(Box<dyn Layout>),
}

impl fmt::Debug for PendingLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingLayout::Template(template) => f.debug_tuple("Template").field(template).finish(),
            PendingLayout::Layout(layout) => f.debug_tuple("Layout").field(layout).finish(),
        }
    }
}

/// Validated settings, ready to be installed.
pub(super) struct Settings {
    pub(super) level: Option<Level>,
    pub(super) layout: Option<Box<dyn Layout>>,
    pub(super) timestamp_format: Option<String>,
    pub(super) disable_color: Option<bool>,
    pub(super) append: Option<Box<dyn Append>>,
}

impl Builder {
    /// Create a new empty [`Builder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum level of records to emit.
    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Render each line with a [`TemplateLayout`] built from `template`.
    ///
    /// Overrides any previous [`format`](Builder::format) or [`layout`](Builder::layout).
    pub fn format(mut self, template: impl Into<String>) -> Self {
        self.layout = Some(PendingLayout::Template(template.into()));
        self
    }

    /// Render each line with `layout`.
    ///
    /// Overrides any previous [`format`](Builder::format) or [`layout`](Builder::layout).
    pub fn layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = Some(PendingLayout::Layout(layout.into()));
        self
    }

    /// Set the strftime format used when a template renders `{{ time }}` without `timef`.
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = Some(format.into());
        self
    }

    /// Disable or re-enable ANSI colors.
    pub fn disable_color(mut self, disable: bool) -> Self {
        self.disable_color = Some(disable);
        self
    }

    /// Set the output of the logger.
    pub fn output(mut self, append: impl Into<Box<dyn Append>>) -> Self {
        self.append = Some(append.into());
        self
    }

    /// Overlay the settings present in `config` on this builder.
    pub fn config(mut self, config: Config) -> Self {
        if let Some(level) = config.level {
            self.level = Some(level);
        }
        if let Some(template) = config.format {
            self.layout = Some(PendingLayout::Template(template));
        }
        if let Some(format) = config.timestamp_format {
            self.timestamp_format = Some(format);
        }
        if let Some(disable) = config.disable_color {
            self.disable_color = Some(disable);
        }
        self
    }

    fn build(self) -> Result<Settings, Error> {
        let layout = match self.layout {
            None => None,
            Some(PendingLayout::Layout(layout)) => Some(layout),
            Some(PendingLayout::Template(template)) => {
                Some(Box::new(TemplateLayout::new(template)?) as Box<dyn Layout>)
            }
        };

        if let Some(format) = &self.timestamp_format {
            validate_timestamp_format(format)?;
        }

        Ok(Settings {
            level: self.level,
            layout,
            timestamp_format: self.timestamp_format,
            disable_color: self.disable_color,
            append: self.append,
        })
    }

    /// Validate and install all the configured settings on the global logger.
    ///
    /// # Errors
    ///
    /// Return an error if the template or the timestamp format is invalid. In this case, the
    /// global logger is left unchanged.
    pub fn try_apply(self) -> Result<(), Error> {
        let settings = self.build()?;
        install(settings);
        Ok(())
    }

    /// Validate and install all the configured settings on the global logger.
    ///
    /// # Panics
    ///
    /// Panic if the template or the timestamp format is invalid.
    pub fn apply(self) {
        if let Err(err) = self.try_apply() {
            panic!("failed to configure the global logger: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::append::Buffer;

    #[test]
    fn test_build_validates_template() {
        let err = builder().format("{{ nope }}").build().err().unwrap();
        assert_eq!(err.message(), "invalid log template");
    }

    #[test]
    fn test_build_validates_timestamp_format() {
        let err = builder().timestamp_format("%").build().err().unwrap();
        assert_eq!(err.message(), "invalid timestamp format");
    }

    #[test]
    fn test_last_layout_wins() {
        let settings = builder()
            .format("{{ nope }}")
            .layout(TemplateLayout::default())
            .build()
            .unwrap();
        assert!(settings.layout.is_some());

        let err = builder()
            .layout(TemplateLayout::default())
            .format("{{ nope }}")
            .build()
            .err()
            .unwrap();
        assert_eq!(err.message(), "invalid log template");
    }

    #[test]
    fn test_config_overlay() {
        let config = Config {
            level: Some(Level::Error),
            format: Some("{{ message }}".to_string()),
            timestamp_format: None,
            disable_color: Some(true),
        };

        let settings = builder()
            .level(Level::Debug)
            .timestamp_format("%H")
            .output(Buffer::default())
            .config(config)
            .build()
            .unwrap();

        assert_eq!(settings.level, Some(Level::Error));
        assert_eq!(settings.timestamp_format.as_deref(), Some("%H"));
        assert_eq!(settings.disable_color, Some(true));
        assert!(settings.layout.is_some());
        assert!(settings.append.is_some());
    }
}

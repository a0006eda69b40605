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

use crate::Error;
use crate::Level;

const LEVEL_ENV: &str = "CLILOG_LEVEL";
const FORMAT_ENV: &str = "CLILOG_FORMAT";
const TIMESTAMP_FORMAT_ENV: &str = "CLILOG_TIMESTAMP_FORMAT";
// see https://no-color.org
const NO_COLOR_ENV: &str = "NO_COLOR";

/// Logger settings read from the environment.
///
/// Only the variables that are set end up as `Some`. Apply a `Config` with
/// [`Builder::config`](crate::Builder::config).
///
/// # Examples
///
/// ```
/// let config = clilog::Config::from_env().unwrap();
/// clilog::builder().config(config).apply();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// The minimum level, from `CLILOG_LEVEL`.
    pub level: Option<Level>,
    /// The line template, from `CLILOG_FORMAT`.
    pub format: Option<String>,
    /// The timestamp format, from `CLILOG_TIMESTAMP_FORMAT`.
    pub timestamp_format: Option<String>,
    /// Whether to disable colors, from `NO_COLOR`.
    pub disable_color: Option<bool>,
}

impl Config {
    /// Read the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Return an error if `CLILOG_LEVEL` is set to an unknown level.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Blank values are treated as unset, except for `NO_COLOR`, which disables color for any
    /// non-empty value.
    ///
    /// # Errors
    ///
    /// Return an error if the level variable holds an unknown level.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let level = match var(LEVEL_ENV) {
            None => None,
            Some(level) => Some(
                level
                    .parse::<Level>()
                    .map_err(|err| err.with_context("variable", LEVEL_ENV))?,
            ),
        };

        Ok(Config {
            level,
            format: var(FORMAT_ENV),
            timestamp_format: var(TIMESTAMP_FORMAT_ENV),
            disable_color: lookup(NO_COLOR_ENV)
                .filter(|value| !value.is_empty())
                .map(|_| true),
        })
    }
}

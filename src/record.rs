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

//! The log record and its builder.

use std::fmt;

use jiff::Zoned;

use crate::Level;

/// The timestamp format used when a template renders `{{ time }}` without `timef`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S.%3f";

/// The payload of a log call, passed to a [`Layout`](crate::Layout) for rendering.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    level: Level,
    time: &'a Zoned,
    args: fmt::Arguments<'a>,
    timestamp_format: &'a str,
    color: bool,
}

impl<'a> Record<'a> {
    /// Create a record builder for a log call at `level` happening at `time`.
    pub fn builder(level: Level, time: &'a Zoned, args: fmt::Arguments<'a>) -> RecordBuilder<'a> {
        RecordBuilder {
            record: Record {
                level,
                time,
                args,
                timestamp_format: DEFAULT_TIMESTAMP_FORMAT,
                color: true,
            },
        }
    }

    /// The severity of the log call.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The moment the log call happened.
    pub fn time(&self) -> &'a Zoned {
        self.time
    }

    /// The message body.
    pub fn args(&self) -> &fmt::Arguments<'a> {
        &self.args
    }

    /// The strftime format used to render the time when no explicit format is given.
    pub fn timestamp_format(&self) -> &'a str {
        self.timestamp_format
    }

    /// Whether the output may contain ANSI color sequences.
    pub fn color(&self) -> bool {
        self.color
    }
}

/// Builder for [`Record`].
#[derive(Debug)]
pub struct RecordBuilder<'a> {
    record: Record<'a>,
}

impl<'a> RecordBuilder<'a> {
    /// Set [`timestamp_format`](Record::timestamp_format).
    pub fn timestamp_format(mut self, format: &'a str) -> Self {
        self.record.timestamp_format = format;
        self
    }

    /// Set [`color`](Record::color).
    pub fn color(mut self, color: bool) -> Self {
        self.record.color = color;
        self
    }

    /// Invoke the builder and return a `Record`.
    pub fn build(self) -> Record<'a> {
        self.record
    }
}

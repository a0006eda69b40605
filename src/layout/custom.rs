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

use std::fmt::Debug;
use std::fmt::Formatter;

use crate::Error;
use crate::layout::Layout;
use crate::record::Record;

type FormatFunction = dyn Fn(&Record) -> Result<Vec<u8>, Error> + Send + Sync + 'static;

/// A layout that you can pass the custom layout function.
///
/// The custom layout function accepts [`&Record`][Record] and formats it into bytes. For example:
///
/// ```rust
/// use clilog::layout::CustomLayout;
/// use clilog::record::Record;
///
/// let layout = CustomLayout::new(|record: &Record| {
///     Ok(format!("[{}] {}", record.level().as_str(), record.args()).into_bytes())
/// });
/// ```
pub struct CustomLayout {
    f: Box<FormatFunction>,
}

impl Debug for CustomLayout {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "CustomLayout {{ ... }}")
    }
}

impl CustomLayout {
    /// Create a layout from a rendering function.
    pub fn new(
        layout: impl Fn(&Record) -> Result<Vec<u8>, Error> + Send + Sync + 'static,
    ) -> Self {
        CustomLayout {
            f: Box::new(layout),
        }
    }
}

impl Layout for CustomLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        (self.f)(record)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Zoned;

    use super::*;
    use crate::Level;

    #[test]
    fn test_custom_layout() {
        let layout = CustomLayout::new(|record: &Record| {
            Ok(format!("{} - {}", record.level().code(), record.args()).into_bytes())
        });

        let now = Zoned::now();
        let record = Record::builder(Level::Warn, &now, format_args!("disk almost full")).build();
        let bytes = layout.format(&record).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "W - disk almost full");
    }
}

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
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Error;
use crate::append::Append;

/// An appender that writes log lines to any [`Write`] implementation, e.g., a [`std::fs::File`].
///
/// # Examples
///
/// ```
/// use clilog::append::Writer;
///
/// let file = tempfile::tempfile().unwrap();
/// clilog::set_output(Writer::new(file));
/// ```
pub struct Writer<W: Write + Send + 'static> {
    writer: Mutex<W>,
}

impl<W: Write + Send + 'static> fmt::Debug for Writer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Writer<{}> {{ ... }}", std::any::type_name::<W>())
    }
}

impl<W: Write + Send + 'static> Writer<W> {
    /// Create a new `Writer` appender wrapping `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the appender and return the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn writer(&self) -> MutexGuard<'_, W> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send + 'static> Append for Writer<W> {
    fn append(&self, line: &[u8]) -> Result<(), Error> {
        let mut writer = self.writer();
        writer.write_all(line).map_err(Error::from_io_error)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        let mut writer = self.writer();
        writer.flush().map_err(Error::from_io_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::io::Seek;
    use std::io::SeekFrom;

    use super::*;

    #[test]
    fn test_write_to_file() {
        let file = tempfile::tempfile().unwrap();
        let writer = Writer::new(file);
        writer.append(b"I first\n").unwrap();
        writer.append(b"W second\n").unwrap();
        writer.flush().unwrap();

        let mut file = writer.into_inner();
        file.seek(SeekFrom::Start(0)).unwrap();
        let mut contents = String::new();
        file.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "I first\nW second\n");
    }

    #[test]
    fn test_write_to_vec() {
        let writer = Writer::new(Vec::new());
        writer.append(b"hello\n").unwrap();
        assert_eq!(writer.into_inner(), b"hello\n");
    }
}

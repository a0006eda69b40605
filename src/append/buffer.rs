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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Error;
use crate::append::Append;

/// An appender that keeps log lines in memory.
///
/// Clones share the same buffer, so one clone can be handed to the logger while another one is
/// used to inspect what has been logged.
///
/// # Examples
///
/// ```
/// use clilog::append::Buffer;
///
/// let buffer = Buffer::default();
/// clilog::set_output(buffer.clone());
/// clilog::set_disable_color(true);
/// clilog::info!("captured");
/// assert!(buffer.contents().ends_with("captured\n"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct Buffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl Buffer {
    /// Return everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }

    /// Return the lines written so far, without their trailing newlines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Discard everything written so far.
    pub fn clear(&self) {
        self.bytes().clear();
    }

    fn bytes(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Append for Buffer {
    fn append(&self, line: &[u8]) -> Result<(), Error> {
        self.bytes().extend_from_slice(line);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_contents() {
        let buffer = Buffer::default();
        let sink = buffer.clone();
        sink.append(b"one\n").unwrap();
        sink.append(b"two\n").unwrap();

        assert_eq!(buffer.contents(), "one\ntwo\n");
        assert_eq!(buffer.lines(), ["one", "two"]);

        buffer.clear();
        assert!(sink.contents().is_empty());
    }
}

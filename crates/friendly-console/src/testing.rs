//! Capture console for tests.
//!
//! Wraps a [`FriendlyConsole`] around a shared buffer so tests can assert
//! on output instead of watching stderr. ANSI codes are stripped when
//! reading, with the raw form still available.

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::config::ConsoleConfig;
use crate::console::FriendlyConsole;

/// A console that captures output for assertions.
pub struct TestConsole {
    inner: Arc<FriendlyConsole>,
    buffer: Arc<Mutex<Vec<u8>>>,
    report_as_rich: bool,
}

impl TestConsole {
    /// Capture console in plain mode.
    #[must_use]
    pub fn new() -> Self {
        Self::new_inner(false)
    }

    /// Capture console in rich (ANSI-emitting) mode.
    #[must_use]
    pub fn new_rich() -> Self {
        Self::new_inner(true)
    }

    fn new_inner(rich: bool) -> Self {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = BufferWriter(buffer.clone());
        let ctx = ConsoleConfig::new().render_context();
        Self {
            inner: Arc::new(FriendlyConsole::with_writer(writer, ctx, rich)),
            buffer,
            report_as_rich: rich,
        }
    }

    /// The underlying console, for passing to code under test.
    #[must_use]
    pub fn console(&self) -> &FriendlyConsole {
        &self.inner
    }

    #[must_use]
    pub fn is_rich(&self) -> bool {
        self.report_as_rich
    }

    /// Captured lines with ANSI codes stripped.
    #[must_use]
    pub fn output(&self) -> Vec<String> {
        let raw = self.raw_bytes();
        let stripped = strip_ansi_escapes::strip(&raw);
        String::from_utf8_lossy(&stripped)
            .lines()
            .map(String::from)
            .collect()
    }

    /// Captured lines with ANSI codes preserved.
    #[must_use]
    pub fn raw_output(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.raw_bytes())
            .lines()
            .map(String::from)
            .collect()
    }

    /// All captured output as one string (ANSI stripped).
    #[must_use]
    pub fn output_string(&self) -> String {
        self.output().join("\n")
    }

    /// Check if output contains a string (case-insensitive).
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.output_string()
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    /// Check if output matches a regex pattern.
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        match regex::Regex::new(pattern) {
            Ok(re) => re.is_match(&self.output_string()),
            Err(_) => false,
        }
    }

    /// Assert that output contains a string.
    ///
    /// # Panics
    ///
    /// Panics if the output does not contain the needle string.
    pub fn assert_contains(&self, needle: &str) {
        assert!(
            self.contains(needle),
            "Output did not contain '{}'. Actual output:\n{}",
            needle,
            self.output_string()
        );
    }

    /// Assert that output does NOT contain a string.
    ///
    /// # Panics
    ///
    /// Panics if the output contains the needle string.
    pub fn assert_not_contains(&self, needle: &str) {
        assert!(
            !self.contains(needle),
            "Output unexpectedly contained '{}'. Actual output:\n{}",
            needle,
            self.output_string()
        );
    }

    /// Clear the buffer.
    pub fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }
    }

    fn raw_bytes(&self) -> Vec<u8> {
        self.buffer.lock().map(|b| b.clone()).unwrap_or_default()
    }
}

impl Default for TestConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TestConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestConsole")
            .field("is_rich", &self.is_rich())
            .field("line_count", &self.output().len())
            .finish()
    }
}

/// Writer that captures to a shared buffer.
struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut buffer) = self.0.lock() {
            buffer.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_capture() {
        let tc = TestConsole::new();
        tc.console().print_plain("Hello, world!");
        assert!(tc.contains("Hello"));
        assert!(tc.contains("world"));
    }

    #[test]
    fn test_contains_case_insensitive() {
        let tc = TestConsole::new();
        tc.console().print_plain("Hello World");
        assert!(tc.contains("hello"));
        assert!(tc.contains("WORLD"));
    }

    #[test]
    fn test_matches_regex() {
        let tc = TestConsole::new();
        tc.console().print_plain("Error code: 42");
        assert!(tc.matches(r"code: \d+"));
        assert!(!tc.matches(r"code: [a-z]+"));
    }

    #[test]
    fn test_assert_not_contains() {
        let tc = TestConsole::new();
        tc.console().print_plain("Success");
        tc.assert_not_contains("Error");
    }

    #[test]
    fn test_clear() {
        let tc = TestConsole::new();
        tc.console().print_plain("Some output");
        assert!(!tc.output().is_empty());
        tc.clear();
        assert!(tc.output().is_empty());
    }

    #[test]
    fn test_rich_output_strips_to_source_text() {
        let tc = TestConsole::new_rich();
        tc.console().print_excerpt("result = 1 / 0\n         ^^^^^");
        assert_eq!(tc.output(), vec!["result = 1 / 0".to_string()]);
        // The raw stream really was styled.
        assert!(tc.raw_output()[0].contains('\u{1b}'));
    }

    #[test]
    fn test_plain_output_has_no_escapes() {
        let tc = TestConsole::new();
        tc.console().print_excerpt("x = 1");
        assert!(!tc.raw_output()[0].contains('\u{1b}'));
    }
}

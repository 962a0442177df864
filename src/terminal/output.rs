//! `OutputBuffer`: Accumulates ANSI sequences for a single write.

use crate::raster::Rgba;
use std::io::Write;

/// Pre-allocated byte buffer for escape sequences.
///
/// Colors are tracked so repeated runs of the same color emit no
/// redundant SGR sequences. Writes into the `Vec` cannot fail.
pub struct OutputBuffer {
    data: Vec<u8>,
    fg: Option<Rgba>,
    bg: Option<Rgba>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            fg: None,
            bg: None,
        }
    }

    /// Create a buffer sized for a typical frame (64KB).
    pub fn new() -> Self {
        Self::with_capacity(65536)
    }

    /// Clear the buffer for reuse and forget the tracked colors.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
        self.fg = None;
        self.bg = None;
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Move cursor to (x, y), zero-based.
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        let _ = write!(self.data, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1);
    }

    /// Set foreground color (true color).
    #[inline]
    pub fn set_fg(&mut self, color: Rgba) {
        if self.fg != Some(color) {
            let _ = write!(self.data, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
            self.fg = Some(color);
        }
    }

    /// Set background color (true color).
    #[inline]
    pub fn set_bg(&mut self, color: Rgba) {
        if self.bg != Some(color) {
            let _ = write!(self.data, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b);
            self.bg = Some(color);
        }
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
        self.fg = None;
        self.bg = None;
    }

    /// Flush to a writer in a single call.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OutputBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputBuffer")
            .field("len", &self.data.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_move_is_one_based() {
        let mut out = OutputBuffer::with_capacity(16);
        out.cursor_move(0, 0);
        out.cursor_move(9, 4);
        assert_eq!(out.as_bytes(), b"\x1b[1;1H\x1b[5;10H");
    }

    #[test]
    fn test_colors_deduplicated() {
        let mut out = OutputBuffer::with_capacity(64);
        out.set_fg(Rgba::rgb(1, 2, 3));
        out.set_fg(Rgba::rgb(1, 2, 3));
        out.set_bg(Rgba::BLACK);
        assert_eq!(out.as_bytes(), b"\x1b[38;2;1;2;3m\x1b[48;2;0;0;0m");

        out.reset_attrs();
        out.set_bg(Rgba::BLACK);
        assert!(out.as_bytes().ends_with(b"\x1b[0m\x1b[48;2;0;0;0m"));
    }

    #[test]
    fn test_flush_to() {
        let mut out = OutputBuffer::new();
        out.write_str("hi");
        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"hi");
        out.clear();
        assert!(out.is_empty());
    }
}

//! Presenter: Shows a `PixelBuffer` on a truecolor terminal.
//!
//! Each terminal cell carries two vertically stacked pixels using the
//! upper half block glyph: the foreground paints the top pixel, the
//! background the bottom one. Only the requested region is encoded, so
//! presenting a frame's cleared region costs output proportional to it.

use super::output::OutputBuffer;
use crate::geometry::PixelRect;
use crate::raster::{PixelBuffer, Rgba};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};
use std::time::Duration;

/// Upper half block.
const HALF_BLOCK: &str = "\u{2580}";

/// Terminal presentation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Whether to use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Color transparent pixels are composited over.
    pub background: Rgba,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            background: Rgba::BLACK,
        }
    }
}

/// Writes pixel regions to a terminal as half-block cells.
pub struct Presenter<W: Write = Stdout> {
    /// Destination.
    writer: W,
    /// Reused output buffer.
    output: OutputBuffer,
    /// Settings.
    config: TerminalConfig,
    /// Whether terminal modes must be restored on drop.
    owns_terminal: bool,
}

impl Presenter<Stdout> {
    /// Take over stdout: raw mode, hidden cursor, optional alternate screen.
    ///
    /// The terminal is restored when the presenter is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn new(config: TerminalConfig) -> io::Result<Self> {
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        if config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        execute!(stdout, cursor::Hide, terminal::Clear(terminal::ClearType::All))?;

        Ok(Self {
            writer: stdout,
            output: OutputBuffer::new(),
            config,
            owns_terminal: true,
        })
    }

    /// Surface size that fills the terminal, in pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal size cannot be queried.
    pub fn surface_size() -> io::Result<(u32, u32)> {
        let (cols, rows) = terminal::size()?;
        Ok((u32::from(cols), u32::from(rows) * 2))
    }
}

impl<W: Write> Presenter<W> {
    /// Present into an arbitrary writer without touching terminal modes.
    pub fn with_writer(writer: W, config: TerminalConfig) -> Self {
        Self {
            writer,
            output: OutputBuffer::new(),
            config,
            owns_terminal: false,
        }
    }

    /// The settings.
    #[inline]
    pub const fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// The destination writer.
    #[inline]
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Write `region` of `surface`, returning the number of bytes written.
    ///
    /// The region is widened to whole cell rows and clipped to the surface.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn present(&mut self, surface: &PixelBuffer, region: PixelRect) -> io::Result<usize> {
        self.encode(surface, region);
        if self.output.is_empty() {
            return Ok(0);
        }
        self.output.flush_to(&mut self.writer)?;
        Ok(self.output.len())
    }

    /// Write the whole surface.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn present_all(&mut self, surface: &PixelBuffer) -> io::Result<usize> {
        self.present(surface, surface.bounds())
    }

    fn encode(&mut self, surface: &PixelBuffer, region: PixelRect) {
        self.output.clear();
        let Some(clipped) = region.clip_to(surface.width(), surface.height()) else {
            return;
        };

        let background = self.config.background;
        let sample = |x: i64, y: i64| {
            surface
                .get(x, y)
                .map_or(background, |pixel| pixel.over(background))
        };

        let x0 = i64::from(clipped.x);
        let first_row = i64::from(clipped.y) / 2;
        let last_row = (clipped.bottom() + 1) / 2;

        for row in first_row..last_row {
            self.output
                .cursor_move(cell_coord(x0), cell_coord(row));
            for x in x0..clipped.right() {
                self.output.set_fg(sample(x, row * 2));
                self.output.set_bg(sample(x, row * 2 + 1));
                self.output.write_str(HALF_BLOCK);
            }
        }
        self.output.reset_attrs();
    }
}

impl<W: Write> Drop for Presenter<W> {
    fn drop(&mut self) {
        if !self.owns_terminal {
            return;
        }
        let _ = self.writer.write_all(b"\x1b[0m");
        if self.config.alternate_screen {
            let _ = execute!(self.writer, LeaveAlternateScreen);
        }
        let _ = execute!(self.writer, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

impl<W: Write> std::fmt::Debug for Presenter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Presenter")
            .field("config", &self.config)
            .field("owns_terminal", &self.owns_terminal)
            .finish_non_exhaustive()
    }
}

/// Wait up to `timeout` for a quit key (`q`, `Esc` or `Ctrl+C`).
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn quit_requested(timeout: Duration) -> io::Result<bool> {
    if !event::poll(timeout)? {
        return Ok(false);
    }
    let Event::Key(key) = event::read()? else {
        return Ok(false);
    };
    if key.kind != KeyEventKind::Press {
        return Ok(false);
    }
    Ok(match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    })
}

fn cell_coord(value: i64) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

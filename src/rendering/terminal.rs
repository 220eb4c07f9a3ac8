//! Terminal backends.
//!
//! The engine core depends on a small set of terminal capabilities — size
//! query, clearing, cursor visibility, non-blocking key polling, and writing
//! a whole frame — expressed as the [`Terminal`] trait rather than on any
//! particular terminal library. [`CrosstermTerminal`] is the real backend;
//! [`StubTerminal`] is a scripted backend that lets tests drive a display
//! for any number of ticks without a real terminal.

use std::collections::VecDeque;
use std::io;
use std::io::{Stdout, Write, stdout};
use std::time::Duration;

use crossterm::event::{Event, KeyEvent, KeyEventKind};
use crossterm::{cursor, queue};

use crate::rendering::frame::Frame;

/// The terminal capabilities the display needs.
pub trait Terminal {
    /// Current terminal dimensions as `(width, height)` in characters.
    fn size(&mut self) -> io::Result<(usize, usize)>;

    /// Returns the next buffered key press without blocking, or `None` if no
    /// key is waiting. Must never wait for input.
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>>;

    /// Clears the whole screen.
    fn clear(&mut self) -> io::Result<()>;

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;

    /// Moves the cursor to the origin and writes the entire frame in one
    /// flush.
    fn draw_frame(&mut self, frame: &Frame) -> io::Result<()>;
}

/// Terminal backend driven by `crossterm`, writing to an arbitrary sink.
pub struct CrosstermTerminal<W: Write> {
    sink: W,
}

impl CrosstermTerminal<CustomBufWriter> {
    /// Creates a backend with a sink that only flushes once per frame.
    /// This is the recommended sink.
    pub fn new_with_custom_buf_writer() -> Self {
        Self::new_with_sink(CustomBufWriter::new())
    }
}

impl CrosstermTerminal<Stdout> {
    pub fn new_with_stdout() -> Self {
        Self::new_with_sink(stdout())
    }
}

impl<W: Write> CrosstermTerminal<W> {
    /// Creates a backend with the given sink.
    pub fn new_with_sink(sink: W) -> Self {
        Self { sink }
    }
}

impl<W: Write> Terminal for CrosstermTerminal<W> {
    fn size(&mut self) -> io::Result<(usize, usize)> {
        let (width, height) = crossterm::terminal::size()?;
        Ok((width as usize, height as usize))
    }

    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
        // zero timeout: returns immediately when nothing is buffered
        while crossterm::event::poll(Duration::ZERO)? {
            match crossterm::event::read()? {
                // only Press to behave the same on terminals that also
                // deliver Repeat/Release
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(Some(key));
                }
                // resizes are detected by polling `size`, everything else
                // is not our concern
                _ => continue,
            }
        }
        Ok(None)
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(
            self.sink,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All)
        )?;
        self.sink.flush()
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            queue!(self.sink, cursor::Show)?;
        } else {
            queue!(self.sink, cursor::Hide)?;
        }
        self.sink.flush()
    }

    fn draw_frame(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(self.sink, cursor::MoveTo(0, 0))?;
        let height = frame.height();
        for (y, row) in frame.rows().iter().enumerate() {
            queue!(self.sink, crossterm::style::Print(row))?;
            if y + 1 < height {
                queue!(self.sink, cursor::MoveToNextLine(1))?;
            }
        }
        self.sink.flush()
    }
}

/// Custom buffer writer that _only_ flushes explicitly.
///
/// Collects all queued terminal commands for a frame and hands them to the
/// terminal in a single write.
pub struct CustomBufWriter {
    buf: Vec<u8>,
    stdout: Stdout,
}

impl CustomBufWriter {
    fn new() -> Self {
        Self {
            buf: vec![],
            stdout: stdout(),
        }
    }
}

impl Write for CustomBufWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut lock = self.stdout.lock();
        lock.write_all(&self.buf)?;
        lock.flush()?;
        self.buf.clear();
        Ok(())
    }
}

/// A scripted terminal for tests.
///
/// Key presses and resizes are queued up front; every frame the display
/// draws is recorded, so tests can count writes and inspect what would have
/// reached the screen.
pub struct StubTerminal {
    size: (usize, usize),
    scripted_sizes: VecDeque<(usize, usize)>,
    keys: VecDeque<KeyEvent>,
    frames: Vec<Frame>,
    clear_count: usize,
}

impl StubTerminal {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            size: (width, height),
            scripted_sizes: VecDeque::new(),
            keys: VecDeque::new(),
            frames: Vec::new(),
            clear_count: 0,
        }
    }

    /// Queues a key press for a future `poll_key`.
    pub fn queue_key(&mut self, key: KeyEvent) {
        self.keys.push_back(key);
    }

    /// Schedules a resize: the next `size` query reports the new dimensions.
    pub fn queue_resize(&mut self, width: usize, height: usize) {
        self.scripted_sizes.push_back((width, height));
    }

    /// Number of frames actually written.
    pub fn draw_count(&self) -> usize {
        self.frames.len()
    }

    /// Every frame written, oldest first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn clear_count(&self) -> usize {
        self.clear_count
    }
}

impl Terminal for StubTerminal {
    fn size(&mut self) -> io::Result<(usize, usize)> {
        if let Some(size) = self.scripted_sizes.pop_front() {
            self.size = size;
        }
        Ok(self.size)
    }

    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
        Ok(self.keys.pop_front())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.clear_count += 1;
        Ok(())
    }

    fn set_cursor_visible(&mut self, _visible: bool) -> io::Result<()> {
        Ok(())
    }

    fn draw_frame(&mut self, frame: &Frame) -> io::Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

//! The rendering side of the animation.  The core hands a renderer
//! one array of palette indices per frame and asks it to redraw; how
//! the pixels reach a screen is entirely up to the renderer.

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use image::{Rgb, RgbImage};
use std::io::Write;
use std::time::Duration;

use cycle::IndexArray;
use errors::FieldError;
use palette::{colorize, Palette};

/// What the animation should do after a redraw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Control {
    /// Keep going.
    Continue,
    /// The renderer has had enough (window closed, frame limit hit).
    Stop,
}

/// The contract between the animation driver and whatever puts the
/// frames on screen: replace the array, then redraw.
pub trait Renderer {
    /// Replaces the array being displayed.
    fn set_array(&mut self, frame: &IndexArray) -> Result<(), FieldError>;

    /// Shows the most recently set array.
    fn redraw(&mut self) -> Result<Control, FieldError>;

    /// Called once when the animation ends, however it ends.
    fn finish(&mut self) -> Result<(), FieldError> {
        Ok(())
    }
}

/// Keeps the latest frame as an image in memory.  Useful for tests
/// and for anything that wants the pixels rather than a display.
#[derive(Debug)]
pub struct FrameBuffer {
    palette: Palette,
    image: Option<RgbImage>,
    drawn: u64,
    limit: Option<u64>,
    finished: bool,
}

impl FrameBuffer {
    /// A buffer that accepts frames forever.
    pub fn new(palette: Palette) -> Self {
        FrameBuffer {
            palette,
            image: None,
            drawn: 0,
            limit: None,
            finished: false,
        }
    }

    /// A buffer that asks the animation to stop once it has redrawn
    /// `limit` frames.
    pub fn with_limit(palette: Palette, limit: u64) -> Self {
        FrameBuffer {
            limit: Some(limit),
            ..FrameBuffer::new(palette)
        }
    }

    /// The most recently set frame, coloured.
    pub fn image(&self) -> Option<&RgbImage> {
        self.image.as_ref()
    }

    /// Number of redraws so far.
    pub fn drawn(&self) -> u64 {
        self.drawn
    }

    /// Whether `finish` has been called.
    pub fn finished(&self) -> bool {
        self.finished
    }
}

impl Renderer for FrameBuffer {
    fn set_array(&mut self, frame: &IndexArray) -> Result<(), FieldError> {
        self.image = Some(colorize(frame, &self.palette));
        Ok(())
    }

    fn redraw(&mut self) -> Result<Control, FieldError> {
        if self.image.is_none() {
            return Err(FieldError::Render("redraw before any frame was set".to_string()));
        }
        self.drawn += 1;
        match self.limit {
            Some(limit) if self.drawn >= limit => Ok(Control::Stop),
            _ => Ok(Control::Continue),
        }
    }

    fn finish(&mut self) -> Result<(), FieldError> {
        self.finished = true;
        Ok(())
    }
}

// Upper half block: foreground paints the top pixel, background the
// bottom one, so one character cell shows two rows.
const HALF_BLOCK: char = '\u{2580}';

fn term_color(rgb: Rgb<u8>) -> Color {
    let [r, g, b] = rgb.0;
    Color::Rgb { r, g, b }
}

/// The keys that end an animation: q, Esc and Ctrl-C.
pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// Drains pending input without blocking.
fn quit_requested() -> Result<bool, FieldError> {
    while event::poll(Duration::from_millis(0))? {
        if let Event::Key(key) = event::read()? {
            if is_quit_key(&key) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Paints frames into a truecolor terminal, two field rows per line of
/// text, starting at the top left corner of a cleared screen.
///
/// An interactive renderer puts the terminal in raw mode and watches
/// the keyboard between frames; a quit key stops the animation, and
/// `finish` hands the terminal back the way it was found.
pub struct TerminalRenderer<W: Write> {
    out: W,
    palette: Palette,
    image: Option<RgbImage>,
    started: bool,
    lines: u16,
    keyboard: bool,
    raw: Option<RawMode>,
}

/// Holds the terminal in raw mode until dropped.
struct RawMode;

impl RawMode {
    fn enable() -> Result<RawMode, FieldError> {
        terminal::enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Writes to `out`, colouring with `palette`.  Ignores the
    /// keyboard, so it can write to pipes and buffers.
    pub fn new(out: W, palette: Palette) -> Self {
        TerminalRenderer::with_keyboard(out, palette, false)
    }

    /// Writes to `out`, which must be the controlling terminal, and
    /// stops on q, Esc or Ctrl-C.
    pub fn interactive(out: W, palette: Palette) -> Self {
        TerminalRenderer::with_keyboard(out, palette, true)
    }

    fn with_keyboard(out: W, palette: Palette, keyboard: bool) -> Self {
        TerminalRenderer {
            out,
            palette,
            image: None,
            started: false,
            lines: 0,
            keyboard,
            raw: None,
        }
    }

    /// Gives back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&mut self, image: &RgbImage) -> Result<(), FieldError> {
        let (width, height) = image.dimensions();
        for line in 0..(height + 1) / 2 {
            queue!(self.out, MoveTo(0, line as u16))?;
            let top = line * 2;
            for x in 0..width {
                let fg = term_color(*image.get_pixel(x, top));
                let bg = if top + 1 < height {
                    term_color(*image.get_pixel(x, top + 1))
                } else {
                    Color::Reset
                };
                queue!(
                    self.out,
                    SetForegroundColor(fg),
                    SetBackgroundColor(bg),
                    Print(HALF_BLOCK)
                )?;
            }
            queue!(self.out, ResetColor)?;
        }
        self.lines = ((height + 1) / 2) as u16;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn set_array(&mut self, frame: &IndexArray) -> Result<(), FieldError> {
        self.image = Some(colorize(frame, &self.palette));
        Ok(())
    }

    fn redraw(&mut self) -> Result<Control, FieldError> {
        if !self.started {
            if self.keyboard {
                self.raw = Some(RawMode::enable()?);
            }
            queue!(self.out, Hide, Clear(ClearType::All))?;
            self.started = true;
        }
        if let Some(image) = self.image.take() {
            self.paint(&image)?;
            self.image = Some(image);
        }
        self.out.flush()?;
        if self.keyboard && quit_requested()? {
            debug!("quit key pressed");
            return Ok(Control::Stop);
        }
        Ok(Control::Continue)
    }

    fn finish(&mut self) -> Result<(), FieldError> {
        if self.started {
            // Leave the last frame on screen with the prompt below it.
            queue!(self.out, ResetColor, MoveTo(0, self.lines), Show)?;
            self.out.flush()?;
            self.raw = None;
            queue!(self.out, Print('\n'))?;
            self.started = false;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cycle::map_frame;
    use field::compute_field;
    use palette::PaletteName;
    use planes::SamplingRect;

    fn frame(w: usize, h: usize) -> IndexArray {
        let f = compute_field(&SamplingRect::standard(), w, h, 6).unwrap();
        map_frame(&f, 0, 6).unwrap()
    }

    fn gray() -> Palette {
        Palette::new(PaletteName::Grayscale, 6).unwrap()
    }

    #[test]
    fn frame_buffer_refuses_to_redraw_nothing() {
        let mut fb = FrameBuffer::new(gray());
        assert!(fb.redraw().is_err());
    }

    #[test]
    fn frame_buffer_keeps_the_latest_image() {
        let mut fb = FrameBuffer::new(gray());
        fb.set_array(&frame(5, 3)).unwrap();
        assert_eq!(fb.redraw().unwrap(), Control::Continue);
        assert_eq!(fb.image().unwrap().dimensions(), (5, 3));
        assert_eq!(fb.drawn(), 1);
    }

    #[test]
    fn frame_buffer_stops_at_its_limit() {
        let mut fb = FrameBuffer::with_limit(gray(), 2);
        fb.set_array(&frame(2, 2)).unwrap();
        assert_eq!(fb.redraw().unwrap(), Control::Continue);
        assert_eq!(fb.redraw().unwrap(), Control::Stop);
    }

    #[test]
    fn terminal_paints_two_rows_per_line() {
        let mut term = TerminalRenderer::new(Vec::new(), gray());
        term.set_array(&frame(4, 5)).unwrap();
        term.redraw().unwrap();
        term.finish().unwrap();
        let text = String::from_utf8(term.into_inner()).unwrap();
        assert_eq!(text.matches(HALF_BLOCK).count(), 4 * 3);
        assert!(text.contains("\x1b[38;2;"));
    }

    #[test]
    fn terminal_finish_restores_the_cursor() {
        let mut term = TerminalRenderer::new(Vec::new(), gray());
        term.set_array(&frame(3, 2)).unwrap();
        term.redraw().unwrap();
        term.finish().unwrap();
        let text = String::from_utf8(term.into_inner()).unwrap();
        assert!(text.contains("\x1b[?25l"));
        assert!(text.ends_with("\x1b[?25h\n"));
    }

    #[test]
    fn quit_keys_stop_the_animation() {
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn other_keys_do_not() {
        assert!(!is_quit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert!(!is_quit_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(!is_quit_key(&release));
    }

    #[test]
    fn terminal_redraw_without_a_frame_only_flushes() {
        let mut term = TerminalRenderer::new(Vec::new(), gray());
        assert_eq!(term.redraw().unwrap(), Control::Continue);
        let text = String::from_utf8(term.into_inner()).unwrap();
        assert_eq!(text.matches(HALF_BLOCK).count(), 0);
    }
}

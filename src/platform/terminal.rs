//! Terminal host
//!
//! Presents frames with half-block characters (one cell = two vertically
//! stacked pixels) and reads the keyboard in raw mode. Text runs are laid
//! out on the cell grid instead of being rasterized.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};

use super::input::{Control, KeyReporting, KeyTracker};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, WINDOW_TITLE};
use crate::driver::InputSource;
use crate::error::{HostError, InitError};
use crate::renderer::frame::{Anchor, DrawCommand, Frame, compose};
use crate::renderer::shapes::tessellate;
use crate::renderer::vertex::to_rgba8;
use crate::renderer::{Canvas, Fonts, Renderer};
use crate::sim::{MatchState, TickInput};

/// Upper half block: foreground paints the top pixel, background the bottom
const HALF_BLOCK: char = '▀';

/// Largest grid used, in cells
const MAX_COLS: u16 = 160;

/// Map a key to a movement control
pub fn control_for(code: KeyCode) -> Option<Control> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => Some(Control::P1Up),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Control::P1Down),
        KeyCode::Up => Some(Control::P2Up),
        KeyCode::Down => Some(Control::P2Down),
        _ => None,
    }
}

/// Esc, `q` or Ctrl-C end the session
pub fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Largest 4:3 cell grid that fits a `cols` x `rows` terminal
///
/// Half-block pixels are roughly square, so a grid of `c` columns needs
/// `c * 3 / 8` rows.
pub fn fit_grid(cols: u16, rows: u16) -> (u16, u16) {
    let cols = cols.min(MAX_COLS);
    let rows = rows.min(cols * 3 / 8);
    let cols = rows * 8 / 3;
    (cols.max(1), rows.max(1))
}

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: [u8; 4],
    pub bg: [u8; 4],
}

/// Character grid ready to be written out
#[derive(Debug, Clone, PartialEq)]
pub struct CellGrid {
    pub cols: u16,
    pub rows: u16,
    pub cells: Vec<Cell>,
}

impl CellGrid {
    /// Pair up canvas rows into half-block cells
    pub fn from_canvas(canvas: &Canvas) -> Self {
        let cols = canvas.width() as u16;
        let rows = (canvas.height() / 2) as u16;
        let mut cells = Vec::with_capacity(cols as usize * rows as usize);
        for row in 0..rows as u32 {
            for col in 0..cols as u32 {
                cells.push(Cell {
                    ch: HALF_BLOCK,
                    fg: canvas.pixel(col, row * 2),
                    bg: canvas.pixel(col, row * 2 + 1),
                });
            }
        }
        Self { cols, rows, cells }
    }

    pub fn cell(&self, col: u16, row: u16) -> &Cell {
        &self.cells[row as usize * self.cols as usize + col as usize]
    }

    /// Write every text run of `frame` over the grid, clipping at the edges
    pub fn overlay_text(&mut self, frame: &Frame) {
        let unit_w = SCREEN_WIDTH as f32 / self.cols as f32;
        let unit_h = SCREEN_HEIGHT as f32 / self.rows as f32;

        for command in frame.texts() {
            let DrawCommand::Text {
                text,
                face,
                origin,
                anchor,
                anchor_x,
                color,
            } = command
            else {
                continue;
            };

            let len = text.chars().count() as f32;
            let x = anchor_x / unit_w;
            let start = match anchor {
                Anchor::Start => x.floor(),
                Anchor::Center => (x - len / 2.0).round(),
                Anchor::End => x.ceil() - len,
            } as i32;
            let row = ((origin.y - face.height / 2.0) / unit_h).floor() as i32;
            if row < 0 || row >= self.rows as i32 {
                continue;
            }

            let fg = to_rgba8(*color);
            for (i, ch) in text.chars().enumerate() {
                let col = start + i as i32;
                if col < 0 || col >= self.cols as i32 {
                    continue;
                }
                let idx = row as usize * self.cols as usize + col as usize;
                let cell = &mut self.cells[idx];
                // Keep the upper pixel's color behind the glyph
                cell.bg = cell.fg;
                cell.fg = fg;
                cell.ch = ch;
            }
        }
    }
}

fn term_color(rgba: [u8; 4]) -> TermColor {
    TermColor::Rgb {
        r: rgba[0],
        g: rgba[1],
        b: rgba[2],
    }
}

/// Keyboard side of the terminal session
pub struct TerminalInput {
    keys: KeyTracker,
}

impl TerminalInput {
    fn handle_key(&mut self, key: KeyEvent) {
        let Some(control) = control_for(key.code) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.keys.press(control),
            KeyEventKind::Release => self.keys.release(control),
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<Option<TickInput>, HostError> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if is_quit(&key) => {
                    log::info!("Quit requested");
                    return Ok(None);
                }
                Event::Key(key) => self.handle_key(key),
                Event::FocusLost => self.keys.release_all(),
                _ => {}
            }
        }
        Ok(Some(self.keys.snapshot()))
    }
}

/// Display side of the terminal session
pub struct TerminalScreen {
    out: Stdout,
    fonts: Fonts,
    canvas: Canvas,
    /// Terminal size the canvas was fitted to
    size: (u16, u16),
    needs_clear: bool,
}

impl TerminalScreen {
    fn new(size: (u16, u16)) -> Self {
        Self {
            out: io::stdout(),
            fonts: Fonts::default(),
            canvas: canvas_for(size),
            size,
            needs_clear: true,
        }
    }

    /// Refit the canvas when the terminal was resized
    fn refit(&mut self) -> io::Result<()> {
        let size = terminal::size()?;
        if size != self.size {
            self.size = size;
            self.canvas = canvas_for(size);
            self.needs_clear = true;
        }
        Ok(())
    }

    fn present(&mut self, grid: &CellGrid) -> io::Result<()> {
        if self.needs_clear {
            queue!(self.out, ResetColor, terminal::Clear(terminal::ClearType::All))?;
            self.needs_clear = false;
        }

        let mut current: Option<([u8; 4], [u8; 4])> = None;
        for row in 0..grid.rows {
            queue!(self.out, cursor::MoveTo(0, row))?;
            for col in 0..grid.cols {
                let cell = grid.cell(col, row);
                if current != Some((cell.fg, cell.bg)) {
                    queue!(
                        self.out,
                        SetForegroundColor(term_color(cell.fg)),
                        SetBackgroundColor(term_color(cell.bg))
                    )?;
                    current = Some((cell.fg, cell.bg));
                }
                queue!(self.out, Print(cell.ch))?;
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}

impl Renderer for TerminalScreen {
    fn render(&mut self, snapshot: &MatchState) -> Result<(), HostError> {
        self.refit()?;
        let frame = compose(snapshot, &self.fonts);
        self.canvas.draw_triangles(&tessellate(&frame));
        let mut grid = CellGrid::from_canvas(&self.canvas);
        grid.overlay_text(&frame);
        self.present(&grid)?;
        Ok(())
    }
}

fn canvas_for((cols, rows): (u16, u16)) -> Canvas {
    let (cols, rows) = fit_grid(cols, rows);
    log::debug!("Terminal grid {cols}x{rows}");
    Canvas::new(u32::from(cols), u32::from(rows) * 2)
}

/// Raw-mode terminal session; restores the terminal when dropped
///
/// The input and screen halves are separate so the frame loop can borrow
/// both at once.
pub struct TerminalHost {
    pub input: TerminalInput,
    pub screen: TerminalScreen,
    enhanced: bool,
}

impl TerminalHost {
    /// Enter raw mode and the alternate screen
    pub fn new(fallback_hold_ticks: u32) -> Result<Self, InitError> {
        terminal::enable_raw_mode().map_err(InitError::Terminal)?;

        let enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true));
        let reporting = if enhanced {
            KeyReporting::PressRelease
        } else {
            log::warn!(
                "Terminal does not report key releases; holding keys for {fallback_hold_ticks} ticks per press"
            );
            KeyReporting::PressOnly {
                hold_ticks: fallback_hold_ticks,
            }
        };

        // Restores raw mode via Drop if anything below fails
        let mut host = Self {
            input: TerminalInput {
                keys: KeyTracker::new(reporting),
            },
            screen: TerminalScreen::new((0, 0)),
            enhanced,
        };
        host.enter().map_err(InitError::Terminal)?;
        Ok(host)
    }

    fn enter(&mut self) -> io::Result<()> {
        execute!(
            self.screen.out,
            terminal::EnterAlternateScreen,
            terminal::SetTitle(WINDOW_TITLE),
            cursor::Hide,
            event::EnableFocusChange
        )?;
        if self.enhanced {
            execute!(
                self.screen.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        self.screen.refit()
    }
}

impl Drop for TerminalHost {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(self.screen.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            self.screen.out,
            ResetColor,
            event::DisableFocusChange,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

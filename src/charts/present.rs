//! Showing charts to the user.
//!
//! `TerminalPresenter` takes over the screen until a key is pressed;
//! `TextPresenter` renders into an off-screen buffer and prints it.

use std::io::{self, Stdout, Write};
use std::panic;
use std::sync::Arc;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, buffer::Buffer, layout::Rect, widgets::Widget, Terminal};
use tracing::debug;

use super::widgets::ChartView;
use super::Chart;
use crate::config::{ChartConfig, ChartRenderer};
use crate::error::{FlightError, Result};

const CLOSE_HINT: &str = "press any key to return to the menu";

/// Displays a chart.
pub trait ChartPresenter {
    fn present(&mut self, chart: &Chart, out: &mut dyn Write) -> Result<()>;
}

/// Builds the presenter selected in the chart configuration.
pub fn presenter_for(config: &ChartConfig) -> Box<dyn ChartPresenter> {
    match config.renderer {
        ChartRenderer::Terminal => Box::new(TerminalPresenter),
        ChartRenderer::Text => Box::new(TextPresenter::new(config.text_width, config.text_height)),
    }
}

/// Full-screen presenter using the alternate screen.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl ChartPresenter for TerminalPresenter {
    fn present(&mut self, chart: &Chart, _out: &mut dyn Write) -> Result<()> {
        debug!(chart = chart.title(), "Showing chart full-screen");

        with_terminal_restoring_hook(|| {
            TerminalSession::start().and_then(|mut session| session.show(chart))
        })
    }
}

/// Runs `f` with a panic hook that restores the terminal before delegating to
/// the hook that was installed before. That hook is reinstalled afterwards.
fn with_terminal_restoring_hook<T>(f: impl FnOnce() -> T) -> T {
    let previous = Arc::new(panic::take_hook());
    let delegate = Arc::clone(&previous);
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        (*delegate)(panic_info);
    }));

    let result = f();

    // Dropping the restoring hook releases `delegate`.
    drop(panic::take_hook());
    match Arc::try_unwrap(previous) {
        Ok(hook) => panic::set_hook(hook),
        Err(shared) => panic::set_hook(Box::new(move |panic_info| (*shared)(panic_info))),
    }
    result
}

/// Raw mode plus alternate screen, undone when dropped.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn start() -> Result<Self> {
        enable_raw_mode()
            .map_err(|e| FlightError::internal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(FlightError::internal(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }

        let backend = CrosstermBackend::new(stdout);
        // From here on `Drop` restores the terminal.
        let terminal = Terminal::new(backend).map_err(|e| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            FlightError::internal(format!("Failed to create terminal: {e}"))
        })?;

        Ok(Self { terminal })
    }

    fn show(&mut self, chart: &Chart) -> Result<()> {
        loop {
            self.terminal
                .draw(|frame| {
                    let area = frame.area();
                    frame.render_widget(ChartView::new(chart).footer(CLOSE_HINT), area);
                })
                .map_err(|e| FlightError::internal(format!("Failed to draw chart: {e}")))?;

            match event::read()
                .map_err(|e| FlightError::internal(format!("Failed to read input: {e}")))?
            {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(()),
                // Anything else (resize, focus, mouse) just redraws.
                _ => {}
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Renders charts to a fixed-size text grid.
#[derive(Debug, Clone)]
pub struct TextPresenter {
    width: u16,
    height: u16,
}

impl TextPresenter {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width.max(10),
            height: height.max(6),
        }
    }

    /// Renders `chart` to a string, one line per row, trailing blanks trimmed.
    pub fn render(&self, chart: &Chart) -> String {
        let area = Rect::new(0, 0, self.width, self.height);
        let mut buffer = Buffer::empty(area);
        ChartView::new(chart).render(area, &mut buffer);
        buffer_to_string(&buffer)
    }
}

impl ChartPresenter for TextPresenter {
    fn present(&mut self, chart: &Chart, out: &mut dyn Write) -> Result<()> {
        debug!(chart = chart.title(), "Rendering chart as text");
        out.write_all(self.render(chart).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Converts a buffer to plain text, dropping trailing spaces and blank lines.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut lines: Vec<String> = (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            line.trim_end_matches(' ').to_string()
        })
        .collect();

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    format!("{}\n", lines.join("\n"))
}

//! Chart presentation: a full-screen interactive view, or an off-screen
//! render printed as plain text.

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use ratatui::{Frame, Terminal};
use ratewatch_core::RateSeries;

use crate::chart::RateChart;
use crate::theme::Theme;

const HINT: &str = " q / Esc / Enter to close ";

/// Restore the terminal before the default panic output is printed.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));
}

/// Show the chart full screen until the user presses q, Esc or Enter.
pub fn show_chart(series: &RateSeries, title: &str) -> Result<()> {
    let theme = Theme::default();

    enable_raw_mode()?;
    let mut terminal = restore_on_error(enter_screen, restore_terminal)?;

    let result = run_viewer(&mut terminal, series, title, &theme);

    restore_terminal();
    terminal.show_cursor()?;

    result
}

fn enter_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Run `setup`, calling `restore` only if it fails.
fn restore_on_error<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    match setup() {
        Ok(value) => Ok(value),
        Err(e) => {
            restore();
            Err(e)
        }
    }
}

fn run_viewer(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    series: &RateSeries,
    title: &str,
    theme: &Theme,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, series, title, theme))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && is_close_key(key.code) {
                    break;
                }
            }
        }
    }
    Ok(())
}

fn is_close_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc | KeyCode::Enter
    )
}

fn draw(frame: &mut Frame, series: &RateSeries, title: &str, theme: &Theme) {
    let [chart_area, hint_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(frame.area());

    frame.render_widget(RateChart::new(series, title, theme), chart_area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            HINT,
            Style::default().fg(theme.text_secondary),
        ))),
        hint_area,
    );
}

/// Render the chart into an off-screen buffer and return its rows as text.
///
/// Trailing spaces are trimmed from each row.
pub fn render_to_text(series: &RateSeries, title: &str, width: u16, height: u16) -> String {
    let theme = Theme::monochrome();
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    RateChart::new(series, title, &theme).render(area, &mut buf);

    let mut out = String::new();
    for y in 0..area.height {
        let mut row = String::new();
        for x in 0..area.width {
            if let Some(cell) = buf.cell((x, y)) {
                row.push_str(cell.symbol());
            }
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

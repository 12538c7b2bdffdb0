use std::io;
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::draw::draw_activity;
use crate::aggregate::WeeklyActivity;
use crate::error::Result;

/// Show the weekly charts in the terminal until `q` or Esc is pressed.
pub fn run(activity: &WeeklyActivity) -> Result<()> {
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    loop {
        let draw_result = terminal.draw(|f| {
            let size = f.size();
            draw_activity(f, size, activity);
        });

        if let Err(e) = draw_result {
            eprintln!("TUI draw error: {}", e);
        }

        if poll(Duration::from_millis(200))? {
            if let Event::Key(key_event) = read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                match key_event.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    _ => {}
                }
            }
        }
    }

    terminal.clear()?;
    disable_raw_mode()?;
    Ok(())
}

use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

/// Input the app reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(KeyEvent),
    Click { column: u16, row: u16 },
    Resize,
}

pub fn poll_event(timeout: Duration) -> color_eyre::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Wait up to `timeout` for the next relevant input, skipping key releases
/// and mouse movement.
pub fn next_input(timeout: Duration) -> color_eyre::Result<Option<Input>> {
    loop {
        match poll_event(timeout)? {
            Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                return Ok(Some(Input::Key(key)))
            }
            Some(Event::Mouse(mouse)) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                return Ok(Some(Input::Click {
                    column: mouse.column,
                    row: mouse.row,
                }))
            }
            Some(Event::Resize(..)) => return Ok(Some(Input::Resize)),
            Some(_) => continue,
            None => return Ok(None),
        }
    }
}

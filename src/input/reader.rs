use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::{Stream, StreamExt};
use log::warn;
use std::io;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use super::{InputHandler, KeyAction};
use crate::scheduler::Signal;

/// Forward terminal key presses to the game loop until the loop hangs up
pub fn spawn_key_reader(tx: UnboundedSender<Signal>) -> JoinHandle<()> {
    tokio::spawn(forward_events(EventStream::new(), tx))
}

async fn forward_events<S>(mut events: S, tx: UnboundedSender<Signal>)
where
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    let handler = InputHandler::new();

    while let Some(event) = events.next().await {
        let signal = match event {
            // Only process key press events, not release
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                match handler.handle_key_event(key) {
                    KeyAction::None => continue,
                    action => Signal::Key(action),
                }
            }
            Ok(Event::Resize(..)) => Signal::Redraw,
            Ok(_) => continue,
            Err(err) => {
                // Without input the player could never leave, so end the game loop too
                warn!("terminal input failed: {err}");
                let _ = tx.send(Signal::Key(KeyAction::Quit));
                break;
            }
        };

        if tx.send(signal).is_err() {
            break;
        }
    }
}

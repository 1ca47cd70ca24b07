pub mod handler;
pub mod reader;

pub use handler::{InputHandler, KeyAction};
pub use reader::spawn_key_reader;

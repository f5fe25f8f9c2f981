pub mod console_dialogue;

pub use console_dialogue::*;

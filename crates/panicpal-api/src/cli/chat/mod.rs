//! Interactive terminal chat for PanicPal.
//!
//! Line input, a live loading indicator in the prompt, markdown rendering
//! of replies, and slash commands. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;

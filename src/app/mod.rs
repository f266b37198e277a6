// Text front end: rendering and the interactive session.

pub mod render;
pub mod repl;

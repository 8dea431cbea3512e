mod command;
mod pacer;
mod script;

pub use command::Command;
pub use pacer::{Pacer, ThreadPacer};
pub use script::Program;

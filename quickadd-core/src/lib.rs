pub mod command;
pub mod config;
pub mod date;
pub mod keywords;
pub mod parse_input;
pub mod resolve;
pub mod scan;
pub mod time;

pub use command::Command;
pub use config::Config;
pub use parse_input::{ParseOptions, parse_command};
pub use resolve::CommandInfo;

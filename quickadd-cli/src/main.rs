mod cli;
mod render;

use anyhow::Result;
use cli::Cli;
use quickadd_core::{Config, ParseOptions, parse_command};

fn main() -> Result<()> {
    let cli = Cli::new();
    let config = Config::load()?;

    let input = cli.text.join(" ");
    let options = ParseOptions {
        reference: cli.now,
        end_of_day: Some(config.end_of_day),
    };
    let info = parse_command(&input, Some(options));
    print!("{}", render::format_command_info(&info));
    Ok(())
}

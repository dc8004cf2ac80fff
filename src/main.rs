use std::process;

use crate::args::ArgMatches;
use crate::error::Result;

macro_rules! err {
    ($($tt:tt)*) => {
        Err(crate::error::Error::Other(format!($($tt)*)))
    }
}

mod app;
mod args;
mod error;
mod writer;

mod emoji_tables;
mod presentation;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        if err.is_broken_pipe() {
            process::exit(0);
        }
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = app::app().get_matches();
    match matches.subcommand() {
        ("emoji-tables", Some(m)) => emoji_tables::command(ArgMatches::new(m)),
        ("contains-emoji", Some(m)) => {
            presentation::command_contains_emoji(ArgMatches::new(m))
        }
        ("presentation", Some(m)) => {
            presentation::command_presentation(ArgMatches::new(m))
        }
        ("", _) => {
            app::app().print_help()?;
            println!("");
            Ok(())
        }
        (unknown, _) => err!("unrecognized command: {}", unknown),
    }
}

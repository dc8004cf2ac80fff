use std::io::{self, BufRead, Write};
use std::str;

use emoji_presentation::{contains_flag, EmojiTables, Presentation};
use log::debug;

use crate::args::{resolve_tables, ArgMatches};
use crate::error::Result;

pub fn command_contains_emoji(args: ArgMatches<'_>) -> Result<()> {
    let loaded = args.table_dir()?;
    let tables = resolve_tables(&loaded);
    let flag_only = args.is_present("flag");

    let stdout = io::stdout();
    let mut wtr = io::BufWriter::new(stdout.lock());
    for text in args.values_of("text").into_iter().flatten() {
        writeln!(wtr, "{}", classify(&tables, text, flag_only))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn command_presentation(args: ArgMatches<'_>) -> Result<()> {
    let loaded = args.table_dir()?;
    let tables = resolve_tables(&loaded);
    let style = if args.is_present("emoji") {
        Presentation::Emoji
    } else {
        Presentation::Text
    };

    let stdout = io::stdout();
    let mut wtr = io::BufWriter::new(stdout.lock());
    match args.values_of("text") {
        Some(texts) => {
            for text in texts {
                writeln!(wtr, "{}", tables.normalize(text, style))?;
            }
        }
        None => {
            debug!("normalizing stdin to {:?} presentation", style);
            let stdin = io::stdin();
            normalize_lines(&tables, style, stdin.lock(), &mut wtr)?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Normalize every line read from `rdr` and write it to `wtr`.
///
/// Line terminators are written back exactly as read. A line that isn't
/// valid UTF-8 is passed through untouched.
fn normalize_lines<R: BufRead, W: Write>(
    tables: &EmojiTables<'_>,
    style: Presentation,
    mut rdr: R,
    mut wtr: W,
) -> Result<()> {
    let mut buf = vec![];
    loop {
        buf.clear();
        if rdr.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let body_len = if buf.ends_with(b"\r\n") {
            buf.len() - 2
        } else if buf.ends_with(b"\n") {
            buf.len() - 1
        } else {
            buf.len()
        };
        let (body, terminator) = buf.split_at(body_len);
        match str::from_utf8(body) {
            Ok(line) => {
                wtr.write_all(tables.normalize(line, style).as_bytes())?
            }
            Err(_) => {
                debug!("passing through {} bytes of invalid UTF-8", body.len());
                wtr.write_all(body)?;
            }
        }
        wtr.write_all(terminator)?;
    }
}

fn classify(tables: &EmojiTables<'_>, text: &str, flag_only: bool) -> bool {
    if flag_only {
        contains_flag(text)
    } else {
        tables.contains_emoji(text)
    }
}

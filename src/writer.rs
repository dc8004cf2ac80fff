use std::char;
use std::collections::BTreeSet;
use std::env;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use emoji_presentation::RangeTableOwned;
use log::info;

use crate::error::Result;

#[derive(Clone, Debug)]
pub struct WriterBuilder(WriterOptions);

#[derive(Clone, Debug)]
struct WriterOptions {
    name: String,
    index_name: String,
    columns: u64,
    char_literals: bool,
    binary_dir: Option<PathBuf>,
}

impl WriterBuilder {
    /// Create a new builder for table writers.
    ///
    /// The name given is used in log messages and identifies the group of
    /// tables being written.
    pub fn new(name: &str) -> WriterBuilder {
        WriterBuilder(WriterOptions {
            name: name.to_string(),
            index_name: "BY_NAME".to_string(),
            columns: 79,
            char_literals: false,
            binary_dir: None,
        })
    }

    /// Create a new writer that emits Rust source code to the given writer.
    pub fn from_writer<W: io::Write + 'static>(&self, wtr: W) -> Writer {
        let mut wtr = LineWriter::new(Box::new(wtr) as Box<dyn io::Write>);
        wtr.columns = self.0.columns as usize;
        Writer { wtr, wrote_header: false, opts: self.0.clone() }
    }

    /// Create a new writer that emits Rust source code to stdout.
    pub fn from_stdout(&self) -> Writer {
        self.from_writer(io::stdout())
    }

    /// Create a new writer that writes each table as a binary file in the
    /// given directory, which is created if it doesn't exist.
    ///
    /// Each table `name` is written to `name.bin` as a flat sequence of
    /// little endian `u32` pairs. No index or Rust source code is written.
    pub fn from_binary_dir<P: AsRef<Path>>(
        &self,
        binary_dir: P,
    ) -> Result<Writer> {
        fs::create_dir_all(binary_dir.as_ref())?;
        let mut opts = self.0.clone();
        opts.binary_dir = Some(binary_dir.as_ref().to_path_buf());
        Ok(Writer {
            wtr: LineWriter::new(Box::new(io::sink())),
            wrote_header: false,
            opts,
        })
    }

    /// Set the name of the index that maps table names to tables.
    pub fn index_name(&mut self, name: &str) -> &mut WriterBuilder {
        self.0.index_name = name.to_string();
        self
    }

    /// When printing Rust source code, emit `char` literals instead of `u32`
    /// literals. Any codepoints that aren't Unicode scalar values (i.e.,
    /// surrogate codepoints) are silently dropped when writing.
    pub fn char_literals(&mut self, yes: bool) -> &mut WriterBuilder {
        self.0.char_literals = yes;
        self
    }
}

/// A writer of emoji range tables.
///
/// Tables are either emitted as Rust source code, one `&'static` slice of
/// ranges per table preceded by an index of all tables, or as binary files
/// that `EmojiTablesOwned::from_dir` can load.
pub struct Writer {
    wtr: LineWriter<Box<dyn io::Write + 'static>>,
    wrote_header: bool,
    opts: WriterOptions,
}

impl Writer {
    /// Write a sorted sequence of table names that map to their tables.
    pub fn names<I: IntoIterator<Item = T>, T: AsRef<str>>(
        &mut self,
        names: I,
    ) -> Result<()> {
        if self.opts.binary_dir.is_some() {
            return Ok(());
        }
        self.header()?;
        self.separator()?;
        let mut names: Vec<String> =
            names.into_iter().map(|name| name.as_ref().to_string()).collect();
        names.sort();

        let charty = self.rust_codepoint_type();
        writeln!(
            self.wtr,
            "pub const {}: &'static [(&'static str, &'static [({}, {})])] = &[",
            rust_const_name(&self.opts.index_name),
            charty,
            charty,
        )?;
        for name in names {
            let rustname = rust_const_name(&name);
            self.wtr.write_str(&format!("({:?}, {}), ", name, rustname))?;
        }
        writeln!(self.wtr, "];")?;
        Ok(())
    }

    /// Write the given set of codepoints as a table of ranges.
    ///
    /// Consecutive codepoints are merged into a single range.
    pub fn ranges(
        &mut self,
        name: &str,
        codepoints: &BTreeSet<u32>,
    ) -> Result<()> {
        let owned =
            RangeTableOwned::from_codepoints(codepoints.iter().cloned())?;
        let table = owned.as_table();
        info!(
            "{}: writing {} with {} ranges covering {} codepoints",
            self.opts.name,
            name,
            table.len(),
            table.codepoint_count(),
        );
        if let Some(ref dir) = self.opts.binary_dir {
            let path = dir.join(format!("{}.bin", rust_module_name(name)));
            let mut file = io::BufWriter::new(File::create(path)?);
            table.write_to(&mut file)?;
            file.flush()?;
            return Ok(());
        }

        self.header()?;
        self.separator()?;
        self.ranges_slice(&rust_const_name(name), table.ranges())?;
        self.wtr.flush()?;
        Ok(())
    }

    fn ranges_slice(
        &mut self,
        name: &str,
        table: &[(u32, u32)],
    ) -> Result<()> {
        let ty = self.rust_codepoint_type();
        writeln!(
            self.wtr,
            "pub const {}: &'static [({}, {})] = &[",
            name, ty, ty
        )?;
        for &(start, end) in table {
            let range = (self.rust_codepoint(start), self.rust_codepoint(end));
            if let (Some(start), Some(end)) = range {
                self.wtr.write_str(&format!("({}, {}), ", start, end))?;
            }
        }
        writeln!(self.wtr, "];")?;
        Ok(())
    }

    fn header(&mut self) -> Result<()> {
        if self.wrote_header {
            return Ok(());
        }
        self.wrote_header = true;
        let mut argv = vec![];
        argv.push(
            env::current_exe()?
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "emoji-generate".to_string()),
        );
        for arg in env::args_os().skip(1) {
            let x = arg.to_string_lossy();
            if x.contains('\n') {
                argv.push("[snip (arg too long)]".to_string());
            } else {
                argv.push(x.into_owned());
            }
        }
        writeln!(
            self.wtr,
            "/* DO NOT EDIT THIS FILE. IT WAS AUTOMATICALLY GENERATED BY:"
        )?;
        writeln!(self.wtr, " *")?;
        writeln!(self.wtr, " *  {}", argv.join(" "))?;
        writeln!(self.wtr, " *")?;
        writeln!(
            self.wtr,
            " * emoji-generate is part of the emoji-presentation workspace."
        )?;
        writeln!(self.wtr, " */")?;
        Ok(())
    }

    fn separator(&mut self) -> Result<()> {
        writeln!(self.wtr)?;
        Ok(())
    }

    /// Return valid Rust source code that represents the given codepoint.
    ///
    /// The source code returned is either a u32 literal or a char literal,
    /// depending on the configuration. If the configuration demands a char
    /// literal and the given codepoint is a surrogate, then return None.
    fn rust_codepoint(&self, cp: u32) -> Option<String> {
        if self.opts.char_literals {
            char::from_u32(cp).map(|c| format!("{:?}", c))
        } else {
            Some(cp.to_string())
        }
    }

    fn rust_codepoint_type(&self) -> &'static str {
        if self.opts.char_literals {
            "char"
        } else {
            "u32"
        }
    }
}

#[derive(Debug)]
struct LineWriter<W> {
    wtr: W,
    line: String,
    columns: usize,
    indent: String,
}

impl<W: io::Write> LineWriter<W> {
    fn new(wtr: W) -> LineWriter<W> {
        LineWriter {
            wtr,
            line: String::new(),
            columns: 79,
            indent: "  ".to_string(),
        }
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        if self.line.len() + s.len() > self.columns {
            self.flush_line()?;
        }
        if self.line.is_empty() {
            self.line.push_str(&self.indent);
        }
        self.line.push_str(s);
        Ok(())
    }

    fn flush_line(&mut self) -> io::Result<()> {
        if self.line.is_empty() {
            return Ok(());
        }
        self.wtr.write_all(self.line.trim_end().as_bytes())?;
        self.wtr.write_all(b"\n")?;
        self.line.clear();
        Ok(())
    }
}

impl<W: io::Write> io::Write for LineWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.flush_line()?;
        self.wtr.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_line()?;
        self.wtr.flush()
    }
}

/// Heuristically produce an appropriate constant Rust name.
fn rust_const_name(s: &str) -> String {
    let mut s = s.replace(|c: char| c == '.' || c == '-', "_");
    s.make_ascii_uppercase();
    s
}

/// Heuristically produce an appropriate module (or file) name.
fn rust_module_name(s: &str) -> String {
    let mut s = s.replace('-', "_");
    s.make_ascii_lowercase();
    s
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::env;
    use std::fs;
    use std::io;
    use std::process;
    use std::rc::Rc;

    use emoji_presentation::{EmojiTablesOwned, Table};

    use super::{rust_const_name, LineWriter, WriterBuilder};

    #[derive(Clone, Default)]
    struct Shared(Rc<RefCell<Vec<u8>>>);

    impl io::Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Shared {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    fn set(cps: &[u32]) -> BTreeSet<u32> {
        cps.iter().cloned().collect()
    }

    #[test]
    fn writes_index_and_merged_ranges() {
        let out = Shared::default();
        let mut wtr = WriterBuilder::new("emoji").from_writer(out.clone());
        wtr.names(&["text_default", "presentable"]).unwrap();
        wtr.ranges("presentable", &set(&[0x231A, 0x231B, 0x23E9])).unwrap();
        wtr.ranges("text_default", &set(&[0x23])).unwrap();

        let got = out.contents();
        assert!(got.starts_with("/* DO NOT EDIT THIS FILE."), "{}", got);
        assert!(got.contains(
            "pub const BY_NAME: &'static [(&'static str, &'static [(u32, u32)])] = &[\n  \
             (\"presentable\", PRESENTABLE), (\"text_default\", TEXT_DEFAULT),\n];\n"
        ));
        assert!(got.contains(
            "\npub const PRESENTABLE: &'static [(u32, u32)] = &[\n  \
             (8986, 8987), (9193, 9193),\n];\n"
        ));
        assert!(got.contains(
            "\npub const TEXT_DEFAULT: &'static [(u32, u32)] = &[\n  (35, 35),\n];\n"
        ));
        assert_eq!(got.matches("DO NOT EDIT").count(), 1);
    }

    #[test]
    fn char_literals_and_index_name() {
        let out = Shared::default();
        let mut wtr = WriterBuilder::new("emoji")
            .char_literals(true)
            .index_name("EMOJI_TABLES")
            .from_writer(out.clone());
        wtr.names(&["keycap"]).unwrap();
        wtr.ranges("keycap", &set(&[0x23, 0x2A, 0x30])).unwrap();

        let got = out.contents();
        assert!(got.contains(
            "pub const EMOJI_TABLES: &'static [(&'static str, &'static [(char, char)])]"
        ));
        assert!(got.contains("('#', '#'), ('*', '*'), ('0', '0'),"));
    }

    #[test]
    fn binary_dir_is_loadable() {
        let dir = env::temp_dir()
            .join(format!("emoji-generate-writer-{}", process::id()));
        let mut wtr = WriterBuilder::new("emoji").from_binary_dir(&dir).unwrap();
        let names: Vec<&str> = Table::ALL.iter().map(|t| t.name()).collect();
        wtr.names(&names).unwrap();
        for (i, name) in names.iter().enumerate() {
            let base = 0x1F300 + 0x10 * i as u32;
            wtr.ranges(name, &set(&[base, base + 1, base + 5])).unwrap();
        }

        let owned = EmojiTablesOwned::from_dir(&dir).unwrap();
        let tables = owned.as_tables();
        assert_eq!(
            tables.get(Table::TextDefault).ranges(),
            &[(0x1F310, 0x1F311), (0x1F315, 0x1F315)]
        );
        assert!(tables.variation_eligible().contains(0x1F335));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn line_writer_wraps() {
        let mut buf = vec![];
        {
            let mut wtr = LineWriter::new(&mut buf);
            wtr.columns = 10;
            for _ in 0..4 {
                wtr.write_str("abcd, ").unwrap();
            }
            wtr.flush_line().unwrap();
        }
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "  abcd,\n  abcd,\n  abcd,\n  abcd,\n"
        );
    }

    #[test]
    fn const_names() {
        assert_eq!(rust_const_name("text_default"), "TEXT_DEFAULT");
        assert_eq!(rust_const_name("by-name"), "BY_NAME");
    }
}

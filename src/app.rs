use clap::{App, AppSettings, Arg, ArgGroup, SubCommand};

const TEMPLATE: &'static str = "\
{bin} {version}
{about}

USAGE:
    {usage}

SUBCOMMANDS:
{subcommands}

OPTIONS:
{unified}";

const TEMPLATE_SUB: &'static str = "\
{before-help}
USAGE:
    {usage}

ARGS:
{positionals}

OPTIONS:
{unified}";

const ABOUT: &'static str = "
emoji-generate is a tool that generates the emoji range tables used by the
emoji-presentation crate, and exposes emoji detection and presentation
normalization on the command line.

Tables are sorted sequences of codepoint ranges derived from the emoji data
files of the Unicode character database. They can be emitted as Rust source
code or as binary files that can be loaded at runtime.

Set RUST_LOG=debug to see what is being read and written.";

const ABOUT_EMOJI_TABLES: &'static str = "\
emoji-tables reads emoji/emoji-data.txt and emoji/emoji-variation-sequences.txt
from a UCD directory and produces the four tables that emoji classification
and presentation normalization consult:

    presentable         Emoji_Presentation, minus Emoji_Component
    text_default        Emoji, minus Emoji_Presentation
    modifier_base       Emoji_Modifier_Base, minus U+1F46A FAMILY
    variation_eligible  every base codepoint of a variation sequence

Older UCD layouts that keep the emoji data files at the top level are also
supported.
";

const ABOUT_CONTAINS_EMOJI: &'static str = "\
contains-emoji prints, for each text argument, whether it contains an emoji:
a single character emoji, or a presentation, modifier, flag or keycap sequence.
With --flag, only flag sequences (two regional indicators) are looked for.
";

const ABOUT_PRESENTATION: &'static str = "\
presentation rewrites text such that every character with both a text and an
emoji form is consistently presented as text (--text) or as emoji (--emoji),
by adding, replacing or removing variation selectors. Each text argument is
normalized and printed on its own line. When no text is given, stdin is
normalized line by line.
";

pub fn app() -> App<'static, 'static> {
    // Various common flags and arguments.
    let flag_name = |default| {
        Arg::with_name("name")
            .long("name")
            .help("Set the name of the table index in the emitted code.")
            .takes_value(true)
            .default_value(default)
    };
    let flag_chars = Arg::with_name("chars").long("chars").help(
        "Write codepoints as character literals. If a codepoint \
         cannot be written as a character literal, then it is \
         silently dropped.",
    );
    let flag_binary_dir = Arg::with_name("binary-dir")
        .long("binary-dir")
        .help(
            "Write each table to NAME.bin in this directory as little \
             endian u32 pairs, instead of emitting Rust source code.",
        )
        .takes_value(true);
    let flag_table_dir = Arg::with_name("table-dir")
        .long("table-dir")
        .help(
            "Load the emoji tables from the binary files in this \
             directory instead of using the bundled tables.",
        )
        .takes_value(true);
    let ucd_dir = Arg::with_name("ucd-dir")
        .required(true)
        .help("Directory containing the Unicode character database files.");
    let text = |required| {
        Arg::with_name("text")
            .multiple(true)
            .required(required)
            .help("The text to process.")
    };

    // Subcommands.
    let cmd_emoji_tables = SubCommand::with_name("emoji-tables")
        .version(clap::crate_version!())
        .template(TEMPLATE_SUB)
        .about("Create the emoji classification tables.")
        .before_help(ABOUT_EMOJI_TABLES)
        .arg(ucd_dir.clone().required_unless("list-tables"))
        .arg(flag_binary_dir.clone())
        .arg(flag_name("BY_NAME"))
        .arg(flag_chars.clone())
        .arg(Arg::with_name("include").long("include").takes_value(true).help(
            "A comma separated list of tables to include. \
             When absent, all tables are included.",
        ))
        .arg(Arg::with_name("exclude").long("exclude").takes_value(true).help(
            "A comma separated list of tables to exclude. \
             When absent, no tables are excluded. This overrides \
             tables specified with the --include flag.",
        ))
        .arg(
            Arg::with_name("list-tables")
                .long("list-tables")
                .help("List the tables that can be generated."),
        );
    let cmd_contains_emoji = SubCommand::with_name("contains-emoji")
        .version(clap::crate_version!())
        .template(TEMPLATE_SUB)
        .about("Report whether text contains an emoji.")
        .before_help(ABOUT_CONTAINS_EMOJI)
        .arg(text(true))
        .arg(flag_table_dir.clone())
        .arg(
            Arg::with_name("flag")
                .long("flag")
                .help("Only look for flag sequences."),
        );
    let cmd_presentation = SubCommand::with_name("presentation")
        .version(clap::crate_version!())
        .template(TEMPLATE_SUB)
        .about("Normalize the presentation of emoji in text.")
        .before_help(ABOUT_PRESENTATION)
        .arg(text(false))
        .arg(flag_table_dir.clone())
        .arg(
            Arg::with_name("text-style")
                .long("text")
                .help("Present eligible characters as text."),
        )
        .arg(
            Arg::with_name("emoji")
                .long("emoji")
                .help("Present eligible characters as emoji."),
        )
        .group(
            ArgGroup::with_name("style")
                .args(&["text-style", "emoji"])
                .required(true),
        );

    App::new("emoji-generate")
        .version(clap::crate_version!())
        .about(ABOUT)
        .template(TEMPLATE)
        .max_term_width(100)
        .setting(AppSettings::UnifiedHelpMessage)
        .subcommand(cmd_emoji_tables)
        .subcommand(cmd_contains_emoji)
        .subcommand(cmd_presentation)
}

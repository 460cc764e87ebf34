//! Command-line front end: read HTML from a file or stdin, slim it, write it
//! to a file or stdout.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use html_slim::{Config, Slimmer};

/// Strip scripts, styles, comments and custom patterns from HTML.
#[derive(Parser, Debug)]
#[command(name = "html-slim", version, about, long_about = None)]
struct Cli {
    /// Input file. Reads stdin when omitted or "-".
    input: Option<PathBuf>,

    /// Write the result here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file; command-line flags take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Remove scripts, on* handlers and script preloads.
    #[arg(long, overrides_with = "keep_script")]
    script: bool,
    #[arg(long, overrides_with = "script", hide_short_help = true)]
    keep_script: bool,

    /// Remove JSON-LD script blocks.
    #[arg(long = "ld-json", alias = "ldjson", overrides_with = "keep_ld_json")]
    ld_json: bool,
    #[arg(long = "keep-ld-json", alias = "keep-ldjson", overrides_with = "ld_json", hide_short_help = true)]
    keep_ld_json: bool,

    /// Remove styles, style attributes, stylesheet links and style preloads.
    #[arg(long, overrides_with = "keep_style")]
    style: bool,
    #[arg(long, overrides_with = "style", hide_short_help = true)]
    keep_style: bool,

    /// Remove comments (default).
    #[arg(long, overrides_with = "keep_comment")]
    comment: bool,
    #[arg(long, overrides_with = "comment")]
    keep_comment: bool,

    /// Remove <template> elements.
    #[arg(long, overrides_with = "keep_template")]
    template: bool,
    #[arg(long, overrides_with = "template", hide_short_help = true)]
    keep_template: bool,

    /// Collapse whitespace (default).
    #[arg(long, overrides_with = "keep_space")]
    space: bool,
    #[arg(long, overrides_with = "space")]
    keep_space: bool,

    /// Remove elements whose tag name matches this regex (case-insensitive).
    #[arg(long, value_name = "REGEX")]
    tag: Option<String>,

    /// Remove attributes whose name matches this regex (case-insensitive).
    #[arg(long, value_name = "REGEX")]
    attr: Option<String>,

    /// Remove elements matching this CSS selector.
    #[arg(long, alias = "select", value_name = "SELECTOR")]
    selector: Option<String>,

    /// Log more (-v debug, -vv trace). RUST_LOG also applies.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Flags given on the command line, as a config layer.
    fn overrides(&self) -> Config {
        Config {
            script: switch(self.script, self.keep_script),
            ld_json: switch(self.ld_json, self.keep_ld_json),
            style: switch(self.style, self.keep_style),
            comment: switch(self.comment, self.keep_comment),
            template: switch(self.template, self.keep_template),
            tag: self.tag.clone(),
            attr: self.attr.clone(),
            selector: self.selector.clone(),
            space: switch(self.space, self.keep_space),
        }
    }
}

/// `--x` / `--keep-x` pair to an optional setting.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env = env_logger::Env::default().filter_or("RUST_LOG", level);
    env_logger::Builder::from_env(env).format_timestamp(None).init();
}

fn read_input(input: Option<&PathBuf>) -> Result<Vec<u8>> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            fs::read(path).with_context(|| format!("cannot read {}", path.display()))
        }
        _ => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).context("cannot read stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    let options = file.merge(cli.overrides()).into_options();
    let slimmer = Slimmer::new(&options)?;

    let html = read_input(cli.input.as_ref())?;
    let slimmed = slimmer.slim_bytes(&html);

    match &cli.output {
        Some(path) => {
            fs::write(path, slimmed).with_context(|| format!("cannot write {}", path.display()))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(slimmed.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

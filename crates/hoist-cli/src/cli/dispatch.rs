//! Dispatch logic: extract params from `ArgMatches` and convert them to
//! command args.

use std::path::PathBuf;

use clap::ArgMatches;
use hoist_lib::extract::MemberStyle;

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::check::{CheckArgs, OutputFormat};
use crate::commands::cursor::Cursor;
use crate::commands::extract::ExtractArgs;

pub struct AstParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub raw: bool,
    pub spans: bool,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            raw: m.get_flag("raw"),
            spans: m.get_flag("spans"),
            color: parse_color(m),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            raw: p.raw,
            spans: p.spans,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub format: OutputFormat,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            format: parse_format(m),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            format: p.format,
            // JSON is for machines.
            color: p.format == OutputFormat::Text && p.color.should_colorize(),
        }
    }
}

pub struct ExtractParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub at: Option<Cursor>,
    pub name: Option<String>,
    pub style: MemberStyle,
    pub output: Option<PathBuf>,
    pub write: bool,
}

impl ExtractParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            at: m.get_one::<Cursor>("at").copied(),
            name: m.get_one::<String>("name").cloned(),
            style: parse_style(m),
            output: m.get_one::<PathBuf>("output").cloned(),
            write: m.get_flag("write"),
        }
    }
}

impl From<ExtractParams> for ExtractArgs {
    fn from(p: ExtractParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            at: p.at,
            name: p.name,
            style: p.style,
            output: p.output,
            write: p.write,
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_format(m: &ArgMatches) -> OutputFormat {
    match m.get_one::<String>("format").map(|s| s.as_str()) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    }
}

fn parse_style(m: &ArgMatches) -> MemberStyle {
    match m.get_one::<String>("style").map(|s| s.as_str()) {
        Some("field") => MemberStyle::Field,
        _ => MemberStyle::Property,
    }
}

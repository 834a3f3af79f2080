//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("hoist")
        .about("Extract anonymous record literals into named types")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(ast_command())
        .subcommand(check_command())
        .subcommand(extract_command())
}

/// Show the concrete syntax tree of a source file.
pub fn ast_command() -> Command {
    Command::new("ast")
        .about("Show the syntax tree of a source file")
        .override_usage(
            "\
  hoist ast <FILE>
  hoist ast -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  hoist ast Order.cs                  # syntax tree
  hoist ast Order.cs --raw            # include whitespace and comments
  hoist ast -s 'class C { }' --spans  # inline source, with ranges"#,
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(raw_arg())
        .arg(spans_arg())
        .arg(color_arg())
}

/// Report syntax errors and anonymous types that could be extracted.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Report anonymous types that could be extracted")
        .override_usage(
            "\
  hoist check <FILE>
  hoist check -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  hoist check Order.cs                # human-readable report
  hoist check Order.cs --format json  # machine-readable report
  cat Order.cs | hoist check -        # read stdin"#,
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(format_arg())
        .arg(color_arg())
}

/// Extract one anonymous type into a named declaration.
pub fn extract_command() -> Command {
    Command::new("extract")
        .about("Extract an anonymous type into a named type")
        .override_usage(
            "\
  hoist extract <FILE> [--at <LINE:COL>] [--name <NAME>]
  hoist extract -s <TEXT> [--at <LINE:COL>]",
        )
        .after_help(
            r#"EXAMPLES:
  hoist extract Order.cs                      # first anonymous type, to stdout
  hoist extract Order.cs --at 12:24 --write   # the one at line 12, in place
  hoist extract Order.cs --name Line -o out.cs
  hoist extract Order.cs --style field        # public fields, no properties"#,
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(at_arg())
        .arg(name_arg())
        .arg(style_arg())
        .arg(output_file_arg())
        .arg(write_arg())
}

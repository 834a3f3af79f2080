mod cli;
mod commands;
mod tracing_init;

use cli::{AstParams, CheckParams, ExtractParams, build_cli};

fn main() {
    tracing_init::init_tracing();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("ast", m)) => {
            let params = AstParams::from_matches(m);
            commands::ast::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("extract", m)) => {
            let params = ExtractParams::from_matches(m);
            commands::extract::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

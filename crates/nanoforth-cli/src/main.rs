mod cli;
mod commands;

use std::io::{self, Write};

use cli::{BuildParams, CheckParams, DumpParams, ExecParams, TraceParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();
    let mut stdout = io::stdout().lock();

    let result = match matches.subcommand() {
        Some(("build", m)) => commands::build::run(BuildParams::from_matches(m).into(), &mut stdout),
        Some(("check", m)) => commands::check::run(CheckParams::from_matches(m).into()),
        Some(("dump", m)) => commands::dump::run(DumpParams::from_matches(m).into(), &mut stdout),
        Some(("exec", m)) => commands::exec::run(ExecParams::from_matches(m).into(), &mut stdout),
        Some(("trace", m)) => commands::trace::run(TraceParams::from_matches(m).into(), &mut stdout),
        _ => unreachable!("clap should have caught this"),
    };

    let _ = stdout.flush();
    if let Err(err) = result {
        err.report();
        std::process::exit(err.exit_code());
    }
}

//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror the command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the relevant fields
//! - `Into<*Args>` impls resolve the color choice and verbosity

use std::path::PathBuf;

use clap::ArgMatches;
use nanoforth_vm::Verbosity;

use super::ColorChoice;
use crate::commands::build::BuildArgs;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::exec::ExecArgs;
use crate::commands::trace::TraceArgs;

pub struct BuildParams {
    pub input: PathBuf,
    pub output: PathBuf,
    pub disasm: bool,
    pub color: ColorChoice,
}

impl BuildParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: required_path(m, "input"),
            output: required_path(m, "output"),
            disasm: m.get_flag("disasm"),
            color: parse_color(m),
        }
    }
}

impl From<BuildParams> for BuildArgs {
    fn from(p: BuildParams) -> Self {
        Self {
            input: p.input,
            output: p.output,
            disasm: p.disasm,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub input: PathBuf,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: required_path(m, "input"),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: p.input,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub input: PathBuf,
    pub image: bool,
    pub cst: bool,
    pub raw: bool,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: required_path(m, "input"),
            image: m.get_flag("image"),
            cst: m.get_flag("cst"),
            raw: m.get_flag("raw"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            input: p.input,
            image: p.image,
            cst: p.cst,
            raw: p.raw,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ExecParams {
    pub input: PathBuf,
    pub image: bool,
    pub json: bool,
    pub fuel: u32,
    pub color: ColorChoice,
}

impl ExecParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: required_path(m, "input"),
            image: m.get_flag("image"),
            json: m.get_flag("json"),
            fuel: parse_fuel(m),
            color: parse_color(m),
        }
    }
}

impl From<ExecParams> for ExecArgs {
    fn from(p: ExecParams) -> Self {
        Self {
            input: p.input,
            image: p.image,
            json: p.json,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub input: PathBuf,
    pub image: bool,
    pub verbose: u8,
    pub fuel: u32,
    pub color: ColorChoice,
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: required_path(m, "input"),
            image: m.get_flag("image"),
            verbose: m.get_count("verbose"),
            fuel: parse_fuel(m),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        Self {
            input: p.input,
            image: p.image,
            verbosity: parse_verbosity(p.verbose),
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

/// Clap enforces `required(true)`; the fallback is never observed.
fn required_path(m: &ArgMatches, id: &str) -> PathBuf {
    m.get_one::<PathBuf>(id).cloned().unwrap_or_default()
}

fn parse_fuel(m: &ArgMatches) -> u32 {
    m.get_one::<u32>("fuel").copied().unwrap_or(1_000_000)
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_verbosity(count: u8) -> Verbosity {
    match count {
        0 => Verbosity::Default,
        1 => Verbosity::Verbose,
        _ => Verbosity::VeryVerbose,
    }
}

// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

mod decompile_args;

use crate::decompile_args::DecompileArgs;
use clap::Parser;
use clap_derive::Parser;
use eyre::WrapErr;
use figment::{
    Figment,
    providers::{Format, Serialized, Yaml},
};
use serde_derive::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};
use wsdc_decompiler::{DecompileOptions, decompile, parse_workshop};
use wsdc_elements::ELEMENTS;

#[derive(Parser, Debug, Serialize, Deserialize)]
#[command(about = "Decompile Overwatch Workshop text into readable pseudo-code")]
struct Args {
    #[arg(help = "Workshop text to decompile; standard input when omitted")]
    input: Option<PathBuf>,

    #[arg(
        long,
        short,
        value_name = "output",
        help = "Write the listing here instead of standard output"
    )]
    output: Option<PathBuf>,

    #[arg(long, help = "Yaml config file to use, overrides values in CLI args")]
    config_file: Option<String>,

    #[arg(long, help = "Print the parsed program tree instead of the rendered listing")]
    dump_ast: bool,

    #[arg(long, help = "Enable debug logging", default_value = "false")]
    debug: bool,

    #[command(flatten)]
    #[serde(flatten)]
    decompile_args: DecompileArgs,
}

/// Logs go to stderr so they never mix with a listing written to stdout.
fn init_tracing(debug: bool) -> Result<(), eyre::Report> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(env_filter) => env_filter,
        Err(_) => EnvFilter::new(if debug { "debug" } else { "info" }),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(false)
                .with_line_number(false),
        )
        .with(filter)
        .try_init()
        .wrap_err("Unable to install tracing subscriber")
}

fn read_input(input: Option<&PathBuf>) -> Result<String, eyre::Report> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Unable to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .wrap_err("Unable to read standard input")?;
            Ok(text)
        }
    }
}

fn write_output(output: Option<&PathBuf>, listing: &str) -> Result<(), eyre::Report> {
    match output {
        Some(path) => std::fs::write(path, listing)
            .wrap_err_with(|| format!("Unable to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(listing.as_bytes())?;
            if !listing.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

fn main() -> Result<(), eyre::Report> {
    color_eyre::install()?;

    let cli_args = Args::parse();
    let config_file = cli_args.config_file.clone();
    let mut args_figment = Figment::new().merge(Serialized::defaults(cli_args));
    if let Some(config_file) = config_file {
        args_figment = args_figment.merge(Yaml::file(config_file));
    }
    let args = args_figment.extract::<Args>()?;

    init_tracing(args.debug)?;

    let mut options = DecompileOptions::default();
    args.decompile_args.merge_config(&mut options)?;
    debug!(?options, "Decompiling");

    let text = read_input(args.input.as_ref())?;
    let listing = if args.dump_ast {
        let program = parse_workshop(&text, &*ELEMENTS, &options)?;
        format!("{program:#?}")
    } else {
        decompile(&text, &options)?
    };

    write_output(args.output.as_ref(), &listing)?;
    if let Some(output) = &args.output {
        info!("Wrote {} bytes to {}", listing.len(), output.display());
    }
    Ok(())
}

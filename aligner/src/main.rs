mod args;
mod commands;
mod io;
mod output;
mod util;

use args::{Cli, SubCommands};
use commands::{global, local, msa};
use util::{init_logging, set_threads};

use clap::Parser;

fn main() -> anyhow::Result<()> {
    color_backtrace::install();

    match Cli::parse().command {
        SubCommands::Global(args) => {
            init_logging(args.common_args.verbose);
            set_threads(args.common_args.num_threads)?;
            global(&args)?;
        }
        SubCommands::Local(args) => {
            init_logging(args.common_args.verbose);
            set_threads(args.common_args.num_threads)?;
            local(&args)?;
        }
        SubCommands::Msa(args) => {
            init_logging(args.common_args.verbose);
            set_threads(args.common_args.num_threads)?;
            msa(&args)?;
        }
    }
    Ok(())
}

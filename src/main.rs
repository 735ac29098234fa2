use clap::Parser;
use log::warn;
use snafu::ErrorCompat;

mod ahp;
mod args;

use crate::ahp::RunOptions;

fn main() {
    let args = args::Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let config_path = match args.config.clone() {
        Some(p) => p,
        None => {
            eprintln!("A configuration file is required. See padirank --help.");
            std::process::exit(2);
        }
    };

    let opts = RunOptions {
        input: args.input.clone(),
        input_type: args.input_type.clone(),
        excel_worksheet_name: args.excel_worksheet_name.clone(),
        judgments: args.judgments.clone(),
        out: args.out.clone(),
        reference: args.reference.clone(),
    };

    let res = ahp::run_analysis(config_path, &opts);
    if let Err(e) = res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}

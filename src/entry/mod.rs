use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::debug;

use crate::args::BenchArgs;
use crate::config::{RunConfig, apply_config, load_config};
use crate::error::AppResult;
use crate::report::print_report;
use crate::run::RunController;

pub(crate) fn run() -> AppResult<()> {
    let Some((mut args, matches)) = parse_args(std::env::args_os())? else {
        return Ok(());
    };

    crate::system::logger::init_logging(args.verbose, args.no_color);

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }
    debug!("Effective arguments: {:?}", args);

    let run_config = RunConfig::from_args(&args)?;
    let mut controller = RunController::new(run_config)?;
    let report = controller.run()?;
    print_report(&report, args.output_format)
}

/// Parses the command line. `Ok(None)` means help or version was printed.
fn parse_args<I, T>(raw_args: I) -> AppResult<Option<(BenchArgs, ArgMatches)>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match BenchArgs::command().try_get_matches_from(raw_args) {
        Ok(matches) => matches,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print()?;
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    let args = BenchArgs::from_arg_matches(&matches)?;
    Ok(Some((args, matches)))
}

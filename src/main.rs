use clap::Parser;
use strokekit::cli::CliArgs;
use strokekit::init_logging;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose)?;
    strokekit::cli::run(&args)
}

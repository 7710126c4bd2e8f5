use clap::Parser;
use executors_report::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    executors_report::logging::init(cli.verbose);
    cli.run()
}

use clap::Parser;
use miette::Result;
use spriteslice::cli::{Cli, Commands};
use spriteslice::output::Printer;
use spriteslice::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().quiet(cli.quiet);

    match cli.command {
        Commands::Slice(args) => {
            let config = Config::discover(std::path::Path::new("."))?;
            spriteslice::cli::slice::run(args, &config, &printer)?;
        }
        Commands::List(args) => spriteslice::cli::list::run(args, &printer)?,
        Commands::Completions(args) => spriteslice::cli::completions::run(args)?,
    }

    Ok(())
}

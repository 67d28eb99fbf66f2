use clap::Parser;
use voiceprint::cli::Cli;

fn main() -> anyhow::Result<()> {
    voiceprint::logging::init_from_env()?;

    let cli = Cli::parse();
    cli.run()
}

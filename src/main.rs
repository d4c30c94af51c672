use clap::Parser as _;

mod cli;
mod config;
mod gateways;
mod surface;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = cli::Args::parse();
    let cfg = config::Config::try_load_from_file_or_default(args.config.as_deref())?;
    cli::run(args.command, cfg)
}

use anyhow::Result;
use clap::Parser;
use valuemap::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate {
            industry,
            entities,
            avg_transaction,
            vendor_cost,
            page_views,
            products,
            format,
            output,
            config,
            verbosity,
        } => {
            init_logging(verbosity);
            let estimate_config = valuemap::commands::estimate::EstimateConfig {
                industry,
                entities,
                avg_transaction,
                vendor_cost,
                page_views,
                products: products.unwrap_or_default(),
                format: format.into(),
                output,
                config,
            };
            valuemap::commands::estimate::run(estimate_config)
        }
        Commands::Industries {
            format,
            config,
            verbosity,
        } => {
            init_logging(verbosity);
            valuemap::commands::industries::run(format.into(), config)
        }
        Commands::Session { config, verbosity } => {
            init_logging(verbosity);
            valuemap::commands::session::run(config)
        }
    }
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .try_init();
}

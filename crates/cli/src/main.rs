use clap::Parser;

use ffe_catalog::CatalogConfig;
use ffe_cli::Args;

fn main() -> anyhow::Result<()> {
    ffe_observability::init();

    let args = Args::parse();
    let config = CatalogConfig::from_env()?;

    let output = ffe_cli::run(&args, &config)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

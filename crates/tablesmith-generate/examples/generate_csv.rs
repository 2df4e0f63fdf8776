use std::env;
use std::path::PathBuf;

use tablesmith_config::Config;
use tablesmith_generate::output::write_store_csvs;
use tablesmith_generate::{GenerateOptions, GenerationEngine};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut config_path: Option<PathBuf> = None;
    let mut out_dir: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_path = args.next().map(PathBuf::from),
            "--out" => out_dir = args.next().map(PathBuf::from),
            "--seed" => seed = args.next().and_then(|value| value.parse().ok()),
            _ => {
                if config_path.is_none() {
                    config_path = Some(PathBuf::from(arg));
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let config_path = config_path.ok_or("missing --config path")?;
    let config = Config::load(&config_path)?;

    let base_dir = config_path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let engine = GenerationEngine::new(GenerateOptions { seed, base_dir });
    let output = engine.run(&config)?;

    let out_dir = out_dir.unwrap_or_else(|| PathBuf::from("."));
    for path in write_store_csvs(&out_dir, &output.store)? {
        println!("{}", path.display());
    }
    Ok(())
}

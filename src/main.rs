//! animator-events 示例程序

use std::path::PathBuf;

use animator_events::EventsConfig;
use animator_events::examples::locomotion;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "animator-events", about = "Run the locomotion state event example")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = match &args.config {
        Some(path) => EventsConfig::load(path)?,
        None => EventsConfig::default(),
    };

    println!("animator-events 示例");
    println!("====================\n");

    for line in locomotion::run_locomotion_example(config) {
        println!("{line}");
    }

    println!("\n所有示例运行完成！");
    Ok(())
}

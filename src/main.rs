//! msiforge - Windows Installer packaging for frozen executable trees.

use std::process;

use msiforge::bundler::{Bundler, Result};
use msiforge::cli;

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = cli::Args::parse_args();
    if let Err(err) = run(&args).await {
        log::error!("{}", err);
        process::exit(1);
    }
}

async fn run(args: &cli::Args) -> Result<()> {
    let settings = cli::settings_from_args(args)?;
    let artifact = Bundler::new(settings).bundle().await?;

    for path in &artifact.paths {
        println!("{}", path.display());
    }
    println!("size: {} bytes", artifact.size);
    println!("sha256: {}", artifact.checksum);

    Ok(())
}

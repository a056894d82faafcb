use std::path::PathBuf;

use clap::Parser;
use image_uploader_client::run;

#[derive(Parser)]
struct Args {
    #[clap(long, default_value = "http://127.0.0.1:8080")]
    server: String,
    file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run(args.server, args.file).await
}

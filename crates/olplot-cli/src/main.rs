use std::io;

use tracing_subscriber::EnvFilter;

mod command;
mod render;
mod schema;
mod util;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    command::run()
}

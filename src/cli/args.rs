use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct MainArgs {
    /// The path to the config file for the gimbal server. Defaults to
    /// gimbal-server.toml in the working directory, if present.
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    /// Overrides the port the HTTP server listens on
    #[clap(long, short)]
    pub port: Option<u16>,
}

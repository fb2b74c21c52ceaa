use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::metadata::LevelFilter;
use tracing_subscriber::{filter::Targets, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::{
    client::Task,
    product::{Product, ProductManager, SessionResolver},
};

#[macro_use]
extern crate tracing;

mod cli;
mod client;
mod config;
mod gimbal;
mod product;
mod server;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // setup colorful backtraces
    color_backtrace::install();

    let mut targets = Targets::new().with_default(LevelFilter::INFO);

    if let Ok(directives) = std::env::var("RUST_LOG") {
        for directive in directives.split(',') {
            if let Some((target, level)) = directive.split_once('=') {
                targets = targets.with_target(
                    target,
                    level.parse::<LevelFilter>().context("invalid log level")?,
                );
            } else {
                targets = targets.with_default(
                    directive
                        .parse::<LevelFilter>()
                        .context("invalid log level")?,
                );
            }
        }
    }

    let (writer, _guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::hourly("logs", "gimbal-server"));

    let reg = tracing_subscriber::registry();

    #[cfg(tokio_unstable)]
    let reg = reg.with(console_subscriber::spawn());

    reg
        // writer that outputs to console
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(targets),
        )
        // writer that outputs to files
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(
                    Targets::new().with_targets(vec![("gimbal_server", LevelFilter::DEBUG)]),
                ),
        )
        .init();

    let main_args = cli::args::MainArgs::parse();

    let mut config = match &main_args.config {
        Some(path) => {
            debug!("reading config from {:?}", path);
            config::GimbalServerConfig::read_from_path(path.clone())
        }
        None => config::GimbalServerConfig::read(),
    }
    .context("failed to read config file")?;

    if let Some(port) = main_args.port {
        config.server.address.set_port(port);
    }

    run_tasks(config).await
}

async fn run_tasks(config: config::GimbalServerConfig) -> anyhow::Result<()> {
    let cancellation_token = CancellationToken::new();

    ctrlc::set_handler({
        let cancellation_token = cancellation_token.clone();
        move || {
            info!("received interrupt, shutting down");
            cancellation_token.cancel();
        }
    })
    .context("could not set ctrl+c handler")?;

    let mut tasks = Vec::<Box<dyn Task>>::new();

    debug!("initializing gimbal task");
    let gimbal_task =
        gimbal::create_task(config.gimbal).context("failed to initialize gimbal task")?;
    let gimbal = gimbal_task.handle();
    tasks.push(Box::new(gimbal_task));

    let products = ProductManager::new();

    match &config.product {
        Some(c) => products.connect(Product::from_config(c, gimbal)),
        None => warn!("no product configured, gimbal commands will be refused"),
    }

    let resolver = Arc::new(SessionResolver::new(Some(products.session())));

    debug!("initializing server task");
    let server_task =
        server::create_task(config.server, resolver).context("failed to initialize server task")?;
    tasks.push(Box::new(server_task));

    let mut join_set = JoinSet::new();

    for task in tasks {
        debug!("starting {} task", task.name());
        join_set.spawn(task.run(cancellation_token.clone()));
    }

    while let Some(res) = join_set.join_next().await {
        // if task panicked, then will be Some(Err)
        // if task terminated w/ error, then will be Some(Ok(Err))
        // need to propagate errors in both cases

        match res {
            Err(err) => {
                cancellation_token.cancel();
                return Err(err).context("task failed");
            }
            Ok(Err(err)) => {
                cancellation_token.cancel();
                return Err(err).context("task terminated with error");
            }
            _ => {
                info!("exited task");
            }
        }
    }

    products.disconnect();

    Ok(())
}

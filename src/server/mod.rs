use std::{
    collections::HashMap,
    net::SocketAddr,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use warp::{path::FullPath, Filter};

use crate::{client::Task, gimbal::Rotation, product::DeviceResolver};

mod number;
mod outcome;
mod request;

pub use number::*;
pub use outcome::*;
pub use request::*;

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            address: default_address(),
        }
    }
}

fn default_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Every method and every path is routed to the same handler; only the query
/// string matters. A repeated key keeps its first value.
pub fn routes(
    resolver: Arc<dyn DeviceResolver>,
) -> impl Filter<Extract = (CommandOutcome,), Error = warp::Rejection> + Clone {
    warp::any()
        .and(warp::path::full())
        .and(warp::query::<Vec<(String, String)>>())
        .map(move |path: FullPath, pairs: Vec<(String, String)>| {
            debug!("received http request: {}", path.as_str());
            handle_guarded(resolver.as_ref(), &query_params(pairs))
        })
}

/// Like [`handle`], but a panic anywhere in the handler becomes an
/// `UnexpectedFailure` instead of tearing down the connection.
fn handle_guarded(
    resolver: &dyn DeviceResolver,
    params: &HashMap<String, String>,
) -> CommandOutcome {
    match panic::catch_unwind(AssertUnwindSafe(|| handle(resolver, params))) {
        Ok(outcome) => outcome,
        Err(payload) => {
            let reason = if let Some(message) = payload.downcast_ref::<&str>() {
                message.to_string()
            } else if let Some(message) = payload.downcast_ref::<String>() {
                message.clone()
            } else {
                "request handler panicked".to_owned()
            };

            error!("unexpected error: {}", reason);
            CommandOutcome::UnexpectedFailure(reason)
        }
    }
}

/// Turns one request into exactly one outcome. A rotation is queued only when
/// the outcome is `Submitted`; the response never waits for the gimbal to
/// finish moving.
pub fn handle(resolver: &dyn DeviceResolver, params: &HashMap<String, String>) -> CommandOutcome {
    match try_handle(resolver, params) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!("unexpected error: {:#}", err);
            CommandOutcome::UnexpectedFailure(err.to_string())
        }
    }
}

fn try_handle(
    resolver: &dyn DeviceResolver,
    params: &HashMap<String, String>,
) -> anyhow::Result<CommandOutcome> {
    let gimbal = match resolver.resolve_gimbal()? {
        Some(gimbal) => gimbal,
        None => {
            error!("gimbal not available");
            return Ok(CommandOutcome::DeviceUnavailable);
        }
    };

    let request = match RotationRequest::from_params(params) {
        Ok(request) => request,
        Err(err) => {
            warn!("invalid parameter format: {}={:?}", err.name, err.value);
            return Ok(CommandOutcome::InvalidParameter(format!(
                "{}={}",
                err.name, err.value
            )));
        }
    };

    debug!(
        "executing gimbal command: pitch={}, yaw={}",
        format_fixed2(request.pitch),
        format_fixed2(request.yaw)
    );

    gimbal.rotate(
        Rotation::relative(request.pitch, request.yaw),
        |result| match result {
            Ok(()) => debug!("gimbal command executed successfully"),
            Err(err) => error!("gimbal rotation error: {:#}", err),
        },
    )?;

    Ok(CommandOutcome::Submitted(request))
}

pub struct ServerTask {
    address: SocketAddr,
    resolver: Arc<dyn DeviceResolver>,
}

pub fn create_task(
    config: ServerConfig,
    resolver: Arc<dyn DeviceResolver>,
) -> anyhow::Result<ServerTask> {
    Ok(ServerTask {
        address: config.address,
        resolver,
    })
}

#[async_trait]
impl Task for ServerTask {
    fn name(&self) -> &'static str {
        "server"
    }

    async fn run(self: Box<Self>, cancel: CancellationToken) -> anyhow::Result<()> {
        let Self { address, resolver } = *self;

        info!("initializing server");

        let (address, server) = warp::serve(routes(resolver))
            .try_bind_with_graceful_shutdown(address, async move { cancel.cancelled().await })
            .with_context(|| format!("failed to bind server to {}", address))?;

        info!("listening at {}", address);

        server.await;

        Ok(())
    }
}

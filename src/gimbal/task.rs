use anyhow::{anyhow, bail};
use async_trait::async_trait;
use tokio::select;
use tokio_util::sync::CancellationToken;

use crate::client::{ChannelCommandSink, ChannelCommandSource, Command, Task};

use super::{
    GimbalConfig, GimbalHandle, GimbalInterface, GimbalRequest, GimbalResponse,
    SoftwareGimbalInterface,
};

/// Owns the gimbal interface. Only one rotation reaches the mount at a time,
/// and the newest command always wins: a rotation that arrives while another
/// is waiting or moving replaces it, and the replaced one completes with an
/// error.
pub struct GimbalTask {
    iface: Box<dyn GimbalInterface>,
    cmd_tx: ChannelCommandSink<GimbalRequest, GimbalResponse>,
    cmd_rx: ChannelCommandSource<GimbalRequest, GimbalResponse>,
}

pub fn create_task(config: GimbalConfig) -> anyhow::Result<GimbalTask> {
    let iface = Box::new(SoftwareGimbalInterface::new(&config));
    GimbalTask::with_interface(iface, config.queue_size)
}

impl GimbalTask {
    pub fn with_interface(
        iface: Box<dyn GimbalInterface>,
        queue_size: usize,
    ) -> anyhow::Result<Self> {
        if queue_size == 0 {
            bail!("gimbal queue size must be at least 1");
        }

        let (cmd_tx, cmd_rx) = flume::bounded(queue_size);

        Ok(GimbalTask {
            iface,
            cmd_tx,
            cmd_rx,
        })
    }

    pub fn handle(&self) -> GimbalHandle {
        GimbalHandle::new(self.cmd_tx.clone())
    }
}

#[async_trait]
impl Task for GimbalTask {
    fn name(&self) -> &'static str {
        "gimbal"
    }

    async fn run(self: Box<Self>, cancel: CancellationToken) -> anyhow::Result<()> {
        let Self {
            mut iface, cmd_rx, ..
        } = *self;

        let loop_fut = async {
            let mut pending = None;

            loop {
                let (cmd, ret_tx) = match pending.take() {
                    Some(cmd) => cmd,
                    None => match cmd_rx.recv_async().await {
                        Ok(cmd) => latest(cmd, &cmd_rx),
                        Err(_) => break,
                    },
                };

                let result = match cmd {
                    GimbalRequest::Rotate(rotation) => {
                        debug!("rotating gimbal: {:?}", rotation);

                        select! {
                            biased;
                            result = iface.rotate(&rotation) => result,
                            Ok(next) = cmd_rx.recv_async() => {
                                debug!("rotation interrupted by a newer command");
                                pending = Some(latest(next, &cmd_rx));
                                Err(superseded())
                            }
                        }
                    }
                };

                if result.is_ok() {
                    debug!("gimbal attitude: {:?}", iface.attitude());
                }

                // the requester may have stopped listening, which is fine
                let _ = ret_tx.send(result);
            }

            Ok::<_, anyhow::Error>(())
        };

        select! {
          _ = cancel.cancelled() => {}
          res = loop_fut => { res? }
        }

        Ok(())
    }
}

/// Drains the commands already waiting and returns the newest. The older ones
/// complete without ever reaching the mount.
fn latest(
    mut cmd: Command<GimbalRequest, GimbalResponse>,
    cmd_rx: &ChannelCommandSource<GimbalRequest, GimbalResponse>,
) -> Command<GimbalRequest, GimbalResponse> {
    while let Ok(next) = cmd_rx.try_recv() {
        let (_, ret_tx) = std::mem::replace(&mut cmd, next);
        let _ = ret_tx.send(Err(superseded()));
    }

    cmd
}

fn superseded() -> anyhow::Error {
    anyhow!("rotation superseded by a newer command")
}

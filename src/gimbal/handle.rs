use std::fmt;

use anyhow::anyhow;
use tokio::sync::oneshot;

use crate::client::ChannelCommandSink;

use super::{GimbalRequest, GimbalResponse, Rotation};

/// Cheap, cloneable reference to a running gimbal task.
#[derive(Clone)]
pub struct GimbalHandle {
    cmd_tx: ChannelCommandSink<GimbalRequest, GimbalResponse>,
}

impl GimbalHandle {
    pub fn new(cmd_tx: ChannelCommandSink<GimbalRequest, GimbalResponse>) -> Self {
        GimbalHandle { cmd_tx }
    }

    /// Queues a rotation without waiting for the gimbal to move.
    ///
    /// Returns an error only if the rotation could not be queued. Otherwise
    /// `on_complete` is called exactly once, from a background task, with the
    /// result the gimbal eventually reports.
    pub fn rotate<F>(&self, rotation: Rotation, on_complete: F) -> anyhow::Result<()>
    where
        F: FnOnce(anyhow::Result<()>) + Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.cmd_tx
            .try_send((GimbalRequest::Rotate(rotation), ret_tx))
            .map_err(|err| match err {
                flume::TrySendError::Full(_) => anyhow!("gimbal command queue is full"),
                flume::TrySendError::Disconnected(_) => {
                    anyhow!("gimbal is no longer accepting commands")
                }
            })?;

        tokio::spawn(async move {
            let result = match ret_rx.await {
                Ok(result) => result,
                Err(_) => Err(anyhow!("gimbal dropped the command without responding")),
            };

            on_complete(result);
        });

        Ok(())
    }
}

impl fmt::Debug for GimbalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GimbalHandle")
            .field("queued", &self.cmd_tx.len())
            .finish()
    }
}

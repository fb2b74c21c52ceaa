use crate::gimbal::GimbalHandle;

use super::{GimbalCapability, Session};

/// Finds the gimbal of whatever product is connected at the time of the call.
/// Handles are never cached; callers resolve again for every command.
pub trait DeviceResolver: Send + Sync {
    /// `Ok(None)` means no gimbal is available right now. An error means the
    /// lookup itself failed.
    fn resolve_gimbal(&self) -> anyhow::Result<Option<GimbalHandle>>;
}

pub struct SessionResolver {
    session: Option<Session>,
}

impl SessionResolver {
    pub fn new(session: Option<Session>) -> Self {
        SessionResolver { session }
    }
}

impl DeviceResolver for SessionResolver {
    fn resolve_gimbal(&self) -> anyhow::Result<Option<GimbalHandle>> {
        let session = match &self.session {
            Some(session) => session,
            None => return Ok(None),
        };

        Ok(session.product().and_then(|product| product.gimbal()))
    }
}

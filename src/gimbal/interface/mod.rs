use async_trait::async_trait;

// virtual gimbal
pub mod software;

pub use software::*;

use super::{Attitude, Rotation};

#[async_trait]
pub trait GimbalInterface: Send {
    /// Executes a rotation, resolving once the gimbal has finished moving or
    /// has refused the move. Dropping the future stops the move where it is.
    async fn rotate(&mut self, rotation: &Rotation) -> anyhow::Result<()>;

    /// The orientation the gimbal currently reports.
    fn attitude(&self) -> Attitude;
}

pub mod command;
pub mod config;
mod handle;
mod interface;
pub mod task;

pub use command::*;
pub use self::config::*;
pub use handle::*;
pub use interface::{GimbalInterface, SoftwareGimbalInterface};
pub use task::*;

/// Orientation of the gimbal in degrees.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Attitude {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl Attitude {
    pub fn new(roll: f32, pitch: f32, yaw: f32) -> Self {
        Attitude { roll, pitch, yaw }
    }

    /// Linear interpolation towards `target`, where `t` runs from 0 to 1.
    pub fn lerp(&self, target: &Attitude, t: f32) -> Attitude {
        Attitude {
            roll: self.roll + (target.roll - self.roll) * t,
            pitch: self.pitch + (target.pitch - self.pitch) * t,
            yaw: self.yaw + (target.yaw - self.yaw) * t,
        }
    }
}

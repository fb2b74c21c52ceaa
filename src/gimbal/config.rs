use serde::Deserialize;

#[derive(Copy, Clone, PartialEq, Debug, Deserialize)]
pub struct AxisLimits {
    /// Lowest reachable angle in degrees.
    pub min: f32,
    /// Highest reachable angle in degrees.
    pub max: f32,
}

impl AxisLimits {
    pub fn contains(&self, angle: f32) -> bool {
        angle >= self.min && angle <= self.max
    }
}

#[derive(Debug, Deserialize)]
pub struct GimbalConfig {
    /// Number of commands that may wait to be picked up by the gimbal task
    /// before new ones are refused. The task drains the queue whenever a
    /// command arrives and keeps only the newest.
    #[serde(default = "default_queue_size")]
    pub queue_size: usize,

    #[serde(default = "default_pitch_limits")]
    pub pitch: AxisLimits,

    #[serde(default = "default_yaw_limits")]
    pub yaw: AxisLimits,
}

impl Default for GimbalConfig {
    fn default() -> Self {
        GimbalConfig {
            queue_size: default_queue_size(),
            pitch: default_pitch_limits(),
            yaw: default_yaw_limits(),
        }
    }
}

fn default_queue_size() -> usize {
    256
}

fn default_pitch_limits() -> AxisLimits {
    AxisLimits {
        min: -90.0,
        max: 30.0,
    }
}

fn default_yaw_limits() -> AxisLimits {
    AxisLimits {
        min: -320.0,
        max: 320.0,
    }
}

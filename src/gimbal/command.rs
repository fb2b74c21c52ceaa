use std::time::Duration;

/// Roll value meaning "leave this axis alone".
pub const NO_ROTATION: f32 = 0.0;

/// Execution time for incremental moves. Short enough for a tracking loop to
/// issue several corrections per second.
pub const RELATIVE_ROTATION_DURATION: Duration = Duration::from_millis(500);

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum RotationMode {
    /// Angles are deltas from the current orientation.
    RelativeAngle,
}

/// A single move for the gimbal to execute. All angles are in degrees.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Rotation {
    pub mode: RotationMode,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    /// How long the gimbal should take to complete the move.
    pub duration: Duration,
}

impl Rotation {
    pub fn relative(pitch: f32, yaw: f32) -> Self {
        Rotation {
            mode: RotationMode::RelativeAngle,
            pitch,
            yaw,
            roll: NO_ROTATION,
            duration: RELATIVE_ROTATION_DURATION,
        }
    }
}

#[derive(Debug, Clone)]
pub enum GimbalRequest {
    Rotate(Rotation),
}

pub type GimbalResponse = ();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_rotation_fixes_roll_and_duration() {
        let rotation = Rotation::relative(12.5, -3.25);

        assert_eq!(rotation.mode, RotationMode::RelativeAngle);
        assert_eq!(rotation.pitch, 12.5);
        assert_eq!(rotation.yaw, -3.25);
        assert_eq!(rotation.roll, NO_ROTATION);
        assert_eq!(rotation.duration, Duration::from_secs_f32(0.5));
    }
}

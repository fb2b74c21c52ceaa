use anyhow::bail;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::time::interval;

use super::GimbalInterface;
use crate::gimbal::{Attitude, AxisLimits, GimbalConfig, Rotation, RotationMode};

const TICK: Duration = Duration::from_millis(16);

/// Simulated two-axis mount. Moves are interpolated linearly over the requested
/// duration and refused up front if the target is out of reach.
#[derive(Debug)]
pub struct SoftwareGimbalInterface {
    attitude: Attitude,
    pitch_limits: AxisLimits,
    yaw_limits: AxisLimits,

    // the last time we reported the gimbal state to the user
    last_report: Option<Instant>,
}

impl SoftwareGimbalInterface {
    pub fn new(config: &GimbalConfig) -> Self {
        SoftwareGimbalInterface {
            attitude: Attitude::default(),
            pitch_limits: config.pitch,
            yaw_limits: config.yaw,
            last_report: None,
        }
    }

    fn target(&self, rotation: &Rotation) -> anyhow::Result<Attitude> {
        let current = self.attitude;

        let target = match rotation.mode {
            RotationMode::RelativeAngle => Attitude::new(
                current.roll + rotation.roll,
                current.pitch + rotation.pitch,
                current.yaw + rotation.yaw,
            ),
        };

        if !self.pitch_limits.contains(target.pitch) {
            bail!(
                "pitch target {:.2}° is outside of the reachable range [{}°, {}°]",
                target.pitch,
                self.pitch_limits.min,
                self.pitch_limits.max
            );
        }

        if !self.yaw_limits.contains(target.yaw) {
            bail!(
                "yaw target {:.2}° is outside of the reachable range [{}°, {}°]",
                target.yaw,
                self.yaw_limits.min,
                self.yaw_limits.max
            );
        }

        Ok(target)
    }

    fn report(&mut self) {
        if self.last_report.map_or(true, |last_report| {
            Instant::now() - last_report > Duration::from_secs(1)
        }) {
            self.last_report = Some(Instant::now());
            info!(
                "current angle: {:.5}°, {:.5}°, {:.5}°",
                self.attitude.roll, self.attitude.pitch, self.attitude.yaw
            );
        }
    }
}

#[async_trait]
impl GimbalInterface for SoftwareGimbalInterface {
    async fn rotate(&mut self, rotation: &Rotation) -> anyhow::Result<()> {
        let start = self.attitude;
        let target = self.target(rotation)?;

        let steps = ((rotation.duration.as_secs_f32() / TICK.as_secs_f32()).ceil() as u32).max(1);
        let mut int = interval(TICK);

        // the first tick of an interval completes immediately
        int.tick().await;

        for step in 1..=steps {
            int.tick().await;
            self.attitude = start.lerp(&target, step as f32 / steps as f32);
            self.report();
        }

        self.attitude = target;

        Ok(())
    }

    fn attitude(&self) -> Attitude {
        self.attitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick(mut rotation: Rotation) -> Rotation {
        rotation.duration = Duration::from_millis(20);
        rotation
    }

    #[tokio::test]
    async fn relative_rotations_accumulate() {
        let mut gimbal = SoftwareGimbalInterface::new(&GimbalConfig::default());

        gimbal.rotate(&quick(Rotation::relative(-10.0, 5.0))).await.unwrap();
        gimbal.rotate(&quick(Rotation::relative(-2.5, 5.0))).await.unwrap();

        let attitude = gimbal.attitude();
        assert_eq!(attitude.pitch, -12.5);
        assert_eq!(attitude.yaw, 10.0);
        assert_eq!(attitude.roll, 0.0);
    }

    #[tokio::test]
    async fn unreachable_target_is_refused_without_moving() {
        let mut gimbal = SoftwareGimbalInterface::new(&GimbalConfig::default());

        let err = gimbal
            .rotate(&quick(Rotation::relative(45.0, 0.0)))
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("pitch target 45.00°"));
        assert_eq!(gimbal.attitude(), Attitude::default());
    }

    #[tokio::test]
    async fn non_finite_angles_are_refused() {
        let mut gimbal = SoftwareGimbalInterface::new(&GimbalConfig::default());

        assert!(gimbal
            .rotate(&quick(Rotation::relative(0.0, f32::NAN)))
            .await
            .is_err());
        assert!(gimbal
            .rotate(&quick(Rotation::relative(f32::INFINITY, 0.0)))
            .await
            .is_err());
    }
}

use warp::{http::StatusCode, Reply};

use super::{format_fixed2, RotationRequest};

/// How a single request was resolved. Each variant maps to one fixed status
/// code and plain-text body.
#[derive(Clone, PartialEq, Debug)]
pub enum CommandOutcome {
    Submitted(RotationRequest),
    DeviceUnavailable,
    InvalidParameter(String),
    UnexpectedFailure(String),
}

impl CommandOutcome {
    pub fn status(&self) -> StatusCode {
        match self {
            CommandOutcome::Submitted(_) => StatusCode::OK,
            CommandOutcome::DeviceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            CommandOutcome::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            CommandOutcome::UnexpectedFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> String {
        match self {
            CommandOutcome::Submitted(RotationRequest { pitch, yaw }) => format!(
                "OK: Gimbal command sent (pitch={}, yaw={})",
                format_fixed2(*pitch),
                format_fixed2(*yaw)
            ),
            CommandOutcome::DeviceUnavailable => "ERROR: Gimbal not connected".to_owned(),
            // the reason is only logged, clients get a fixed message
            CommandOutcome::InvalidParameter(_) => "ERROR: Invalid number format".to_owned(),
            CommandOutcome::UnexpectedFailure(reason) => format!("ERROR: {}", reason),
        }
    }
}

impl Reply for CommandOutcome {
    fn into_response(self) -> warp::reply::Response {
        warp::reply::with_status(self.body(), self.status()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodies_match_response_contract() {
        let cases = vec![
            (
                CommandOutcome::Submitted(RotationRequest { pitch: 0.0, yaw: 0.0 }),
                200,
                "OK: Gimbal command sent (pitch=0.00, yaw=0.00)",
            ),
            (
                CommandOutcome::Submitted(RotationRequest {
                    pitch: 12.5,
                    yaw: -3.25,
                }),
                200,
                "OK: Gimbal command sent (pitch=12.50, yaw=-3.25)",
            ),
            (
                CommandOutcome::Submitted(RotationRequest {
                    pitch: 0.125,
                    yaw: 0.0,
                }),
                200,
                "OK: Gimbal command sent (pitch=0.13, yaw=0.00)",
            ),
            (
                CommandOutcome::Submitted(RotationRequest {
                    pitch: 1.625,
                    yaw: -2.875,
                }),
                200,
                "OK: Gimbal command sent (pitch=1.63, yaw=-2.88)",
            ),
            (
                CommandOutcome::Submitted(RotationRequest {
                    pitch: f32::INFINITY,
                    yaw: f32::NAN,
                }),
                200,
                "OK: Gimbal command sent (pitch=Infinity, yaw=NaN)",
            ),
            (
                CommandOutcome::DeviceUnavailable,
                503,
                "ERROR: Gimbal not connected",
            ),
            (
                CommandOutcome::InvalidParameter("pitch=abc".to_owned()),
                400,
                "ERROR: Invalid number format",
            ),
            (
                CommandOutcome::UnexpectedFailure("X".to_owned()),
                500,
                "ERROR: X",
            ),
        ];

        for (outcome, status, body) in cases {
            assert_eq!(outcome.status().as_u16(), status);
            assert_eq!(outcome.body(), body);
        }
    }

    #[test]
    fn success_body_rounds_to_two_decimals() {
        let outcome = CommandOutcome::Submitted(RotationRequest {
            pitch: 1.0 / 3.0,
            yaw: -90.0,
        });
        assert_eq!(
            outcome.body(),
            "OK: Gimbal command sent (pitch=0.33, yaw=-90.00)"
        );
    }
}

use std::collections::HashMap;

use super::parse_float;

/// Pitch and yaw deltas requested by a client, in degrees.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RotationRequest {
    pub pitch: f32,
    pub yaw: f32,
}

#[derive(Clone, PartialEq, Debug)]
pub struct InvalidParameter {
    pub name: &'static str,
    pub value: String,
}

/// Collects decoded query pairs into a map. When a key repeats, its first
/// value is kept. Keys are trimmed; values are left for the number parser.
pub fn query_params(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut params = HashMap::new();

    for (key, value) in pairs {
        params.entry(key.trim().to_owned()).or_insert(value);
    }

    params
}

impl RotationRequest {
    /// Reads `pitch` and `yaw` from query parameters. A missing parameter
    /// means no movement on that axis. Other parameters are ignored.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, InvalidParameter> {
        Ok(RotationRequest {
            pitch: parse_param(params, "pitch")?,
            yaw: parse_param(params, "yaw")?,
        })
    }
}

fn parse_param(
    params: &HashMap<String, String>,
    name: &'static str,
) -> Result<f32, InvalidParameter> {
    match params.get(name) {
        None => Ok(0.0),
        Some(value) => parse_float(value).ok_or_else(|| InvalidParameter {
            name,
            value: value.clone(),
        }),
    }
}

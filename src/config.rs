use std::path::PathBuf;

use config::{Config, ConfigError};
use serde::Deserialize;

use crate::{gimbal::GimbalConfig, product::ProductConfig, server::ServerConfig};

#[derive(Debug, Deserialize)]
pub struct GimbalServerConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub gimbal: GimbalConfig,

    /// The product connected at startup. If absent, no product is connected.
    pub product: Option<ProductConfig>,
}

impl GimbalServerConfig {
    /// Reads `gimbal-server.toml` from the working directory if it exists.
    pub fn read() -> Result<Self, ConfigError> {
        let mut c = Config::new();

        c.merge(config::File::with_name("gimbal-server").required(false))?;
        c.merge(Self::environment())?;

        c.try_into()
    }

    pub fn read_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let mut c = Config::new();

        c.merge(config::File::from(path))?;
        c.merge(Self::environment())?;

        c.try_into()
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("GIMBAL_SERVER").separator("__")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductKind;
    use config::FileFormat;

    fn parse(toml: &str) -> GimbalServerConfig {
        let mut c = Config::new();
        c.merge(config::File::from_str(toml, FileFormat::Toml))
            .unwrap();
        c.try_into().unwrap()
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse("");

        assert_eq!(config.server.address.port(), 8080);
        assert_eq!(config.gimbal.queue_size, 256);
        assert_eq!(config.gimbal.pitch.min, -90.0);
        assert!(config.product.is_none());
    }

    #[test]
    fn full_config_is_read() {
        let config = parse(
            r#"
            [server]
            address = "127.0.0.1:9000"

            [gimbal]
            queue_size = 4
            pitch = { min = -120.0, max = 45.0 }

            [product]
            kind = "handheld"
            model = "OM4"
            "#,
        );

        assert_eq!(config.server.address.to_string(), "127.0.0.1:9000");
        assert_eq!(config.gimbal.queue_size, 4);
        assert_eq!(config.gimbal.pitch.max, 45.0);
        assert_eq!(config.gimbal.yaw.max, 320.0);

        let product = config.product.unwrap();
        assert_eq!(product.kind, ProductKind::Handheld);
        assert_eq!(product.model, "OM4");
        assert!(product.gimbal);
    }
}

//! Connected products and the session state used to find their gimbal.

pub mod config;
mod resolver;
mod session;

pub use self::config::*;
pub use resolver::*;
pub use session::*;

use crate::gimbal::GimbalHandle;

/// Something that may carry a controllable gimbal.
pub trait GimbalCapability {
    fn gimbal(&self) -> Option<GimbalHandle>;
}

/// A flying platform. Its gimbal is an accessory mounted on the airframe.
#[derive(Clone, Debug)]
pub struct Aircraft {
    pub model: String,
    pub gimbal: Option<GimbalHandle>,
}

impl GimbalCapability for Aircraft {
    fn gimbal(&self) -> Option<GimbalHandle> {
        self.gimbal.clone()
    }
}

/// A handheld product that exposes its gimbal directly.
#[derive(Clone, Debug)]
pub struct HandheldProduct {
    pub model: String,
    pub gimbal: Option<GimbalHandle>,
}

impl GimbalCapability for HandheldProduct {
    fn gimbal(&self) -> Option<GimbalHandle> {
        self.gimbal.clone()
    }
}

#[derive(Clone, Debug)]
pub enum Product {
    Aircraft(Aircraft),
    Handheld(HandheldProduct),
}

impl Product {
    /// Builds the product described by `config`. `gimbal` is attached only if
    /// the configuration says the product carries one.
    pub fn from_config(config: &ProductConfig, gimbal: GimbalHandle) -> Self {
        let model = config.model.clone();
        let gimbal = if config.gimbal { Some(gimbal) } else { None };

        match config.kind {
            ProductKind::Aircraft => Product::Aircraft(Aircraft { model, gimbal }),
            ProductKind::Handheld => Product::Handheld(HandheldProduct { model, gimbal }),
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Product::Aircraft(aircraft) => &aircraft.model,
            Product::Handheld(handheld) => &handheld.model,
        }
    }
}

impl GimbalCapability for Product {
    fn gimbal(&self) -> Option<GimbalHandle> {
        match self {
            Product::Aircraft(aircraft) => aircraft.gimbal(),
            Product::Handheld(handheld) => handheld.gimbal(),
        }
    }
}

use serde::Deserialize;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductKind {
    Aircraft,
    Handheld,
}

/// Describes the product that is connected when the system starts.
#[derive(Debug, Deserialize)]
pub struct ProductConfig {
    pub kind: ProductKind,
    pub model: String,

    /// Whether the product carries a gimbal.
    #[serde(default = "default_gimbal")]
    pub gimbal: bool,
}

fn default_gimbal() -> bool {
    true
}

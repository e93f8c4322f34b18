//! Literal inputs of the product suite.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub const HANDLER_NAME: &str = "Demo Handler";
pub const HANDLER_INFO: &str = "This is an unreal Handler for demo purposes";
pub const ADDITIONAL_INFORMATION: &str = "Additional Information";
/// Description of the action every product records on creation.
pub const CREATION_ACTION: &str = "Product creation";
/// Logged once the last phase has finished.
pub const COMPLETION_NOTE: &str = "Product adding tested.";

/// Reference point in micro-degrees (39.952583, -75.165222).
pub const REFERENCE_LON_MICRODEG: i64 = 39_952_583;
pub const REFERENCE_LAT_MICRODEG: i64 = -75_165_222;

/// How a coordinate in degrees becomes the `int256` passed to `createProduct`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoordinateEncoding {
    /// `deg * 10 ^ 10` with `^` as 32-bit XOR, as historically submitted.
    #[default]
    LegacyXor,
    /// `deg * 10^10`.
    Scaled,
}

impl CoordinateEncoding {
    pub fn encode(self, microdegrees: i64) -> i64 {
        match self {
            // ToInt32(deg * 10) truncates toward zero, like integer division
            CoordinateEncoding::LegacyXor => i64::from((microdegrees / 100_000) as i32 ^ 10),
            CoordinateEncoding::Scaled => microdegrees * 10_000,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CoordinateEncoding::LegacyXor => "legacy-xor",
            CoordinateEncoding::Scaled => "scaled",
        }
    }
}

impl fmt::Display for CoordinateEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoordinateEncoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy-xor" | "legacy" | "xor" => Ok(CoordinateEncoding::LegacyXor),
            "scaled" => Ok(CoordinateEncoding::Scaled),
            other => Err(ConfigError::InvalidValue {
                field: "scenario.coordinate_encoding",
                reason: format!("unknown encoding '{}'", other),
            }),
        }
    }
}

/// Encoded longitude/latitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinates {
    pub lon: i64,
    pub lat: i64,
}

impl Coordinates {
    pub fn reference(encoding: CoordinateEncoding) -> Self {
        Self {
            lon: encoding.encode(REFERENCE_LON_MICRODEG),
            lat: encoding.encode(REFERENCE_LAT_MICRODEG),
        }
    }
}

/// Per-product literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSpec {
    pub id: u64,
    pub name: String,
    pub price: u64,
}

impl ProductSpec {
    pub fn new(id: u64, name: impl Into<String>, price: u64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

/// Everything the suite submits, apart from timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub handler_name: String,
    pub handler_info: String,
    pub additional_information: String,
    pub coordinates: Coordinates,
    pub products: Vec<ProductSpec>,
}

impl Scenario {
    pub fn new(encoding: CoordinateEncoding) -> Self {
        Self {
            handler_name: HANDLER_NAME.to_string(),
            handler_info: HANDLER_INFO.to_string(),
            additional_information: ADDITIONAL_INFORMATION.to_string(),
            coordinates: Coordinates::reference(encoding),
            products: vec![
                ProductSpec::new(1, "Test Product 1", 1),
                ProductSpec::new(2, "Test Product 2", 2),
            ],
        }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new(CoordinateEncoding::default())
    }
}

/// Current Unix time in milliseconds.
pub fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

//! Package model and normalized dimensions.
//!
//! A [`Package`] can only be obtained through [`Package::new`], which rejects
//! zero, negative and out-of-range measurements. Once built it never changes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A parcel to be rated.
///
/// Dimensions are millimeters, weight is grams. All four values are
/// strictly positive.
///
/// # Examples
///
/// ```
/// use parcel_rate_engine::models::Package;
///
/// let package = Package::new(300, 300, 150, 1000).unwrap();
/// assert_eq!(package.length(), 300);
/// assert_eq!(package.to_string(), "300x300x150 mm, 1000 g");
///
/// assert!(Package::new(0, 300, 150, 1000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PackageFields")]
pub struct Package {
    length: u32,
    width: u32,
    height: u32,
    weight: u32,
}

impl Package {
    /// Builds a package, validating that every measurement is positive and
    /// fits in 32 bits.
    ///
    /// Fields are checked in the order length, width, height, weight; the
    /// first invalid one is reported as [`EngineError::InvalidPackage`].
    pub fn new(length: i64, width: i64, height: i64, weight: i64) -> EngineResult<Self> {
        Ok(Self {
            length: positive_measurement("length", length)?,
            width: positive_measurement("width", width)?,
            height: positive_measurement("height", height)?,
            weight: positive_measurement("weight", weight)?,
        })
    }

    /// Length in millimeters.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Width in millimeters.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in millimeters.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Weight in grams.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// The three dimensions in declared order: length, width, height.
    pub fn dimensions(&self) -> [u32; 3] {
        [self.length, self.width, self.height]
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}x{} mm, {} g",
            self.length, self.width, self.height, self.weight
        )
    }
}

/// Unvalidated wire form of a package.
#[derive(Deserialize)]
struct PackageFields {
    length: i64,
    width: i64,
    height: i64,
    weight: i64,
}

impl TryFrom<PackageFields> for Package {
    type Error = EngineError;

    fn try_from(fields: PackageFields) -> EngineResult<Self> {
        Package::new(fields.length, fields.width, fields.height, fields.weight)
    }
}

fn positive_measurement(field: &str, value: i64) -> EngineResult<u32> {
    if value <= 0 {
        return Err(EngineError::InvalidPackage {
            field: field.to_string(),
            message: format!("must be positive, got {}", value),
        });
    }

    u32::try_from(value).map_err(|_| EngineError::InvalidPackage {
        field: field.to_string(),
        message: format!("must not exceed {}, got {}", u32::MAX, value),
    })
}

/// A package's dimensions sorted ascending.
///
/// Which physical axis was called "length" no longer matters once a package
/// is normalized; only the relative ordering is used for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDimensions {
    /// The smallest dimension (d0).
    pub smallest: u32,
    /// The middle dimension (d1).
    pub middle: u32,
    /// The largest dimension (d2).
    pub largest: u32,
}

impl NormalizedDimensions {
    /// Returns the dimensions as `[d0, d1, d2]`.
    pub fn as_array(&self) -> [u32; 3] {
        [self.smallest, self.middle, self.largest]
    }
}

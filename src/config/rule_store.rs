//! Rule store: loading and persisting rule sets.
//!
//! Rules are stored as indexed key-value pairs:
//!
//! ```text
//! entry.0.dimensions=300x300x150x1000
//! entry.0.price=3.89
//! entry.1.dimensions=600x300x150x2000
//! entry.1.price=4.39
//! ```
//!
//! Indices start at 0 and are contiguous; loading stops at the first index
//! with no `dimensions` key. Any malformed entry aborts the whole load.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Utc;
use encoding_rs::mem::{decode_latin1, encode_latin1_lossy};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::calculation::normalize_and_order;
use crate::error::{EngineError, EngineResult};
use crate::models::{RateRule, RuleSet};

use super::properties::Properties;

/// Header comment written at the top of persisted rule files.
pub const RULES_FILE_HEADER: &str = "Package Configurations";

/// The default tariff in file form, as shipped in `config/default.properties`.
pub const DEFAULT_RULES: &str = include_str!("../../config/default.properties");

const STREAM_LOCATION: &str = "<stream>";

fn dimensions_key(index: usize) -> String {
    format!("entry.{}.dimensions", index)
}

fn price_key(index: usize) -> String {
    format!("entry.{}.price", index)
}

/// Parses rule set text.
///
/// # Errors
///
/// Returns [`EngineError::ConfigFormat`] if any `dimensions` value does not
/// have exactly four non-negative integer fields joined by `x`, or if the
/// matching `price` is missing or not a decimal number. No partial rule set
/// is returned.
///
/// # Example
///
/// ```
/// use parcel_rate_engine::config::parse_rules;
///
/// let rules = parse_rules("entry.0.dimensions=300x300x150x1000\nentry.0.price=3.89\n").unwrap();
/// assert_eq!(rules.len(), 1);
///
/// assert!(parse_rules("entry.0.dimensions=10x10x10\nentry.0.price=1.00\n").is_err());
/// ```
pub fn parse_rules(text: &str) -> EngineResult<RuleSet> {
    let properties = Properties::parse(text);
    let mut rules = Vec::new();

    let mut index = 0;
    while let Some(dimensions) = properties.get(&dimensions_key(index)) {
        let [length, width, height, weight] =
            parse_dimensions(&dimensions_key(index), dimensions)?;

        let key = price_key(index);
        let price = match properties.get(&key) {
            Some(value) => parse_price(&key, value)?,
            None => {
                return Err(EngineError::ConfigFormat {
                    key,
                    message: "missing price for rule".to_string(),
                });
            }
        };

        rules.push(RateRule::new(length, width, height, weight, price));
        index += 1;
    }

    debug!(rule_count = rules.len(), "Parsed rule entries");
    Ok(RuleSet::new(rules))
}

/// Reads and parses a rule set from a byte source.
pub fn load_rules<R: Read>(source: R) -> EngineResult<RuleSet> {
    let text = read_source(source, STREAM_LOCATION)?;
    parse_rules(&text)
}

/// Renders a rule set in the key-value format, one `dimensions` and one
/// `price` entry per rule, indexed by list position.
pub fn render_rules(rules: &RuleSet) -> String {
    let mut out = format!("#{}\n#{}\n", RULES_FILE_HEADER, Utc::now().to_rfc3339());

    for (index, rule) in rules.iter().enumerate() {
        out.push_str(&format!(
            "{}={}x{}x{}x{}\n",
            dimensions_key(index),
            rule.length_limit,
            rule.width_limit,
            rule.height_limit,
            rule.weight_limit
        ));
        out.push_str(&format!("{}={}\n", price_key(index), rule.price));
    }

    out
}

/// Writes a rule set to a byte sink.
pub fn persist_rules<W: Write>(rules: &RuleSet, sink: W) -> EngineResult<()> {
    write_sink(rules, sink, STREAM_LOCATION)
}

/// The default tariff parsed from [`DEFAULT_RULES`].
pub fn default_rules() -> EngineResult<RuleSet> {
    parse_rules(DEFAULT_RULES)
}

fn parse_dimensions(key: &str, value: &str) -> EngineResult<[u32; 4]> {
    let fields: Vec<&str> = value.split('x').map(str::trim).collect();
    if fields.len() != 4 {
        return Err(EngineError::ConfigFormat {
            key: key.to_string(),
            message: format!("expected 4 fields joined by 'x', found {}", fields.len()),
        });
    }

    let mut parsed = [0u32; 4];
    for (slot, field) in parsed.iter_mut().zip(fields) {
        *slot = field.parse().map_err(|_| EngineError::ConfigFormat {
            key: key.to_string(),
            message: format!("'{}' is not a non-negative integer", field),
        })?;
    }

    Ok(parsed)
}

fn parse_price(key: &str, value: &str) -> EngineResult<Decimal> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| EngineError::ConfigFormat {
            key: key.to_string(),
            message: format!("'{}' is not a decimal price", value),
        })
}

/// Reads a rule source as ISO-8859-1, the encoding of `.properties` files.
/// Every byte maps to one character, so decoding itself never fails.
fn read_source<R: Read>(mut source: R, location: &str) -> EngineResult<String> {
    let mut bytes = Vec::new();
    source
        .read_to_end(&mut bytes)
        .map_err(|e| EngineError::ConfigIo {
            location: location.to_string(),
            message: e.to_string(),
        })?;
    Ok(decode_latin1(&bytes).into_owned())
}

fn write_sink<W: Write>(rules: &RuleSet, mut sink: W, location: &str) -> EngineResult<()> {
    let io_error = |e: std::io::Error| EngineError::ConfigIo {
        location: location.to_string(),
        message: e.to_string(),
    };

    let text = render_rules(rules);
    sink.write_all(&encode_latin1_lossy(&text))
        .map_err(io_error)?;
    sink.flush().map_err(io_error)
}

/// A rule file on disk.
///
/// # Example
///
/// ```no_run
/// use parcel_rate_engine::config::RuleStore;
///
/// let store = RuleStore::new("./config/default.properties");
/// let rules = store.load()?;
/// store.save(&rules)?;
/// # Ok::<(), parcel_rate_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleStore {
    path: PathBuf,
}

impl RuleStore {
    /// Creates a store for the given file. Nothing is read until
    /// [`load`](RuleStore::load) is called.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the rule set from the file.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigIo`] if the file cannot be opened or read
    /// - [`EngineError::ConfigFormat`] if any entry is malformed
    pub fn load(&self) -> EngineResult<RuleSet> {
        let location = self.path.display().to_string();
        let file = fs::File::open(&self.path).map_err(|e| EngineError::ConfigIo {
            location: location.clone(),
            message: e.to_string(),
        })?;

        let text = read_source(file, &location)?;
        let rules = parse_rules(&text)?;

        info!(path = %location, rule_count = rules.len(), "Loaded rule set");
        Ok(rules)
    }

    /// Loads the rule set and, if `normalize` is set, normalizes and orders
    /// it. Review warnings are logged by the normalization step.
    pub fn load_active(&self, normalize: bool) -> EngineResult<RuleSet> {
        let rules = self.load()?;
        if normalize {
            Ok(normalize_and_order(&rules).rules)
        } else {
            Ok(rules)
        }
    }

    /// Writes the rule set to the file, replacing its contents.
    pub fn save(&self, rules: &RuleSet) -> EngineResult<()> {
        let location = self.path.display().to_string();
        let file = fs::File::create(&self.path).map_err(|e| EngineError::ConfigIo {
            location: location.clone(),
            message: e.to_string(),
        })?;

        write_sink(rules, file, &location)?;

        info!(path = %location, rule_count = rules.len(), "Persisted rule set");
        Ok(())
    }
}

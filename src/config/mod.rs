//! Configuration for the parcel rate engine.
//!
//! Rule sets live in a key-value file read and written by [`RuleStore`].
//! Service settings (listener address, rule file location) are read from
//! YAML by [`EngineSettings`].
//!
//! # Example
//!
//! ```no_run
//! use parcel_rate_engine::config::{EngineSettings, RuleStore};
//!
//! let settings = EngineSettings::load_or_default("./config/engine.yaml")?;
//! let rules = RuleStore::new(&settings.rules.path).load()?;
//! println!("Loaded {} rules", rules.len());
//! # Ok::<(), parcel_rate_engine::error::EngineError>(())
//! ```

mod properties;
mod rule_store;
mod settings;

pub use properties::Properties;
pub use rule_store::{
    DEFAULT_RULES, RULES_FILE_HEADER, RuleStore, default_rules, load_rules, parse_rules,
    persist_rules, render_rules,
};
pub use settings::{
    DEFAULT_SETTINGS_PATH, EngineSettings, RulesSettings, SETTINGS_PATH_ENV, ServerSettings,
};

//! Configuration file parsing and validation

pub mod ruleplan_toml;

pub use ruleplan_toml::{
    CONFIG_FILE, ColorOption, Config, DEFAULT_CONFIG, OutputConfig, OutputFormat, RuleplanMeta,
    RulesConfig,
};

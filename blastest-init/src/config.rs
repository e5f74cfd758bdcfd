/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::io::Read;

use blastest_utils::Parallelism;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rng::DEFAULT_SEED;

/// The content family a test case initializes its operands with.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Initialization {
    /// Integers in `[1, 10]`.
    #[default]
    RandInt,
    /// Uniform reals in `[-0.5, 0.5]`.
    Hpl,
    /// `sin` or `cos` of the flat offset.
    Trig,
}

/// Settings shared by every initialization of a test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InitConfig {
    #[serde(default)]
    pub initialization: Initialization,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub parallelism: Parallelism,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            initialization: Initialization::default(),
            seed: default_seed(),
            parallelism: Parallelism::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not parse initialization config")]
    Parse(#[from] serde_json::Error),
}

impl InitConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a configuration from a JSON stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

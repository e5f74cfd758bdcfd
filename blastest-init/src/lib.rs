/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Deterministic initialization of host matrices and vectors.
//!
//! The [`fill`] routines populate any [`blastest_utils::BatchMut`] following the rules of a
//! [`Shape`], the [`layout`] routines rearrange filled matrices into band, packed and
//! unit-triangular storage, and [`Initializer`] ties both to an [`InitConfig`].

pub mod config;
pub mod fill;
pub mod generator;
pub mod init;
pub mod layout;
pub mod rng;
pub mod shape;

pub use config::{ConfigError, InitConfig, Initialization};
pub use generator::{Constant, Generator, Init, Random, Scalars, Trig};
pub use init::{InitOptions, Initializer, Multipliers, NanPolicy};
pub use rng::RandomStream;
pub use shape::{FillSide, Opposite, Shape, ShapeClass};

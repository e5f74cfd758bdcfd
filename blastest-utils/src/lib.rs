/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Element types and views shared by the generator and the comparator.

pub mod element;
pub use element::{Component, Element};

// Views
pub mod batch;
pub mod strided;
pub mod views;
pub use batch::{Batch, BatchMut};

pub mod parallel;
pub use parallel::Parallelism;

pub mod tracing;

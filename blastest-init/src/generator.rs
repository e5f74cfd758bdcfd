/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Scalar generators feeding the fill routines.
//!
//! A generator produces one value per logical entry and receives the entry's flat offset
//! within its allocation, so position-based content (see [`Trig`]) runs through the same
//! fill machinery as random content.
//!
//! Parallel fills never share a generator between workers. Instead the parent hands out
//! one [`Generator::split`] child per column, in column order, before any work starts.
//! The content of a fill therefore depends only on the parent's state and never on the
//! number of workers.

use std::borrow::BorrowMut;

use blastest_utils::Element;
use serde::{Deserialize, Serialize};

use crate::rng::RandomStream;

/// A source of element values.
pub trait Generator<T>: Send {
    /// The independent generator returned by [`split`](Self::split).
    type Split: Generator<T>;

    /// Produce the value for the entry at flat offset `offset`.
    fn generate(&mut self, offset: usize) -> T;

    /// Derive an independent generator for one column of work.
    fn split(&mut self) -> Self::Split;
}

/// Every entry receives the same value.
#[derive(Debug, Clone, Copy)]
pub struct Constant<T>(pub T);

impl<T: Element> Generator<T> for Constant<T> {
    type Split = Self;

    fn generate(&mut self, _offset: usize) -> T {
        self.0
    }

    fn split(&mut self) -> Self {
        *self
    }
}

/// Entries are produced by a closure of the flat offset.
#[derive(Debug, Clone)]
pub struct Init<F>(pub F);

impl<T, F> Generator<T> for Init<F>
where
    F: FnMut(usize) -> T + Clone + Send,
{
    type Split = Self;

    fn generate(&mut self, offset: usize) -> T {
        (self.0)(offset)
    }

    fn split(&mut self) -> Self {
        self.clone()
    }
}

/// The distribution a [`Random`] generator draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scalars {
    /// Integers in `[1, 10]`.
    Int,
    /// Integers in `[-10, -1]`.
    NegativeInt,
    /// Uniform reals in `[-0.5, 0.5]`.
    Hpl,
    Nan,
}

impl Scalars {
    /// Draw one value from `stream`.
    pub fn draw<T: Element>(self, stream: &mut RandomStream) -> T {
        match self {
            Self::Int => stream.random_int(),
            Self::NegativeInt => stream.random_negative_int(),
            Self::Hpl => stream.random_hpl(),
            Self::Nan => stream.random_nan(),
        }
    }
}

/// Draws entries from a [`RandomStream`].
///
/// The stream is usually borrowed from the caller. Split children own a stream forked from
/// the parent.
#[derive(Debug)]
pub struct Random<S> {
    stream: S,
    scalars: Scalars,
}

impl<'a> Random<&'a mut RandomStream> {
    pub fn new(stream: &'a mut RandomStream, scalars: Scalars) -> Self {
        Self { stream, scalars }
    }
}

impl Random<RandomStream> {
    /// Create a generator owning a stream seeded with `seed`.
    pub fn seeded(seed: u64, scalars: Scalars) -> Self {
        Self {
            stream: RandomStream::new(seed),
            scalars,
        }
    }
}

impl<T, S> Generator<T> for Random<S>
where
    T: Element,
    S: BorrowMut<RandomStream> + Send,
{
    type Split = Random<RandomStream>;

    fn generate(&mut self, _offset: usize) -> T {
        self.scalars.draw(self.stream.borrow_mut())
    }

    fn split(&mut self) -> Random<RandomStream> {
        Random {
            stream: self.stream.borrow_mut().fork(),
            scalars: self.scalars,
        }
    }
}

/// `sin` or `cos` of the flat offset.
///
/// The content is a pure function of the position, so no seed is involved and every value
/// lies in `[-1, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct Trig {
    pub use_cosine: bool,
}

impl<T: Element> Generator<T> for Trig {
    type Split = Self;

    fn generate(&mut self, offset: usize) -> T {
        let x = offset as f64;
        T::from_f64(if self.use_cosine { x.cos() } else { x.sin() })
    }

    fn split(&mut self) -> Self {
        *self
    }
}

///////////
// Tests //
///////////

/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The structural class of a matrix, which decides the entries a fill may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeClass {
    General,
    Hermitian,
    Symmetric,
    Triangular,
    DiagonallyDominantTriangular,
}

/// The populated half of a structured matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillSide {
    Upper,
    Lower,
    Full,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a valid fill side (expected one of 'U', 'L', 'F')")]
pub struct InvalidFillSide(pub char);

impl TryFrom<char> for FillSide {
    type Error = InvalidFillSide;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'U' => Ok(Self::Upper),
            'L' => Ok(Self::Lower),
            'F' => Ok(Self::Full),
            _ => Err(InvalidFillSide(c)),
        }
    }
}

/// What a symmetric or Hermitian fill writes to the half opposite the declared side.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opposite {
    /// The mirrored value (or its conjugate for Hermitian matrices).
    #[default]
    Mirror,
    /// Zero. Used when the two halves live in physically disjoint storage.
    Zero,
}

/// The complete structural description of a fill target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub class: ShapeClass,
    pub side: FillSide,
    pub opposite: Opposite,
}

impl Shape {
    pub fn new(class: ShapeClass, side: FillSide) -> Self {
        Self {
            class,
            side,
            opposite: Opposite::default(),
        }
    }

    pub fn general() -> Self {
        Self::new(ShapeClass::General, FillSide::Full)
    }

    pub fn symmetric(side: FillSide) -> Self {
        Self::new(ShapeClass::Symmetric, side)
    }

    pub fn hermitian(side: FillSide) -> Self {
        Self::new(ShapeClass::Hermitian, side)
    }

    pub fn triangular(side: FillSide) -> Self {
        Self::new(ShapeClass::Triangular, side)
    }

    pub fn diagonally_dominant(side: FillSide) -> Self {
        Self::new(ShapeClass::DiagonallyDominantTriangular, side)
    }

    pub fn with_opposite(self, opposite: Opposite) -> Self {
        Self { opposite, ..self }
    }

    /// Return whether entry `(row, col)` lies in the declared triangle (diagonal included).
    ///
    /// `Full` declares the lower triangle; the upper one is derived from it.
    pub(crate) fn declares(&self, row: usize, col: usize) -> bool {
        match self.side {
            FillSide::Upper => row <= col,
            FillSide::Lower | FillSide::Full => row >= col,
        }
    }

    /// Return the side of a triangular shape, panicking on `Full`.
    pub(crate) fn triangle(&self) -> FillSide {
        assert!(
            self.side != FillSide::Full,
            "{:?} matrices require an upper or lower fill side",
            self.class
        );
        self.side
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case('U', FillSide::Upper)]
    #[case('u', FillSide::Upper)]
    #[case('L', FillSide::Lower)]
    #[case('F', FillSide::Full)]
    fn parse_fill_side(#[case] c: char, #[case] expected: FillSide) {
        assert_eq!(FillSide::try_from(c), Ok(expected));
    }

    #[test]
    fn invalid_fill_side() {
        let err = FillSide::try_from('X').unwrap_err();
        assert_eq!(
            err.to_string(),
            "'X' is not a valid fill side (expected one of 'U', 'L', 'F')"
        );
    }

    #[test]
    fn declared_triangles() {
        let upper = Shape::symmetric(FillSide::Upper);
        assert!(upper.declares(0, 3));
        assert!(upper.declares(2, 2));
        assert!(!upper.declares(3, 0));

        let full = Shape::hermitian(FillSide::Full);
        assert!(full.declares(3, 0));
        assert!(!full.declares(0, 3));
    }

    #[test]
    fn opposite_defaults_to_mirror() {
        let shape = Shape::symmetric(FillSide::Lower);
        assert_eq!(shape.opposite, Opposite::Mirror);
        assert_eq!(shape.with_opposite(Opposite::Zero).opposite, Opposite::Zero);
    }

    #[test]
    #[should_panic(expected = "Triangular matrices require an upper or lower fill side")]
    fn full_triangle_panics() {
        Shape::triangular(FillSide::Full).triangle();
    }
}

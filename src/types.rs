//! Type definitions
use std::fmt;
use std::str::FromStr;

/// The type of a reference cell
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[repr(u8)]
pub enum ReferenceCellType {
    /// A line segment
    Segment = 1,
    /// A triangle
    Triangle = 2,
    /// A tetrahedron (whose faces are all triangles)
    Tetrahedron = 4,
}

impl ReferenceCellType {
    /// Create a reference cell type from a u8
    pub fn from(i: u8) -> Option<ReferenceCellType> {
        match i {
            1 => Some(ReferenceCellType::Segment),
            2 => Some(ReferenceCellType::Triangle),
            4 => Some(ReferenceCellType::Tetrahedron),
            _ => None,
        }
    }
}

impl fmt::Display for ReferenceCellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceCellType::Segment => "Segment",
            ReferenceCellType::Triangle => "Triangle",
            ReferenceCellType::Tetrahedron => "Tetrahedron",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ReferenceCellType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "segment" | "interval" => Ok(ReferenceCellType::Segment),
            "triangle" => Ok(ReferenceCellType::Triangle),
            "tetrahedron" | "tet" => Ok(ReferenceCellType::Tetrahedron),
            _ => Err(Error::UnknownCell(s.to_string())),
        }
    }
}

/// Error type
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No basis is defined for this (cell, degree) pair
    #[error("No {cell} element of degree {degree} is defined")]
    UnsupportedElement {
        /// The requested cell
        cell: ReferenceCellType,
        /// The requested degree
        degree: usize,
    },
    /// The integrand is not a polynomial in the coordinates of the cell
    #[error("Cannot integrate exactly: {integrand}")]
    NonIntegrable {
        /// The offending integrand
        integrand: String,
    },
    /// The expression cannot be differentiated
    #[error("Cannot differentiate {expression}: {reason}")]
    DifferentiationError {
        /// The offending expression
        expression: String,
        /// What is wrong with it
        reason: String,
    },
    /// Assembly was stopped through its cancellation token
    #[error("Assembly cancelled")]
    Cancelled,
    /// A cell name that could not be parsed
    #[error("Unknown cell type: {0}")]
    UnknownCell(String),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_cell() {
        assert_eq!(
            "Triangle".parse::<ReferenceCellType>(),
            Ok(ReferenceCellType::Triangle)
        );
        assert_eq!(
            "interval".parse::<ReferenceCellType>(),
            Ok(ReferenceCellType::Segment)
        );
        assert_eq!(
            "hexahedron".parse::<ReferenceCellType>(),
            Err(Error::UnknownCell("hexahedron".to_string()))
        );
    }

    #[test]
    fn test_from_u8() {
        for cell in [
            ReferenceCellType::Segment,
            ReferenceCellType::Triangle,
            ReferenceCellType::Tetrahedron,
        ] {
            assert_eq!(ReferenceCellType::from(cell as u8), Some(cell));
        }
        assert_eq!(ReferenceCellType::from(3), None);
    }
}

//! Console report of reference element matrices
//!
//! For each element the report has a header line `<cell>, degree <d>`,
//! followed by the mass matrix entries `M[i,j] = <value>` and then the
//! stiffness matrix entries `K[i,j] = <value>`, both in row-major order.
use crate::assembly::{ReferenceMatrices, ReferenceMatrixGenerator};
use crate::matrix::ElementMatrix;
use crate::types::{ReferenceCellType, Result};
use std::fmt;

fn write_matrix(f: &mut fmt::Formatter<'_>, symbol: &str, matrix: &ElementMatrix) -> fmt::Result {
    for ((i, j), value) in matrix.entries() {
        writeln!(f, "{symbol}[{i},{j}] = {value}")?;
    }
    Ok(())
}

impl fmt::Display for ReferenceMatrices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}, degree {}", self.cell_type, self.degree)?;
        write_matrix(f, "M", &self.mass)?;
        write_matrix(f, "K", &self.stiffness)
    }
}

/// Derive the matrices of every requested element and format the report
///
/// Nothing is returned unless every element is derived successfully.
pub fn build_report(
    generator: &ReferenceMatrixGenerator,
    elements: &[(ReferenceCellType, usize)],
) -> Result<String> {
    let matrices = elements
        .iter()
        .map(|(cell_type, degree)| generator.generate(*cell_type, *degree))
        .collect::<Result<Vec<_>>>()?;
    Ok(matrices
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::Error;

    #[test]
    fn test_segment_report() {
        let generator = ReferenceMatrixGenerator::new();
        let report = build_report(&generator, &[(ReferenceCellType::Segment, 1)]).unwrap();
        assert_eq!(
            report,
            "Segment, degree 1\n\
             M[0,0] = 1/3\n\
             M[0,1] = 1/6\n\
             M[1,0] = 1/6\n\
             M[1,1] = 1/3\n\
             K[0,0] = 1\n\
             K[0,1] = -1\n\
             K[1,0] = -1\n\
             K[1,1] = 1\n"
        );
    }

    #[test]
    fn test_no_partial_report() {
        let generator = ReferenceMatrixGenerator::new();
        let result = build_report(
            &generator,
            &[
                (ReferenceCellType::Segment, 1),
                (ReferenceCellType::Segment, 3),
            ],
        );
        assert!(matches!(result, Err(Error::UnsupportedElement { .. })));
    }

    #[test]
    fn test_triangle_header() {
        let generator = ReferenceMatrixGenerator::new();
        let report = build_report(&generator, &[(ReferenceCellType::Triangle, 2)]).unwrap();
        let lines = report.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Triangle, degree 2");
        assert_eq!(lines.len(), 1 + 2 * 36);
        assert_eq!(lines[1], "M[0,0] = 1/60");
        assert_eq!(lines[37], "K[0,0] = 1");
    }
}

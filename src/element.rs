//! Finite elements

pub mod lagrange;
pub mod reference_cell;

pub use lagrange::{LagrangeElement, LagrangeElementFamily};

use crate::symbolic::Expression;
use crate::traits::FiniteElement;
use crate::types::{ReferenceCellType, Result};

/// The number of polynomials of degree at most `degree` on a cell
pub fn polynomial_count(cell_type: ReferenceCellType, degree: usize) -> usize {
    match cell_type {
        ReferenceCellType::Segment => degree + 1,
        ReferenceCellType::Triangle => (degree + 1) * (degree + 2) / 2,
        ReferenceCellType::Tetrahedron => (degree + 1) * (degree + 2) * (degree + 3) / 6,
    }
}

/// Basis functions of an element together with their gradients
///
/// Gradients are computed once here so that assembling a matrix does not
/// differentiate each basis function for every entry.
#[derive(Debug, Clone)]
pub struct BasisTable {
    cell_type: ReferenceCellType,
    values: Vec<Expression>,
    gradients: Vec<Vec<Expression>>,
}

impl BasisTable {
    /// Tabulate the basis functions and gradients of an element
    pub fn new(element: &impl FiniteElement) -> Result<Self> {
        Ok(Self {
            cell_type: element.cell_type(),
            values: element.basis().to_vec(),
            gradients: element.gradients()?,
        })
    }

    /// The cell type
    pub fn cell_type(&self) -> ReferenceCellType {
        self.cell_type
    }

    /// The number of basis functions
    pub fn dim(&self) -> usize {
        self.values.len()
    }

    /// Basis function `i`
    pub fn value(&self, i: usize) -> &Expression {
        &self.values[i]
    }

    /// Gradient of basis function `i`
    pub fn gradient(&self, i: usize) -> &[Expression] {
        &self.gradients[i]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_polynomial_count() {
        assert_eq!(polynomial_count(ReferenceCellType::Segment, 2), 3);
        assert_eq!(polynomial_count(ReferenceCellType::Triangle, 2), 6);
        assert_eq!(polynomial_count(ReferenceCellType::Tetrahedron, 2), 10);
        assert_eq!(polynomial_count(ReferenceCellType::Tetrahedron, 1), 4);
    }

    #[test]
    fn test_basis_table() {
        let element = lagrange::create(ReferenceCellType::Triangle, 1).unwrap();
        let table = BasisTable::new(&element).unwrap();
        assert_eq!(table.dim(), 3);
        assert_eq!(table.cell_type(), ReferenceCellType::Triangle);
        assert_eq!(table.gradient(0), &[Expression::integer(-1), Expression::integer(-1)]);
        assert_eq!(table.gradient(1), &[Expression::one(), Expression::zero()]);
        assert_eq!(table.value(2), &Expression::variable(1));
    }
}

//! Finite element definitions
use crate::element::reference_cell;
use crate::symbolic::Expression;
use crate::types::{ReferenceCellType, Result};
use num::BigRational;

/// A finite element with symbolic basis functions
pub trait FiniteElement {
    /// The reference cell the element is defined on
    fn cell_type(&self) -> ReferenceCellType;

    /// The polynomial degree
    fn degree(&self) -> usize;

    /// The number of basis functions
    fn dim(&self) -> usize;

    /// The basis functions, in the order of the nodes
    fn basis(&self) -> &[Expression];

    /// The coordinates of the node associated with each basis function
    fn nodes(&self) -> &[Vec<BigRational>];

    /// Evaluate every basis function at a point
    ///
    /// Returns `None` if a basis function cannot be evaluated there.
    fn tabulate(&self, point: &[BigRational]) -> Option<Vec<BigRational>> {
        self.basis().iter().map(|phi| phi.evaluate(point)).collect()
    }

    /// The gradient of every basis function
    fn gradients(&self) -> Result<Vec<Vec<Expression>>> {
        let tdim = reference_cell::dim(self.cell_type());
        self.basis().iter().map(|phi| phi.gradient(tdim)).collect()
    }
}

/// A family of finite elements of one degree on different cells
pub trait ElementFamily {
    /// The type of the elements in the family
    type FiniteElement: FiniteElement;

    /// The polynomial degree of the family
    fn degree(&self) -> usize;

    /// The element of this family on a cell
    fn element(&self, cell_type: ReferenceCellType) -> Result<Self::FiniteElement>;
}

//! Lagrange elements

use crate::element::reference_cell;
use crate::symbolic::Expression;
use crate::traits::{ElementFamily, FiniteElement};
use crate::types::{Error, ReferenceCellType, Result};
use log::debug;
use num::BigRational;
use std::collections::HashMap;

/// Nodes and basis functions of one Lagrange element
#[derive(Debug, Clone)]
struct ElementDefinition {
    nodes: Vec<Vec<BigRational>>,
    basis: Vec<Expression>,
}

/// Vertex functions `λ_i`
fn linear(cell_type: ReferenceCellType) -> ElementDefinition {
    ElementDefinition {
        nodes: reference_cell::vertices(cell_type),
        basis: reference_cell::barycentric_coordinates(cell_type),
    }
}

/// Vertex functions `λ_i (2 λ_i - 1)` followed by edge functions `4 λ_a λ_b`
fn quadratic(cell_type: ReferenceCellType) -> ElementDefinition {
    let lambda = reference_cell::barycentric_coordinates(cell_type);
    let edges = reference_cell::edges(cell_type);

    let mut nodes = reference_cell::vertices(cell_type);
    let mut basis = lambda
        .iter()
        .map(|l| l.clone() * (Expression::integer(2) * l.clone() - Expression::one()))
        .collect::<Vec<_>>();
    for (e, edge) in edges.iter().enumerate() {
        nodes.push(reference_cell::edge_midpoint(cell_type, e));
        basis.push(Expression::integer(4) * lambda[edge[0]].clone() * lambda[edge[1]].clone());
    }
    ElementDefinition { nodes, basis }
}

lazy_static! {
    static ref LAGRANGE_DEFINITIONS: HashMap<(ReferenceCellType, usize), ElementDefinition> = {
        use ReferenceCellType::{Segment, Tetrahedron, Triangle};
        let mut table = HashMap::new();
        for cell_type in [Segment, Triangle, Tetrahedron] {
            table.insert((cell_type, 1), linear(cell_type));
            table.insert((cell_type, 2), quadratic(cell_type));
        }
        table
    };
}

/// The (cell, degree) pairs for which a Lagrange element is defined
pub fn supported_elements() -> Vec<(ReferenceCellType, usize)> {
    let mut elements = LAGRANGE_DEFINITIONS.keys().copied().collect::<Vec<_>>();
    elements.sort();
    elements
}

/// A Lagrange element on a reference cell
#[derive(Debug, Clone)]
pub struct LagrangeElement {
    cell_type: ReferenceCellType,
    degree: usize,
    nodes: Vec<Vec<BigRational>>,
    basis: Vec<Expression>,
}

/// Create a Lagrange element
pub fn create(cell_type: ReferenceCellType, degree: usize) -> Result<LagrangeElement> {
    let definition = LAGRANGE_DEFINITIONS
        .get(&(cell_type, degree))
        .ok_or(Error::UnsupportedElement {
            cell: cell_type,
            degree,
        })?;
    debug!(
        "Creating degree {degree} Lagrange element on {cell_type} with {} basis functions",
        definition.basis.len()
    );
    Ok(LagrangeElement {
        cell_type,
        degree,
        nodes: definition.nodes.clone(),
        basis: definition.basis.clone(),
    })
}

impl FiniteElement for LagrangeElement {
    fn cell_type(&self) -> ReferenceCellType {
        self.cell_type
    }

    fn degree(&self) -> usize {
        self.degree
    }

    fn dim(&self) -> usize {
        self.basis.len()
    }

    fn basis(&self) -> &[Expression] {
        &self.basis
    }

    fn nodes(&self) -> &[Vec<BigRational>] {
        &self.nodes
    }
}

/// Lagrange elements of one degree on every supported cell
#[derive(Debug, Clone, Copy)]
pub struct LagrangeElementFamily {
    degree: usize,
}

impl LagrangeElementFamily {
    /// Create new
    pub fn new(degree: usize) -> Self {
        Self { degree }
    }
}

impl ElementFamily for LagrangeElementFamily {
    type FiniteElement = LagrangeElement;

    fn degree(&self) -> usize {
        self.degree
    }

    fn element(&self, cell_type: ReferenceCellType) -> Result<LagrangeElement> {
        create(cell_type, self.degree)
    }
}

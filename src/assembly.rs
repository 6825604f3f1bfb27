//! Reference element matrix assembly
pub mod integrands;

pub use integrands::{MassIntegrand, StiffnessIntegrand};

use crate::element::{BasisTable, LagrangeElementFamily};
use crate::integration::integrate;
use crate::matrix::ElementMatrix;
use crate::traits::{ElementFamily, ElementIntegrand, FiniteElement};
use crate::types::{Error, ReferenceCellType, Result};
use itertools::iproduct;
use log::{debug, trace, warn};
use num::BigRational;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Elements with more basis functions than this are slow to assemble
/// without using symmetry
const LARGE_ELEMENT_DIM: usize = 6;

/// A flag that stops an assembly between two entries
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Create new
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Has cancellation been requested?
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Options for an element matrix assembler
#[derive(Debug, Clone)]
pub struct AssemblerOptions {
    /// Only integrate entries with `i <= j` when the integrand is symmetric
    exploit_symmetry: bool,
    /// Compute entries in parallel
    parallel: bool,
    /// Token checked before each entry
    cancellation: Option<CancellationToken>,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            exploit_symmetry: true,
            parallel: true,
            cancellation: None,
        }
    }
}

impl AssemblerOptions {
    /// Set whether symmetry is used to halve the number of integrals
    pub fn set_exploit_symmetry(&mut self, exploit_symmetry: bool) {
        self.exploit_symmetry = exploit_symmetry;
    }

    /// Set whether entries are computed in parallel
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    /// Set the cancellation token
    pub fn set_cancellation_token(&mut self, token: CancellationToken) {
        self.cancellation = Some(token);
    }

    /// Is symmetry used?
    pub fn exploit_symmetry(&self) -> bool {
        self.exploit_symmetry
    }

    /// Are entries computed in parallel?
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// The cancellation token
    pub fn cancellation_token(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }
}

/// Element matrix assembler
///
/// Integrates an [`ElementIntegrand`] exactly for every pair of basis
/// functions of an element.
pub struct ElementMatrixAssembler<Integrand: ElementIntegrand> {
    integrand: Integrand,
    options: AssemblerOptions,
}

impl<Integrand: ElementIntegrand> ElementMatrixAssembler<Integrand> {
    /// Create new
    pub fn new(integrand: Integrand, options: &AssemblerOptions) -> Self {
        Self {
            integrand,
            options: options.clone(),
        }
    }

    /// Get the integrand
    pub fn integrand(&self) -> &Integrand {
        &self.integrand
    }

    /// Get the assembler options
    pub fn options(&self) -> &AssemblerOptions {
        &self.options
    }

    /// Get mutable assembler options
    pub fn options_mut(&mut self) -> &mut AssemblerOptions {
        &mut self.options
    }

    /// Assemble the matrix of an element
    pub fn assemble(&self, element: &impl FiniteElement) -> Result<ElementMatrix> {
        let table = BasisTable::new(element)?;
        self.assemble_table(&table)
    }

    /// Assemble the matrix from a table of basis functions and gradients
    ///
    /// Either every entry is computed, or the error of the first failing
    /// entry in row-major order is returned.
    pub fn assemble_table(&self, table: &BasisTable) -> Result<ElementMatrix> {
        let n = table.dim();
        let symmetric = self.options.exploit_symmetry && self.integrand.is_symmetric();
        if !self.options.exploit_symmetry && n > LARGE_ELEMENT_DIM {
            warn!(
                "Assembling all {} entries of a {n}x{n} matrix without using symmetry",
                n * n
            );
        }

        let pairs = if symmetric {
            iproduct!(0..n, 0..n).filter(|(i, j)| i <= j).collect::<Vec<_>>()
        } else {
            iproduct!(0..n, 0..n).collect::<Vec<_>>()
        };
        debug!(
            "Assembling {} matrix on {}: {} of {} entries integrated",
            self.integrand.symbol(),
            table.cell_type(),
            pairs.len(),
            n * n
        );

        let values = if self.options.parallel {
            pairs
                .par_iter()
                .map(|(i, j)| self.entry(table, *i, *j))
                .collect::<Vec<_>>()
                .into_iter()
                .collect::<Result<Vec<_>>>()?
        } else {
            pairs
                .iter()
                .map(|(i, j)| self.entry(table, *i, *j))
                .collect::<Result<Vec<_>>>()?
        };

        let mut matrix = ElementMatrix::zeros(n);
        for ((i, j), value) in pairs.into_iter().zip(values) {
            if symmetric && i != j {
                matrix[[j, i]] = value.clone();
            }
            matrix[[i, j]] = value;
        }
        Ok(matrix)
    }

    fn entry(&self, table: &BasisTable, i: usize, j: usize) -> Result<BigRational> {
        if let Some(token) = &self.options.cancellation {
            if token.is_cancelled() {
                return Err(Error::Cancelled);
            }
        }
        let integrand = self.integrand.integrand(table, i, j);
        let value = integrate(table.cell_type(), &integrand)?;
        trace!("{}[{i},{j}] = {value}", self.integrand.symbol());
        Ok(value)
    }
}

/// Mass matrix assembler
pub fn mass(options: &AssemblerOptions) -> ElementMatrixAssembler<MassIntegrand> {
    ElementMatrixAssembler::new(MassIntegrand::new(), options)
}

/// Stiffness matrix assembler
pub fn stiffness(options: &AssemblerOptions) -> ElementMatrixAssembler<StiffnessIntegrand> {
    ElementMatrixAssembler::new(StiffnessIntegrand::new(), options)
}

/// The mass and stiffness matrices of one reference element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMatrices {
    /// The cell type
    pub cell_type: ReferenceCellType,
    /// The polynomial degree
    pub degree: usize,
    /// Mass matrix, `M[i,j] = ∫ φ_i φ_j`
    pub mass: ElementMatrix,
    /// Stiffness matrix, `K[i,j] = ∫ ∇φ_i · ∇φ_j`
    pub stiffness: ElementMatrix,
}

/// Generator of the exact mass and stiffness matrices of Lagrange elements
#[derive(Debug, Clone, Default)]
pub struct ReferenceMatrixGenerator {
    options: AssemblerOptions,
}

impl ReferenceMatrixGenerator {
    /// Create new
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with options
    pub fn with_options(options: AssemblerOptions) -> Self {
        Self { options }
    }

    /// Get the options
    pub fn options(&self) -> &AssemblerOptions {
        &self.options
    }

    /// Set whether symmetry is used to halve the number of integrals
    pub fn exploit_symmetry(&mut self, exploit_symmetry: bool) {
        self.options.set_exploit_symmetry(exploit_symmetry);
    }

    /// Set whether entries are computed in parallel
    pub fn parallel(&mut self, parallel: bool) {
        self.options.set_parallel(parallel);
    }

    /// Set a token that can stop the generation between two entries
    pub fn cancellation_token(&mut self, token: CancellationToken) {
        self.options.set_cancellation_token(token);
    }

    /// Derive the mass and stiffness matrices of the degree `degree`
    /// Lagrange element on `cell_type`
    pub fn generate(&self, cell_type: ReferenceCellType, degree: usize) -> Result<ReferenceMatrices> {
        let element = LagrangeElementFamily::new(degree).element(cell_type)?;
        let table = BasisTable::new(&element)?;
        let mass = mass(&self.options).assemble_table(&table)?;
        let stiffness = stiffness(&self.options).assemble_table(&table)?;
        Ok(ReferenceMatrices {
            cell_type,
            degree,
            mass,
            stiffness,
        })
    }
}

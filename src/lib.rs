//! Exact reference element matrices
//!
//! Mass and stiffness matrices of Lagrange elements on the reference
//! segment, triangle and tetrahedron, derived by exact symbolic
//! integration. Entries are rational numbers, for use as fixtures when
//! testing quadrature-based assembly.
//!
//! ```
//! use refmat::assembly::ReferenceMatrixGenerator;
//! use refmat::types::ReferenceCellType;
//!
//! let matrices = ReferenceMatrixGenerator::new()
//!     .generate(ReferenceCellType::Triangle, 1)
//!     .unwrap();
//! assert_eq!(matrices.mass[[0, 0]].to_string(), "1/12");
//! ```
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

#[macro_use]
extern crate lazy_static;

pub mod assembly;
pub mod element;
pub mod integration;
pub mod matrix;
pub mod report;
pub mod symbolic;
pub mod traits;
pub mod types;

//! Trait definitions

mod element;
mod integrand;

pub use element::{ElementFamily, FiniteElement};
pub use integrand::ElementIntegrand;

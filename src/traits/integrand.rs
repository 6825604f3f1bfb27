//! Integrands
use crate::element::BasisTable;
use crate::symbolic::Expression;

/// The integrand of an element matrix
pub trait ElementIntegrand: Sync {
    /// Symbol used for the entries of the matrix in reports
    fn symbol(&self) -> &'static str;

    /// Is the integrand for (i, j) the same as for (j, i)?
    fn is_symmetric(&self) -> bool;

    /// The integrand for the entry in row `test_index` and column `trial_index`
    fn integrand(&self, table: &BasisTable, test_index: usize, trial_index: usize) -> Expression;
}

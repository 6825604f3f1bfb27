//! Integrands of the reference element matrices
use crate::element::BasisTable;
use crate::symbolic::Expression;
use crate::traits::ElementIntegrand;

/// Mass matrix integrand: `φ_i φ_j`
#[derive(Debug, Clone, Copy, Default)]
pub struct MassIntegrand;

impl MassIntegrand {
    /// Create new
    pub fn new() -> Self {
        Self
    }
}

impl ElementIntegrand for MassIntegrand {
    fn symbol(&self) -> &'static str {
        "M"
    }

    fn is_symmetric(&self) -> bool {
        true
    }

    fn integrand(&self, table: &BasisTable, test_index: usize, trial_index: usize) -> Expression {
        Expression::product([
            table.value(test_index).clone(),
            table.value(trial_index).clone(),
        ])
    }
}

/// Stiffness matrix integrand: `∇φ_i · ∇φ_j`
#[derive(Debug, Clone, Copy, Default)]
pub struct StiffnessIntegrand;

impl StiffnessIntegrand {
    /// Create new
    pub fn new() -> Self {
        Self
    }
}

impl ElementIntegrand for StiffnessIntegrand {
    fn symbol(&self) -> &'static str {
        "K"
    }

    fn is_symmetric(&self) -> bool {
        true
    }

    fn integrand(&self, table: &BasisTable, test_index: usize, trial_index: usize) -> Expression {
        Expression::sum(
            table
                .gradient(test_index)
                .iter()
                .zip(table.gradient(trial_index))
                .map(|(a, b)| Expression::product([a.clone(), b.clone()])),
        )
    }
}

//! Exact integration over reference cells

use crate::element::reference_cell;
use crate::symbolic::{Expression, Polynomial};
use crate::types::{Error, ReferenceCellType, Result};
use num::BigRational;

/// Integrate a polynomial exactly over a reference cell
///
/// The integrals are taken innermost first, following
/// [`reference_cell::integration_limits`]. For the triangle that is `y`
/// from `0` to `1 - x`, then `x` from `0` to `1`.
pub fn integrate_polynomial(
    cell_type: ReferenceCellType,
    integrand: &Polynomial,
) -> Result<BigRational> {
    let non_integrable = || Error::NonIntegrable {
        integrand: integrand.to_string(),
    };
    if integrand.nvars() != reference_cell::dim(cell_type) {
        return Err(non_integrable());
    }

    let mut p = integrand.clone();
    for limit in reference_cell::integration_limits(cell_type) {
        p = p.definite_integral(limit.variable, &limit.lower, &limit.upper);
    }
    p.constant_value().ok_or_else(non_integrable)
}

/// Integrate an expression exactly over a reference cell
///
/// Fails with [`Error::NonIntegrable`] if the expression is not a
/// polynomial in the coordinates of the cell.
pub fn integrate(cell_type: ReferenceCellType, integrand: &Expression) -> Result<BigRational> {
    let tdim = reference_cell::dim(cell_type);
    let polynomial = integrand.to_polynomial(tdim)?;
    integrate_polynomial(cell_type, &polynomial)
}

#[cfg(test)]
mod test {
    use super::*;

    fn r(n: i64, d: i64) -> BigRational {
        BigRational::new(n.into(), d.into())
    }

    fn x() -> Expression {
        Expression::variable(0)
    }

    fn y() -> Expression {
        Expression::variable(1)
    }

    #[test]
    fn test_segment() {
        let e = Expression::power(Expression::one() - x(), 2);
        assert_eq!(integrate(ReferenceCellType::Segment, &e), Ok(r(1, 3)));
    }

    #[test]
    fn test_triangle() {
        assert_eq!(
            integrate(ReferenceCellType::Triangle, &Expression::one()),
            Ok(r(1, 2))
        );
        assert_eq!(integrate(ReferenceCellType::Triangle, &x()), Ok(r(1, 6)));
        assert_eq!(
            integrate(ReferenceCellType::Triangle, &(x() * y())),
            Ok(r(1, 24))
        );
        // ((1 - x - y)(1 - 2x - 2y))^2
        let two = Expression::integer(2);
        let l0 = Expression::one() - x() - y();
        let phi0 = l0.clone() * (two.clone() * l0 - Expression::one());
        assert_eq!(
            integrate(ReferenceCellType::Triangle, &Expression::power(phi0, 2)),
            Ok(r(1, 60))
        );
    }

    #[test]
    fn test_tetrahedron() {
        let z = Expression::variable(2);
        assert_eq!(
            integrate(ReferenceCellType::Tetrahedron, &Expression::one()),
            Ok(r(1, 6))
        );
        assert_eq!(
            integrate(ReferenceCellType::Tetrahedron, &(x() * y() * z)),
            Ok(r(1, 720))
        );
    }

    #[test]
    fn test_non_integrable() {
        let e = Expression::one() / (Expression::one() + x());
        assert_eq!(
            integrate(ReferenceCellType::Segment, &e),
            Err(Error::NonIntegrable {
                integrand: e.to_string()
            })
        );
        // y is not a coordinate of the segment
        assert!(matches!(
            integrate(ReferenceCellType::Segment, &y()),
            Err(Error::NonIntegrable { .. })
        ));
        assert!(matches!(
            integrate_polynomial(ReferenceCellType::Triangle, &Polynomial::one(3)),
            Err(Error::NonIntegrable { .. })
        ));
    }
}

//! Cell definitions

use crate::symbolic::{Expression, Polynomial};
use crate::types::ReferenceCellType;
use num::{BigRational, One, Zero};

/// The topological dimension of the cell
pub fn dim(cell: ReferenceCellType) -> usize {
    match cell {
        ReferenceCellType::Segment => 1,
        ReferenceCellType::Triangle => 2,
        ReferenceCellType::Tetrahedron => 3,
    }
}

/// The vertices of the reference cell
pub fn vertices(cell: ReferenceCellType) -> Vec<Vec<BigRational>> {
    let zero = BigRational::zero();
    let one = BigRational::one();
    match cell {
        ReferenceCellType::Segment => vec![vec![zero], vec![one]],
        ReferenceCellType::Triangle => vec![
            vec![zero.clone(), zero.clone()],
            vec![one.clone(), zero.clone()],
            vec![zero, one],
        ],
        ReferenceCellType::Tetrahedron => vec![
            vec![zero.clone(), zero.clone(), zero.clone()],
            vec![one.clone(), zero.clone(), zero.clone()],
            vec![zero.clone(), one.clone(), zero.clone()],
            vec![zero.clone(), zero, one],
        ],
    }
}

/// The midpoint of the cell
pub fn midpoint(cell: ReferenceCellType) -> Vec<BigRational> {
    let n = vertices(cell).len();
    vec![BigRational::new(1.into(), n.into()); dim(cell)]
}

/// The edges of the reference cell
///
/// Edges are numbered as in VTK, which is also the order of the edge
/// nodes of quadratic elements.
pub fn edges(cell: ReferenceCellType) -> Vec<Vec<usize>> {
    match cell {
        ReferenceCellType::Segment => vec![vec![0, 1]],
        ReferenceCellType::Triangle => vec![vec![0, 1], vec![1, 2], vec![2, 0]],
        ReferenceCellType::Tetrahedron => vec![
            vec![0, 1],
            vec![1, 2],
            vec![2, 0],
            vec![0, 3],
            vec![1, 3],
            vec![2, 3],
        ],
    }
}

/// The number of subentities of each dimension
pub fn entity_counts(cell: ReferenceCellType) -> Vec<usize> {
    match cell {
        ReferenceCellType::Segment => vec![2, 1, 0, 0],
        ReferenceCellType::Triangle => vec![3, 3, 1, 0],
        ReferenceCellType::Tetrahedron => vec![4, 6, 4, 1],
    }
}

/// The midpoint of an edge
pub fn edge_midpoint(cell: ReferenceCellType, edge: usize) -> Vec<BigRational> {
    let v = vertices(cell);
    let e = &edges(cell)[edge];
    let half = BigRational::new(1.into(), 2.into());
    v[e[0]]
        .iter()
        .zip(&v[e[1]])
        .map(|(a, b)| (a + b) * &half)
        .collect()
}

/// The volume of the reference cell
pub fn volume(cell: ReferenceCellType) -> BigRational {
    match cell {
        ReferenceCellType::Segment => BigRational::one(),
        ReferenceCellType::Triangle => BigRational::new(1.into(), 2.into()),
        ReferenceCellType::Tetrahedron => BigRational::new(1.into(), 6.into()),
    }
}

/// The barycentric coordinates of the cell as expressions in its coordinates
///
/// Coordinate `i` is 1 at vertex `i` and 0 at every other vertex.
pub fn barycentric_coordinates(cell: ReferenceCellType) -> Vec<Expression> {
    let tdim = dim(cell);
    let mut lambda = vec![Expression::sum(
        std::iter::once(Expression::one()).chain((0..tdim).map(|v| -Expression::variable(v))),
    )];
    lambda.extend((0..tdim).map(Expression::variable));
    lambda
}

/// The limits of one integral of an iterated integral
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationLimit {
    /// The coordinate that is integrated
    pub variable: usize,
    /// Lower limit, a polynomial in the coordinates that are integrated later
    pub lower: Polynomial,
    /// Upper limit, a polynomial in the coordinates that are integrated later
    pub upper: Polynomial,
}

/// The limits of integration over the reference cell, innermost first
///
/// For the triangle this is `y` from `0` to `1 - x`, then `x` from `0` to
/// `1`. The limits of each integral may only depend on coordinates that
/// appear later in the list.
pub fn integration_limits(cell: ReferenceCellType) -> Vec<IntegrationLimit> {
    let tdim = dim(cell);
    (0..tdim)
        .rev()
        .map(|variable| {
            // the simplex condition x_0 + ... + x_variable <= 1
            let mut upper = Polynomial::one(tdim);
            for outer in 0..variable {
                upper = &upper - &Polynomial::variable(tdim, outer);
            }
            IntegrationLimit {
                variable,
                lower: Polynomial::zero(tdim),
                upper,
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use paste::paste;

    macro_rules! test_cell {

        ($($cell:ident),+) => {

        $(
            paste! {

                #[test]
                fn [<test_ $cell:lower>]() {
                    let cell = ReferenceCellType::[<$cell>];
                    let v = vertices(cell);
                    let d = dim(cell);
                    let ec = entity_counts(cell);
                    assert_eq!(ec[0], v.len());
                    assert_eq!(ec[1], edges(cell).len());
                    assert_eq!(ec[d], 1);
                    for i in &v {
                        assert_eq!(i.len(), d);
                    }
                    for e in edges(cell) {
                        assert_eq!(e.len(), 2);
                        assert!(e[0] < ec[0] && e[1] < ec[0] && e[0] != e[1]);
                    }
                }

                #[test]
                fn [<test_barycentric_ $cell:lower>]() {
                    let cell = ReferenceCellType::[<$cell>];
                    let lambda = barycentric_coordinates(cell);
                    for (i, vertex) in vertices(cell).iter().enumerate() {
                        for (j, l) in lambda.iter().enumerate() {
                            let expected = if i == j { BigRational::one() } else { BigRational::zero() };
                            assert_eq!(l.evaluate(vertex), Some(expected));
                        }
                    }
                }

                #[test]
                fn [<test_limits_ $cell:lower>]() {
                    let cell = ReferenceCellType::[<$cell>];
                    let limits = integration_limits(cell);
                    assert_eq!(limits.len(), dim(cell));
                    for (n, limit) in limits.iter().enumerate() {
                        // limits only depend on coordinates integrated later
                        for inner in &limits[..=n] {
                            assert!(!limit.lower.depends_on(inner.variable));
                            assert!(!limit.upper.depends_on(inner.variable));
                        }
                    }

                    let mut p = Polynomial::one(dim(cell));
                    for limit in &limits {
                        p = p.definite_integral(limit.variable, &limit.lower, &limit.upper);
                    }
                    assert_eq!(p.constant_value(), Some(volume(cell)));
                }

            }
        )*
        };
    }

    test_cell!(Segment, Triangle, Tetrahedron);

    #[test]
    fn test_triangle_limits() {
        let limits = integration_limits(ReferenceCellType::Triangle);
        assert_eq!(limits[0].variable, 1);
        assert_eq!(limits[1].variable, 0);
        assert_eq!(limits[0].upper.to_string(), "1 - x");
        assert_eq!(limits[1].upper.to_string(), "1");
    }

    #[test]
    fn test_edge_midpoints() {
        let half = BigRational::new(1.into(), 2.into());
        let zero = BigRational::zero();
        assert_eq!(
            edge_midpoint(ReferenceCellType::Triangle, 1),
            vec![half.clone(), half.clone()]
        );
        assert_eq!(
            edge_midpoint(ReferenceCellType::Tetrahedron, 3),
            vec![zero.clone(), zero, half]
        );
    }

    #[test]
    fn test_midpoint() {
        let third = BigRational::new(1.into(), 3.into());
        assert_eq!(midpoint(ReferenceCellType::Triangle), vec![third.clone(), third]);
    }
}

//! Exact symbolic algebra
//!
//! Expressions are built in terms of the coordinates of a reference cell,
//! numbered `0` (x), `1` (y) and `2` (z). Polynomials are the normal form
//! used for integration.

pub mod expression;
pub mod polynomial;

pub use expression::Expression;
pub use polynomial::Polynomial;

/// Printed name of a coordinate
pub fn variable_name(var: usize) -> String {
    match var {
        0 => String::from("x"),
        1 => String::from("y"),
        2 => String::from("z"),
        _ => format!("x{var}"),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_variable_names() {
        assert_eq!(variable_name(0), "x");
        assert_eq!(variable_name(2), "z");
        assert_eq!(variable_name(5), "x5");
    }
}

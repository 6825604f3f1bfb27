//! Symbolic expressions
use crate::symbolic::{variable_name, Polynomial};
use crate::types::{Error, Result};
use num::{BigRational, One, Signed, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A symbolic scalar expression in the coordinates of a reference cell
///
/// The helper constructors ([`Expression::sum`], [`Expression::product`],
/// [`Expression::power`], [`Expression::quotient`]) fold constants and
/// flatten nested sums and products. The variants can also be built
/// directly, in which case nothing is simplified or checked until the
/// expression is differentiated or expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// An exact rational constant
    Constant(BigRational),
    /// A coordinate
    Variable(usize),
    /// A sum of terms
    Sum(Vec<Expression>),
    /// A product of factors
    Product(Vec<Expression>),
    /// An integer power
    Power(Box<Expression>, i32),
    /// A quotient (numerator, denominator)
    Quotient(Box<Expression>, Box<Expression>),
}

impl Expression {
    /// The constant 0
    pub fn zero() -> Self {
        Expression::Constant(BigRational::zero())
    }

    /// The constant 1
    pub fn one() -> Self {
        Expression::Constant(BigRational::one())
    }

    /// An integer constant
    pub fn integer(value: i64) -> Self {
        Expression::Constant(BigRational::from_integer(value.into()))
    }

    /// A rational constant
    pub fn rational(numerator: i64, denominator: i64) -> Self {
        Expression::Constant(BigRational::new(numerator.into(), denominator.into()))
    }

    /// The coordinate `var`
    pub fn variable(var: usize) -> Self {
        Expression::Variable(var)
    }

    /// The constant value of this expression node, if it is a constant
    pub fn as_constant(&self) -> Option<&BigRational> {
        match self {
            Expression::Constant(c) => Some(c),
            _ => None,
        }
    }

    /// Is this expression the constant 0?
    pub fn is_zero(&self) -> bool {
        matches!(self, Expression::Constant(c) if c.is_zero())
    }

    /// A simplified sum
    pub fn sum(terms: impl IntoIterator<Item = Expression>) -> Self {
        let mut constant = BigRational::zero();
        let mut others = vec![];
        for term in terms {
            match term {
                Expression::Constant(c) => constant += c,
                Expression::Sum(inner) if !inner.is_empty() => {
                    for t in inner {
                        match t {
                            Expression::Constant(c) => constant += c,
                            t => others.push(t),
                        }
                    }
                }
                t => others.push(t),
            }
        }
        if !constant.is_zero() {
            others.insert(0, Expression::Constant(constant));
        }
        match others.len() {
            0 => Expression::zero(),
            1 => others.pop().unwrap_or_else(Expression::zero),
            _ => Expression::Sum(others),
        }
    }

    /// A simplified product
    pub fn product(factors: impl IntoIterator<Item = Expression>) -> Self {
        let mut constant = BigRational::one();
        let mut others = vec![];
        for factor in factors {
            match factor {
                Expression::Constant(c) => constant *= c,
                Expression::Product(inner) if !inner.is_empty() => {
                    for f in inner {
                        match f {
                            Expression::Constant(c) => constant *= c,
                            f => others.push(f),
                        }
                    }
                }
                f => others.push(f),
            }
        }
        if constant.is_zero() {
            return Expression::zero();
        }
        if !constant.is_one() {
            others.insert(0, Expression::Constant(constant));
        }
        match others.len() {
            0 => Expression::one(),
            1 => others.pop().unwrap_or_else(Expression::one),
            _ => Expression::Product(others),
        }
    }

    /// A simplified integer power
    pub fn power(base: Expression, exponent: i32) -> Self {
        match (base, exponent) {
            (_, 0) => Expression::one(),
            (base, 1) => base,
            (Expression::Constant(c), n) if n > 0 || !c.is_zero() => {
                Expression::Constant(num::pow::Pow::pow(c, n))
            }
            (base, n) => Expression::Power(Box::new(base), n),
        }
    }

    /// A simplified quotient
    pub fn quotient(numerator: Expression, denominator: Expression) -> Self {
        match denominator {
            Expression::Constant(c) if !c.is_zero() => {
                Expression::product([numerator, Expression::Constant(c.recip())])
            }
            denominator if numerator.is_zero() => {
                // 0/d is only simplified when d cannot vanish identically
                if denominator.is_zero() {
                    Expression::Quotient(Box::new(numerator), Box::new(denominator))
                } else {
                    Expression::zero()
                }
            }
            denominator => Expression::Quotient(Box::new(numerator), Box::new(denominator)),
        }
    }

    /// The largest coordinate index used, if any
    pub fn max_variable(&self) -> Option<usize> {
        match self {
            Expression::Constant(_) => None,
            Expression::Variable(v) => Some(*v),
            Expression::Sum(items) | Expression::Product(items) => {
                items.iter().filter_map(|e| e.max_variable()).max()
            }
            Expression::Power(base, _) => base.max_variable(),
            Expression::Quotient(n, d) => n.max_variable().max(d.max_variable()),
        }
    }

    /// Check that this expression is well formed in `nvars` coordinates
    fn validate(&self, nvars: usize) -> Result<()> {
        let malformed = |reason: String| Error::DifferentiationError {
            expression: self.to_string(),
            reason,
        };
        match self {
            Expression::Constant(_) => Ok(()),
            Expression::Variable(v) if *v >= nvars => Err(malformed(format!(
                "coordinate {} is not one of the {nvars} cell coordinates",
                variable_name(*v)
            ))),
            Expression::Variable(_) => Ok(()),
            Expression::Sum(items) if items.is_empty() => Err(malformed("empty sum".into())),
            Expression::Product(items) if items.is_empty() => {
                Err(malformed("empty product".into()))
            }
            Expression::Sum(items) | Expression::Product(items) => {
                items.iter().try_for_each(|e| e.validate(nvars))
            }
            Expression::Power(base, _) => base.validate(nvars),
            Expression::Quotient(n, d) => {
                n.validate(nvars)?;
                d.validate(nvars)
            }
        }
    }

    fn derivative_unchecked(&self, var: usize) -> Expression {
        match self {
            Expression::Constant(_) => Expression::zero(),
            Expression::Variable(v) => {
                if *v == var {
                    Expression::one()
                } else {
                    Expression::zero()
                }
            }
            Expression::Sum(terms) => {
                Expression::sum(terms.iter().map(|t| t.derivative_unchecked(var)))
            }
            Expression::Product(factors) => Expression::sum((0..factors.len()).map(|k| {
                Expression::product(factors.iter().enumerate().map(|(i, f)| {
                    if i == k {
                        f.derivative_unchecked(var)
                    } else {
                        f.clone()
                    }
                }))
            })),
            Expression::Power(base, n) => Expression::product([
                Expression::integer((*n).into()),
                Expression::power((**base).clone(), n - 1),
                base.derivative_unchecked(var),
            ]),
            Expression::Quotient(numerator, denominator) => Expression::quotient(
                Expression::sum([
                    Expression::product([
                        numerator.derivative_unchecked(var),
                        (**denominator).clone(),
                    ]),
                    Expression::product([
                        Expression::integer(-1),
                        (**numerator).clone(),
                        denominator.derivative_unchecked(var),
                    ]),
                ]),
                Expression::power((**denominator).clone(), 2),
            ),
        }
    }

    /// Partial derivative with respect to coordinate `var` of a cell with
    /// `nvars` coordinates
    pub fn derivative(&self, var: usize, nvars: usize) -> Result<Expression> {
        if var >= nvars {
            return Err(Error::DifferentiationError {
                expression: self.to_string(),
                reason: format!(
                    "cannot differentiate with respect to {} in {nvars} coordinates",
                    variable_name(var)
                ),
            });
        }
        self.validate(nvars)?;
        Ok(self.derivative_unchecked(var))
    }

    /// Gradient with respect to the `nvars` coordinates of a cell
    pub fn gradient(&self, nvars: usize) -> Result<Vec<Expression>> {
        self.validate(nvars)?;
        Ok((0..nvars).map(|v| self.derivative_unchecked(v)).collect())
    }

    fn expand(&self, nvars: usize) -> Option<Polynomial> {
        match self {
            Expression::Constant(c) => Some(Polynomial::constant(nvars, c.clone())),
            Expression::Variable(v) if *v < nvars => Some(Polynomial::variable(nvars, *v)),
            Expression::Variable(_) => None,
            Expression::Sum(terms) if !terms.is_empty() => {
                let mut p = Polynomial::zero(nvars);
                for t in terms {
                    p = &p + &t.expand(nvars)?;
                }
                Some(p)
            }
            Expression::Product(factors) if !factors.is_empty() => {
                let mut p = Polynomial::one(nvars);
                for f in factors {
                    p = &p * &f.expand(nvars)?;
                }
                Some(p)
            }
            Expression::Sum(_) | Expression::Product(_) => None,
            Expression::Power(base, n) => {
                let base = base.expand(nvars)?;
                if *n >= 0 {
                    Some(base.pow(n.unsigned_abs()))
                } else {
                    match base.constant_value() {
                        Some(c) if !c.is_zero() => Some(Polynomial::constant(
                            nvars,
                            num::pow::Pow::pow(c, *n),
                        )),
                        _ => None,
                    }
                }
            }
            Expression::Quotient(numerator, denominator) => {
                let numerator = numerator.expand(nvars)?;
                match denominator.expand(nvars)?.constant_value() {
                    Some(c) if !c.is_zero() => Some(numerator.scale(&c.recip())),
                    _ => None,
                }
            }
        }
    }

    /// Expand into a polynomial in `nvars` coordinates
    ///
    /// Fails with [`Error::NonIntegrable`] if the expression is not a
    /// polynomial in those coordinates.
    pub fn to_polynomial(&self, nvars: usize) -> Result<Polynomial> {
        self.expand(nvars).ok_or_else(|| Error::NonIntegrable {
            integrand: self.to_string(),
        })
    }

    /// Evaluate at a point
    ///
    /// Returns `None` if the point has too few coordinates or a division by
    /// zero occurs.
    pub fn evaluate(&self, point: &[BigRational]) -> Option<BigRational> {
        match self {
            Expression::Constant(c) => Some(c.clone()),
            Expression::Variable(v) => point.get(*v).cloned(),
            Expression::Sum(terms) => terms.iter().try_fold(BigRational::zero(), |acc, t| {
                Some(acc + t.evaluate(point)?)
            }),
            Expression::Product(factors) => factors
                .iter()
                .try_fold(BigRational::one(), |acc, f| Some(acc * f.evaluate(point)?)),
            Expression::Power(base, n) => {
                let b = base.evaluate(point)?;
                if *n < 0 && b.is_zero() {
                    None
                } else {
                    Some(num::pow::Pow::pow(b, *n))
                }
            }
            Expression::Quotient(numerator, denominator) => {
                let d = denominator.evaluate(point)?;
                if d.is_zero() {
                    None
                } else {
                    Some(numerator.evaluate(point)? / d)
                }
            }
        }
    }

    fn is_atom(&self) -> bool {
        match self {
            Expression::Constant(c) => c.is_integer() && !c.is_negative(),
            Expression::Variable(_) | Expression::Power(..) => true,
            Expression::Sum(items) | Expression::Product(items) => items.len() == 1,
            Expression::Quotient(..) => false,
        }
    }

    fn fmt_factor(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_atom() || matches!(self, Expression::Product(_)) {
            write!(f, "{self}")
        } else {
            write!(f, "({self})")
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant(c) => write!(f, "{c}"),
            Expression::Variable(v) => write!(f, "{}", variable_name(*v)),
            Expression::Sum(terms) => {
                if terms.is_empty() {
                    return write!(f, "0");
                }
                for (n, t) in terms.iter().enumerate() {
                    // a leading negative constant factor is printed as a minus sign
                    let negated = match t {
                        Expression::Constant(c) if c.is_negative() && n > 0 => {
                            Some(Expression::Constant(-c))
                        }
                        Expression::Product(factors) if n > 0 => match factors.first() {
                            Some(Expression::Constant(c)) if c.is_negative() => {
                                Some(Expression::product(
                                    std::iter::once(Expression::Constant(-c))
                                        .chain(factors[1..].iter().cloned()),
                                ))
                            }
                            _ => None,
                        },
                        _ => None,
                    };
                    match (n, negated) {
                        (0, _) => t.fmt_factor_in_sum(f)?,
                        (_, Some(positive)) => {
                            write!(f, " - ")?;
                            positive.fmt_factor_in_sum(f)?;
                        }
                        (_, None) => {
                            write!(f, " + ")?;
                            t.fmt_factor_in_sum(f)?;
                        }
                    }
                }
                Ok(())
            }
            Expression::Product(factors) => {
                if factors.is_empty() {
                    return write!(f, "1");
                }
                for (n, factor) in factors.iter().enumerate() {
                    if n > 0 {
                        write!(f, "*")?;
                    }
                    match factor {
                        Expression::Constant(c) if n == 0 && !c.is_integer() => {
                            write!(f, "{c}")?
                        }
                        Expression::Constant(c) if n == 0 && c.is_negative() => {
                            write!(f, "{c}")?
                        }
                        Expression::Product(_) => write!(f, "({factor})")?,
                        _ => factor.fmt_factor(f)?,
                    }
                }
                Ok(())
            }
            Expression::Power(base, n) => {
                base.fmt_power_base(f)?;
                if *n < 0 {
                    write!(f, "^({n})")
                } else {
                    write!(f, "^{n}")
                }
            }
            Expression::Quotient(numerator, denominator) => {
                numerator.fmt_factor(f)?;
                write!(f, "/")?;
                match **denominator {
                    Expression::Product(_) => write!(f, "({denominator})"),
                    _ => denominator.fmt_factor(f),
                }
            }
        }
    }
}

impl Expression {
    fn fmt_factor_in_sum(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Sum(_) => write!(f, "({self})"),
            _ => write!(f, "{self}"),
        }
    }

    fn fmt_power_base(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Variable(_) => write!(f, "{self}"),
            Expression::Constant(c) if c.is_integer() && !c.is_negative() => write!(f, "{self}"),
            _ => write!(f, "({self})"),
        }
    }
}

impl From<i64> for Expression {
    fn from(value: i64) -> Self {
        Expression::integer(value)
    }
}

impl From<BigRational> for Expression {
    fn from(value: BigRational) -> Self {
        Expression::Constant(value)
    }
}

impl Add for Expression {
    type Output = Expression;

    fn add(self, rhs: Expression) -> Expression {
        Expression::sum([self, rhs])
    }
}

impl Sub for Expression {
    type Output = Expression;

    fn sub(self, rhs: Expression) -> Expression {
        Expression::sum([self, -rhs])
    }
}

impl Mul for Expression {
    type Output = Expression;

    fn mul(self, rhs: Expression) -> Expression {
        Expression::product([self, rhs])
    }
}

impl Div for Expression {
    type Output = Expression;

    fn div(self, rhs: Expression) -> Expression {
        Expression::quotient(self, rhs)
    }
}

impl Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Expression {
        Expression::product([Expression::integer(-1), self])
    }
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
    fn test_simplification() {
        assert_eq!(x() * Expression::zero(), Expression::zero());
        assert_eq!(x() * Expression::one(), x());
        assert_eq!(x() + Expression::zero(), x());
        assert_eq!(
            Expression::integer(2) * Expression::rational(1, 4),
            Expression::rational(1, 2)
        );
        assert_eq!(Expression::power(x(), 1), x());
        assert_eq!(
            Expression::power(Expression::integer(3), 2),
            Expression::integer(9)
        );
        assert_eq!(x() / Expression::integer(2), Expression::rational(1, 2) * x());
    }

    #[test]
    fn test_derivative() {
        // d/dx (1 - x - y)(1 - 2x - 2y) = 4x + 4y - 3
        let l0 = Expression::one() - x() - y();
        let two = Expression::integer(2);
        let phi = l0 * (Expression::one() - two.clone() * x() - two * y());
        let dphi = phi.derivative(0, 2).unwrap();
        let expected =
            Expression::integer(4) * x() + Expression::integer(4) * y() - Expression::integer(3);
        assert_eq!(
            dphi.to_polynomial(2).unwrap(),
            expected.to_polynomial(2).unwrap()
        );
    }

    #[test]
    fn test_quotient_rule() {
        // d/dx x^2 / (1 + y) = 2x / (1 + y)
        let e = Expression::power(x(), 2) / (Expression::one() + y());
        let de = e.derivative(0, 2).unwrap();
        let point = [r(1, 3), r(1, 2)];
        assert_eq!(de.evaluate(&point), Some(r(4, 9)));
    }

    #[test]
    fn test_gradient() {
        let e = Expression::integer(4) * x() * y();
        let g = e.gradient(2).unwrap();
        assert_eq!(g.len(), 2);
        assert_eq!(g[0], Expression::integer(4) * y());
        assert_eq!(g[1], Expression::integer(4) * x());
    }

    #[test]
    fn test_malformed_derivatives() {
        assert!(matches!(
            Expression::Sum(vec![]).derivative(0, 1),
            Err(Error::DifferentiationError { .. })
        ));
        assert!(matches!(
            Expression::Product(vec![x(), Expression::Product(vec![])]).gradient(2),
            Err(Error::DifferentiationError { .. })
        ));
        assert!(matches!(
            y().gradient(1),
            Err(Error::DifferentiationError { .. })
        ));
        assert!(matches!(
            x().derivative(1, 1),
            Err(Error::DifferentiationError { .. })
        ));
    }

    #[test]
    fn test_to_polynomial() {
        let p = (Expression::one() - x()).to_polynomial(1).unwrap();
        assert_eq!(p.coefficient(&[0]), r(1, 1));
        assert_eq!(p.coefficient(&[1]), r(-1, 1));

        let e = x() / (Expression::one() + x());
        assert_eq!(
            e.to_polynomial(1),
            Err(Error::NonIntegrable {
                integrand: e.to_string()
            })
        );
        assert!(Expression::power(x(), -1).to_polynomial(1).is_err());
        assert!(y().to_polynomial(1).is_err());

        let c = Expression::power(Expression::Sum(vec![Expression::integer(2)]), -2);
        assert_eq!(c.to_polynomial(1).unwrap().constant_value(), Some(r(1, 4)));
    }

    #[test]
    fn test_evaluate() {
        let e = Expression::integer(4) * x() * (Expression::one() - x());
        assert_eq!(e.evaluate(&[r(1, 2)]), Some(r(1, 1)));
        assert_eq!((Expression::one() / x()).evaluate(&[r(0, 1)]), None);
        assert_eq!(y().evaluate(&[r(0, 1)]), None);
    }

    #[test]
    fn test_display() {
        assert_eq!((Expression::one() - x() - y()).to_string(), "1 - x - y");
        assert_eq!((Expression::integer(4) * x() * y()).to_string(), "4*x*y");
        assert_eq!(
            Expression::power(Expression::one() - x(), 2).to_string(),
            "(1 - x)^2"
        );
        let e = (Expression::one() - x()) * (Expression::one() - Expression::integer(2) * x());
        assert_eq!(e.to_string(), "(1 - x)*(1 - 2*x)");
    }
}

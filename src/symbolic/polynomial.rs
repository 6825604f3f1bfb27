//! Multivariate polynomials with exact rational coefficients

use crate::symbolic::variable_name;
use num::{BigRational, One, Signed, Zero};
use std::cmp::Reverse;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A polynomial in a fixed number of variables
///
/// Terms are stored as a map from exponent vectors to coefficients. Zero
/// coefficients are never stored, so the zero polynomial has no terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    nvars: usize,
    terms: BTreeMap<Vec<u32>, BigRational>,
}

impl Polynomial {
    /// The zero polynomial
    pub fn zero(nvars: usize) -> Self {
        Self {
            nvars,
            terms: BTreeMap::new(),
        }
    }

    /// The polynomial 1
    pub fn one(nvars: usize) -> Self {
        Self::constant(nvars, BigRational::one())
    }

    /// A constant polynomial
    pub fn constant(nvars: usize, value: BigRational) -> Self {
        let mut p = Self::zero(nvars);
        p.add_term(vec![0; nvars], value);
        p
    }

    /// The polynomial equal to the coordinate `var`
    pub fn variable(nvars: usize, var: usize) -> Self {
        assert!(
            var < nvars,
            "Variable {var} out of range for {nvars} variables"
        );
        let mut exponents = vec![0; nvars];
        exponents[var] = 1;
        let mut p = Self::zero(nvars);
        p.add_term(exponents, BigRational::one());
        p
    }

    /// Number of variables
    pub fn nvars(&self) -> usize {
        self.nvars
    }

    /// Is this the zero polynomial?
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Total degree, or `None` for the zero polynomial
    pub fn degree(&self) -> Option<u32> {
        self.terms.keys().map(|e| e.iter().sum()).max()
    }

    /// Iterate over (exponents, coefficient) pairs
    pub fn terms(&self) -> impl Iterator<Item = (&[u32], &BigRational)> {
        self.terms.iter().map(|(e, c)| (e.as_slice(), c))
    }

    /// Coefficient of the monomial with the given exponents
    pub fn coefficient(&self, exponents: &[u32]) -> BigRational {
        self.terms
            .get(exponents)
            .cloned()
            .unwrap_or_else(BigRational::zero)
    }

    /// The value of the polynomial if it is constant
    pub fn constant_value(&self) -> Option<BigRational> {
        let mut terms = self.terms.iter();
        match (terms.next(), terms.next()) {
            (None, _) => Some(BigRational::zero()),
            (Some((e, c)), None) if e.iter().all(|k| *k == 0) => Some(c.clone()),
            _ => None,
        }
    }

    /// Does any term contain the variable `var`?
    pub fn depends_on(&self, var: usize) -> bool {
        self.terms.keys().any(|e| e[var] > 0)
    }

    fn add_term(&mut self, exponents: Vec<u32>, coefficient: BigRational) {
        if coefficient.is_zero() {
            return;
        }
        match self.terms.entry(exponents) {
            Entry::Vacant(entry) => {
                entry.insert(coefficient);
            }
            Entry::Occupied(mut entry) => {
                *entry.get_mut() += coefficient;
                if entry.get().is_zero() {
                    entry.remove();
                }
            }
        }
    }

    /// Multiply by a constant
    pub fn scale(&self, factor: &BigRational) -> Self {
        let mut p = Self::zero(self.nvars);
        for (e, c) in &self.terms {
            p.add_term(e.clone(), c * factor);
        }
        p
    }

    /// Raise to a non-negative integer power
    pub fn pow(&self, n: u32) -> Self {
        let mut result = Self::one(self.nvars);
        let mut base = self.clone();
        let mut n = n;
        while n > 0 {
            if n & 1 == 1 {
                result = &result * &base;
            }
            n >>= 1;
            if n > 0 {
                base = &base * &base;
            }
        }
        result
    }

    /// Partial derivative with respect to `var`
    pub fn derivative(&self, var: usize) -> Self {
        let mut p = Self::zero(self.nvars);
        for (e, c) in &self.terms {
            let k = e[var];
            if k > 0 {
                let mut exponents = e.clone();
                exponents[var] -= 1;
                p.add_term(exponents, c * BigRational::from_integer(k.into()));
            }
        }
        p
    }

    /// Antiderivative with respect to `var` that vanishes where `var` is 0
    pub fn antiderivative(&self, var: usize) -> Self {
        let mut p = Self::zero(self.nvars);
        for (e, c) in &self.terms {
            let mut exponents = e.clone();
            exponents[var] += 1;
            let k = BigRational::from_integer(exponents[var].into());
            p.add_term(exponents, c / k);
        }
        p
    }

    /// Replace the variable `var` by the polynomial `value`
    pub fn substitute(&self, var: usize, value: &Polynomial) -> Self {
        assert_eq!(self.nvars, value.nvars);
        let max_power = self.terms.keys().map(|e| e[var]).max().unwrap_or(0) as usize;
        let mut powers = vec![Self::one(self.nvars)];
        for k in 1..=max_power {
            let next = &powers[k - 1] * value;
            powers.push(next);
        }

        let mut result = Self::zero(self.nvars);
        for (e, c) in &self.terms {
            let mut exponents = e.clone();
            let k = exponents[var] as usize;
            exponents[var] = 0;
            let mut monomial = Self::zero(self.nvars);
            monomial.add_term(exponents, c.clone());
            result = &result + &(&monomial * &powers[k]);
        }
        result
    }

    /// Integrate `var` from `lower` to `upper`
    ///
    /// The limits may depend on the other variables; the result no longer
    /// depends on `var`.
    pub fn definite_integral(&self, var: usize, lower: &Polynomial, upper: &Polynomial) -> Self {
        let antiderivative = self.antiderivative(var);
        &antiderivative.substitute(var, upper) - &antiderivative.substitute(var, lower)
    }

    /// Evaluate at a point
    pub fn evaluate(&self, point: &[BigRational]) -> BigRational {
        assert_eq!(point.len(), self.nvars);
        let mut value = BigRational::zero();
        for (e, c) in &self.terms {
            let mut term = c.clone();
            for (x, k) in point.iter().zip(e) {
                term *= num::pow(x.clone(), *k as usize);
            }
            value += term;
        }
        value
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        assert_eq!(self.nvars, rhs.nvars);
        let mut p = self.clone();
        for (e, c) in &rhs.terms {
            p.add_term(e.clone(), c.clone());
        }
        p
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        assert_eq!(self.nvars, rhs.nvars);
        let mut p = self.clone();
        for (e, c) in &rhs.terms {
            p.add_term(e.clone(), -c);
        }
        p
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        assert_eq!(self.nvars, rhs.nvars);
        let mut p = Polynomial::zero(self.nvars);
        for (e0, c0) in &self.terms {
            for (e1, c1) in &rhs.terms {
                let exponents = e0.iter().zip(e1).map(|(a, b)| a + b).collect();
                p.add_term(exponents, c0 * c1);
            }
        }
        p
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(&-BigRational::one())
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Polynomial) -> Polynomial {
        &self + &rhs
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Polynomial) -> Polynomial {
        &self - &rhs
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Polynomial {
        &self * &rhs
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        -&self
    }
}

fn write_monomial(f: &mut fmt::Formatter<'_>, exponents: &[u32]) -> fmt::Result {
    let mut first = true;
    for (var, k) in exponents.iter().enumerate() {
        if *k == 0 {
            continue;
        }
        if !first {
            write!(f, "*")?;
        }
        first = false;
        write!(f, "{}", variable_name(var))?;
        if *k > 1 {
            write!(f, "^{k}")?;
        }
    }
    Ok(())
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        // Lowest degree first, x before y before z
        let mut terms = self.terms.iter().collect::<Vec<_>>();
        terms.sort_by_key(|(e, _)| (e.iter().sum::<u32>(), Reverse(e.to_vec())));

        for (n, (e, c)) in terms.into_iter().enumerate() {
            match (n, c.is_negative()) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            let magnitude = c.abs();
            if e.iter().all(|k| *k == 0) {
                write!(f, "{magnitude}")?;
            } else if magnitude.is_one() {
                write_monomial(f, e)?;
            } else {
                write!(f, "{magnitude}*")?;
                write_monomial(f, e)?;
            }
        }
        Ok(())
    }
}

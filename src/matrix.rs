//! Element matrices with exact entries
use itertools::iproduct;
use num::{BigRational, ToPrimitive, Zero};
use std::ops::{Index, IndexMut};

/// A square matrix of exact rational values, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementMatrix {
    size: usize,
    data: Vec<BigRational>,
}

impl ElementMatrix {
    /// A matrix of zeros
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            data: vec![BigRational::zero(); size * size],
        }
    }

    /// Create a matrix from its rows
    ///
    /// Panics if the rows do not form a square matrix.
    pub fn from_rows(rows: Vec<Vec<BigRational>>) -> Self {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for row in rows {
            assert_eq!(row.len(), size, "Element matrices must be square");
            data.extend(row);
        }
        Self { size, data }
    }

    /// The number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get an entry
    pub fn get(&self, i: usize, j: usize) -> Option<&BigRational> {
        if i < self.size && j < self.size {
            self.data.get(i * self.size + j)
        } else {
            None
        }
    }

    /// Iterate over `((i, j), value)` in row-major order
    pub fn entries(&self) -> impl Iterator<Item = ((usize, usize), &BigRational)> {
        iproduct!(0..self.size, 0..self.size).zip(self.data.iter())
    }

    /// Is the matrix equal to its transpose?
    pub fn is_symmetric(&self) -> bool {
        iproduct!(0..self.size, 0..self.size)
            .filter(|(i, j)| i < j)
            .all(|(i, j)| self[[i, j]] == self[[j, i]])
    }

    /// The sum of each row
    pub fn row_sums(&self) -> Vec<BigRational> {
        self.data
            .chunks(self.size.max(1))
            .take(self.size)
            .map(|row| row.iter().fold(BigRational::zero(), |acc, v| acc + v))
            .collect()
    }

    /// The sum of all entries
    pub fn total(&self) -> BigRational {
        self.data.iter().fold(BigRational::zero(), |acc, v| acc + v)
    }

    /// The entries as floating point numbers, row-major
    ///
    /// This is meant for comparing with matrices assembled by quadrature.
    pub fn to_f64(&self) -> Vec<f64> {
        self.data
            .iter()
            .map(|v| v.to_f64().unwrap_or(f64::NAN))
            .collect()
    }
}

impl Index<[usize; 2]> for ElementMatrix {
    type Output = BigRational;

    fn index(&self, index: [usize; 2]) -> &BigRational {
        assert!(index[0] < self.size && index[1] < self.size);
        &self.data[index[0] * self.size + index[1]]
    }
}

impl IndexMut<[usize; 2]> for ElementMatrix {
    fn index_mut(&mut self, index: [usize; 2]) -> &mut BigRational {
        assert!(index[0] < self.size && index[1] < self.size);
        &mut self.data[index[0] * self.size + index[1]]
    }
}

//! Least-squares polynomial fitting via the normal equations

use crate::error::{ForecastError, Result};
use crate::features::FeatureSet;
use crate::models::{CurveModel, FittedCurve};

/// Polynomial regression of a fixed degree over (day offset, value) pairs
#[derive(Debug, Clone)]
pub struct PolynomialRegression {
    /// Name of the model
    name: String,
    /// Polynomial degree
    degree: usize,
}

/// Fitted polynomial regression
#[derive(Debug, Clone)]
pub struct FittedPolynomial {
    /// Name of the model
    name: String,
    /// Coefficients in ascending order of power
    coefficients: Vec<f64>,
}

impl PolynomialRegression {
    /// Create a new polynomial regression model of the given degree
    pub fn new(degree: usize) -> Result<Self> {
        if degree == 0 {
            return Err(ForecastError::InvalidParameter(
                "Polynomial degree must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!("polynomial_{}", degree),
            degree,
        })
    }

    /// Polynomial degree
    pub fn degree(&self) -> usize {
        self.degree
    }
}

impl CurveModel for PolynomialRegression {
    type Fitted = FittedPolynomial;

    fn fit(&self, features: &FeatureSet) -> Result<FittedPolynomial> {
        let n = features.len();
        if n < self.degree + 1 {
            return Err(ForecastError::FitFailure(format!(
                "Insufficient data for degree-{} polynomial. Need at least {} observations, got {}.",
                self.degree,
                self.degree + 1,
                n
            )));
        }

        let xs: Vec<f64> = features.offsets.iter().map(|o| *o as f64).collect();
        let ys = &features.values;
        let size = self.degree + 1;

        // Normal equations: sum of powers on the left, moment vector on
        // the right. Power k runs up to 2 × degree.
        let mut power_sums = vec![0.0; 2 * self.degree + 1];
        for x in &xs {
            let mut power = 1.0;
            for sum in power_sums.iter_mut() {
                *sum += power;
                power *= x;
            }
        }

        let mut matrix = vec![vec![0.0; size]; size];
        for (row, matrix_row) in matrix.iter_mut().enumerate() {
            for (col, cell) in matrix_row.iter_mut().enumerate() {
                *cell = power_sums[row + col];
            }
        }

        let mut rhs = vec![0.0; size];
        for (x, y) in xs.iter().zip(ys.iter()) {
            let mut power = 1.0;
            for cell in rhs.iter_mut() {
                *cell += y * power;
                power *= x;
            }
        }

        let coefficients = solve(matrix, rhs)?;

        Ok(FittedPolynomial {
            name: self.name.clone(),
            coefficients,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedPolynomial {
    /// Coefficients in ascending order of power
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    fn evaluate(&self, x: f64) -> f64 {
        // Horner evaluation from the highest power down
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * x + c)
    }
}

impl FittedCurve for FittedPolynomial {
    fn predict(&self, offsets: &[i64]) -> Result<Vec<f64>> {
        Ok(offsets.iter().map(|o| self.evaluate(*o as f64)).collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Solve a dense linear system by Gaussian elimination with partial
/// pivoting. The systems here are tiny (degree + 1 unknowns).
fn solve(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Result<Vec<f64>> {
    let size = rhs.len();

    for col in 0..size {
        // Pivot on the largest remaining entry in this column
        let mut pivot_row = col;
        for row in col + 1..size {
            if matrix[row][col].abs() > matrix[pivot_row][col].abs() {
                pivot_row = row;
            }
        }

        if matrix[pivot_row][col].abs() < 1e-12 {
            return Err(ForecastError::MathError(
                "Singular normal-equations system; offsets do not support this degree".to_string(),
            ));
        }

        matrix.swap(col, pivot_row);
        rhs.swap(col, pivot_row);

        for row in col + 1..size {
            let factor = matrix[row][col] / matrix[col][col];
            for k in col..size {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    // Back substitution
    let mut solution = vec![0.0; size];
    for col in (0..size).rev() {
        let mut value = rhs[col];
        for k in col + 1..size {
            value -= matrix[col][k] * solution[k];
        }
        solution[col] = value / matrix[col][col];
    }

    Ok(solution)
}

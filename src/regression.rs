//! Batch gradient descent for a single-feature linear model `y = a*x + b`.

use serde::Serialize;

/// A fitted linear model together with its training loss history.
#[derive(Debug, Clone, Serialize)]
pub struct LinearRegressor {
    pub slope: f64,
    pub intercept: f64,
    /// Mean squared error measured before each update, one entry per step.
    pub loss_history: Vec<f64>,
}

impl LinearRegressor {
    /// Runs `steps` full-batch gradient descent updates from a zero model.
    pub fn fit(data: &[(f64, f64)], steps: usize, learning_rate: f64) -> Self {
        assert!(!data.is_empty(), "regression data must not be empty");
        let n = data.len() as f64;
        let mut slope = 0.0;
        let mut intercept = 0.0;
        let mut loss_history = Vec::with_capacity(steps);

        for _ in 0..steps {
            let loss = data
                .iter()
                .map(|&(x, y)| {
                    let residual = slope * x + intercept - y;
                    residual * residual
                })
                .sum::<f64>()
                / n;
            loss_history.push(loss);

            let slope_gradient = data
                .iter()
                .map(|&(x, y)| (slope * x + intercept - y) * x)
                .sum::<f64>()
                / n;
            let intercept_gradient = data
                .iter()
                .map(|&(x, y)| slope * x + intercept - y)
                .sum::<f64>()
                / n;
            slope -= learning_rate * slope_gradient;
            intercept -= learning_rate * intercept_gradient;
        }

        Self {
            slope,
            intercept,
            loss_history,
        }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Mean squared error of the fitted model on a dataset.
    pub fn mse(&self, data: &[(f64, f64)]) -> f64 {
        assert!(!data.is_empty(), "regression data must not be empty");
        data.iter()
            .map(|&(x, y)| {
                let residual = self.predict(x) - y;
                residual * residual
            })
            .sum::<f64>()
            / data.len() as f64
    }
}

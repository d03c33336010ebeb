//! One-hidden-layer perceptron with mini-batch gradient accumulation.
//!
//! Both layers carry an implicit bias unit. Weights live in `ndarray`
//! matrices and are initialized deterministically from a seed, so training
//! runs are reproducible.

use ndarray::{Array1, Array2, Axis};
use rayon::prelude::*;
use serde::Serialize;

/// Supported activation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Activation {
    Sigmoid,
}

impl Activation {
    fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }

    /// Derivative expressed in terms of the activation output.
    fn derivative(self, output: f64) -> f64 {
        match self {
            Activation::Sigmoid => output * (1.0 - output),
        }
    }
}

/// Errors raised for malformed caller-supplied vectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    InputArity { expected: usize, actual: usize },
    OutputArity { expected: usize, actual: usize },
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::InputArity { expected, actual } => write!(
                f,
                "network expects {} input values but got {}",
                expected, actual
            ),
            NetworkError::OutputArity { expected, actual } => write!(
                f,
                "network expects {} target values but got {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for NetworkError {}

/// A fully-connected input/hidden/output network.
pub struct Network {
    input_len: usize,
    hidden_len: usize,
    output_len: usize,
    activation: Activation,
    /// `(hidden_len, input_len + 1)`; the last column weighs the bias unit.
    hidden_weights: Array2<f64>,
    /// `(output_len, hidden_len + 1)`; the last column weighs the bias unit.
    output_weights: Array2<f64>,
}

impl Network {
    /// Creates a network with weights drawn deterministically from `seed`,
    /// uniform in `[-1, 1]`.
    pub fn new(
        input_len: usize,
        hidden_len: usize,
        output_len: usize,
        activation: Activation,
        seed: u64,
    ) -> Self {
        let mut state = if seed == 0 { 1 } else { seed };
        let hidden_weights =
            Array2::from_shape_fn((hidden_len, input_len + 1), |_| next_weight(&mut state));
        let output_weights =
            Array2::from_shape_fn((output_len, hidden_len + 1), |_| next_weight(&mut state));
        Self {
            input_len,
            hidden_len,
            output_len,
            activation,
            hidden_weights,
            output_weights,
        }
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.input_len, self.hidden_len, self.output_len)
    }

    /// Forward pass; returns the hidden activations (bias appended) and the
    /// output activations. Assumes the input arity was validated.
    fn forward(&self, input: &[f64]) -> (Array1<f64>, Array1<f64>) {
        debug_assert_eq!(input.len(), self.input_len);
        let mut with_bias = input.to_vec();
        with_bias.push(1.0);
        let input_with_bias = Array1::from(with_bias);

        let activation = self.activation;
        let hidden = self
            .hidden_weights
            .dot(&input_with_bias)
            .mapv(|x| activation.apply(x));
        let mut hidden_with_bias = hidden.to_vec();
        hidden_with_bias.push(1.0);
        let hidden_with_bias = Array1::from(hidden_with_bias);

        let output = self
            .output_weights
            .dot(&hidden_with_bias)
            .mapv(|x| activation.apply(x));
        (hidden_with_bias, output)
    }

    /// Computes the output activations for one input vector.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>, NetworkError> {
        if input.len() != self.input_len {
            return Err(NetworkError::InputArity {
                expected: self.input_len,
                actual: input.len(),
            });
        }
        Ok(self.forward(input).1.to_vec())
    }

    fn check_examples(&self, examples: &[(Vec<f64>, Vec<f64>)]) -> Result<(), NetworkError> {
        for (input, target) in examples {
            if input.len() != self.input_len {
                return Err(NetworkError::InputArity {
                    expected: self.input_len,
                    actual: input.len(),
                });
            }
            if target.len() != self.output_len {
                return Err(NetworkError::OutputArity {
                    expected: self.output_len,
                    actual: target.len(),
                });
            }
        }
        Ok(())
    }

    /// Trains with mini-batch gradient accumulation: per batch the gradients
    /// of every example are summed, averaged and applied once.
    pub fn train(
        &mut self,
        examples: &[(Vec<f64>, Vec<f64>)],
        batch_size: usize,
        epochs: usize,
        learning_rate: f64,
    ) -> Result<(), NetworkError> {
        assert!(batch_size > 0, "batch size must be positive");
        self.check_examples(examples)?;
        if examples.is_empty() {
            return Ok(());
        }

        for _ in 0..epochs {
            for batch in examples.chunks(batch_size) {
                let mut hidden_grad: Array2<f64> =
                    Array2::zeros((self.hidden_len, self.input_len + 1));
                let mut output_grad: Array2<f64> =
                    Array2::zeros((self.output_len, self.hidden_len + 1));

                for (input, target) in batch {
                    let (hidden_with_bias, output) = self.forward(input);

                    let output_delta = Array1::from_shape_fn(self.output_len, |i| {
                        self.activation.derivative(output[i]) * (target[i] - output[i])
                    });
                    let hidden_delta = Array1::from_shape_fn(self.hidden_len, |i| {
                        let back: f64 = (0..self.output_len)
                            .map(|k| self.output_weights[[k, i]] * output_delta[k])
                            .sum();
                        self.activation.derivative(hidden_with_bias[i]) * back
                    });

                    let mut with_bias = input.to_vec();
                    with_bias.push(1.0);
                    let input_with_bias = Array1::from(with_bias);

                    output_grad += &output_delta
                        .view()
                        .insert_axis(Axis(1))
                        .dot(&hidden_with_bias.view().insert_axis(Axis(0)));
                    hidden_grad += &hidden_delta
                        .view()
                        .insert_axis(Axis(1))
                        .dot(&input_with_bias.view().insert_axis(Axis(0)));
                }

                let scale = learning_rate / batch.len() as f64;
                self.output_weights.scaled_add(scale, &output_grad);
                self.hidden_weights.scaled_add(scale, &hidden_grad);
            }
        }
        Ok(())
    }

    /// Mean squared error over a batch, averaged across output units.
    pub fn evaluate(&self, examples: &[(Vec<f64>, Vec<f64>)]) -> Result<f64, NetworkError> {
        self.check_examples(examples)?;
        if examples.is_empty() {
            return Ok(0.0);
        }
        let total: f64 = examples
            .par_iter()
            .map(|(input, target)| {
                let output = self.forward(input).1;
                output
                    .iter()
                    .zip(target)
                    .map(|(o, t)| (o - t) * (o - t))
                    .sum::<f64>()
                    / self.output_len as f64
            })
            .sum();
        Ok(total / examples.len() as f64)
    }
}

fn lcg(seed: u64) -> u64 {
    seed.wrapping_mul(1664525).wrapping_add(1013904223)
}

fn next_weight(state: &mut u64) -> f64 {
    *state = lcg(*state);
    let fraction = (*state & 0xFFFF_FFFF) as f64 / u32::MAX as f64;
    fraction.mul_add(2.0, -1.0)
}

use crate::*;
use rand::Rng;

/// One dense layer: `fan_out` neurons, each with `fan_in` weights and a bias.
///
/// Weights are stored row-major, one row of `fan_in + 1` per neuron with the
/// bias last, so a row is exactly the neuron's incoming connections.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    fan_in: usize,
    fan_out: usize,
    activation: Activation,
    weights: Vec<Scalar>,
}

impl Layer {
    pub fn new(fan_in: usize, fan_out: usize, activation: Activation) -> Self {
        Self {
            fan_in,
            fan_out,
            activation,
            weights: vec![0.; (fan_in + 1) * fan_out],
        }
    }

    pub fn fan_in(&self) -> usize {
        self.fan_in
    }
    pub fn fan_out(&self) -> usize {
        self.fan_out
    }
    pub fn activation(&self) -> Activation {
        self.activation
    }
    pub fn weights(&self) -> &[Scalar] {
        &self.weights
    }
    pub fn weights_mut(&mut self) -> &mut [Scalar] {
        &mut self.weights
    }
    /// Incoming connections of neuron `o`, bias last.
    pub fn row(&self, o: usize) -> &[Scalar] {
        let n = self.fan_in + 1;
        &self.weights[o * n..(o + 1) * n]
    }

    /// Activated outputs for one input vector.
    pub fn forward(&self, x: &[Scalar]) -> Vec<Scalar> {
        debug_assert!(x.len() == self.fan_in);
        (0..self.fan_out)
            .map(|o| self.row(o))
            .map(|row| {
                row[..self.fan_in]
                    .iter()
                    .zip(x)
                    .map(|(w, x)| w * x)
                    .sum::<Scalar>()
                    + row[self.fan_in]
            })
            .map(|z| self.activation.activate(z))
            .collect()
    }

    /// Nguyen–Widrow initialization.
    /// Each neuron's incoming weights are drawn uniformly, then rescaled to norm
    /// `β = 0.7 · fan_out^(1/fan_in)`; biases are drawn from `[-β, β]`.
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        let beta = 0.7 * (self.fan_out as Scalar).powf(1. / self.fan_in.max(1) as Scalar);
        let fan_in = self.fan_in;
        for row in self.weights.chunks_mut(fan_in + 1) {
            let (weights, bias) = row.split_at_mut(fan_in);
            weights
                .iter_mut()
                .for_each(|w| *w = rng.random_range(-0.5..0.5));
            let norm = weights.iter().map(|w| w * w).sum::<Scalar>().sqrt();
            if norm > 0. {
                weights.iter_mut().for_each(|w| *w *= beta / norm);
            }
            bias[0] = rng.random_range(-beta..beta);
        }
    }
}

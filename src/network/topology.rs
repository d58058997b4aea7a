use crate::*;

/// Layer widths and activations of a dense network.
///
/// The input width is stored separately because the input layer has no
/// weights of its own. Every later layer carries a bias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    inputs: usize,
    layers: Vec<(usize, Activation)>,
}

impl Topology {
    pub fn new(inputs: usize) -> Self {
        Self {
            inputs,
            layers: Vec::new(),
        }
    }
    /// Append a layer of `width` neurons.
    pub fn layer(mut self, width: usize, activation: Activation) -> Self {
        self.layers.push((width, activation));
        self
    }
    /// Default shape for a window of `depth` draws:
    /// `6W → 5·6W (sigmoid) → 5·6W (sigmoid) → 6 (linear)`.
    pub fn from_depth(depth: usize) -> Self {
        let inputs = depth * DRAW_SIZE;
        (0..HIDDEN_LAYERS)
            .fold(Self::new(inputs), |t, _| {
                t.layer(HIDDEN_FACTOR * inputs, Activation::Sigmoid)
            })
            .layer(DRAW_SIZE, Activation::Linear)
    }

    pub fn inputs(&self) -> usize {
        self.inputs
    }
    pub fn outputs(&self) -> usize {
        self.layers.last().map(|(w, _)| *w).unwrap_or(self.inputs)
    }
    /// `(fan_in, fan_out, activation)` for every weighted layer.
    pub fn shapes(&self) -> impl Iterator<Item = (usize, usize, Activation)> + '_ {
        std::iter::once(self.inputs)
            .chain(self.layers.iter().map(|(w, _)| *w))
            .zip(self.layers.iter())
            .map(|(fan_in, (fan_out, activation))| (fan_in, *fan_out, *activation))
    }
    /// Total trainable parameters, biases included.
    pub fn parameters(&self) -> usize {
        self.shapes().map(|(i, o, _)| (i + 1) * o).sum()
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.inputs)?;
        for (width, activation) in self.layers.iter() {
            write!(f, " → {} {}", width, activation)?;
        }
        Ok(())
    }
}

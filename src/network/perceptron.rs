use crate::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::iter::IndexedParallelIterator;
use rayon::iter::IntoParallelRefIterator;
use rayon::iter::ParallelIterator;

/// Dense multilayer perceptron trained full-batch by iRPROP+.
///
/// Gradients are computed per example on a dedicated rayon pool, collected
/// in example order, and summed on the calling thread. The summation order
/// never depends on scheduling, so a seeded perceptron produces the same
/// error sequence whatever the pool size.
pub struct Perceptron {
    topology: Topology,
    layers: Vec<Layer>,
    rprop: Resilient,
    rng: SmallRng,
    error: Scalar,
    pool: rayon::ThreadPool,
}

/// Summed weight gradients and squared error over some examples.
struct Gradient {
    weights: Vec<Vec<Scalar>>,
    squares: Scalar,
}

impl Perceptron {
    /// Build and randomize a network.
    /// `seed` makes every reset reproducible; `threads` sizes the gradient pool.
    pub fn new(topology: Topology, seed: Option<u64>, threads: usize) -> anyhow::Result<Self> {
        if topology.parameters() == 0 || topology.outputs() != DRAW_SIZE {
            anyhow::bail!(
                "topology needs weighted layers ending in {} outputs, found {}",
                DRAW_SIZE,
                topology.outputs()
            );
        }
        let layers = topology
            .shapes()
            .map(|(fan_in, fan_out, activation)| Layer::new(fan_in, fan_out, activation))
            .collect::<Vec<Layer>>();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .thread_name(|i| format!("gradient-{}", i))
            .build()?;
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        log::debug!(
            "{:<32}{:<32}",
            "perceptron",
            format!("{} ({} weights, {} threads)", topology, topology.parameters(), threads.max(1))
        );
        let mut perceptron = Self {
            rprop: Resilient::new(&layers),
            topology,
            layers,
            rng,
            error: Scalar::INFINITY,
            pool,
        };
        perceptron.reset();
        Ok(perceptron)
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Input seen by every layer, and the final output.
    fn activations(&self, input: &[Scalar]) -> (Vec<Vec<Scalar>>, Vec<Scalar>) {
        let mut belows = Vec::with_capacity(self.layers.len());
        let mut current = input.to_vec();
        for layer in self.layers.iter() {
            let next = layer.forward(&current);
            belows.push(std::mem::replace(&mut current, next));
        }
        (belows, current)
    }

    /// Backpropagate `½ Σ (y - t)²` for a single example.
    fn backprop(&self, input: &[Scalar], target: &[Scalar; DRAW_SIZE]) -> Gradient {
        let (belows, output) = self.activations(input);
        let errors = output
            .iter()
            .zip(target.iter())
            .map(|(y, t)| y - t)
            .collect::<Vec<Scalar>>();
        let squares = errors.iter().map(|e| e * e).sum::<Scalar>();
        let mut weights = self
            .layers
            .iter()
            .map(|l| vec![0.; l.weights().len()])
            .collect::<Vec<Vec<Scalar>>>();
        let last = self.layers.len() - 1;
        let mut deltas = errors
            .iter()
            .zip(output.iter())
            .map(|(e, y)| e * self.layers[last].activation().derivative(*y))
            .collect::<Vec<Scalar>>();
        for l in (0..self.layers.len()).rev() {
            let layer = &self.layers[l];
            let below = &belows[l];
            let n = layer.fan_in() + 1;
            for (o, delta) in deltas.iter().enumerate() {
                let row = &mut weights[l][o * n..(o + 1) * n];
                row[..layer.fan_in()]
                    .iter_mut()
                    .zip(below.iter())
                    .for_each(|(g, x)| *g = delta * x);
                row[layer.fan_in()] = *delta;
            }
            if l > 0 {
                let activation = self.layers[l - 1].activation();
                deltas = (0..layer.fan_in())
                    .map(|i| {
                        deltas
                            .iter()
                            .enumerate()
                            .map(|(o, delta)| layer.row(o)[i] * delta)
                            .sum::<Scalar>()
                            * activation.derivative(below[i])
                    })
                    .collect();
            }
        }
        Gradient { weights, squares }
    }

    fn check(&self, input: &[Scalar]) -> anyhow::Result<()> {
        if input.len() != self.topology.inputs() {
            anyhow::bail!(
                "input width {} does not match topology width {}",
                input.len(),
                self.topology.inputs()
            );
        }
        Ok(())
    }
}

impl Predictor for Perceptron {
    fn reset(&mut self) {
        for layer in self.layers.iter_mut() {
            layer.randomize(&mut self.rng);
        }
        self.rprop = Resilient::new(&self.layers);
        self.error = Scalar::INFINITY;
        log::trace!("perceptron reset");
    }

    fn train(
        &mut self,
        inputs: &[Vec<Scalar>],
        targets: &[[Scalar; DRAW_SIZE]],
    ) -> anyhow::Result<Scalar> {
        if inputs.is_empty() || inputs.len() != targets.len() {
            anyhow::bail!(
                "need matching non-empty example sets, got {} inputs and {} targets",
                inputs.len(),
                targets.len()
            );
        }
        inputs.iter().try_for_each(|x| self.check(x))?;
        let gradients = self.pool.install(|| {
            inputs
                .par_iter()
                .zip(targets.par_iter())
                .map(|(x, t)| self.backprop(x, t))
                .collect::<Vec<Gradient>>()
        });
        let mut total = Gradient {
            weights: self
                .layers
                .iter()
                .map(|l| vec![0.; l.weights().len()])
                .collect(),
            squares: 0.,
        };
        for gradient in gradients.iter() {
            total.squares += gradient.squares;
            for (sum, part) in total.weights.iter_mut().zip(gradient.weights.iter()) {
                sum.iter_mut().zip(part.iter()).for_each(|(s, p)| *s += p);
            }
        }
        let error = total.squares / (inputs.len() * DRAW_SIZE) as Scalar;
        if !error.is_finite() {
            anyhow::bail!("training error diverged to {}", error);
        }
        self.rprop.update(&mut self.layers, &total.weights, error);
        self.error = error;
        log::trace!("rprop step error {:.6}", error);
        Ok(error)
    }

    fn error(&self) -> Scalar {
        self.error
    }

    fn compute(&self, input: &[Scalar]) -> anyhow::Result<[Scalar; DRAW_SIZE]> {
        self.check(input)?;
        let (_, output) = self.activations(input);
        <[Scalar; DRAW_SIZE]>::try_from(output)
            .map_err(|v| anyhow::anyhow!("expected {} outputs, found {}", DRAW_SIZE, v.len()))
    }
}

impl TryFrom<&Settings> for Perceptron {
    type Error = anyhow::Error;
    fn try_from(settings: &Settings) -> Result<Self, Self::Error> {
        Self::new(
            Topology::from_depth(settings.depth),
            settings.seed,
            settings.threads,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny(seed: u64, threads: usize) -> Perceptron {
        let topology = Topology::new(4)
            .layer(8, Activation::Sigmoid)
            .layer(DRAW_SIZE, Activation::Linear);
        Perceptron::new(topology, Some(seed), threads).unwrap()
    }

    fn dataset() -> (Vec<Vec<Scalar>>, Vec<[Scalar; DRAW_SIZE]>) {
        let inputs = vec![
            vec![0.1, 0.2, 0.3, 0.4],
            vec![0.4, 0.3, 0.2, 0.1],
            vec![0.9, 0.1, 0.5, 0.3],
        ];
        let targets = vec![
            [1., 2., 3., 4., 5., 6.],
            [6., 5., 4., 3., 2., 1.],
            [2., 2., 2., 2., 2., 2.],
        ];
        (inputs, targets)
    }

    #[test]
    fn error_decreases() {
        let (inputs, targets) = dataset();
        let mut net = tiny(3, 2);
        let first = net.train(&inputs, &targets).unwrap();
        let mut last = first;
        for _ in 0..200 {
            last = net.train(&inputs, &targets).unwrap();
        }
        assert!(last < first, "{} !< {}", last, first);
        assert_eq!(net.error(), last);
    }

    #[test]
    fn gradient_matches_finite_difference() {
        let net = tiny(11, 1);
        let (inputs, targets) = dataset();
        let loss = |net: &Perceptron| {
            let y = net.compute(&inputs[0]).unwrap();
            0.5 * y
                .iter()
                .zip(targets[0].iter())
                .map(|(y, t)| (y - t) * (y - t))
                .sum::<Scalar>()
        };
        let analytic = net.backprop(&inputs[0], &targets[0]);
        let h = 1e-6;
        for (l, k) in [(0, 0), (0, 4), (0, 39), (1, 3), (1, 53)] {
            let mut up = tiny(11, 1);
            up.layers[l].weights_mut()[k] += h;
            let mut down = tiny(11, 1);
            down.layers[l].weights_mut()[k] -= h;
            let numeric = (loss(&up) - loss(&down)) / (2. * h);
            let exact = analytic.weights[l][k];
            assert!(
                (numeric - exact).abs() < 1e-5 * (1. + exact.abs()),
                "layer {} weight {}: {} vs {}",
                l,
                k,
                numeric,
                exact
            );
        }
    }

    #[test]
    fn thread_count_does_not_change_errors() {
        let (inputs, targets) = dataset();
        let mut a = tiny(5, 1);
        let mut b = tiny(5, 4);
        for _ in 0..10 {
            assert_eq!(
                a.train(&inputs, &targets).unwrap(),
                b.train(&inputs, &targets).unwrap()
            );
        }
    }

    #[test]
    fn reset_draws_new_weights() {
        let mut net = tiny(9, 1);
        let before = net.layers().to_vec();
        net.reset();
        assert_ne!(before, net.layers());
        assert_eq!(net.error(), Scalar::INFINITY);
    }

    #[test]
    fn seeded_networks_agree() {
        let a = tiny(42, 1);
        let b = tiny(42, 2);
        assert_eq!(a.layers(), b.layers());
        let x = [0.5, 0.25, 0.125, 0.0625];
        assert_eq!(a.compute(&x).unwrap(), b.compute(&x).unwrap());
    }

    #[test]
    fn rejects_wrong_widths() {
        let mut net = tiny(1, 1);
        assert!(net.compute(&[1., 2.]).is_err());
        assert!(net.train(&[vec![1., 2.]], &[[0.; DRAW_SIZE]]).is_err());
        assert!(net.train(&[], &[]).is_err());
        let wide = Topology::new(4).layer(3, Activation::Linear);
        assert!(Perceptron::new(wide, None, 1).is_err());
    }

    #[test]
    fn default_topology_builds() {
        let settings = Settings {
            depth: 2,
            seed: Some(1),
            threads: 1,
            ..Settings::default()
        };
        let net = Perceptron::try_from(&settings).unwrap();
        assert_eq!(net.topology(), &Topology::from_depth(2));
        let output = net.compute(&[1.; 12]).unwrap();
        assert!(output.iter().all(|y| y.is_finite()));
    }
}

use crate::*;

/// iRPROP+ state for every weight of a network.
///
/// Each weight moves by its own step size in the direction opposite to its
/// gradient. The step grows while the gradient keeps its sign and shrinks
/// when it flips; on a flip the previous move is also undone, but only if
/// the overall error went up.
#[derive(Debug, Clone, PartialEq)]
pub struct Resilient {
    steps: Vec<Vec<Scalar>>,
    gradients: Vec<Vec<Scalar>>,
    changes: Vec<Vec<Scalar>>,
    error: Scalar,
}

impl Resilient {
    /// Fresh state shaped like `layers`.
    pub fn new(layers: &[Layer]) -> Self {
        let shape = |fill: Scalar| {
            layers
                .iter()
                .map(|l| vec![fill; l.weights().len()])
                .collect::<Vec<Vec<Scalar>>>()
        };
        Self {
            steps: shape(RPROP_INITIAL_STEP),
            gradients: shape(0.),
            changes: shape(0.),
            error: Scalar::INFINITY,
        }
    }

    /// Apply one update given the summed gradients and the error they were measured at.
    pub fn update(&mut self, layers: &mut [Layer], gradients: &[Vec<Scalar>], error: Scalar) {
        let regressed = error > self.error;
        for (l, layer) in layers.iter_mut().enumerate() {
            let weights = layer.weights_mut();
            let steps = &mut self.steps[l];
            let lasts = &mut self.gradients[l];
            let changes = &mut self.changes[l];
            for k in 0..weights.len() {
                let gradient = gradients[l][k];
                let direction = sign(gradient) * sign(lasts[k]);
                let change = if direction > 0. {
                    steps[k] = Scalar::min(steps[k] * RPROP_GROWTH, RPROP_MAX_STEP);
                    lasts[k] = gradient;
                    -sign(gradient) * steps[k]
                } else if direction < 0. {
                    steps[k] = Scalar::max(steps[k] * RPROP_SHRINK, RPROP_MIN_STEP);
                    lasts[k] = 0.;
                    if regressed { -changes[k] } else { 0. }
                } else {
                    lasts[k] = gradient;
                    -sign(gradient) * steps[k]
                };
                weights[k] += change;
                changes[k] = change;
            }
        }
        self.error = error;
    }
}

/// Signum with a dead zone around zero.
fn sign(x: Scalar) -> Scalar {
    if x.abs() < RPROP_ZERO { 0. } else { x.signum() }
}

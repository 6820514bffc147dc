use crate::{layers::dense::Layer, math::matrix::Matrix};

/// First and second moment estimates for one layer's parameters.
#[derive(Debug, Clone)]
struct Moments {
    weights_v: Matrix,
    weights_s: Matrix,
    biases_v: Matrix,
    biases_s: Matrix,
}

impl Moments {
    fn zeros_like(layer: &Layer) -> Moments {
        let (wr, wc) = (layer.weights.rows, layer.weights.cols);
        let (br, bc) = (layer.biases.rows, layer.biases.cols);
        Moments {
            weights_v: Matrix::zeros(wr, wc),
            weights_s: Matrix::zeros(wr, wc),
            biases_v: Matrix::zeros(br, bc),
            biases_s: Matrix::zeros(br, bc),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Adam {
    learning_rate: f64,
    beta1: f64,
    beta2: f64,
    beta1_t: f64,
    beta2_t: f64,
    epsilon: f64,
    moments: Vec<Moments>,
}

impl Adam {
    pub const BETA1: f64 = 0.9;
    pub const BETA2: f64 = 0.999;
    pub const EPSILON: f64 = 1e-7;

    /// Creates an optimizer with one zeroed moment slot per layer.
    ///
    /// # Arguments
    /// * `layers` - The layers this instance will update, in network order.
    /// * `learning_rate` - The coefficient that scales every update.
    pub fn new(layers: &[Layer], learning_rate: f64) -> Adam {
        Adam {
            learning_rate,
            beta1: Self::BETA1,
            beta2: Self::BETA2,
            beta1_t: 1.0,
            beta2_t: 1.0,
            epsilon: Self::EPSILON,
            moments: layers.iter().map(Moments::zeros_like).collect(),
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Applies one bias-corrected update to every layer.
    ///
    /// `grads` holds one (weights_grad, biases_grad) pair per layer, in the
    /// same order the optimizer was created with.
    pub fn step(&mut self, layers: &mut [Layer], grads: &[(Matrix, Matrix)]) {
        assert_eq!(layers.len(), self.moments.len(), "optimizer/layer count mismatch");
        assert_eq!(layers.len(), grads.len(), "gradient/layer count mismatch");

        self.beta1_t *= self.beta1;
        self.beta2_t *= self.beta2;

        let bc1 = 1.0 - self.beta1_t;
        let bc2 = 1.0 - self.beta2_t;
        let rule = Rule {
            beta1: self.beta1,
            beta2: self.beta2,
            epsilon: self.epsilon,
            step_size: self.learning_rate * (bc2.sqrt() / bc1),
        };

        for ((layer, (w_grad, b_grad)), m) in layers.iter_mut().zip(grads).zip(&mut self.moments) {
            rule.apply(&mut layer.weights, w_grad, &mut m.weights_v, &mut m.weights_s);
            rule.apply(&mut layer.biases, b_grad, &mut m.biases_v, &mut m.biases_s);
        }
    }
}

struct Rule {
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    step_size: f64,
}

impl Rule {
    fn apply(&self, params: &mut Matrix, grad: &Matrix, v: &mut Matrix, s: &mut Matrix) {
        let Rule { beta1: b1, beta2: b2, epsilon: eps, step_size } = *self;
        params
            .values_mut()
            .zip(grad.values())
            .zip(v.values_mut())
            .zip(s.values_mut())
            .for_each(|(((p, g), v), s)| {
                *v = b1 * *v + (1.0 - b1) * g;
                *s = b2 * *s + (1.0 - b2) * g.powi(2);
                *p -= step_size * *v / (s.sqrt() + eps);
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;

    #[test]
    fn first_step_moves_each_param_by_about_lr() {
        let mut layers = vec![Layer::new(2, 2, ActivationFunction::Identity)];
        let before = layers[0].weights.clone();
        let mut adam = Adam::new(&layers, 0.01);

        let grads = vec![(
            Matrix { rows: 2, cols: 2, data: vec![vec![1.0, -1.0], vec![0.5, -4.0]] },
            Matrix::row(&[2.0, -2.0]),
        )];
        adam.step(&mut layers, &grads);

        // After bias correction the first update is lr * sign(g).
        for (new, (old, g)) in layers[0].weights.values().zip(before.values().zip(grads[0].0.values())) {
            let moved = old - new;
            assert!((moved - 0.01 * g.signum()).abs() < 1e-6, "moved {moved}");
        }
        assert!((layers[0].biases.data[0][0] + 0.01).abs() < 1e-6);
        assert!((layers[0].biases.data[0][1] - 0.01).abs() < 1e-6);
    }

    #[test]
    fn zero_gradient_leaves_params_unchanged() {
        let mut layers = vec![Layer::new(3, 2, ActivationFunction::ReLU)];
        let before = layers[0].weights.clone();
        let mut adam = Adam::new(&layers, 0.001);
        let grads = vec![(Matrix::zeros(2, 3), Matrix::zeros(1, 3))];
        adam.step(&mut layers, &grads);
        assert_eq!(layers[0].weights, before);
    }
}

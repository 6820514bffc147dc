use crate::{activation::activation::ActivationFunction, layers::dense::Layer, math::matrix::Matrix};

#[derive(Debug, Clone)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    /// Builds a network from (size, input_size, activation) tuples.
    pub fn new(layer_specs: Vec<(usize, usize, ActivationFunction)>) -> Network {
        let layers = layer_specs.into_iter()
            .map(|(size, input_size, activation)| Layer::new(size, input_size, activation))
            .collect();
        Network { layers }
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Layer::input_size)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, |l| l.size)
    }

    /// Inference pass; leaves the cached activations untouched.
    pub fn predict(&self, input: &[f64]) -> Vec<f64> {
        let mut current = Matrix::row(input);
        for layer in &self.layers {
            current = layer.apply(&current).1;
        }
        current.data.swap_remove(0)
    }

    /// Forward pass; stores activations in each layer for backprop.
    pub fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        let mut current = Matrix::row(input);
        for layer in &mut self.layers {
            current = layer.feed_from(&current);
        }
        current.data.swap_remove(0)
    }

    /// Backpropagates `output_error` (∂L/∂output) through the activations
    /// cached by the last `forward(input)` call.
    ///
    /// Returns one (weights_grad, biases_grad) pair per layer, input → output.
    pub fn backward(&self, input: &[f64], output_error: Vec<f64>) -> Vec<(Matrix, Matrix)> {
        let mut grads = Vec::with_capacity(self.layers.len());
        let mut delta = Matrix::row(&output_error);

        for i in (0..self.layers.len()).rev() {
            let input_for_layer = if i == 0 {
                Matrix::row(input)
            } else {
                self.layers[i - 1].neurons.clone()
            };

            let (w_grad, b_grad) = self.layers[i].compute_gradients(&delta, &input_for_layer);

            if i > 0 {
                // Propagate δ_i through the weights to get ∂L/∂a_{i-1}
                delta = &b_grad * &self.layers[i].weights.transpose();
            }

            grads.push((w_grad, b_grad));
        }

        grads.reverse();
        grads
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> Network {
        Network::new(vec![
            (3, 2, ActivationFunction::ReLU),
            (1, 3, ActivationFunction::Identity),
        ])
    }

    #[test]
    fn reports_io_sizes() {
        let net = tiny();
        assert_eq!(net.input_size(), 2);
        assert_eq!(net.output_size(), 1);
    }

    #[test]
    fn predict_agrees_with_forward() {
        let mut net = tiny();
        let x = [0.4, -0.7];
        let inferred = net.predict(&x);
        assert_eq!(net.forward(&x), inferred);
    }

    #[test]
    fn backward_yields_one_pair_per_layer() {
        let mut net = tiny();
        let x = [1.0, 0.5];
        net.forward(&x);
        let grads = net.backward(&x, vec![0.3]);
        assert_eq!(grads.len(), 2);
        assert_eq!((grads[0].0.rows, grads[0].0.cols), (2, 3));
        assert_eq!((grads[1].0.rows, grads[1].0.cols), (3, 1));
        assert_eq!((grads[1].1.rows, grads[1].1.cols), (1, 1));
    }
}

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

#[derive(Debug, Clone)]
pub struct Layer{
    pub size: usize,
    pub neurons: Matrix,
    pre_neurons: Matrix,  // pre-activation values (z = xW + b) needed for the derivative
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction
}

impl Layer {
    /// Weights are He-initialized in front of ReLU and Xavier-initialized
    /// otherwise; biases start at zero.
    pub fn new(size: usize, input_size: usize, activation: ActivationFunction) -> Layer {
        let weights = match activation {
            ActivationFunction::ReLU => Matrix::he(input_size, size),
            ActivationFunction::Identity => Matrix::xavier(input_size, size),
        };

        Layer {
            size,
            neurons: Matrix::zeros(1, size),
            pre_neurons: Matrix::zeros(1, size),
            weights,
            biases: Matrix::zeros(1, size),
            activator: activation
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// Pure forward step: returns (z, a) without touching the cached state.
    pub fn apply(&self, input: &Matrix) -> (Matrix, Matrix) {
        let z = input * &self.weights + self.biases.clone();
        let a = z.map(|x| self.activator.function(x));
        (z, a)
    }

    /// Forward step that caches z and a for a following backward pass.
    pub fn feed_from(&mut self, input: &Matrix) -> Matrix {
        let (z, a) = self.apply(input);
        self.pre_neurons = z;
        self.neurons = a.clone();
        a
    }

    /// Computes gradient adjustments. Returns (weights_grad, biases_grad).
    /// `next_layer_delta` is ∂L/∂a for this layer (error in activation space).
    pub fn compute_gradients(
        &self,
        next_layer_delta: &Matrix,
        inputs: &Matrix,
    ) -> (Matrix, Matrix) {
        let act_derivative = self.pre_neurons.map(|x| self.activator.derivative(x));
        // δ = error ⊙ σ'(z)
        let layer_delta = next_layer_delta.hadamard(&act_derivative);

        let weights_adjustment = &inputs.transpose() * &layer_delta;
        let biases_adjustment = layer_delta;

        (weights_adjustment, biases_adjustment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_layer_has_zero_biases() {
        let layer = Layer::new(4, 7, ActivationFunction::ReLU);
        assert_eq!(layer.input_size(), 7);
        assert_eq!((layer.weights.rows, layer.weights.cols), (7, 4));
        assert!(layer.biases.values().all(|&b| b == 0.0));
    }

    #[test]
    fn feed_from_matches_apply() {
        let mut layer = Layer::new(2, 3, ActivationFunction::Identity);
        let x = Matrix::row(&[0.1, -0.2, 0.3]);
        let (_, expected) = layer.apply(&x);
        assert_eq!(layer.feed_from(&x), expected);
        assert_eq!(layer.neurons, expected);
    }

    #[test]
    fn identity_gradients_are_outer_product() {
        let mut layer = Layer::new(1, 2, ActivationFunction::Identity);
        let x = Matrix::row(&[2.0, -1.0]);
        layer.feed_from(&x);
        let (w_grad, b_grad) = layer.compute_gradients(&Matrix::row(&[0.5]), &x);
        assert_eq!(w_grad.data, vec![vec![1.0], vec![-0.5]]);
        assert_eq!(b_grad.data, vec![vec![0.5]]);
    }
}

use log::debug;

use crate::{
    activation::activation::ActivationFunction,
    error::ModelError,
    loss::mse::MseLoss,
    model::approximator::{check_len, Approximator},
    network::network::Network,
    optim::adam::Adam,
};

pub const INPUT_SIZE: usize = 7;
pub const HIDDEN_SIZE: usize = 4;
pub const OUTPUT_SIZE: usize = 2;
pub const LEARNING_RATE: f64 = 0.001;

/// The per-connection regressor: 7 inputs → 4 ReLU units → 2 linear outputs,
/// trained online with Adam on mean squared error.
#[derive(Debug, Clone)]
pub struct RewardModel {
    network: Network,
    optimizer: Adam,
    steps: usize,
}

impl RewardModel {
    /// A freshly initialized, untrained model.
    pub fn new() -> RewardModel {
        let network = Network::new(vec![
            (HIDDEN_SIZE, INPUT_SIZE, ActivationFunction::ReLU),
            (OUTPUT_SIZE, HIDDEN_SIZE, ActivationFunction::Identity),
        ]);
        let optimizer = Adam::new(&network.layers, LEARNING_RATE);
        RewardModel { network, optimizer, steps: 0 }
    }

    /// Number of training steps applied so far.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl Default for RewardModel {
    fn default() -> Self {
        RewardModel::new()
    }
}

impl Approximator for RewardModel {
    fn input_size(&self) -> usize {
        self.network.input_size()
    }

    fn output_size(&self) -> usize {
        self.network.output_size()
    }

    fn predict(&self, input: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_len("input", input, self.input_size())?;
        let output = self.network.predict(input);
        if !output.iter().all(|v| v.is_finite()) {
            return Err(ModelError::NonFinite { what: "output" });
        }
        Ok(output)
    }

    fn fit(&mut self, input: &[f64], target: &[f64]) -> Result<f64, ModelError> {
        check_len("input", input, self.input_size())?;
        check_len("target", target, self.output_size())?;

        let output = self.network.forward(input);
        let loss = MseLoss::loss(&output, target);
        if !loss.is_finite() {
            return Err(ModelError::NonFinite { what: "loss" });
        }
        let grads = self.network.backward(input, MseLoss::derivative(&output, target));
        // Adam squares each gradient, so the square must stay finite too.
        let finite = grads.iter()
            .flat_map(|(w, b)| w.values().chain(b.values()))
            .all(|g| (g * g).is_finite());
        if !finite {
            return Err(ModelError::NonFinite { what: "gradient" });
        }

        self.optimizer.step(&mut self.network.layers, &grads);
        self.steps += 1;

        debug!(
            "fit step {} (lr {}): loss = {loss:.6}",
            self.steps,
            self.optimizer.learning_rate()
        );
        Ok(loss)
    }
}

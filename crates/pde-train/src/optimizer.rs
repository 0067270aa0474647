// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Coefficient Optimizers
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! First-order update rules for Xi.

use ndarray::Array1;
use pde_types::config::{OptimizerConfig, OptimizerKind};
use pde_types::error::{PdeError, PdeResult};

/// Adam moment decay rates and stabiliser (Kingma & Ba defaults).
const BETA1: f64 = 0.9;
const BETA2: f64 = 0.999;
const EPS: f64 = 1e-8;

/// Persistable optimizer internals.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizerState {
    GradientDescent,
    Adam {
        step: u64,
        m: Array1<f64>,
        v: Array1<f64>,
    },
}

pub trait Optimizer {
    /// One in-place update of `params` along `-grad`.
    fn step(&mut self, params: &mut Array1<f64>, grad: &Array1<f64>) -> PdeResult<()>;

    fn learning_rate(&self) -> f64;

    fn set_learning_rate(&mut self, learning_rate: f64);

    fn state(&self) -> OptimizerState;

    fn load_state(&mut self, state: OptimizerState) -> PdeResult<()>;
}

pub fn build_optimizer(config: &OptimizerConfig) -> Box<dyn Optimizer> {
    match config.kind {
        OptimizerKind::Adam => Box::new(Adam::new(config.learning_rate)),
        OptimizerKind::GradientDescent => Box::new(GradientDescent::new(config.learning_rate)),
    }
}

fn check_lengths(params: &Array1<f64>, grad: &Array1<f64>) -> PdeResult<()> {
    if params.len() != grad.len() {
        return Err(PdeError::ShapeMismatch(format!(
            "gradient has {} components for {} parameters",
            grad.len(),
            params.len()
        )));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct GradientDescent {
    learning_rate: f64,
}

impl GradientDescent {
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for GradientDescent {
    fn step(&mut self, params: &mut Array1<f64>, grad: &Array1<f64>) -> PdeResult<()> {
        check_lengths(params, grad)?;
        params.scaled_add(-self.learning_rate, grad);
        Ok(())
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    fn state(&self) -> OptimizerState {
        OptimizerState::GradientDescent
    }

    fn load_state(&mut self, state: OptimizerState) -> PdeResult<()> {
        match state {
            OptimizerState::GradientDescent => Ok(()),
            OptimizerState::Adam { .. } => Err(PdeError::Checkpoint(
                "cannot load Adam state into gradient descent".to_string(),
            )),
        }
    }
}

/// Adam with bias-corrected first and second moments.
#[derive(Debug, Clone)]
pub struct Adam {
    learning_rate: f64,
    step: u64,
    m: Option<Array1<f64>>,
    v: Option<Array1<f64>>,
}

impl Adam {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            step: 0,
            m: None,
            v: None,
        }
    }

    pub fn steps_taken(&self) -> u64 {
        self.step
    }
}

impl Optimizer for Adam {
    fn step(&mut self, params: &mut Array1<f64>, grad: &Array1<f64>) -> PdeResult<()> {
        check_lengths(params, grad)?;
        let n = params.len();
        let m = self.m.get_or_insert_with(|| Array1::zeros(n));
        let v = self.v.get_or_insert_with(|| Array1::zeros(n));
        if m.len() != n || v.len() != n {
            return Err(PdeError::ShapeMismatch(format!(
                "Adam moments sized for {} parameters, got {n}",
                m.len()
            )));
        }

        self.step += 1;
        let t = self.step as i32;
        let bias1 = 1.0 - BETA1.powi(t);
        let bias2 = 1.0 - BETA2.powi(t);

        for i in 0..n {
            let g = grad[i];
            m[i] = BETA1 * m[i] + (1.0 - BETA1) * g;
            v[i] = BETA2 * v[i] + (1.0 - BETA2) * g * g;
            let m_hat = m[i] / bias1;
            let v_hat = v[i] / bias2;
            params[i] -= self.learning_rate * m_hat / (v_hat.sqrt() + EPS);
        }
        Ok(())
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    fn state(&self) -> OptimizerState {
        match (&self.m, &self.v) {
            (Some(m), Some(v)) => OptimizerState::Adam {
                step: self.step,
                m: m.clone(),
                v: v.clone(),
            },
            _ => OptimizerState::Adam {
                step: 0,
                m: Array1::zeros(0),
                v: Array1::zeros(0),
            },
        }
    }

    fn load_state(&mut self, state: OptimizerState) -> PdeResult<()> {
        match state {
            OptimizerState::Adam { step, m, v } => {
                if m.len() != v.len() {
                    return Err(PdeError::Checkpoint(format!(
                        "Adam moments disagree in length: m={}, v={}",
                        m.len(),
                        v.len()
                    )));
                }
                self.step = step;
                if m.is_empty() {
                    self.m = None;
                    self.v = None;
                } else {
                    self.m = Some(m);
                    self.v = Some(v);
                }
                Ok(())
            }
            OptimizerState::GradientDescent => Err(PdeError::Checkpoint(
                "cannot load gradient descent state into Adam".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_gradient_descent_step() {
        let mut gd = GradientDescent::new(0.5);
        let mut params = array![1.0, -2.0];
        gd.step(&mut params, &array![2.0, -4.0]).unwrap();
        assert_eq!(params, array![0.0, 0.0]);
    }

    #[test]
    fn test_first_adam_step_moves_by_learning_rate() {
        // After bias correction the first step is lr * sign(g).
        let mut adam = Adam::new(0.1);
        let mut params = array![0.0, 0.0, 0.0];
        adam.step(&mut params, &array![3.0, -0.002, 0.0]).unwrap();
        assert!((params[0] + 0.1).abs() < 1e-6);
        assert!((params[1] - 0.1).abs() < 1e-4);
        assert_eq!(params[2], 0.0);
        assert_eq!(adam.steps_taken(), 1);
    }

    #[test]
    fn test_adam_minimises_quadratic() {
        // f(x) = Σ (x_i - c_i)^2
        let target = array![1.5, -0.5, 3.0];
        let mut adam = Adam::new(0.05);
        let mut x = Array1::zeros(3);
        for _ in 0..2000 {
            let grad = (&x - &target) * 2.0;
            adam.step(&mut x, &grad).unwrap();
        }
        for i in 0..3 {
            assert!((x[i] - target[i]).abs() < 1e-2, "x[{i}] = {}", x[i]);
        }
    }

    #[test]
    fn test_adam_state_roundtrip() {
        let mut adam = Adam::new(0.01);
        let mut x = array![1.0, 2.0];
        adam.step(&mut x, &array![0.5, -0.5]).unwrap();
        let state = adam.state();

        let mut restored = Adam::new(0.01);
        restored.load_state(state.clone()).unwrap();
        assert_eq!(restored.state(), state);

        let mut x1 = x.clone();
        let mut x2 = x.clone();
        adam.step(&mut x1, &array![0.1, 0.2]).unwrap();
        restored.step(&mut x2, &array![0.1, 0.2]).unwrap();
        assert_eq!(x1, x2);
    }

    #[test]
    fn test_mismatched_state_rejected() {
        let mut gd = GradientDescent::new(0.1);
        assert!(gd.load_state(Adam::new(0.1).state()).is_err());
        let mut adam = Adam::new(0.1);
        assert!(adam.load_state(OptimizerState::GradientDescent).is_err());

        let mut x = array![1.0, 2.0];
        assert!(matches!(
            adam.step(&mut x, &array![1.0]),
            Err(PdeError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_build_from_config() {
        let cfg = OptimizerConfig {
            kind: OptimizerKind::GradientDescent,
            learning_rate: 0.25,
        };
        let opt = build_optimizer(&cfg);
        assert_eq!(opt.state(), OptimizerState::GradientDescent);
        assert_eq!(opt.learning_rate(), 0.25);
    }
}

use std::{cell::Cell, rc::Rc};

use ndarray::{Dimension, Zip};

use super::{IntoParam, Optimize, Optimizer, OptimizerStatus, Param};

/// Plain stochastic gradient descent.
///
/// ```text
/// p(t+1) = p(t) - lr(t) * g(t+1)
/// ```
///
/// The learning rate is read at every step, so a scheduler can change it between steps.
#[derive(Debug)]
pub struct StochasticGD {
    lr: Cell<f32>,
}

impl OptimizerStatus for StochasticGD {
    fn get_lr(&self) -> f32 {
        self.lr.get()
    }

    fn set_lr(&self, lr: f32) {
        self.lr.set(lr)
    }
}

impl StochasticGD {
    /// Creates a new stochastic gradient descent optimizer.
    ///
    /// # Arguments
    ///
    /// * `lr` - initial learning rate.
    #[allow(clippy::new_ret_no_self)]
    pub fn new(lr: f32) -> Optimizer<Self> {
        Optimizer::new(Self { lr: Cell::new(lr) })
    }
}

/// A parameter used by the SGD optimizer.
pub struct SGDParam<D>
where
    D: Dimension,
{
    param: Param<D>,
    status: Rc<StochasticGD>,
}

impl<D> IntoParam<StochasticGD> for Param<D>
where
    D: 'static + Dimension,
{
    type Param = SGDParam<D>;

    fn into_param(self, status: Rc<StochasticGD>) -> Self::Param {
        SGDParam {
            param: self,
            status,
        }
    }
}

impl<D> Optimize for SGDParam<D>
where
    D: Dimension,
{
    fn optimize(&mut self) {
        let lr = self.status.get_lr();
        let grad = self.param.grad();
        let mut data = self.param.data_mut();

        Zip::from(&mut *data)
            .and(&*grad)
            .for_each(|data_el, grad_el| *data_el -= grad_el * lr);
    }

    fn zero_grad(&mut self) {
        self.param.zero_grad()
    }
}

use std::{
    cell::{Cell, Ref, RefCell, RefMut},
    rc::Rc,
};

use ndarray::{Array, Dimension};

/// Learning rule applied to a single registered parameter.
pub trait Optimize {
    /// Updates the parameter in place using its accumulated gradient.
    fn optimize(&mut self);

    /// Zeroes the gradient of this parameter.
    fn zero_grad(&mut self);
}

/// Turns a [`Param`] handle into the per-parameter state of a given optimizer.
pub trait IntoParam<T>
where
    T: OptimizerStatus,
{
    type Param: 'static + Optimize;

    fn into_param(self, status: Rc<T>) -> Self::Param;
}

/// Optimizer internal status trait.
///
/// Schedulers only ever talk to an optimizer through this trait: they read the rate once and
/// overwrite it after every training step.
pub trait OptimizerStatus {
    /// Gets the optimizer's learning rate.
    fn get_lr(&self) -> f32;

    /// Sets the optimizer's learning rate.
    fn set_lr(&self, lr: f32);
}

/// A trainable tensor together with its gradient.
///
/// Cloning a `Param` yields another handle to the same storage, so the training loop can keep
/// writing gradients into a parameter after it has been registered.
pub struct Param<D>
where
    D: Dimension,
{
    data: Rc<RefCell<Array<f32, D>>>,
    grad: Rc<RefCell<Array<f32, D>>>,
}

impl<D> Param<D>
where
    D: Dimension,
{
    /// Wraps `data` into a parameter with a zeroed gradient.
    pub fn new(data: Array<f32, D>) -> Self {
        let grad = Array::zeros(data.raw_dim());

        Self {
            data: Rc::new(RefCell::new(data)),
            grad: Rc::new(RefCell::new(grad)),
        }
    }

    /// Returns an immutable reference to the parameter's values.
    pub fn data(&self) -> Ref<Array<f32, D>> {
        self.data.borrow()
    }

    /// Returns a mutable reference to the parameter's values.
    pub fn data_mut(&self) -> RefMut<Array<f32, D>> {
        self.data.borrow_mut()
    }

    /// Returns an immutable reference to the gradient.
    pub fn grad(&self) -> Ref<Array<f32, D>> {
        self.grad.borrow()
    }

    /// Returns a mutable reference to the gradient.
    pub fn grad_mut(&self) -> RefMut<Array<f32, D>> {
        self.grad.borrow_mut()
    }

    pub fn zero_grad(&self) {
        self.grad.borrow_mut().fill(0.);
    }
}

impl<D> Clone for Param<D>
where
    D: Dimension,
{
    fn clone(&self) -> Self {
        Self {
            data: Rc::clone(&self.data),
            grad: Rc::clone(&self.grad),
        }
    }
}

/// Generic optimization algorithm template.
///
/// Holds the shared status (learning rate and hyperparameters) and the registered parameters,
/// and counts the optimization steps performed so far.
pub struct Optimizer<T>
where
    T: OptimizerStatus,
{
    status: Rc<T>,
    params: RefCell<Vec<Box<dyn Optimize>>>,
    iterations: Cell<usize>,
}

impl<T> Optimizer<T>
where
    T: OptimizerStatus,
{
    /// Creates a new optimizer with the provided status.
    pub fn new(status: T) -> Self {
        Self {
            status: Rc::new(status),
            params: RefCell::default(),
            iterations: Cell::new(0),
        }
    }

    /// Returns the current learning rate.
    pub fn get_lr(&self) -> f32 {
        self.status.get_lr()
    }

    /// Sets a new value for the learning rate.
    pub fn set_lr(&self, lr: f32) {
        self.status.set_lr(lr)
    }

    /// Returns an immutable reference to the inner status.
    pub fn status(&self) -> &T {
        &self.status
    }

    /// Registers a parameter. Following calls to `.step()` will update it.
    pub fn register<U>(&self, param: U)
    where
        U: IntoParam<T>,
    {
        let param = param.into_param(Rc::clone(&self.status));
        self.params.borrow_mut().push(Box::new(param));
    }

    /// Number of registered parameters.
    pub fn len(&self) -> usize {
        self.params.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of optimization steps performed so far.
    pub fn iterations(&self) -> usize {
        self.iterations.get()
    }

    /// Applies the learning rule to every registered parameter with the current learning rate.
    pub fn step(&self) {
        self.params
            .borrow_mut()
            .iter_mut()
            .for_each(|param| param.optimize());
        self.iterations.set(self.iterations.get() + 1);
    }

    /// Zeroes the gradients of all the registered parameters.
    pub fn zero_grad(&self) {
        self.params
            .borrow_mut()
            .iter_mut()
            .for_each(|param| param.zero_grad());
    }
}

impl<T> Default for Optimizer<T>
where
    T: OptimizerStatus + Default,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

//! Xavier initializer parameters

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// References to the random engine and the layer being initialized
///
/// The engine is shared between initializer invocations on one thread; it is
/// not `Sync`, so concurrent initialization needs one engine per thread.
pub struct XavierParameter<E, L> {
    pub engine: Option<Rc<RefCell<E>>>,
    pub layer: Option<Rc<L>>,
}

impl<E, L> XavierParameter<E, L> {
    pub fn new(engine: Rc<RefCell<E>>, layer: Rc<L>) -> Self {
        Self {
            engine: Some(engine),
            layer: Some(layer),
        }
    }

    pub fn with_engine(mut self, engine: Rc<RefCell<E>>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn with_layer(mut self, layer: Rc<L>) -> Self {
        self.layer = Some(layer);
        self
    }
}

impl<E, L> Default for XavierParameter<E, L> {
    fn default() -> Self {
        Self {
            engine: None,
            layer: None,
        }
    }
}

impl<E, L> Clone for XavierParameter<E, L> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            layer: self.layer.clone(),
        }
    }
}

impl<E, L> fmt::Debug for XavierParameter<E, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XavierParameter")
            .field("engine", &self.engine.is_some())
            .field("layer", &self.layer.is_some())
            .finish()
    }
}

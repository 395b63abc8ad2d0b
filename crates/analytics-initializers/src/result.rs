//! Initializer result slots

use analytics_core::{Numeric, SlotKey, SlotMap, Tensor};

/// Slots of an [`InitializerResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitializerResultId {
    /// Tensor receiving the initialized values
    Value,
}

impl SlotKey for InitializerResultId {
    const COUNT: usize = 1;

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::Value => "value",
        }
    }
}

/// Holds the target tensor of an initialization
#[derive(Debug, Clone, PartialEq)]
pub struct InitializerResult<T: Numeric> {
    slots: SlotMap<InitializerResultId, Tensor<T>>,
}

impl<T: Numeric> Default for InitializerResult<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> InitializerResult<T> {
    pub fn new() -> Self {
        Self {
            slots: SlotMap::new(),
        }
    }

    pub fn with_value(tensor: Tensor<T>) -> Self {
        let mut result = Self::new();
        result.set_value(tensor);
        result
    }

    pub fn set_value(&mut self, tensor: Tensor<T>) {
        self.slots.set(InitializerResultId::Value, tensor);
    }

    pub fn value(&self) -> Option<&Tensor<T>> {
        self.slots.get(InitializerResultId::Value)
    }

    pub fn value_mut(&mut self) -> Option<&mut Tensor<T>> {
        self.slots.get_mut(InitializerResultId::Value)
    }

    pub fn take_value(&mut self) -> Option<Tensor<T>> {
        self.slots.take(InitializerResultId::Value)
    }
}

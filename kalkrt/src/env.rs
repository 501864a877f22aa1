use std::collections::HashMap;
use std::hash::{BuildHasher, RandomState};
use std::ops::Deref;

use log::trace;

use crate::value::Value;
use crate::{RuntimeError, RuntimeResult};

/// Variable bindings that live for a whole session.
#[derive(Debug, Clone)]
pub struct Env<S = RandomState> {
    table: HashMap<String, Value, S>,
}

impl<S> Deref for Env<S> {
    type Target = HashMap<String, Value, S>;

    fn deref(&self) -> &Self::Target {
        &self.table
    }
}

impl<S: Default> Default for Env<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Default> Env<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: HashMap::default(),
        }
    }
}

impl<S: BuildHasher> Env<S> {
    pub fn try_get(&self, name: &str) -> RuntimeResult<Value> {
        self.table
            .get(name)
            .copied()
            .ok_or_else(|| RuntimeError::UndefinedVariable(name.to_string()))
    }

    /// Binds `name`, returning the value it replaced.
    pub fn assign(&mut self, name: &str, value: Value) -> Option<Value> {
        trace!("{name} = {value}");
        if let Some(slot) = self.table.get_mut(name) {
            Some(std::mem::replace(slot, value))
        } else {
            self.table.insert(name.to_string(), value);
            None
        }
    }
}

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::core::Value;

#[derive(Debug, Default)]
struct Scope {
    parent: Option<Environment>,
    values: HashMap<String, Value>,
}

/// A name-to-value mapping with an optional parent.
///
/// `Environment` is a cheap, shared handle: clones refer to the same
/// mapping, so a function body that runs against the caller's environment
/// leaves its bindings visible to the caller.
///
/// Lookups fall back to the parent on a miss. Definitions always write to
/// this mapping, never to a parent.
///
/// # Example
/// ```
/// use funke::interpreter::{environment::Environment, value::core::Value};
///
/// let global = Environment::new();
/// global.define("x", Value::Int(1));
///
/// let local = global.derive();
/// local.define("x", Value::Int(2));
///
/// assert_eq!(local.find("x"), Some(Value::Int(2)));
/// assert_eq!(global.find("x"), Some(Value::Int(1)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Environment {
    inner: Rc<RefCell<Scope>>,
}

impl Environment {
    /// Creates an empty root environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty environment whose parent is `self`.
    #[must_use]
    pub fn derive(&self) -> Self {
        let scope = Scope { parent: Some(self.clone()),
                            values: HashMap::new(), };
        Self { inner: Rc::new(RefCell::new(scope)) }
    }

    /// Looks `name` up here, then along the parent chain.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Value> {
        let scope = self.inner.borrow();
        match scope.values.get(name) {
            Some(value) => Some(value.clone()),
            None => scope.parent.as_ref().and_then(|parent| parent.find(name)),
        }
    }

    /// Binds `name` to `value` in this mapping, replacing any previous
    /// binding of the same name.
    pub fn define(&self, name: &str, value: Value) {
        self.inner.borrow_mut().values.insert(name.to_owned(), value);
    }

    /// Names bound directly in this mapping, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.borrow().values.keys().cloned().collect();
        names.sort();
        names
    }
}

use std::collections::HashMap;

use crate::value::Value;

/// A scope of the environment tree.
///
/// A child scope copies every binding visible in its parent at creation,
/// so a lookup is a single map query on the current scope and shadowing
/// falls out of the insertion order.
#[derive(Debug, Clone)]
pub struct Scope {
    pub parent: Option<usize>,
    bindings: HashMap<String, Value>,
}

impl Scope {
    /// Creates the global scope `e_0`.
    pub fn global() -> Self {
        Scope {
            parent: None,
            bindings: HashMap::new(),
        }
    }

    /// Creates a child scope inheriting the parent's bindings.
    pub fn child_of(parent: usize, scope: &Scope) -> Self {
        Scope {
            parent: Some(parent),
            bindings: scope.bindings.clone(),
        }
    }

    /// Binds a value to a name in this scope.
    pub fn define(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    /// Looks a name up in this scope.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn define_and_get() {
        let mut scope = Scope::global();
        scope.define("x", Value::Integer(5));

        assert_eq!(scope.get("x"), Some(&Value::Integer(5)));
        assert_eq!(scope.get("y"), None);
        assert_eq!(scope.parent, None);
    }

    #[test]
    fn child_inherits_bindings() {
        let mut parent = Scope::global();
        parent.define("x", Value::Integer(1));

        let child = Scope::child_of(0, &parent);
        assert_eq!(child.parent, Some(0));
        assert_eq!(child.get("x"), Some(&Value::Integer(1)));
    }

    #[test]
    fn child_shadows_parent() {
        let mut parent = Scope::global();
        parent.define("x", Value::Integer(1));

        let mut child = Scope::child_of(0, &parent);
        child.define("x", Value::Integer(2));

        assert_eq!(child.get("x"), Some(&Value::Integer(2)));
        assert_eq!(parent.get("x"), Some(&Value::Integer(1)));
    }
}

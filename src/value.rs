use std::fmt::{self, Display};

/// A compiled lambda paired with its definition-time environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Closure {
    pub index: usize,
    pub vars: Vec<String>,
    pub env: usize,
}

/// Represents a runtime value of the machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Str(String),
    Bool(bool),
    /// An ordered sequence of values; the empty tuple is `nil`.
    Tuple(Vec<Value>),
    Lambda(Closure),
    /// A recursion marker; applying it unfolds one step of the fixed point.
    Eta(Closure),
    /// A reference to one of the built-in primitives.
    Builtin(&'static str),
    /// The fixed-point combinator.
    YStar,
    /// An environment marker `e_i` delimiting a function activation.
    Env(usize),
    Dummy,
}

impl Value {
    /// The empty tuple.
    pub fn nil() -> Value {
        Value::Tuple(vec!())
    }
}

/// Renders a value with the language's output conventions: booleans are
/// lowercase, strings drop their quotes, tuples print recursively with a
/// one-element tuple written `(v)`, and a lambda closure prints its bound
/// names and control index.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{value}"),
            Value::Str(contents) => write!(f, "{contents}"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Tuple(values) => {
                write!(f, "(")?;
                for (position, value) in values.iter().enumerate() {
                    if position > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, ")")
            },
            Value::Lambda(closure) => {
                write!(f, "[lambda closure: {}: {}]", closure.vars.join(","), closure.index)
            },
            Value::Eta(closure) => {
                write!(f, "[eta closure: {}: {}]", closure.vars.join(","), closure.index)
            },
            Value::Builtin(name) => write!(f, "{name}"),
            Value::YStar => write!(f, "Y*"),
            Value::Env(index) => write!(f, "e_{index}"),
            Value::Dummy => write!(f, "dummy"),
        }
    }
}

use serde::Serialize;
use std::fmt::Display;

/// A typed cell value after coercion.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
}

/// The key of a row: the coerced value of column 0.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RowKey {
    Int(i64),
    Text(String),
}

impl RowKey {
    /// Builds a key from a coerced key-column value; floats never key a row.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(value) => Some(RowKey::Int(*value)),
            Value::Text(value) => Some(RowKey::Text(value.to_owned())),
            Value::Float(_) => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(value) => f.write_str(value),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
        }
    }
}

impl Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowKey::Int(value) => write!(f, "{value}"),
            RowKey::Text(value) => f.write_str(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_keys_sort_numerically() {
        let mut keys = vec![RowKey::Int(10), RowKey::Int(2), RowKey::Int(-1)];
        keys.sort();
        assert_eq!(keys, vec![RowKey::Int(-1), RowKey::Int(2), RowKey::Int(10)]);
    }

    #[test]
    fn keys_from_values() {
        assert_eq!(RowKey::from_value(&Value::Int(7)), Some(RowKey::Int(7)));
        assert_eq!(RowKey::from_value(&Value::Text("a".to_owned())), Some(RowKey::Text("a".to_owned())));
        assert_eq!(RowKey::from_value(&Value::Float(1.5)), None);
        assert_eq!(RowKey::Int(42).to_string(), "42");
    }

    #[test]
    fn values_serialize_untagged() {
        let values = vec![Value::Int(1), Value::Float(0.5), Value::Text("名".to_owned())];
        assert_eq!(serde_json::to_string(&values).unwrap(), r#"[1,0.5,"名"]"#);
    }
}

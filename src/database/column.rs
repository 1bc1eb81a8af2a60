use std::fmt::Display;

/// Declared column types of the row-0 header.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// `string`: text, rendered from any cell kind
    String,
    /// `int` (or `integer`): 64-bit signed integers
    Int,
    /// `float`: double-precision floating point numbers
    Float,
    /// Any other tag; carried verbatim and passed through without interpretation
    Unsupported(String),
}

/// Represents a column of a configuration table.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// Column position within a row (0-based)
    pub position: usize,
    /// Declared type from the header
    pub kind: ColumnType,
    /// Field name from the header
    pub name: String,
}

impl ColumnType {
    /// Parses a declared type tag. Tags are case-sensitive.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "string" => Self::String,
            "int" | "integer" => Self::Int,
            "float" => Self::Float,
            _ => Self::Unsupported(tag.to_owned()),
        }
    }

    /// Returns the canonical tag, which is also the C# type name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Unsupported(tag) => tag,
        }
    }

    /// Only `string` and `int` columns may serve as the key column.
    #[inline]
    pub fn is_key(&self) -> bool {
        matches!(self, Self::String | Self::Int)
    }

    #[inline]
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_tags() {
        assert_eq!(ColumnType::parse("string"), ColumnType::String);
        assert_eq!(ColumnType::parse("int"), ColumnType::Int);
        assert_eq!(ColumnType::parse("integer"), ColumnType::Int);
        assert_eq!(ColumnType::parse("float"), ColumnType::Float);
    }

    #[test]
    fn unknown_tags_are_kept_verbatim() {
        let kind = ColumnType::parse("Vector3");
        assert_eq!(kind, ColumnType::Unsupported("Vector3".to_owned()));
        assert_eq!(kind.as_str(), "Vector3");
        assert!(!kind.is_supported());
        assert!(!kind.is_key());
        assert_eq!(ColumnType::parse("Int"), ColumnType::Unsupported("Int".to_owned()));
    }

    #[test]
    fn key_types() {
        assert!(ColumnType::String.is_key());
        assert!(ColumnType::Int.is_key());
        assert!(!ColumnType::Float.is_key());
    }
}

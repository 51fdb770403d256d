use std::fmt;

/// The closed set of target types a native column type maps to
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SemanticType {
    BigInteger,
    Double,
    Text,
    Boolean,
    Timestamp,
    Binary,
    Json,
}

impl SemanticType {
    pub fn go_type(&self) -> &'static str {
        match self {
            Self::BigInteger => "int64",
            Self::Double => "float64",
            Self::Text => "string",
            Self::Boolean => "bool",
            Self::Timestamp => "time.Time",
            Self::Binary => "[]byte",
            Self::Json => "datatypes.JSON",
        }
    }

    /// The Go package a field of this type needs imported, if any
    pub fn import_path(&self) -> Option<&'static str> {
        match self {
            Self::Timestamp => Some("time"),
            Self::Json => Some("gorm.io/datatypes"),
            _ => None,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.go_type())
    }
}

use std::sync::Arc;

use crate::data_type::DataType;
use crate::error::ValueError;

/// Represents a single scalar stored in a row.
///
/// Every value handed to the store is converted into this enum first, so kind
/// checks during validation are plain pattern matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// An absent value. Rows never store it; an optional column that is
    /// missing is simply not part of the record.
    Null,
    /// A 64-bit signed integer value.
    Int(i64),
    /// A UTF-8 string value, wrapped in an [Arc] for cheap cloning on scans.
    Text(Arc<str>),
}

impl Value {
    /// Returns `true` if the value is [Value::Null].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the inner integer value if this is a [Value::Int].
    /// Otherwise, returns `None`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns a reference to the inner string slice if this is a [Value::Text].
    /// Otherwise, returns `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the logical [DataType] corresponding to this value.
    ///
    /// Returns `None` for [Value::Null], which is untyped until it is checked
    /// against a column.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Null => None,
            Self::Int(_) => Some(DataType::Int),
            Self::Text(_) => Some(DataType::Text),
        }
    }
}

macro_rules! lossless_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

macro_rules! checked_int {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for Value {
                type Error = ValueError;

                fn try_from(v: $t) -> Result<Self, Self::Error> {
                    i64::try_from(v)
                        .map(Self::Int)
                        .map_err(|_| ValueError::IntegerOverflow(v.to_string()))
                }
            }
        )*
    };
}

lossless_int!(i8, i16, i32, i64, u8, u16, u32);
checked_int!(isize, usize, u64, i128, u128);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(Arc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(Arc::from(v))
    }
}

impl From<Arc<str>> for Value {
    fn from(v: Arc<str>) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────
    // Test 1 : accessors
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_accessors() {
        assert!(Value::Null.is_null());
        assert!(!Value::Int(1).is_null());

        assert_eq!(Value::Int(42).as_int(), Some(42));
        assert_eq!(Value::Text("42".into()).as_int(), None);

        assert_eq!(Value::Text("hello".into()).as_str(), Some("hello"));
        assert_eq!(Value::Int(1).as_str(), None);
        assert_eq!(Value::Null.as_str(), None);
    }

    // ─────────────────────────────────────────────────────────────
    // Test 2 : data_type
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_data_type() {
        assert_eq!(Value::Null.data_type(), None);
        assert_eq!(Value::Int(1).data_type(), Some(DataType::Int));
        assert_eq!(Value::Text("x".into()).data_type(), Some(DataType::Text));
    }

    // ─────────────────────────────────────────────────────────────
    // Test 3 : every integer width lands on the same value
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_integer_normalization() {
        let expected = Value::Int(1024);

        assert_eq!(Value::from(1024i16), expected);
        assert_eq!(Value::from(1024i32), expected);
        assert_eq!(Value::from(1024i64), expected);
        assert_eq!(Value::from(1024u16), expected);
        assert_eq!(Value::from(1024u32), expected);
        assert_eq!(Value::try_from(1024u64).unwrap(), expected);
        assert_eq!(Value::try_from(1024usize).unwrap(), expected);
        assert_eq!(Value::try_from(1024isize).unwrap(), expected);
        assert_eq!(Value::try_from(1024u128).unwrap(), expected);

        assert_eq!(Value::from(-3i8), Value::Int(-3));
        assert_eq!(Value::from(255u8), Value::Int(255));
    }

    // ─────────────────────────────────────────────────────────────
    // Test 4 : out of range integers
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_integer_overflow() {
        assert!(matches!(
            Value::try_from(u64::MAX),
            Err(ValueError::IntegerOverflow(_))
        ));
        assert!(Value::try_from(i128::MIN).is_err());
        assert_eq!(
            Value::try_from(i64::MAX as u64).unwrap(),
            Value::Int(i64::MAX)
        );
    }

    // ─────────────────────────────────────────────────────────────
    // Test 5 : text and option conversions
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_text_and_option() {
        assert_eq!(Value::from("abc"), Value::Text("abc".into()));
        assert_eq!(Value::from(String::from("abc")), Value::Text("abc".into()));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }
}

//! Interpolation parameters for `{{name}}` tokens

use std::collections::BTreeMap;
use std::fmt;

/// A value that can be substituted into a template.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Free text, inserted as-is
    Text(String),
    /// Whole number
    Integer(i64),
    /// Decimal number
    Float(f64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Integer)
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Integer)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Named parameters supplied to a single resolution call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: BTreeMap<String, ParamValue>,
}

impl Params {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<ParamValue>,
    {
        self.insert(name, value);
        self
    }

    /// Set a parameter, replacing any previous value
    pub fn insert<K, V>(&mut self, name: K, value: V)
    where
        K: Into<String>,
        V: Into<ParamValue>,
    {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a parameter by its exact name
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no parameters were supplied
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate parameters in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Build [`Params`] from `name => value` pairs.
///
/// ```rust
/// use poul_i18n::params;
///
/// let params = params!["teams" => 4, "teamName" => "Les Cocottes"];
/// assert_eq!(params.len(), 2);
/// assert!(params!().is_empty());
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::Params::new();
        $(
            params.insert($key, $value);
        )+
        params
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_render_like_display_text() {
        assert_eq!(ParamValue::from(3).to_string(), "3");
        assert_eq!(ParamValue::from(-12_i64).to_string(), "-12");
        assert_eq!(ParamValue::from(2.5).to_string(), "2.5");
        assert_eq!(ParamValue::from(2.0).to_string(), "2");
        assert_eq!(ParamValue::from("Poulette").to_string(), "Poulette");
    }

    #[test]
    fn test_large_unsigned_values_keep_their_digits() {
        assert_eq!(ParamValue::from(u64::MAX).to_string(), u64::MAX.to_string());
        assert_eq!(ParamValue::from(7_usize), ParamValue::Integer(7));
    }

    #[test]
    fn test_insert_replaces() {
        let mut params = Params::new().with("count", 1);
        params.insert("count", 2);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("count"), Some(&ParamValue::Integer(2)));
    }

    #[test]
    fn test_macro_and_iterator_agree() {
        let from_macro = params!["teams" => 3, "games" => 6, "results" => 2];
        let from_iter: Params = [("teams", 3), ("games", 6), ("results", 2)].into_iter().collect();
        assert_eq!(from_macro, from_iter);
        assert_eq!(
            from_macro.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            vec!["games", "results", "teams"]
        );
    }

    #[test]
    fn test_lookup_is_exact() {
        let params = params!["teamName" => "Les Cocottes"];
        assert!(params.get("teamname").is_none());
        assert!(params.get(" teamName").is_none());
        assert!(params.get("teamName").is_some());
    }
}

use std::fmt::Write as _;

/// Ordered label set. Keys keep their first insertion position; re-inserting
/// a key overwrites its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    pairs: Vec<(String, String)>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for LabelSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut labels = LabelSet::new();
        for (k, v) in iter {
            labels.insert(k, v);
        }
        labels
    }
}

/// Value slot of a sample line. Always rendered unquoted.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Pre-rendered numeric literal; checked when the group is added.
    Literal(String),
}

impl SampleValue {
    pub(crate) fn write_to(&self, out: &mut String) {
        match self {
            SampleValue::Int(v) => {
                let _ = write!(out, "{v}");
            }
            SampleValue::Float(v) if v.is_nan() => out.push_str("NaN"),
            SampleValue::Float(v) if v.is_infinite() => {
                out.push_str(if *v > 0.0 { "+Inf" } else { "-Inf" })
            }
            SampleValue::Float(v) => {
                let _ = write!(out, "{v}");
            }
            SampleValue::Bool(v) => out.push(if *v { '1' } else { '0' }),
            SampleValue::Literal(v) => out.push_str(v),
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),+) => {
        $(impl From<$ty> for SampleValue {
            fn from(v: $ty) -> Self {
                SampleValue::Int(i64::from(v))
            }
        })+
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for SampleValue {
    fn from(v: u64) -> Self {
        i64::try_from(v)
            .map(SampleValue::Int)
            .unwrap_or(SampleValue::Float(v as f64))
    }
}

impl From<usize> for SampleValue {
    fn from(v: usize) -> Self {
        SampleValue::from(v as u64)
    }
}

impl From<f32> for SampleValue {
    fn from(v: f32) -> Self {
        SampleValue::Float(f64::from(v))
    }
}

impl From<f64> for SampleValue {
    fn from(v: f64) -> Self {
        SampleValue::Float(v)
    }
}

impl From<bool> for SampleValue {
    fn from(v: bool) -> Self {
        SampleValue::Bool(v)
    }
}

impl From<String> for SampleValue {
    fn from(v: String) -> Self {
        SampleValue::Literal(v)
    }
}

impl From<&str> for SampleValue {
    fn from(v: &str) -> Self {
        SampleValue::Literal(v.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub labels: LabelSet,
    pub value: SampleValue,
}

impl Sample {
    pub fn new(labels: LabelSet, value: impl Into<SampleValue>) -> Self {
        Self {
            labels,
            value: value.into(),
        }
    }

    /// Sample without labels.
    pub fn bare(value: impl Into<SampleValue>) -> Self {
        Self::new(LabelSet::new(), value)
    }
}

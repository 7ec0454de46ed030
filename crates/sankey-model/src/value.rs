use serde::{Deserialize, Serialize};

/// Raw (unformatted) value of a summary-data cell.
///
/// The enum uses an explicit `{type, value}` tagged layout for stable IPC.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RawValue {
    /// Missing / null cell value.
    Null,
    /// IEEE-754 double precision number.
    Number(f64),
    /// Boolean.
    Boolean(bool),
    /// Plain text.
    Text(String),
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Null
    }
}

impl RawValue {
    /// Returns true if the value is [`RawValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Coerces the value to a finite `f64`.
    ///
    /// Numbers pass through unless they are NaN or infinite. Text must parse
    /// as a whole (after trimming); partial numeric prefixes do not count.
    /// Null and boolean values never coerce.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) if n.is_finite() => Some(*n),
            RawValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Boolean(value)
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// One cell of a summary row: the raw value plus the host-formatted display
/// string.
///
/// Hosts hand both forms over. Grouping keys and labels come from `formatted`
/// (what the viewer sees); numeric accumulation reads `raw`, so a column
/// formatted as `"$1,234"` still sums as `1234`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    pub raw: RawValue,
    pub formatted: String,
}

impl FieldValue {
    pub fn new(raw: impl Into<RawValue>, formatted: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            formatted: formatted.into(),
        }
    }

    /// Text cell whose formatted form equals the raw text.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            raw: RawValue::Text(value.clone()),
            formatted: value,
        }
    }

    /// Number cell formatted with the shortest round-trip `f64` display.
    pub fn number(value: f64) -> Self {
        Self {
            raw: RawValue::Number(value),
            formatted: format!("{value}"),
        }
    }

    /// Null cell with an empty formatted form.
    pub fn null() -> Self {
        Self {
            raw: RawValue::Null,
            formatted: String::new(),
        }
    }

    /// Finite numeric reading of the raw value; see [`RawValue::as_number`].
    pub fn as_number(&self) -> Option<f64> {
        self.raw.as_number()
    }
}

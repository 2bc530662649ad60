use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One probe attempt as written by the measurement tool
///
/// Numeric TFO fields default to `0` and flags to `false` when absent or
/// `null`. Fields the classifier does not use are kept in `extra`; this is
/// also where the run discriminator (`config` or `tfostate`) lives, because
/// its name varies between campaigns.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Record {
    pub dip: String,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default, deserialize_with = "optional_number")]
    pub rank: Option<i64>,
    #[serde(default, deserialize_with = "flag")]
    pub connstate: bool,
    #[serde(default, deserialize_with = "flag")]
    pub fwd_rst: bool,
    #[serde(default, deserialize_with = "flag")]
    pub rev_rst: bool,
    #[serde(default, deserialize_with = "number")]
    pub tfo_seq: i64,
    #[serde(default, deserialize_with = "number")]
    pub tfo_ack: i64,
    #[serde(default, deserialize_with = "number")]
    pub tfo_dlen: i64,
    #[serde(default, deserialize_with = "number")]
    pub tfo_synclen: i64,
    #[serde(default, deserialize_with = "number")]
    pub tfo_synkind: i64,
    #[serde(default, deserialize_with = "number")]
    pub tfo_ackclen: i64,
    #[serde(default, deserialize_with = "number")]
    pub tfo_ackkind: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Value of the run discriminator field, if present and integral
    ///
    /// Booleans count as `0`/`1` since some tools emit `tfostate` as a flag.
    pub fn discriminator(&self, column: &str) -> Option<i64> {
        match self.extra.get(column)? {
            Value::Bool(b) => Some(i64::from(*b)),
            value => integral(value),
        }
    }
}

/// Integer value of a JSON number or numeric string; `1.0` counts, `1.5` does not
fn integral(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().and_then(whole))
        }
        _ => None,
    }
}

fn whole(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
    Float(f64),
}

/// Accept `true`/`false`, `0`/`1` or `null`
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Int(i)) => i != 0,
        Some(Flag::Float(f)) => f != 0.0,
        None => false,
    })
}

/// Accept an integer, an integral float or numeric string, or `null` (treated as `0`)
fn number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_number(deserializer)?.unwrap_or(0))
}

fn optional_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => integral(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected an integer, got {value}"))),
    }
}

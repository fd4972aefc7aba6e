use serde_json::{Map, Value};

/// A job as received from the third-party feed.
///
/// The feed is untrusted: every field is optional and wrongly-typed values are
/// treated as absent rather than rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobListing {
    pub id: Option<String>,
    pub position: Option<String>,
    pub company: Option<String>,
    pub salary_min: Option<u64>,
    pub salary_max: Option<u64>,
    pub location: Option<String>,
    pub tags: Vec<String>,
    pub apply_url: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

impl JobListing {
    /// Reads a feed entry. Returns `None` for entries that are not JSON objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            id: scalar_field(obj, "id"),
            position: string_field(obj, "position"),
            company: string_field(obj, "company"),
            salary_min: salary_field(obj, "salary_min"),
            salary_max: salary_field(obj, "salary_max"),
            location: string_field(obj, "location"),
            tags: obj
                .get("tags")
                .and_then(Value::as_array)
                .map(|tags| {
                    tags.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            apply_url: string_field(obj, "apply_url"),
            date: string_field(obj, "date"),
            description: string_field(obj, "description"),
        })
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Like `string_field`, but also accepts numbers (the feed's `id` is sometimes numeric).
fn scalar_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Salaries arrive as integers, floats or numeric strings. Zero means "not given".
fn salary_field(obj: &Map<String, Value>, key: &str) -> Option<u64> {
    let amount = match obj.get(key)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64)),
        Value::String(s) => s.trim().replace(',', "").parse::<u64>().ok(),
        _ => None,
    }?;
    (amount > 0).then_some(amount)
}

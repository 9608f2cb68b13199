//! YAML documents assembled as values and serialised, so free text such as
//! the project description is always quoted correctly.

use serde_yaml::{Mapping, Value};

use crate::error::{Context, StackforgeResult};

/// A mapping that keeps the order of `entries`.
pub fn map<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Mapping(
        entries
            .into_iter()
            .map(|(key, value)| (Value::from(key), value))
            .collect::<Mapping>(),
    )
}

pub fn empty_map() -> Value {
    Value::Mapping(Mapping::new())
}

pub fn seq<I, T>(items: I) -> Value
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    Value::Sequence(items.into_iter().map(Into::into).collect())
}

/// Parse a fixed document skeleton.
pub fn parse(text: &str, file: &str) -> StackforgeResult<Value> {
    serde_yaml::from_str(text).context(format!("parsing {file} skeleton"))
}

pub fn render(value: &Value, file: &str) -> StackforgeResult<String> {
    serde_yaml::to_string(value).context(format!("rendering {file}"))
}

//! Lookup of configuration property values in a [`Figment`].

use figment::Figment;
use serde::Deserialize;

use crate::error::{InjectError, InjectResult};
use crate::value::Value;

/// Scalar configuration values, rendered back to text for conversion.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Self::Bool(flag) => flag.to_string(),
            Self::Integer(number) => number.to_string(),
            Self::Float(number) => number.to_string(),
            Self::Text(text) => text,
        }
    }
}

/// Reads property `key` from `figment` as text.
///
/// Returns `Ok(None)` when the key is absent. Dotted keys address nested
/// tables, as everywhere in figment.
pub(crate) fn lookup(figment: &Figment, key: &str) -> InjectResult<Option<Value>> {
    if !figment.contains(key) {
        tracing::trace!(key, "configuration property not present in source");
        return Ok(None);
    }
    let scalar: Scalar = figment
        .extract_inner(key)
        .map_err(|err| InjectError::ConfigSource {
            key: key.to_owned(),
            source: Box::new(err),
        })?;
    Ok(Some(Value::Text(scalar.into_text())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::Serialized;
    use rstest::rstest;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Sample {
        port: u16,
        name: &'static str,
        debug: bool,
        ratio: f64,
        list: Vec<i32>,
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Sample {
            port: 8080,
            name: "svc",
            debug: true,
            ratio: 0.5,
            list: vec![1, 2],
        }))
    }

    #[rstest]
    #[case::integer("port", "8080")]
    #[case::text("name", "svc")]
    #[case::boolean("debug", "true")]
    #[case::float("ratio", "0.5")]
    fn renders_scalars_as_text(#[case] key: &str, #[case] expected: &str) -> InjectResult<()> {
        let found = lookup(&figment(), key)?;
        assert_eq!(found, Some(Value::from(expected)));
        Ok(())
    }

    #[rstest]
    fn missing_keys_are_absent() -> InjectResult<()> {
        assert_eq!(lookup(&figment(), "absent")?, None);
        Ok(())
    }

    #[rstest]
    fn non_scalars_are_errors() {
        let err = lookup(&figment(), "list");
        assert!(matches!(err, Err(InjectError::ConfigSource { key, .. }) if key == "list"));
    }
}

//! [`Reflect`] for `serde_json::Value`.
//!
//! Every JSON variant reports its own type name (`null`, `bool`, `number`,
//! `string`, `array`, `object`), so a value that changes variant is reported
//! as a type mismatch. `null` is a nil pointer, arrays are slices and objects
//! are string-keyed maps. Numbers reflect as `Int`, `Uint` or `Float`
//! depending on how they were written; the engine compares them by value, so
//! `1` and `1.0` are equal.

use std::any::Any;
use std::borrow::Cow;

use serde_json::{Number, Value};

use crate::reflect::{Kind, Reflect};

impl Reflect for Value {
    fn reflect(&self) -> Kind<'_> {
        match self {
            Value::Null => Kind::Indirect(None),
            Value::Bool(b) => Kind::Bool(*b),
            Value::Number(n) => number_kind(n),
            Value::String(s) => Kind::Str(Cow::Borrowed(s)),
            Value::Array(items) => Kind::Slice(Some(items)),
            Value::Object(map) => Kind::Map(Some(map)),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

fn number_kind(n: &Number) -> Kind<'static> {
    if let Some(i) = n.as_i64() {
        Kind::Int(i)
    } else if let Some(u) = n.as_u64() {
        Kind::Uint(u)
    } else {
        n.as_f64().map_or(Kind::Opaque, Kind::Float)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn variants_map_to_kinds() {
        assert!(matches!(json!(null).reflect(), Kind::Indirect(None)));
        assert!(matches!(json!(true).reflect(), Kind::Bool(true)));
        assert!(matches!(json!(-4).reflect(), Kind::Int(-4)));
        assert!(matches!(json!(u64::MAX).reflect(), Kind::Uint(u64::MAX)));
        assert!(matches!(json!(1.5).reflect(), Kind::Float(_)));
        assert!(matches!(json!("s").reflect(), Kind::Str(_)));
        assert!(matches!(json!([1, 2]).reflect(), Kind::Slice(Some(_))));
        assert!(matches!(json!({"a": 1}).reflect(), Kind::Map(Some(_))));
    }

    #[test]
    fn type_names_follow_variant() {
        assert_eq!(json!(null).type_name(), "null");
        assert_eq!(json!(1).type_name(), "number");
        assert_eq!(json!(1.5).type_name(), "number");
        assert_eq!(json!({}).type_name(), "object");
    }

    #[test]
    fn object_lookup() {
        let value = json!({"name": "svc", "port": 80});
        let Kind::Map(Some(map)) = value.reflect() else {
            panic!("expected object");
        };
        let key = "port".to_string();
        assert!(map.lookup(&key).is_some());
        assert!(map.lookup(&"port").is_none());
    }
}

//! Human-readable rendering of reflected values.
//!
//! The format follows the usual `%v` conventions: scalars print bare,
//! records print as `{name: value, ...}`, maps as `map[k:v ...]` with keys
//! sorted by their rendering, sequences as `[a b c]`, and nil as `<nil>`.
//! Error-like values print their message. Floats print their shortest
//! representation, switching to exponent form (`1e-07`, `1.5e+06`) below
//! `1e-4` and from `1e6` up.

use std::fmt;

use crate::reflect::{Kind, Reflect};
use crate::view::Sequence;

/// Nesting level past which rendering prints `...`. Keeps self-referential
/// graphs printable.
const MAX_RENDER_DEPTH: usize = 8;

/// [`fmt::Display`] adapter for any [`Reflect`] value.
#[derive(Clone, Copy)]
pub struct Show<'a>(&'a dyn Reflect);

impl<'a> Show<'a> {
    pub fn new(value: &'a dyn Reflect) -> Self {
        Self(value)
    }
}

impl fmt::Display for Show<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, self.0, 0)
    }
}

/// Render `value` to a string.
pub fn describe(value: &dyn Reflect) -> String {
    Show::new(value).to_string()
}

fn render(f: &mut fmt::Formatter<'_>, value: &dyn Reflect, depth: usize) -> fmt::Result {
    if depth > MAX_RENDER_DEPTH {
        return f.write_str("...");
    }
    if let Some(message) = value.error_message() {
        return f.write_str(&message);
    }

    match value.reflect() {
        Kind::Nil | Kind::Indirect(None) => f.write_str("<nil>"),
        Kind::Bool(v) => write!(f, "{v}"),
        Kind::Int(v) => write!(f, "{v}"),
        Kind::Uint(v) => write!(f, "{v}"),
        Kind::Float(v) => write_float(f, v),
        Kind::Str(s) => f.write_str(&s),
        Kind::Indirect(Some(inner)) => render(f, inner, depth + 1),
        Kind::Record(record) => {
            f.write_str("{")?;
            for (i, field) in record.fields().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}: ", field.name)?;
                render(f, field.value, depth + 1)?;
            }
            f.write_str("}")
        }
        Kind::Map(None) => f.write_str("map[]"),
        Kind::Map(Some(map)) => {
            let mut entries: Vec<_> = map
                .entries()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));

            f.write_str("map[")?;
            for (i, (key, v)) in entries.into_iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{key}:")?;
                render(f, v, depth + 1)?;
            }
            f.write_str("]")
        }
        Kind::Array(seq) | Kind::Slice(Some(seq)) => render_sequence(f, seq, depth),
        Kind::Slice(None) => f.write_str("[]"),
        Kind::Opaque => write!(f, "<{}>", value.type_name()),
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("NaN");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "+Inf" } else { "-Inf" });
    }

    let sci = format!("{v:e}");
    match sci.split_once('e').map(|(m, e)| (m, e.parse::<i32>())) {
        Some((mantissa, Ok(exp))) if v != 0.0 && !(-4..6).contains(&exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            write!(f, "{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        _ => write!(f, "{v}"),
    }
}

fn render_sequence(f: &mut fmt::Formatter<'_>, seq: &dyn Sequence, depth: usize) -> fmt::Result {
    f.write_str("[")?;
    for i in 0..seq.len() {
        if i > 0 {
            f.write_str(" ")?;
        }
        if let Some(item) = seq.get(i) {
            render(f, item, depth + 1)?;
        }
    }
    f.write_str("]")
}

#[cfg(test)]
mod tests {
    use std::cell::OnceCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;
    use crate::record::Record;
    use crate::reflect::Nil;

    struct Point {
        x: i32,
        y: i32,
    }

    impl Reflect for Point {
        fn reflect(&self) -> Kind<'_> {
            Kind::Record(Record::new().field("x", &self.x).field("y", &self.y))
        }
    }

    struct Link {
        next: OnceCell<Rc<Link>>,
    }

    impl Reflect for Link {
        fn reflect(&self) -> Kind<'_> {
            Kind::Record(Record::new().field("next", &self.next))
        }
    }

    #[test]
    fn scalars() {
        assert_eq!(describe(&42i32), "42");
        assert_eq!(describe(&1.1f64), "1.1");
        assert_eq!(describe(&"text".to_string()), "text");
        assert_eq!(describe(&Nil), "<nil>");
        assert_eq!(describe(&None::<i32>), "<nil>");
        assert_eq!(describe(&Some(3u8)), "3");
    }

    #[test]
    fn float_forms() {
        assert_eq!(describe(&0.5f64), "0.5");
        assert_eq!(describe(&123456.5f64), "123456.5");
        assert_eq!(describe(&0.0001f64), "0.0001");
        assert_eq!(describe(&1e-7f64), "1e-07");
        assert_eq!(describe(&1.5e6f64), "1.5e+06");
        assert_eq!(describe(&-2.5e120f64), "-2.5e+120");
        assert_eq!(describe(&0.0f64), "0");
        assert_eq!(describe(&f64::NEG_INFINITY), "-Inf");
        assert_eq!(describe(&f64::NAN), "NaN");
    }

    #[test]
    fn records() {
        assert_eq!(describe(&Point { x: 1, y: -2 }), "{x: 1, y: -2}");
    }

    #[test]
    fn maps_sort_keys() {
        let map: HashMap<String, i32> = [("b".to_string(), 2), ("a".to_string(), 1)].into();
        assert_eq!(describe(&map), "map[a:1 b:2]");
    }

    #[test]
    fn sequences() {
        assert_eq!(describe(&vec![1, 2, 3]), "[1 2 3]");
        assert_eq!(describe(&[true, false]), "[true false]");
        assert_eq!(describe(&Vec::<i32>::new()), "[]");
    }

    #[test]
    fn self_reference_is_cut_off() {
        let link = Rc::new(Link { next: OnceCell::new() });
        assert!(link.next.set(Rc::clone(&link)).is_ok());

        let rendered = describe(&link);
        assert!(rendered.contains("..."));
    }
}

//! Record views: the named members of a composite value.

use crate::reflect::Reflect;

/// A named member of a [`Record`].
#[derive(Clone, Copy)]
pub struct Field<'a> {
    /// Member name, used as the path segment in diffs.
    pub name: &'static str,
    /// Whether generic code may read this member. Unexported members are
    /// only compared when the engine is configured to.
    pub exported: bool,
    /// Explicit "exclude from comparison" marker.
    pub excluded: bool,
    pub value: &'a dyn Reflect,
}

/// The declared members of a composite value, in declaration order.
///
/// ```
/// use deepeq_types::{Kind, Record, Reflect};
///
/// struct Endpoint {
///     host: String,
///     port: u16,
///     token: String,
///     hits: u64,
/// }
///
/// impl Reflect for Endpoint {
///     fn reflect(&self) -> Kind<'_> {
///         Kind::Record(
///             Record::new()
///                 .field("host", &self.host)
///                 .field("port", &self.port)
///                 .private("token", &self.token)
///                 .skip("hits", &self.hits),
///         )
///     }
/// }
/// ```
#[derive(Clone, Default)]
pub struct Record<'a> {
    fields: Vec<Field<'a>>,
}

impl<'a> Record<'a> {
    /// Create a record with no members.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an exported member.
    pub fn field(self, name: &'static str, value: &'a dyn Reflect) -> Self {
        self.push(name, value, true, false)
    }

    /// Append a member that generic code may not read.
    pub fn private(self, name: &'static str, value: &'a dyn Reflect) -> Self {
        self.push(name, value, false, false)
    }

    /// Append a member that is never compared.
    pub fn skip(self, name: &'static str, value: &'a dyn Reflect) -> Self {
        self.push(name, value, true, true)
    }

    fn push(
        mut self,
        name: &'static str,
        value: &'a dyn Reflect,
        exported: bool,
        excluded: bool,
    ) -> Self {
        self.fields.push(Field {
            name,
            exported,
            excluded,
            value,
        });
        self
    }

    /// Members in declaration order.
    pub fn fields(&self) -> &[Field<'a>] {
        &self.fields
    }

    /// Look up a member by name.
    pub fn get(&self, name: &str) -> Option<&Field<'a>> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_declaration_order() {
        let (a, b, c) = (1i32, "x".to_string(), true);
        let record = Record::new()
            .field("a", &a)
            .private("b", &b)
            .skip("c", &c);

        let names: Vec<_> = record.fields().iter().map(|f| f.name).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn builder_flags() {
        let (a, b, c) = (1i32, 2i32, 3i32);
        let record = Record::new()
            .field("a", &a)
            .private("b", &b)
            .skip("c", &c);

        let a = record.get("a").unwrap();
        assert!(a.exported && !a.excluded);
        let b = record.get("b").unwrap();
        assert!(!b.exported && !b.excluded);
        let c = record.get("c").unwrap();
        assert!(c.exported && c.excluded);
        assert!(record.get("d").is_none());
    }

    #[test]
    fn empty_record() {
        assert!(Record::new().is_empty());
    }
}

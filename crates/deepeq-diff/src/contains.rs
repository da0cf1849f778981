//! Structural membership test.

use deepeq_types::{Kind, Reflect};

use crate::engine::Comparator;

/// Whether `value` is structurally equal to an element of `container`
/// (slices and arrays) or to one of its keys (mappings).
///
/// Indirections around the container are followed. Any other shape
/// contains nothing.
pub fn contains(value: &dyn Reflect, container: &dyn Reflect) -> bool {
    contains_with(&Comparator::default(), value, container)
}

/// [`contains`] with an explicit comparator.
pub fn contains_with(
    comparator: &Comparator,
    value: &dyn Reflect,
    container: &dyn Reflect,
) -> bool {
    match container.reflect() {
        Kind::Indirect(Some(inner)) => contains_with(comparator, value, inner),
        Kind::Array(seq) | Kind::Slice(Some(seq)) => (0..seq.len())
            .filter_map(|i| seq.get(i))
            .any(|item| comparator.compare(value, item).is_equal()),
        Kind::Map(Some(map)) => map
            .entries()
            .into_iter()
            .any(|(key, _)| comparator.compare(value, key.as_reflect()).is_equal()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use super::*;
    use crate::config::DiffConfig;

    #[test]
    fn slices_and_arrays() {
        let names = vec!["a".to_string(), "b".to_string()];
        assert!(contains(&"b".to_string(), &names));
        assert!(!contains(&"c".to_string(), &names));
        assert!(contains(&3u8, &[1u8, 2, 3]));
    }

    #[test]
    fn element_type_must_match() {
        assert!(!contains(&1i64, &vec![1i32, 2]));
    }

    #[test]
    fn map_keys_not_values() {
        let map: HashMap<String, i32> = [("k".to_string(), 7)].into();
        assert!(contains(&"k".to_string(), &map));
        assert!(!contains(&7i32, &map));
    }

    #[test]
    fn follows_indirection() {
        let map: BTreeMap<u32, ()> = [(5, ())].into();
        assert!(contains(&5u32, &Some(map)));
        assert!(!contains(&5u32, &None::<Vec<u32>>));
    }

    #[test]
    fn structural_elements() {
        let rows = vec![vec![1, 2], vec![3]];
        assert!(contains(&vec![3], &rows));
        assert!(!contains(&vec![3, 4], &rows));
    }

    #[test]
    fn scalars_contain_nothing() {
        assert!(!contains(&1i32, &1i32));
    }

    #[test]
    fn comparator_settings_apply() {
        let coarse = Comparator::new(DiffConfig::default().with_float_precision(1));
        assert!(contains_with(&coarse, &0.51f64, &vec![0.5f64]));
        assert!(!contains(&0.51f64, &vec![0.5f64]));
    }
}

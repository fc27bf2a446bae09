//! Property/attribute merging
//!
//! Two merges with opposite precedence:
//! - output: properties overwrite same-key attributes in place, others append
//! - instantiation: properties win, attributes only fill missing keys

use crate::{Props, VAttribute, display_value};

/// Fold bound properties into a copy of the static attributes.
///
/// For each property (in insertion order), an existing attribute with the
/// same key has its value replaced in place; otherwise a new attribute is
/// appended. Attributes without a matching property pass through.
pub fn merge_props_into_attrs(attrs: &[VAttribute], props: &Props) -> Vec<VAttribute> {
    let mut merged = attrs.to_vec();

    'props: for (key, value) in props.iter() {
        for attr in merged.iter_mut() {
            if attr.key == key {
                attr.value = display_value(value);
                continue 'props;
            }
        }
        merged.push(VAttribute::new(key, display_value(value)));
    }

    merged
}

/// Properties handed to a new component instance: the node's own
/// properties plus any static attribute whose key is not already bound.
pub fn instantiation_props(props: &Props, attrs: &[VAttribute]) -> Props {
    let mut merged = props.clone();
    for attr in attrs {
        if !merged.contains_key(&attr.key) {
            merged.insert(attr.key.clone(), attr.value.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(pairs: &[(&str, &str)]) -> Vec<VAttribute> {
        pairs.iter().map(|(k, v)| VAttribute::new(*k, *v)).collect()
    }

    #[test]
    fn test_property_overrides_attribute_in_place() {
        let static_attrs = attrs(&[("id", "x"), ("foo", "bar"), ("class", "c")]);
        let props: Props = [("foo", json!(42))].into_iter().collect();

        let merged = merge_props_into_attrs(&static_attrs, &props);
        assert_eq!(merged, attrs(&[("id", "x"), ("foo", "42"), ("class", "c")]));
    }

    #[test]
    fn test_new_property_appended() {
        let static_attrs = attrs(&[("foo", "bar")]);
        let props: Props = [("baz", json!(7)), ("qux", json!("q"))].into_iter().collect();

        let merged = merge_props_into_attrs(&static_attrs, &props);
        assert_eq!(merged, attrs(&[("foo", "bar"), ("baz", "7"), ("qux", "q")]));
    }

    #[test]
    fn test_namespace_preserved_on_override() {
        let static_attrs = vec![VAttribute {
            namespace: "xlink".into(),
            key: "href".into(),
            value: "#a".into(),
        }];
        let props: Props = [("href", json!("#b"))].into_iter().collect();

        let merged = merge_props_into_attrs(&static_attrs, &props);
        assert_eq!(merged[0].namespace, "xlink");
        assert_eq!(merged[0].value, "#b");
    }

    #[test]
    fn test_instantiation_properties_win() {
        let props: Props = [("title", json!(5))].into_iter().collect();
        let static_attrs = attrs(&[("title", "static"), ("kind", "primary")]);

        let merged = instantiation_props(&props, &static_attrs);
        assert_eq!(merged.get("title"), Some(&json!(5)));
        assert_eq!(merged.get("kind"), Some(&json!("primary")));
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["title", "kind"]);
    }

    #[test]
    fn test_instantiation_first_attribute_wins_on_duplicate_keys() {
        let static_attrs = attrs(&[("a", "1"), ("a", "2")]);
        let merged = instantiation_props(&Props::new(), &static_attrs);
        assert_eq!(merged.get("a"), Some(&json!("1")));
    }
}

//! Overlay merge semantics.
//!
//! Later layers win. Tables merge key by key, recursively; every other kind
//! of collision replaces the base value wholesale. The one exception is the
//! append marker: an overlay value parsed from a `"++"` table extends a base
//! array instead of replacing it.
//!
//! Markers are consumed by the merge, so its output is always a plain tree.
//! That makes layering a strictly left-to-right affair: folding `[a, b, c]`
//! with [`merge_all`] concatenates appends in layer order, while merging
//! `b` and `c` together first would collapse their markers early and lose
//! the append onto `a`. Callers must fold layers in precedence order.

use crate::node::SettingsNode;
use crate::value::SettingsValue;

/// Merges `overlay` onto `base`, consuming append markers on both sides.
/// After the call `base` holds the combined tree and contains no markers.
pub fn merge(base: &mut SettingsNode, overlay: SettingsNode) {
    normalize(base);
    merge_tables(base, overlay);
}

/// Folds a sequence of layers, lowest precedence first, into one tree.
pub fn merge_all<I>(layers: I) -> SettingsNode
where
    I: IntoIterator<Item = SettingsNode>,
{
    let mut result = SettingsNode::new();
    for layer in layers {
        merge(&mut result, layer);
    }
    result
}

/// Rewrites stray append markers in `node` to plain arrays, recursively.
/// A marker only has meaning during a merge; a tree used as a base or
/// serialized on its own should not carry any.
pub fn normalize(node: &mut SettingsNode) {
    for value in node.values_mut() {
        normalize_value(value);
    }
}

fn normalize_value(value: &mut SettingsValue) {
    match value {
        SettingsValue::Append(items) => {
            items.iter_mut().for_each(normalize_value);
            *value = SettingsValue::Array(std::mem::take(items));
        }
        SettingsValue::Array(items) => items.iter_mut().for_each(normalize_value),
        SettingsValue::Table(node) => normalize(node),
        _ => {}
    }
}

/// Key-by-key merge; `base` is assumed normalized already.
fn merge_tables(base: &mut SettingsNode, overlay: SettingsNode) {
    for (key, incoming) in overlay {
        match incoming {
            SettingsValue::Table(overlay_table) => match base.get_mut(&key) {
                Some(SettingsValue::Table(existing)) => merge_tables(existing, overlay_table),
                _ => {
                    let mut node = overlay_table;
                    normalize(&mut node);
                    base.insert(key, SettingsValue::Table(node));
                }
            },
            SettingsValue::Append(mut items) => {
                items.iter_mut().for_each(normalize_value);
                match base.get_mut(&key) {
                    Some(SettingsValue::Array(existing)) => existing.extend(items),
                    _ => {
                        base.insert(key, SettingsValue::Array(items));
                    }
                }
            }
            mut other => {
                normalize_value(&mut other);
                base.insert(key, other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(toml_source: &str) -> SettingsNode {
        let table: toml::value::Table = toml::from_str(toml_source).unwrap();
        SettingsNode::from_toml_table(table).unwrap()
    }

    fn contains_marker(node: &SettingsNode) -> bool {
        node.iter().any(|(_, value)| value_has_marker(value))
    }

    fn value_has_marker(value: &SettingsValue) -> bool {
        match value {
            SettingsValue::Append(_) => true,
            SettingsValue::Array(items) => items.iter().any(value_has_marker),
            SettingsValue::Table(node) => contains_marker(node),
            _ => false,
        }
    }

    #[test]
    fn overlay_scalar_replaces_base_scalar() {
        let mut base = parse("title = \"base\"");
        merge(&mut base, parse("title = \"overlay\""));
        assert_eq!(base.get("title").unwrap().as_str(), Some("overlay"));
    }

    #[test]
    fn tables_merge_key_by_key() {
        let mut base = parse(
            r#"
            [app.window]
            width = 1280
            height = 720
            "#,
        );
        merge(
            &mut base,
            parse(
                r#"
                [app.window]
                width = 1920
                "#,
            ),
        );
        let value = base.get_path("app.window.width").unwrap().unwrap();
        assert_eq!(value.as_integer(), Some(1920));
        let untouched = base.get_path("app.window.height").unwrap().unwrap();
        assert_eq!(untouched.as_integer(), Some(720));
    }

    #[test]
    fn array_without_marker_replaces_base_array() {
        let mut base = parse("folders = [\"a\", \"b\"]");
        merge(&mut base, parse("folders = [\"c\"]"));
        let folders = base.get("folders").unwrap().as_array().unwrap();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].as_str(), Some("c"));
    }

    #[test]
    fn append_marker_extends_base_array_in_order() {
        let mut base = parse("folders = [\"a\", \"b\"]");
        merge(
            &mut base,
            parse(
                r#"
                [folders]
                "++" = ["c", "d"]
                "#,
            ),
        );
        let folders = base.get("folders").unwrap().as_array().unwrap();
        let items: Vec<&str> = folders.iter().filter_map(SettingsValue::as_str).collect();
        assert_eq!(items, ["a", "b", "c", "d"]);
    }

    #[test]
    fn append_onto_missing_key_becomes_plain_array() {
        let mut base = SettingsNode::new();
        merge(
            &mut base,
            parse(
                r#"
                [folders]
                "++" = ["a"]
                "#,
            ),
        );
        let folders = base.get("folders").unwrap().as_array().unwrap();
        assert_eq!(folders.len(), 1);
    }

    #[test]
    fn append_onto_scalar_becomes_plain_array() {
        let mut base = parse("folders = \"single\"");
        merge(
            &mut base,
            parse(
                r#"
                [folders]
                "++" = ["a"]
                "#,
            ),
        );
        let folders = base.get("folders").unwrap().as_array().unwrap();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].as_str(), Some("a"));
    }

    #[test]
    fn table_replaces_scalar_wholesale() {
        let mut base = parse("app = 1");
        merge(&mut base, parse("[app]\nname = \"x\""));
        let app = base.get("app").unwrap().as_table().unwrap();
        assert_eq!(app.get("name").unwrap().as_str(), Some("x"));
    }

    #[test]
    fn scalar_replaces_table_wholesale() {
        let mut base = parse("[app]\nname = \"x\"");
        merge(&mut base, parse("app = 1"));
        assert_eq!(base.get("app").unwrap().as_integer(), Some(1));
    }

    #[test]
    fn merge_output_never_contains_markers() {
        let mut base = parse(
            r#"
            [base_only]
            "++" = ["kept"]
            "#,
        );
        merge(
            &mut base,
            parse(
                r#"
                [added]
                "++" = ["new"]
                "#,
            ),
        );
        assert!(!contains_marker(&base));
        assert!(base.get("base_only").unwrap().as_array().is_some());
        assert!(base.get("added").unwrap().as_array().is_some());
    }

    #[test]
    fn merge_all_folds_layers_left_to_right() {
        let a = parse("k = [1]");
        let b = parse("[k]\n\"++\" = [2]");
        let c = parse("[k]\n\"++\" = [3]");
        let merged = merge_all([a, b, c]);
        let items: Vec<i64> = merged
            .get("k")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .filter_map(SettingsValue::as_integer)
            .collect();
        assert_eq!(items, [1, 2, 3]);
    }

    #[test]
    fn grouping_layers_early_collapses_appends() {
        // Folding b onto c first consumes their markers, so the combined
        // layer replaces a's array instead of appending to it.
        let a = parse("k = [1]");
        let mut b = parse("[k]\n\"++\" = [2]");
        let c = parse("[k]\n\"++\" = [3]");

        merge(&mut b, c);
        let mut grouped = a.clone();
        merge(&mut grouped, b.clone());
        let items: Vec<i64> = grouped
            .get("k")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .filter_map(SettingsValue::as_integer)
            .collect();
        assert_eq!(items, [2, 3]);
    }

    #[test]
    fn deep_append_under_quoted_extension_name() {
        let mut base = parse(
            r#"
            [exts."omni.warp.core"]
            folders = ["base"]
            "#,
        );
        merge(
            &mut base,
            parse(
                r#"
                [exts."omni.warp.core".folders]
                "++" = ["extra"]
                "#,
            ),
        );
        let folders = base
            .get_path("exts.\"omni.warp.core\".folders")
            .unwrap()
            .unwrap()
            .as_array()
            .unwrap();
        let items: Vec<&str> = folders.iter().filter_map(SettingsValue::as_str).collect();
        assert_eq!(items, ["base", "extra"]);
    }

    #[test]
    fn merge_with_empty_overlay_keeps_base() {
        let mut base = parse("title = \"kept\"");
        merge(&mut base, SettingsNode::new());
        assert_eq!(base.get("title").unwrap().as_str(), Some("kept"));
    }

    #[test]
    fn merge_onto_empty_base_normalizes_overlay() {
        let merged = merge_all([parse(
            r#"
            [exts."omni.warp.core".folders]
            "++" = ["only"]
            "#,
        )]);
        assert!(!contains_marker(&merged));
        let folders = merged
            .get_path("exts.\"omni.warp.core\".folders")
            .unwrap()
            .unwrap()
            .as_array()
            .unwrap();
        assert_eq!(folders.len(), 1);
    }
}

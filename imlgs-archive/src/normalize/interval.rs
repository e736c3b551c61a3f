//! Interval sub-record flattening.
//!
//! Raw interval sub-records spread repeated observations over numbered
//! fields (`text1`/`text2`, `comp1`..`comp6`, `lith1`/`lith2`) and
//! duplicate several parent-record fields. Flattening regroups the
//! numbered fields into ordered lists and drops the duplicates; every
//! other field passes through untouched.

use serde_json::{Map, Value};

/// Texture fields grouped into `textures`, in slot order.
const TEXTURE_FIELDS: [&str; 2] = ["text1", "text2"];

/// Composition-code fields grouped into `comps`, in slot order.
const COMP_FIELDS: [&str; 6] = ["comp1", "comp2", "comp3", "comp4", "comp5", "comp6"];

/// Lithology-code fields grouped into `liths`, in slot order.
const LITH_FIELDS: [&str; 2] = ["lith1", "lith2"];

/// Interval fields that merely repeat the parent record.
const PARENT_FIELDS: [&str; 7] = [
    "facility", "imlgs", "cruise", "sample", "device", "lake", "platform",
];

/// Flatten one raw interval sub-record.
///
/// Grouped source fields are gathered into `textures`/`comps`/`liths`
/// in slot order; a present-but-null source field still occupies its
/// slot, while absent fields are not synthesized. Parent-duplicate
/// fields are dropped. Everything else passes through with its
/// original key, value, and document order, followed by the three
/// grouped lists.
pub fn normalize_interval(interval: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, value) in interval {
        let k = key.as_str();
        if TEXTURE_FIELDS.contains(&k)
            || COMP_FIELDS.contains(&k)
            || LITH_FIELDS.contains(&k)
            || PARENT_FIELDS.contains(&k)
        {
            continue;
        }
        out.insert(key.clone(), value.clone());
    }

    insert_group(&mut out, interval, "textures", &TEXTURE_FIELDS);
    insert_group(&mut out, interval, "comps", &COMP_FIELDS);
    insert_group(&mut out, interval, "liths", &LITH_FIELDS);
    out
}

/// Gather the present source fields into `name`, in slot order.
///
/// An already-flattened input has no source fields left; its existing
/// list passed through above and is kept, which makes re-flattening a
/// no-op on the grouped lists.
fn insert_group(
    out: &mut Map<String, Value>,
    interval: &Map<String, Value>,
    name: &str,
    fields: &[&str],
) {
    let grouped: Vec<Value> = fields.iter().filter_map(|f| interval.get(*f).cloned()).collect();
    if grouped.is_empty() && out.contains_key(name) {
        return;
    }
    out.insert(name.to_string(), Value::Array(grouped));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn groups_drops_and_passes_through() {
        let interval = obj(json!({
            "text1": "sand",
            "text2": null,
            "comp1": "qtz",
            "lith1": "shale",
            "facility": "X",
            "depth_top": 10,
        }));

        let n = normalize_interval(&interval);

        assert_eq!(n["textures"], json!(["sand", null]));
        assert_eq!(n["comps"], json!(["qtz"]));
        assert_eq!(n["liths"], json!(["shale"]));
        assert_eq!(n["depth_top"], json!(10));
        assert!(!n.contains_key("facility"));
        assert!(!n.contains_key("text1"));
        assert!(!n.contains_key("comp1"));
        assert!(!n.contains_key("lith1"));
    }

    #[test]
    fn comps_in_slot_order() {
        let interval = obj(json!({
            "comp3": "c3",
            "comp1": "c1",
            "comp6": "c6",
        }));

        let n = normalize_interval(&interval);
        assert_eq!(n["comps"], json!(["c1", "c3", "c6"]));
    }

    #[test]
    fn empty_groups_when_no_source_fields() {
        let interval = obj(json!({"depth_top": 0}));
        let n = normalize_interval(&interval);

        assert_eq!(n["textures"], json!([]));
        assert_eq!(n["comps"], json!([]));
        assert_eq!(n["liths"], json!([]));
    }

    #[test]
    fn all_parent_duplicates_dropped() {
        let interval = obj(json!({
            "facility": {"id": 1},
            "imlgs": "imlgs0001",
            "cruise": "CR",
            "sample": "S",
            "device": "corer",
            "lake": "L",
            "platform": "P",
            "remark": "kept",
        }));

        let n = normalize_interval(&interval);
        assert_eq!(n.keys().collect::<Vec<_>>(), ["remark", "textures", "comps", "liths"]);
    }

    #[test]
    fn idempotent_on_grouping() {
        let interval = obj(json!({
            "text1": "sand",
            "text2": null,
            "comp1": "qtz",
            "lith1": "shale",
            "depth_top": 10,
        }));

        let once = normalize_interval(&interval);
        let twice = normalize_interval(&once);

        assert_eq!(once, twice);
    }

    #[test]
    fn passthrough_preserves_document_order() {
        let interval = obj(json!({
            "b_field": 1,
            "a_field": 2,
            "comp1": "c",
        }));

        let n = normalize_interval(&interval);
        let keys: Vec<_> = n.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b_field", "a_field", "textures", "comps", "liths"]);
    }
}

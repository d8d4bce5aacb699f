//! Layer merging.

/// Recursively deep-merge `overlay` into `base`.
///
/// - Tables merge recursively per-field.
/// - Scalars and arrays from the overlay **replace** the base value.
pub fn deep_merge(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                if let Some(base_val) = base_table.get_mut(key) {
                    deep_merge(base_val, overlay_val);
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
        },
    }
}

/// Set `section.key` to `value`, creating the section if needed.
pub(crate) fn set_path(root: &mut toml::Value, section: &str, key: &str, value: toml::Value) {
    let Some(table) = root.as_table_mut() else {
        return;
    };
    let entry = table
        .entry(section.to_owned())
        .or_insert(toml::Value::Table(toml::map::Map::new()));
    if let Some(section) = entry.as_table_mut() {
        section.insert(key.to_owned(), value);
    }
}

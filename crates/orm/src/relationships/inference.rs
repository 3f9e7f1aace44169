//! Relationship Naming Inference - Conventions for association, model, table
//! and foreign key names

/// Convert a type or accessor name to snake_case (`SchoolDistrict` -> `school_district`)
pub fn underscore(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' {
            result.push('_');
            continue;
        }

        if c.is_uppercase() {
            if i > 0 {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                    result.push('_');
                }
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert an accessor name to the model type name it refers to
/// (`school_district` -> `SchoolDistrict`)
pub fn camelize(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Simple pluralization (English-centric)
pub fn pluralize(name: &str) -> String {
    if name.ends_with('y') && !name.ends_with("ay") && !name.ends_with("ey") && !name.ends_with("iy") && !name.ends_with("oy") && !name.ends_with("uy") {
        format!("{}ies", &name[..name.len() - 1])
    } else if name.ends_with('s') || name.ends_with("sh") || name.ends_with("ch") || name.ends_with('x') || name.ends_with('z') {
        format!("{}es", name)
    } else {
        format!("{}s", name)
    }
}

/// Foreign key column derived from a type or accessor name (`College` -> `college_id`)
pub fn foreign_key_for(name: &str) -> String {
    format!("{}_id", underscore(name))
}

/// Table a belongs-to accessor points at (`school` -> `schools`)
pub fn table_for(accessor: &str) -> String {
    pluralize(&underscore(accessor))
}

/// Whether `column` is the column the association layer would infer on its own
/// for `accessor`, i.e. exactly `<accessor>_id`.
pub fn is_conventional_foreign_key(accessor: &str, column: &str) -> bool {
    column.strip_suffix("_id") == Some(accessor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underscore() {
        assert_eq!(underscore("School"), "school");
        assert_eq!(underscore("school"), "school");
        assert_eq!(underscore("SchoolDistrict"), "school_district");
        assert_eq!(underscore("HTMLParser"), "html_parser");
        assert_eq!(underscore("Level2Course"), "level2_course");
        assert_eq!(underscore("sixth-form"), "sixth_form");
    }

    #[test]
    fn test_camelize() {
        assert_eq!(camelize("school"), "School");
        assert_eq!(camelize("school_district"), "SchoolDistrict");
        assert_eq!(camelize("College"), "College");
    }

    #[test]
    fn test_pluralization() {
        assert_eq!(pluralize("school"), "schools");
        assert_eq!(pluralize("academy"), "academies");
        assert_eq!(pluralize("class"), "classes");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(table_for("SchoolDistrict"), "school_districts");
    }

    #[test]
    fn test_foreign_key_inference() {
        assert_eq!(foreign_key_for("college"), "college_id");
        assert_eq!(foreign_key_for("SchoolDistrict"), "school_district_id");
    }

    #[test]
    fn test_conventional_foreign_key() {
        assert!(is_conventional_foreign_key("school", "school_id"));
        assert!(!is_conventional_foreign_key("school", "my_school_id"));
        assert!(!is_conventional_foreign_key("school", "school"));
        assert!(!is_conventional_foreign_key("SchoolDistrict", "school_district_id"));
    }
}

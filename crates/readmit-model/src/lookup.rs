use std::collections::HashMap;

/// Case-insensitive view over a set of column names.
///
/// Lookups return the name as it was originally spelled, so callers can
/// index a DataFrame with it.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveSet {
    map: HashMap<String, String>,
}

impl CaseInsensitiveSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for name in names {
            let name = name.as_ref();
            let key = name.trim().to_ascii_uppercase();
            map.entry(key).or_insert_with(|| name.to_string());
        }
        Self { map }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map
            .get(&name.trim().to_ascii_uppercase())
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.trim().to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_preserves_original_spelling() {
        let set = CaseInsensitiveSet::new(["subject_id", "HADM_ID", " Text "]);
        assert_eq!(set.get("SUBJECT_ID"), Some("subject_id"));
        assert_eq!(set.get("hadm_id"), Some("HADM_ID"));
        assert_eq!(set.get("TEXT"), Some(" Text "));
        assert!(!set.contains("CATEGORY"));
    }

    #[test]
    fn first_spelling_wins() {
        let set = CaseInsensitiveSet::new(["Category", "CATEGORY"]);
        assert_eq!(set.get("category"), Some("Category"));
    }
}

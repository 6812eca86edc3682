//! Character search criteria.
//!
//! Every field is optional and present fields combine with AND. Text
//! criteria are case-insensitive substring matches; numeric criteria are
//! exact. A blank text criterion is treated as absent.

use crate::character::Character;

/// Sparse filter for character searches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterCriteria {
    /// Substring of the character's name.
    pub name: Option<String>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    /// Substring of the title of any film linked to the character.
    pub film_title: Option<String>,
}

impl CharacterCriteria {
    /// Trim text criteria and drop the ones that end up empty.
    pub fn normalized(self) -> Self {
        Self {
            name: non_blank(self.name),
            age: self.age,
            weight: self.weight,
            film_title: non_blank(self.film_title),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.weight.is_none()
            && self.film_title.is_none()
    }

    /// Evaluate the criteria against one character and the titles of its
    /// linked films. Used by stores that filter in process.
    pub fn matches<'a, I>(&self, character: &Character, film_titles: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        if let Some(name) = &self.name {
            if !contains_ignore_case(&character.name, name) {
                return false;
            }
        }
        if let Some(age) = self.age {
            if character.age != Some(age) {
                return false;
            }
        }
        if let Some(weight) = self.weight {
            if character.weight != Some(weight) {
                return false;
            }
        }
        match &self.film_title {
            Some(title) => film_titles
                .into_iter()
                .any(|t| contains_ignore_case(t, title)),
            None => true,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Build a SQL `ILIKE` pattern matching `needle` anywhere, with the LIKE
/// metacharacters `%`, `_` and the escape character `\` matched literally.
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

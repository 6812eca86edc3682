//! Character entity, write inputs, and output projections.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{CoreError, CoreResult};
use crate::types::{EntityId, Timestamp};

/// A stored character row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Character {
    pub id: EntityId,
    /// Image reference; empty when none was supplied.
    pub image: String,
    pub name: String,
    pub story: String,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Writable character fields. Every field is optional: on create the
/// service enforces that `name` and `story` are present, on update an
/// omitted field keeps its stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CharacterFields {
    pub image: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub story: Option<String>,
    #[validate(range(min = 0))]
    pub age: Option<i32>,
    #[validate(range(min = 0.0))]
    pub weight: Option<f64>,
}

/// Fully-populated insert payload handed to the store.
#[derive(Debug, Clone)]
pub struct NewCharacter {
    pub id: EntityId,
    pub image: String,
    pub name: String,
    pub story: String,
    pub age: Option<i32>,
    pub weight: Option<f64>,
}

impl NewCharacter {
    /// Build an insert payload, rejecting blank or missing required fields.
    pub fn from_fields(id: EntityId, fields: CharacterFields) -> CoreResult<Self> {
        Ok(Self {
            id,
            image: fields.image.unwrap_or_default(),
            name: required_text("name", fields.name)?,
            story: required_text("story", fields.story)?,
            age: fields.age,
            weight: fields.weight,
        })
    }
}

/// Reduced `{id, name, image}` view returned by list and search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterSummary {
    pub id: EntityId,
    pub name: String,
    pub image: String,
}

impl From<Character> for CharacterSummary {
    fn from(character: Character) -> Self {
        Self {
            id: character.id,
            name: character.name,
            image: character.image,
        }
    }
}

/// A film linked to a character, as shown in the character's detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilmRef {
    pub title: String,
    pub reference: String,
}

/// Full character view including its resolved film references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterDetail {
    pub id: EntityId,
    pub image: String,
    pub name: String,
    pub story: String,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub films: Vec<FilmRef>,
}

/// Require a present, non-blank text field.
pub(crate) fn required_text(field: &str, value: Option<String>) -> CoreResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// Reject a supplied-but-blank text field on update.
pub(crate) fn reject_blank(field: &str, value: Option<&String>) -> CoreResult<()> {
    match value {
        Some(v) if v.trim().is_empty() => {
            Err(CoreError::Validation(format!("{field} must not be blank")))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn fields(name: Option<&str>, story: Option<&str>) -> CharacterFields {
        CharacterFields {
            name: name.map(str::to_string),
            story: story.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn new_character_requires_name_and_story() {
        let id = EntityId::new_v4();
        assert_matches!(
            NewCharacter::from_fields(id, fields(None, Some("ogre"))),
            Err(CoreError::Validation(msg)) if msg == "name is required"
        );
        assert_matches!(
            NewCharacter::from_fields(id, fields(Some("Shrek"), Some("   "))),
            Err(CoreError::Validation(msg)) if msg == "story is required"
        );
    }

    #[test]
    fn new_character_defaults_image_to_empty() {
        let new =
            NewCharacter::from_fields(EntityId::new_v4(), fields(Some("Shrek"), Some("ogre")))
                .unwrap();
        assert_eq!(new.image, "");
        assert_eq!(new.name, "Shrek");
    }

    #[test]
    fn negative_age_and_weight_fail_validation() {
        let input = CharacterFields {
            age: Some(-1),
            weight: Some(-0.5),
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("age"));
        assert!(fields.contains_key("weight"));
    }
}

use serde::Serialize;

use crate::core::forms::{sanitize, FieldError, FormFields};
use crate::genres::domain::model::GenreEntity;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreSubmission {
    pub name: String,
}

impl GenreSubmission {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: sanitize(fields.value("name")),
        }
    }

    pub fn validate(&self) -> Result<ValidGenre, Vec<FieldError>> {
        if self.name.is_empty() {
            return Err(vec![FieldError::new("name", "Genre name required")]);
        }
        Ok(ValidGenre { name: self.name.to_string() })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidGenre {
    name: String,
}

impl ValidGenre {
    // candidate key for the idempotent-by-name create check
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn into_new_entity(self) -> GenreEntity {
        GenreEntity::new(self.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::forms::FormFields;
    use crate::genres::forms::GenreSubmission;

    #[tokio::test]
    async fn test_should_require_name() {
        let fields = FormFields::parse(b"name=++").expect("should parse body");
        let errors = GenreSubmission::from_fields(&fields).validate().expect_err("should fail");
        assert_eq!(1, errors.len());
        assert_eq!("Genre name required", errors[0].message.as_str());
    }

    #[tokio::test]
    async fn test_should_accept_trimmed_name() {
        let fields = FormFields::parse(b"name=+Fantasy+").expect("should parse body");
        let valid = GenreSubmission::from_fields(&fields).validate().expect("should validate");
        assert_eq!("Fantasy", valid.name());
    }
}

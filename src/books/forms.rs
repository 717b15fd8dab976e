use serde::Serialize;

use crate::books::domain::model::BookEntity;
use crate::core::forms::{sanitize, FieldError, FormFields};

// Sanitized book form input. Built unconditionally from the submitted fields
// so a failing form can be re-rendered with what the user typed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSubmission {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<String>,
}

impl BookSubmission {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            title: sanitize(fields.value("title")),
            author: sanitize(fields.value("author")),
            summary: sanitize(fields.value("summary")),
            isbn: sanitize(fields.value("isbn")),
            genre: fields.values("genre").iter().map(|g| sanitize(g)).collect(),
        }
    }

    pub fn from_entity(entity: &BookEntity) -> Self {
        Self {
            title: entity.title.to_string(),
            author: entity.author.to_string(),
            summary: entity.summary.to_string(),
            isbn: entity.isbn.to_string(),
            genre: entity.genre.to_vec(),
        }
    }

    pub fn validate(&self) -> Result<ValidBook, Vec<FieldError>> {
        let mut errors = vec![];
        if self.title.is_empty() {
            errors.push(FieldError::new("title", "Title must not be empty."));
        }
        if self.author.is_empty() {
            errors.push(FieldError::new("author", "Author must not be empty."));
        }
        if self.summary.is_empty() {
            errors.push(FieldError::new("summary", "Summary must not be empty."));
        }
        if self.isbn.is_empty() {
            errors.push(FieldError::new("isbn", "ISBN must not be empty"));
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ValidBook {
            title: self.title.to_string(),
            author: self.author.to_string(),
            summary: self.summary.to_string(),
            isbn: self.isbn.to_string(),
            genre: self.genre.to_vec(),
        })
    }
}

// Persist-ready book data, only constructible through a successful validate().
#[derive(Debug, Clone, PartialEq)]
pub struct ValidBook {
    title: String,
    author: String,
    summary: String,
    isbn: String,
    genre: Vec<String>,
}

impl ValidBook {
    pub fn into_new_entity(self) -> BookEntity {
        BookEntity::new(self.title.as_str(), self.summary.as_str(), self.isbn.as_str(),
                        self.author.as_str(), &self.genre)
    }

    // updates must target the existing id, never allocate a new one
    pub fn into_entity_with_id(self, id: &str) -> BookEntity {
        BookEntity {
            id: id.to_string(),
            title: self.title,
            summary: self.summary,
            isbn: self.isbn,
            author: self.author,
            genre: self.genre,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::books::forms::BookSubmission;
    use crate::core::forms::FormFields;

    #[tokio::test]
    async fn test_should_sanitize_submitted_fields() {
        let fields = FormFields::parse(
            b"title=+The+%3CHobbit%3E+&author=a1&summary=s&isbn=i&genre=g1&genre=g2")
            .expect("should parse body");
        let submission = BookSubmission::from_fields(&fields);
        assert_eq!("The &lt;Hobbit&gt;", submission.title.as_str());
        assert_eq!(vec!["g1".to_string(), "g2".to_string()], submission.genre);
    }

    #[tokio::test]
    async fn test_should_collect_one_error_per_empty_field() {
        let fields = FormFields::parse(b"title=&author=&summary=&isbn=").expect("should parse body");
        let submission = BookSubmission::from_fields(&fields);
        let errors = submission.validate().expect_err("should fail validation");
        assert_eq!(4, errors.len());
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(vec!["title", "author", "summary", "isbn"], fields);
    }

    #[tokio::test]
    async fn test_should_build_entity_preserving_id_on_update() {
        let fields = FormFields::parse(b"title=T&author=a1&summary=s&isbn=i").expect("should parse body");
        let valid = BookSubmission::from_fields(&fields).validate().expect("should validate");
        let entity = valid.into_entity_with_id("book-42");
        assert_eq!("book-42", entity.id.as_str());
        assert_eq!("T", entity.title.as_str());
        assert!(entity.genre.is_empty());
    }
}

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::forms::{optional_date, sanitize, FieldError, FormFields};
use crate::instances::domain::model::{BookInstanceEntity, CopyStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceSubmission {
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: String,
}

impl InstanceSubmission {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            book: sanitize(fields.value("book")),
            imprint: sanitize(fields.value("imprint")),
            status: sanitize(fields.value("status")),
            due_back: fields.value("due_back").trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<ValidInstance, Vec<FieldError>> {
        let mut errors = vec![];
        if self.book.is_empty() {
            errors.push(FieldError::new("book", "Book must be specified"));
        }
        if self.imprint.is_empty() {
            errors.push(FieldError::new("imprint", "Imprint must be specified"));
        }
        let due_back = match optional_date("due_back", self.due_back.as_str(), "Invalid date") {
            Ok(date) => date,
            Err(err) => {
                errors.push(err);
                None
            }
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ValidInstance {
            book: self.book.to_string(),
            imprint: self.imprint.to_string(),
            status: CopyStatus::from(self.status.to_string()),
            due_back,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidInstance {
    book: String,
    imprint: String,
    status: CopyStatus,
    due_back: Option<NaiveDate>,
}

impl ValidInstance {
    // referenced book id, checked for existence before persisting
    pub fn book_id(&self) -> &str {
        self.book.as_str()
    }

    pub fn into_new_entity(self) -> BookInstanceEntity {
        BookInstanceEntity::new(self.book.as_str(), self.imprint.as_str(),
                                self.status, self.due_back)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::forms::FormFields;
    use crate::instances::domain::model::CopyStatus;
    use crate::instances::forms::InstanceSubmission;

    #[tokio::test]
    async fn test_should_require_book_and_imprint() {
        let fields = FormFields::parse(b"book=&imprint=&status=Available").expect("should parse body");
        let errors = InstanceSubmission::from_fields(&fields).validate().expect_err("should fail");
        assert_eq!(2, errors.len());
    }

    #[tokio::test]
    async fn test_should_default_unknown_status_to_maintenance() {
        let fields = FormFields::parse(b"book=b1&imprint=First&status=Bogus").expect("should parse body");
        let copy = InstanceSubmission::from_fields(&fields).validate()
            .expect("should validate").into_new_entity();
        assert_eq!(CopyStatus::Maintenance, copy.status);
    }

    #[tokio::test]
    async fn test_should_reject_malformed_due_back() {
        let fields = FormFields::parse(b"book=b1&imprint=First&status=Loaned&due_back=soon")
            .expect("should parse body");
        let errors = InstanceSubmission::from_fields(&fields).validate().expect_err("should fail");
        assert_eq!(1, errors.len());
        assert_eq!("Invalid date", errors[0].message.as_str());
    }
}

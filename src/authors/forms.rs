use chrono::NaiveDate;
use serde::Serialize;

use crate::authors::domain::model::AuthorEntity;
use crate::core::forms::{optional_date, sanitize, FieldError, FormFields};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorSubmission {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

impl AuthorSubmission {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            first_name: sanitize(fields.value("first_name")),
            family_name: sanitize(fields.value("family_name")),
            date_of_birth: fields.value("date_of_birth").trim().to_string(),
            date_of_death: fields.value("date_of_death").trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<ValidAuthor, Vec<FieldError>> {
        let mut errors = vec![];
        if self.first_name.is_empty() {
            errors.push(FieldError::new("first_name", "First name must be specified."));
        }
        if self.family_name.is_empty() {
            errors.push(FieldError::new("family_name", "Family name must be specified."));
        }
        let date_of_birth = match optional_date("date_of_birth", self.date_of_birth.as_str(), "Invalid date of birth") {
            Ok(date) => date,
            Err(err) => {
                errors.push(err);
                None
            }
        };
        let date_of_death = match optional_date("date_of_death", self.date_of_death.as_str(), "Invalid date of death") {
            Ok(date) => date,
            Err(err) => {
                errors.push(err);
                None
            }
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ValidAuthor {
            first_name: self.first_name.to_string(),
            family_name: self.family_name.to_string(),
            date_of_birth,
            date_of_death,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidAuthor {
    first_name: String,
    family_name: String,
    date_of_birth: Option<NaiveDate>,
    date_of_death: Option<NaiveDate>,
}

impl ValidAuthor {
    pub fn into_new_entity(self) -> AuthorEntity {
        AuthorEntity::new(self.first_name.as_str(), self.family_name.as_str(),
                          self.date_of_birth, self.date_of_death)
    }
}

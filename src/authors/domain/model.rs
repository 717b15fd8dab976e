use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::domain::Identifiable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorEntity {
    pub id: String,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl AuthorEntity {
    pub fn new(first_name: &str, family_name: &str,
               date_of_birth: Option<NaiveDate>, date_of_death: Option<NaiveDate>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            first_name: first_name.to_string(),
            family_name: family_name.to_string(),
            date_of_birth,
            date_of_death,
        }
    }

    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }
}

impl Identifiable for AuthorEntity {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn natural_key(&self) -> String {
        format!("{} {}", self.family_name, self.first_name)
    }
}

#[cfg(test)]
mod tests {
    use crate::authors::domain::model::AuthorEntity;

    #[tokio::test]
    async fn test_should_build_author() {
        let author = AuthorEntity::new("John", "Tolkien", None, None);
        assert_eq!("Tolkien, John", author.name());
        assert_eq!(format!("/catalog/author/{}", author.id), author.url());
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::domain::Identifiable;

// BookEntity is one catalog title; physical copies live in BookInstanceEntity.
// The author and genre references are stored ids and are not validated at
// write time, so they can dangle after a delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntity {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author: String,
    #[serde(default)]
    pub genre: Vec<String>,
}

impl BookEntity {
    pub fn new(title: &str, summary: &str, isbn: &str, author: &str, genre: &[String]) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            isbn: isbn.to_string(),
            author: author.to_string(),
            genre: genre.to_vec(),
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn natural_key(&self) -> String {
        self.title.to_string()
    }
}

use serde::{Deserialize, Serialize};

// Identifiable defines common traits shared by persistent records
pub trait Identifiable: Sync + Send {
    fn id(&self) -> String;
    // key used for ascending list ordering, e.g. title or name
    fn natural_key(&self) -> String;
}

// Configuration abstracts config options for the catalog application
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub site_name: String,
    pub http_port: u16,
}

impl Configuration {
    pub fn new(site_name: &str) -> Self {
        Configuration {
            site_name: site_name.to_string(),
            http_port: 3000,
        }
    }
}

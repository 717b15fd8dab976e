use std::collections::HashMap;
use std::str::FromStr;

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::Value;

use crate::core::library::{LibraryError, LibraryResult};

pub async fn build_db_client() -> Client {
    let config = aws_config::load_from_env().await;
    Client::new(&config)
}

// Serialized records travel as JSON objects; one table item per document.
pub fn to_item(val: Value) -> LibraryResult<HashMap<String, AttributeValue>> {
    match val {
        Value::Object(map) => map.into_iter()
            .map(|(k, v)| Ok((k, to_attribute_value(v)?)))
            .collect(),
        _ => Err(LibraryError::serialization("record did not serialize to an object")),
    }
}

pub fn from_item(map: &HashMap<String, AttributeValue>) -> Value {
    Value::Object(map.iter()
        .map(|(k, v)| (k.clone(), from_attribute_value(v)))
        .collect())
}

fn to_attribute_value(val: Value) -> LibraryResult<AttributeValue> {
    match val {
        Value::Null => Ok(AttributeValue::Null(true)),
        Value::Bool(b) => Ok(AttributeValue::Bool(b)),
        Value::Number(n) => Ok(AttributeValue::N(n.to_string())),
        Value::String(s) => Ok(AttributeValue::S(s)),
        Value::Array(items) => Ok(AttributeValue::L(
            items.into_iter().map(to_attribute_value).collect::<LibraryResult<Vec<_>>>()?)),
        Value::Object(map) => Ok(AttributeValue::M(
            map.into_iter()
                .map(|(k, v)| Ok((k, to_attribute_value(v)?)))
                .collect::<LibraryResult<HashMap<_, _>>>()?)),
    }
}

fn from_attribute_value(attr: &AttributeValue) -> Value {
    match attr {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => serde_json::Number::from_str(n)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(items) => Value::Array(items.iter().map(from_attribute_value).collect()),
        AttributeValue::M(map) => Value::Object(
            map.iter().map(|(k, v)| (k.clone(), from_attribute_value(v))).collect()),
        _ => Value::Null,
    }
}

impl<E: std::fmt::Debug> From<SdkError<E>> for LibraryError {
    fn from(err: SdkError<E>) -> Self {
        match &err {
            SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
                LibraryError::database(format!("ddb unavailable {:?}", err).as_str(), None, true)
            }
            _ => {
                LibraryError::database(format!("ddb error {:?}", err).as_str(), None, false)
            }
        }
    }
}

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        .with_ansi(false)
        .json()
        .init();
}

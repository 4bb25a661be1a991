//! Car manufacturer model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Manufacturer {
    pub id: Uuid,
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateManufacturer {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub country: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_rejected() {
        let input = CreateManufacturer {
            name: String::new(),
            country: "Japan".to_string(),
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn valid_manufacturer_accepted() {
        let input = CreateManufacturer {
            name: "Toyota".to_string(),
            country: "Japan".to_string(),
        };
        assert!(input.validate().is_ok());
    }
}

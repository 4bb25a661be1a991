//! Car model. Every car belongs to one manufacturer and may be assigned to
//! any number of drivers.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::driver::DriverSummary;
use super::manufacturer::Manufacturer;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: Uuid,
    pub model: String,
    pub manufacturer_id: Uuid,
}

/// List row with the manufacturer joined in, so a page is one query.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CarSummary {
    pub id: Uuid,
    pub model: String,
    pub manufacturer_id: Uuid,
    pub manufacturer_name: String,
    pub manufacturer_country: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CarDetail {
    pub id: Uuid,
    pub model: String,
    pub manufacturer: Manufacturer,
    pub drivers: Vec<DriverSummary>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCar {
    #[validate(length(min = 1, max = 255))]
    pub model: String,
    pub manufacturer_id: Uuid,
    #[serde(default)]
    pub driver_ids: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_car_driver_ids_default_empty() {
        let input: CreateCar = serde_json::from_value(serde_json::json!({
            "model": "Corolla",
            "manufacturer_id": Uuid::nil(),
        }))
        .unwrap();
        assert!(input.driver_ids.is_empty());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn create_car_requires_model() {
        let input = CreateCar {
            model: String::new(),
            manufacturer_id: Uuid::nil(),
            driver_ids: vec![],
        };
        assert!(input.validate().is_err());
    }
}

use crate::validation::{BookingValidator, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Container length in feet. Only 20ft and 40ft boxes are bookable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ContainerSize {
    Twenty,
    Forty,
}

impl ContainerSize {
    pub fn from_feet(feet: u32) -> Option<Self> {
        match feet {
            20 => Some(Self::Twenty),
            40 => Some(Self::Forty),
            _ => None,
        }
    }

    pub fn feet(self) -> u32 {
        match self {
            Self::Twenty => 20,
            Self::Forty => 40,
        }
    }
}

impl TryFrom<u32> for ContainerSize {
    type Error = ValidationError;

    fn try_from(feet: u32) -> Result<Self, Self::Error> {
        Self::from_feet(feet).ok_or(ValidationError::ContainerSize(feet))
    }
}

impl From<ContainerSize> for u32 {
    fn from(size: ContainerSize) -> Self {
        size.feet()
    }
}

/// A booking request as received from a client.
///
/// This is the unvalidated wire shape; it is also the JSON body forwarded to the
/// external capacity service. Missing text fields deserialize as empty strings and
/// are rejected by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_type: Option<String>,
    pub container_size: u32,
    pub quantity: u32,
}

impl BookingRequest {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        container_type: impl Into<String>,
        container_size: u32,
        quantity: u32,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            container_type: Some(container_type.into()),
            container_size,
            quantity,
        }
    }
}

/// Type-safe identifier for persisted bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub u64);

impl From<u64> for BookingId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted container booking. Immutable once stored.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait
/// (see [`booking_actor`](crate::booking_actor)); its id is assigned on persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: BookingId,
    pub origin: String,
    pub destination: String,
    pub container_type: String,
    pub container_size: ContainerSize,
    pub quantity: u32,
}

/// Payload for persisting a booking. Only obtainable from a validated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingCreate {
    pub origin: String,
    pub destination: String,
    pub container_type: String,
    pub container_size: ContainerSize,
    pub quantity: u32,
}

impl TryFrom<BookingRequest> for BookingCreate {
    type Error = ValidationError;

    fn try_from(request: BookingRequest) -> Result<Self, Self::Error> {
        let request = BookingValidator.validate(request)?;
        Ok(Self {
            container_size: ContainerSize::try_from(request.container_size)?,
            container_type: request
                .container_type
                .ok_or(ValidationError::MissingContainerType)?,
            origin: request.origin,
            destination: request.destination,
            quantity: request.quantity,
        })
    }
}

impl Booking {
    pub fn new(id: BookingId, params: BookingCreate) -> Self {
        Self {
            id,
            origin: params.origin,
            destination: params.destination,
            container_type: params.container_type,
            container_size: params.container_size,
            quantity: params.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_size_accepts_only_twenty_and_forty() {
        assert_eq!(ContainerSize::from_feet(20), Some(ContainerSize::Twenty));
        assert_eq!(ContainerSize::from_feet(40), Some(ContainerSize::Forty));
        assert_eq!(ContainerSize::from_feet(30), None);
        assert_eq!(
            ContainerSize::try_from(45),
            Err(ValidationError::ContainerSize(45))
        );
    }

    #[test]
    fn test_request_uses_camel_case_on_the_wire() {
        let request = BookingRequest::new("Southampton", "Singapore", "DRY", 20, 5);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "origin": "Southampton",
                "destination": "Singapore",
                "containerType": "DRY",
                "containerSize": 20,
                "quantity": 5
            })
        );
    }

    #[test]
    fn test_missing_text_fields_deserialize_as_blank() {
        let request: BookingRequest =
            serde_json::from_str(r#"{"containerSize": 40, "quantity": 1}"#).unwrap();
        assert_eq!(request.origin, "");
        assert_eq!(request.container_type, None);
    }

    #[test]
    fn test_booking_create_requires_valid_request() {
        let valid = BookingRequest::new("Southampton", "Singapore", "REEFER", 40, 100);
        let params = BookingCreate::try_from(valid).unwrap();
        assert_eq!(params.container_size, ContainerSize::Forty);
        assert_eq!(params.container_type, "REEFER");

        let invalid = BookingRequest::new("Sou", "Singapore", "REEFER", 40, 100);
        assert!(matches!(
            BookingCreate::try_from(invalid),
            Err(ValidationError::OriginLength(3))
        ));
    }
}

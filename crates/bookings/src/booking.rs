use serde::{Deserialize, Deserializer, Serialize};

use hotelbook_core::HotelId;

/// Type tag every booking must carry.
pub const BOOKING_TYPE: &str = "Booking";

/// Schema version accepted on creation.
pub const BOOKING_VERSION: i64 = 0;

/// A single reservation tied to one hotel.
///
/// Absent and `null` JSON fields decode to their zero value so shape problems
/// are caught by [`Booking::is_valid_for_create`] rather than by the decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Booking {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub hotel_id: HotelId,
    #[serde(deserialize_with = "null_as_default")]
    pub arrive: String,
    #[serde(deserialize_with = "null_as_default")]
    pub leave: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Booking {
    /// Shape checks for a booking submitted for creation.
    ///
    /// Clients may not set the server-controlled `id` or `version`.
    pub fn is_valid_for_create(&self) -> bool {
        self.kind == BOOKING_TYPE
            && self.version == BOOKING_VERSION
            && !self.hotel_id.is_unset()
            && self.id.is_empty()
    }
}

/// Full result set of bookings for one hotel scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub data: Vec<Booking>,
}

impl From<Vec<Booking>> for Listing {
    fn from(data: Vec<Booking>) -> Self {
        Self { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Booking {
        Booking {
            kind: BOOKING_TYPE.to_string(),
            id: String::new(),
            version: 0,
            hotel_id: HotelId::new(123),
            arrive: "2021-08-13".to_string(),
            leave: "2021-08-15".to_string(),
            name: "Jane Guest".to_string(),
        }
    }

    #[test]
    fn wire_format_uses_original_field_names() {
        let json = serde_json::to_value(valid()).unwrap();
        assert_eq!(json["type"], "Booking");
        assert_eq!(json["hotel_id"], 123);
        assert_eq!(json["id"], "");
    }

    #[test]
    fn missing_fields_decode_to_zero_values() {
        let b: Booking = serde_json::from_str(r#"{"type":"Booking","name":"x"}"#).unwrap();
        assert!(b.hotel_id.is_unset());
        assert_eq!(b.version, 0);
        assert!(!b.is_valid_for_create());
    }

    #[test]
    fn null_fields_decode_to_zero_values() {
        let b: Booking = serde_json::from_str(
            r#"{"type":"Booking","id":null,"version":null,"hotel_id":123,"arrive":null,"leave":"b","name":null}"#,
        )
        .unwrap();
        assert_eq!(b.id, "");
        assert_eq!(b.version, 0);
        assert_eq!(b.arrive, "");
        assert_eq!(b.name, "");
        assert!(b.is_valid_for_create());

        let b: Booking = serde_json::from_str(r#"{"type":null,"hotel_id":null}"#).unwrap();
        assert_eq!(b.kind, "");
        assert!(b.hotel_id.is_unset());
        assert!(!b.is_valid_for_create());
    }

    #[test]
    fn mistyped_field_is_still_a_decode_error() {
        assert!(serde_json::from_str::<Booking>(r#"{"version":"zero"}"#).is_err());
    }

    #[test]
    fn create_shape_checks() {
        assert!(valid().is_valid_for_create());

        let mut b = valid();
        b.kind = "Debit".to_string();
        assert!(!b.is_valid_for_create());

        let mut b = valid();
        b.version = 1;
        assert!(!b.is_valid_for_create());

        let mut b = valid();
        b.hotel_id = HotelId::default();
        assert!(!b.is_valid_for_create());

        let mut b = valid();
        b.id = "a82a8dc8-a044-4769-970e-2143d9a1a050".to_string();
        assert!(!b.is_valid_for_create());
    }

    #[test]
    fn empty_listing_serializes_as_empty_array() {
        let json = serde_json::to_string(&Listing::default()).unwrap();
        assert_eq!(json, r#"{"data":[]}"#);
    }
}

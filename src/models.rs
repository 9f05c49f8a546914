// Wire types exchanged with the marketplace backend (camelCase JSON)

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl Location {
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.city.to_lowercase().contains(&needle)
            || self.country.to_lowercase().contains(&needle)
            || self
                .address
                .as_deref()
                .is_some_and(|address| address.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub id: String,
    pub name: String,
    pub property_type: String,
    pub location: Location,
    pub price_per_night: f64,
    pub currency: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub free_cancellation: bool,
    #[serde(default)]
    pub pay_at_property: bool,
    #[serde(default)]
    pub max_guests: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: String,
    pub title: String,
    pub destination: String,
    pub category: String,
    // "half-day", "full-day", "multi-day"
    pub duration: String,
    #[serde(default)]
    pub duration_hours: u32,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub price: f64,
    pub currency: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub free_cancellation: bool,
    #[serde(default)]
    pub max_group_size: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub role: UserRole,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Guest,
    Host,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: User,
    #[serde(flatten)]
    pub tokens: AuthTokens,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Accommodation,
    Tour,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub listing_id: String,
    pub listing_kind: ListingKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub adults: u32,
    pub children: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub listing_id: String,
    pub listing_kind: ListingKind,
    pub status: BookingStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: f64,
    pub currency: String,
    #[serde(default)]
    pub confirmation_code: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatus {
    pub completed: bool,
    #[serde(default)]
    pub current_step: Option<String>,
    #[serde(default)]
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingProfile {
    pub role: UserRole,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub interests: Vec<String>,
}

// Payload the host create-tour wizard submits
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTourRequest {
    pub title: String,
    pub description: String,
    pub destination: String,
    pub category: String,
    pub duration: String,
    pub duration_hours: u32,
    pub languages: Vec<String>,
    pub features: Vec<String>,
    pub meeting_point: String,
    pub itinerary: Vec<String>,
    pub price: f64,
    pub currency: String,
    pub min_group_size: u32,
    pub max_group_size: u32,
    pub free_cancellation: bool,
    pub available_days: Vec<Weekday>,
    pub start_times: Vec<NaiveTime>,
    pub min_advance_booking_days: u32,
    pub max_advance_booking_days: u32,
    pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accommodation_deserialization_with_defaults() {
        let json = r#"{
            "id": "acc-1",
            "name": "Harbour View",
            "propertyType": "apartment",
            "location": { "city": "Sydney", "country": "Australia" },
            "pricePerNight": 180.5,
            "currency": "AUD"
        }"#;
        let acc: Accommodation = serde_json::from_str(json).unwrap();
        assert_eq!(acc.property_type, "apartment");
        assert_eq!(acc.location.city, "Sydney");
        assert!(acc.amenities.is_empty());
        assert!(!acc.free_cancellation);
    }

    #[test]
    fn test_auth_session_flattens_tokens() {
        let json = r#"{
            "user": { "id": "u1", "email": "a@b.c", "firstName": "Ana", "lastName": "Silva", "role": "host" },
            "accessToken": "access",
            "refreshToken": "refresh"
        }"#;
        let session: AuthSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.user.role, UserRole::Host);
        assert_eq!(session.tokens.access_token, "access");
        assert_eq!(session.tokens.refresh_token, "refresh");
    }

    #[test]
    fn test_booking_request_skips_absent_fields() {
        let request = BookingRequest {
            listing_id: "tour-2".to_string(),
            listing_kind: ListingKind::Tour,
            start_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            adults: 2,
            children: 0,
            rooms: None,
            special_requests: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["listingKind"], "tour");
        assert_eq!(value["startDate"], "2025-08-01");
        assert!(value.get("rooms").is_none());
    }

    #[test]
    fn test_location_matches_case_insensitive() {
        let location = Location {
            city: "Lisbon".to_string(),
            country: "Portugal".to_string(),
            address: None,
        };
        assert!(location.matches("lis"));
        assert!(location.matches("PORTUGAL"));
        assert!(!location.matches("porto"));
    }
}

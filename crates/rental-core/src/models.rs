//! # Platform Records
//!
//! Flat record types mirrored from the document store: users, boats,
//! reviews, payments, favorites, and availability windows. Bookings live in
//! [`crate::booking`] alongside the date-range logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Client,
    Owner,
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Client
    }
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Client => "client",
            UserRole::Owner => "owner",
        }
    }
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

impl Default for UserStatus {
    fn default() -> Self {
        UserStatus::Active
    }
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Suspended => "suspended",
        }
    }
}

/// A platform user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    /// Stored password hash, never the clear text
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub is_professional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub siret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub siren: Option<String>,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(with = "crate::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Hull category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoatKind {
    Sailboat,
    Yacht,
    Catamaran,
}

impl BoatKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BoatKind::Sailboat => "sailboat",
            BoatKind::Yacht => "yacht",
            BoatKind::Catamaran => "catamaran",
        }
    }
}

/// A rentable boat listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boat {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub kind: BoatKind,
    /// Hull length in meters
    pub length: f64,
    /// Rental rate per day, major currency units
    pub day_rate: f64,
    pub capacity: u32,
    pub image: String,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default = "default_true")]
    pub available: bool,
    /// Owning user's id
    pub owner_id: String,
    #[serde(with = "crate::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::datetime")]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Boat {
    /// Display name used on the provider's hosted checkout page
    pub fn checkout_label(&self) -> String {
        format!("Boat rental - {}", self.name)
    }
}

/// A review left after a completed rental
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub boat_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    /// 1 to 5
    pub rating: u8,
    pub comment: String,
    #[serde(default)]
    pub helpful: u32,
    #[serde(with = "crate::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::datetime")]
    pub updated_at: DateTime<Utc>,
}

/// A payment record tied to a booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "_id")]
    pub id: String,
    pub booking_id: String,
    /// Amount in major currency units
    pub total_amount: f64,
    #[serde(with = "crate::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::datetime")]
    pub updated_at: DateTime<Utc>,
}

/// A user's favorited boat (unique per user/boat pair)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub boat_id: String,
    #[serde(with = "crate::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::datetime")]
    pub updated_at: DateTime<Utc>,
}

/// An owner-declared availability window for a boat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Availability {
    #[serde(rename = "_id")]
    pub id: String,
    pub boat_id: String,
    #[serde(with = "crate::datetime")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "crate::datetime")]
    pub end_date: DateTime<Utc>,
    /// Optional rate override for the window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "crate::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::datetime")]
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Owner).unwrap(), "\"owner\"");
        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, UserRole::Admin);
    }

    #[test]
    fn test_boat_kind_as_str() {
        assert_eq!(BoatKind::Catamaran.as_str(), "catamaran");
    }

    #[test]
    fn test_checkout_label() {
        let boat = Boat {
            id: "b1".into(),
            name: "Sea Breeze".into(),
            kind: BoatKind::Sailboat,
            length: 12.5,
            day_rate: 150.0,
            capacity: 8,
            image: "https://cdn.example.com/sea-breeze.jpg".into(),
            destination: "la-rochelle".into(),
            description: None,
            equipment: vec![],
            available: true,
            owner_id: "u1".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(boat.checkout_label(), "Boat rental - Sea Breeze");
    }
}

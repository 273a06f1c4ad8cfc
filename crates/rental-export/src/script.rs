//! # Script Assembly
//!
//! Builds the full export script from an in-memory snapshot of the seven
//! collections: table creation, one multi-row INSERT block per non-empty
//! collection, then the index set.

use crate::{schema, sql};
use chrono::Utc;
use rental_core::{Availability, Boat, Booking, Favorite, Payment, Review, User};

/// Everything the export reads, fetched up front
#[derive(Debug, Default)]
pub struct DatabaseSnapshot {
    pub users: Vec<User>,
    pub boats: Vec<Boat>,
    pub bookings: Vec<Booking>,
    pub reviews: Vec<Review>,
    pub payments: Vec<Payment>,
    pub favorites: Vec<Favorite>,
    pub availabilities: Vec<Availability>,
}

impl DatabaseSnapshot {
    /// Per-collection row counts, in schema order (for the summary log)
    pub fn counts(&self) -> [(&'static str, usize); 7] {
        [
            ("users", self.users.len()),
            ("boats", self.boats.len()),
            ("bookings", self.bookings.len()),
            ("reviews", self.reviews.len()),
            ("payments", self.payments.len()),
            ("favorites", self.favorites.len()),
            ("availabilities", self.availabilities.len()),
        ]
    }
}

/// Render one INSERT block; empty collections produce nothing.
fn insert_block<T>(
    out: &mut String,
    label: &str,
    columns: &str,
    rows: &[T],
    render: impl Fn(&T) -> String,
) {
    if rows.is_empty() {
        return;
    }

    out.push_str(&format!("-- {} data\n", label));
    out.push_str(&format!("INSERT INTO {} VALUES\n", columns));

    let values: Vec<String> = rows.iter().map(render).collect();
    out.push_str(&values.join(",\n"));
    out.push_str(";\n\n");
}

fn user_row(user: &User) -> String {
    format!(
        "({}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {})",
        sql::quote(&user.id),
        sql::quote(&user.last_name),
        sql::quote(&user.first_name),
        sql::quote(&user.email),
        sql::quote(&user.password),
        sql::opt_quote(user.phone.as_deref()),
        sql::quote(user.role.as_str()),
        sql::boolean(user.is_professional),
        sql::opt_quote(user.siret.as_deref()),
        sql::opt_quote(user.siren.as_deref()),
        sql::quote(user.status.as_str()),
        sql::datetime(user.created_at),
        sql::datetime(user.updated_at),
    )
}

fn boat_row(boat: &Boat) -> String {
    format!(
        "({}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {})",
        sql::quote(&boat.id),
        sql::quote(&boat.name),
        sql::quote(boat.kind.as_str()),
        sql::number(boat.length),
        sql::number(boat.day_rate),
        sql::number(boat.capacity),
        sql::quote(&boat.image),
        sql::quote(&boat.destination),
        sql::opt_quote(boat.description.as_deref()),
        sql::json_array(&boat.equipment),
        sql::boolean(boat.available),
        sql::quote(&boat.owner_id),
        sql::datetime(boat.created_at),
        sql::datetime(boat.updated_at),
    )
}

fn booking_row(booking: &Booking) -> String {
    format!(
        "({}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {})",
        sql::quote(&booking.id),
        sql::quote(&booking.user_id),
        sql::quote(&booking.boat_id),
        sql::datetime(booking.start_date),
        sql::datetime(booking.end_date),
        sql::number(booking.total_price),
        sql::quote(booking.status.as_str()),
        sql::quote(booking.payment_status.as_str()),
        sql::number(booking.number_of_guests),
        sql::opt_quote(booking.special_requests.as_deref()),
        sql::datetime(booking.created_at),
        sql::datetime(booking.updated_at),
    )
}

fn review_row(review: &Review) -> String {
    format!(
        "({}, {}, {}, {}, {}, {}, {}, {}, {})",
        sql::quote(&review.id),
        sql::quote(&review.user_id),
        sql::quote(&review.boat_id),
        sql::opt_quote(review.booking_id.as_deref()),
        sql::number(review.rating),
        sql::quote(&review.comment),
        sql::number(review.helpful),
        sql::datetime(review.created_at),
        sql::datetime(review.updated_at),
    )
}

fn payment_row(payment: &Payment) -> String {
    format!(
        "({}, {}, {}, {}, {})",
        sql::quote(&payment.id),
        sql::quote(&payment.booking_id),
        sql::number(payment.total_amount),
        sql::datetime(payment.created_at),
        sql::datetime(payment.updated_at),
    )
}

fn favorite_row(favorite: &Favorite) -> String {
    format!(
        "({}, {}, {}, {}, {})",
        sql::quote(&favorite.id),
        sql::quote(&favorite.user_id),
        sql::quote(&favorite.boat_id),
        sql::datetime(favorite.created_at),
        sql::datetime(favorite.updated_at),
    )
}

fn availability_row(availability: &Availability) -> String {
    format!(
        "({}, {}, {}, {}, {}, {}, {}, {}, {})",
        sql::quote(&availability.id),
        sql::quote(&availability.boat_id),
        sql::datetime(availability.start_date),
        sql::datetime(availability.end_date),
        sql::opt_number(availability.price),
        sql::opt_quote(availability.notes.as_deref()),
        sql::boolean(availability.is_active),
        sql::datetime(availability.created_at),
        sql::datetime(availability.updated_at),
    )
}

/// Assemble the complete export script
pub fn build_script(snapshot: &DatabaseSnapshot) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "-- SailingLoc database export\n-- Generated {}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    out.push_str(schema::CREATE_TABLES);
    out.push('\n');

    out.push_str("-- =============================================\n");
    out.push_str("-- DATA\n");
    out.push_str("-- =============================================\n\n");

    insert_block(
        &mut out,
        "users",
        "users (_id, last_name, first_name, email, password, phone, role, is_professional, siret, siren, status, created_at, updated_at)",
        &snapshot.users,
        user_row,
    );

    insert_block(
        &mut out,
        "boats",
        "boats (_id, name, kind, length, day_rate, capacity, image, destination, description, equipment, available, owner_id, created_at, updated_at)",
        &snapshot.boats,
        boat_row,
    );

    insert_block(
        &mut out,
        "bookings",
        "bookings (_id, user_id, boat_id, start_date, end_date, total_price, status, payment_status, number_of_guests, special_requests, created_at, updated_at)",
        &snapshot.bookings,
        booking_row,
    );

    insert_block(
        &mut out,
        "reviews",
        "reviews (_id, user_id, boat_id, booking_id, rating, comment, helpful, created_at, updated_at)",
        &snapshot.reviews,
        review_row,
    );

    insert_block(
        &mut out,
        "payments",
        "payments (_id, booking_id, total_amount, created_at, updated_at)",
        &snapshot.payments,
        payment_row,
    );

    insert_block(
        &mut out,
        "favorites",
        "favorites (_id, user_id, boat_id, created_at, updated_at)",
        &snapshot.favorites,
        favorite_row,
    );

    insert_block(
        &mut out,
        "availabilities",
        "availabilities (_id, boat_id, start_date, end_date, price, notes, is_active, created_at, updated_at)",
        &snapshot.availabilities,
        availability_row,
    );

    out.push_str(schema::CREATE_INDEXES);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rental_core::{BoatKind, BookingStatus, PaymentState, UserRole, UserStatus};

    fn ts() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn sample_user() -> User {
        User {
            id: "64f0c2a1b5e6d7a8c9b0e1f1".into(),
            last_name: "D'Arcy".into(),
            first_name: "Morgan".into(),
            email: "morgan@example.com".into(),
            password: "$2b$10$hash".into(),
            phone: None,
            role: UserRole::Client,
            is_professional: false,
            siret: None,
            siren: None,
            status: UserStatus::Active,
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn sample_booking() -> Booking {
        Booking {
            id: "64f0c2a1b5e6d7a8c9b0e1f4".into(),
            user_id: "64f0c2a1b5e6d7a8c9b0e1f1".into(),
            boat_id: "64f0c2a1b5e6d7a8c9b0e1f2".into(),
            start_date: ts(),
            end_date: Utc.with_ymd_and_hms(2025, 6, 4, 12, 0, 0).unwrap(),
            total_price: 450.0,
            status: BookingStatus::Pending,
            payment_status: PaymentState::Pending,
            number_of_guests: 4,
            special_requests: Some("Skipper's assistance".into()),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    #[test]
    fn test_empty_snapshot_has_no_insert_blocks() {
        let script = build_script(&DatabaseSnapshot::default());

        assert!(script.contains("CREATE TABLE IF NOT EXISTS users"));
        assert!(script.contains("CREATE INDEX idx_bookings_dates"));
        assert!(!script.contains("INSERT INTO"));
    }

    #[test]
    fn test_one_insert_block_per_nonempty_collection() {
        let snapshot = DatabaseSnapshot {
            users: vec![sample_user()],
            bookings: vec![sample_booking()],
            ..Default::default()
        };

        let script = build_script(&snapshot);

        assert_eq!(script.matches("INSERT INTO").count(), 2);
        assert!(script.contains("INSERT INTO users"));
        assert!(script.contains("INSERT INTO bookings"));
        assert!(!script.contains("INSERT INTO boats"));
    }

    #[test]
    fn test_string_values_are_escaped() {
        let snapshot = DatabaseSnapshot {
            users: vec![sample_user()],
            bookings: vec![sample_booking()],
            ..Default::default()
        };

        let script = build_script(&snapshot);

        assert!(script.contains("'D''Arcy'"));
        assert!(script.contains("'Skipper''s assistance'"));
    }

    #[test]
    fn test_absent_values_render_null() {
        let snapshot = DatabaseSnapshot {
            users: vec![sample_user()],
            ..Default::default()
        };

        let row = user_row(&snapshot.users[0]);
        assert!(row.contains(", NULL,")); // phone
        assert!(row.contains("'active'"));
        assert!(row.contains("'2025-06-01 12:00:00'"));
    }

    #[test]
    fn test_multi_row_block_joined_with_commas() {
        let mut second = sample_user();
        second.id = "64f0c2a1b5e6d7a8c9b0e1f9".into();
        second.email = "other@example.com".into();

        let snapshot = DatabaseSnapshot {
            users: vec![sample_user(), second],
            ..Default::default()
        };

        let script = build_script(&snapshot);

        // One statement, two rows
        assert_eq!(script.matches("INSERT INTO users").count(), 1);
        assert!(script.contains("),\n("));
    }
}

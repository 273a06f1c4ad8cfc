//! # MongoDB Rental Store
//!
//! `RentalStore` implementation over the official MongoDB driver, plus the
//! full-collection readers the export binary uses. Collections map 1:1 to
//! the platform record types.

use async_trait::async_trait;
use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use rental_core::{
    datetime, Availability, Boat, Booking, BookingStatus, DateRange, Favorite, NewBooking,
    Payment, PaymentState, RentalError, RentalResult, RentalStore, Review, User,
};
use tracing::{debug, instrument};

/// Collection names
const USERS: &str = "users";
const BOATS: &str = "boats";
const BOOKINGS: &str = "bookings";
const REVIEWS: &str = "reviews";
const PAYMENTS: &str = "payments";
const FAVORITES: &str = "favorites";
const AVAILABILITIES: &str = "availabilities";

/// MongoDB-backed store
#[derive(Clone)]
pub struct MongoRentalStore {
    db: Database,
}

fn db_err(e: mongodb::error::Error) -> RentalError {
    RentalError::Database(e.to_string())
}

/// Filter matching any active booking on the boat whose range overlaps the
/// requested one. Bounds use the same fixed-width rendering the documents
/// are written with; any other RFC 3339 variant would compare incorrectly
/// against stored dates.
pub fn conflict_filter(boat_id: &str, range: &DateRange) -> Document {
    doc! {
        "boat_id": boat_id,
        "status": { "$in": [BookingStatus::Pending.as_str(), BookingStatus::Confirmed.as_str()] },
        "start_date": { "$lte": datetime::format(&range.end) },
        "end_date": { "$gte": datetime::format(&range.start) },
    }
}

impl MongoRentalStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn bookings(&self) -> Collection<Booking> {
        self.db.collection(BOOKINGS)
    }

    fn payments(&self) -> Collection<Payment> {
        self.db.collection(PAYMENTS)
    }

    async fn read_all<T>(&self, name: &str) -> RentalResult<Vec<T>>
    where
        T: serde::de::DeserializeOwned + Send + Sync,
    {
        let cursor = self
            .db
            .collection::<T>(name)
            .find(doc! {})
            .await
            .map_err(db_err)?;
        cursor.try_collect().await.map_err(db_err)
    }

    // Full-collection readers for the export binary

    pub async fn list_users(&self) -> RentalResult<Vec<User>> {
        self.read_all(USERS).await
    }

    pub async fn list_boats(&self) -> RentalResult<Vec<Boat>> {
        self.read_all(BOATS).await
    }

    pub async fn list_bookings(&self) -> RentalResult<Vec<Booking>> {
        self.read_all(BOOKINGS).await
    }

    pub async fn list_reviews(&self) -> RentalResult<Vec<Review>> {
        self.read_all(REVIEWS).await
    }

    pub async fn list_payments(&self) -> RentalResult<Vec<Payment>> {
        self.read_all(PAYMENTS).await
    }

    pub async fn list_favorites(&self) -> RentalResult<Vec<Favorite>> {
        self.read_all(FAVORITES).await
    }

    pub async fn list_availabilities(&self) -> RentalResult<Vec<Availability>> {
        self.read_all(AVAILABILITIES).await
    }
}

#[async_trait]
impl RentalStore for MongoRentalStore {
    #[instrument(skip(self))]
    async fn find_boat(&self, boat_id: &str) -> RentalResult<Option<Boat>> {
        self.db
            .collection::<Boat>(BOATS)
            .find_one(doc! { "_id": boat_id })
            .await
            .map_err(db_err)
    }

    #[instrument(skip(self, range), fields(start = %range.start, end = %range.end))]
    async fn find_conflicting_booking(
        &self,
        boat_id: &str,
        range: &DateRange,
    ) -> RentalResult<Option<Booking>> {
        let filter = conflict_filter(boat_id, range);
        debug!("Running availability check");
        self.bookings().find_one(filter).await.map_err(db_err)
    }

    #[instrument(skip(self, new), fields(boat_id = %new.boat_id, user_id = %new.user_id))]
    async fn create_booking(&self, new: NewBooking) -> RentalResult<Booking> {
        let now = Utc::now();
        let booking = Booking {
            id: ObjectId::new().to_hex(),
            user_id: new.user_id,
            boat_id: new.boat_id,
            start_date: new.range.start,
            end_date: new.range.end,
            total_price: new.total_price,
            status: BookingStatus::Pending,
            payment_status: PaymentState::Pending,
            number_of_guests: new.number_of_guests,
            special_requests: new.special_requests,
            created_at: now,
            updated_at: now,
        };

        self.bookings()
            .insert_one(&booking)
            .await
            .map_err(db_err)?;

        Ok(booking)
    }

    #[instrument(skip(self))]
    async fn create_payment(&self, booking_id: &str, total_amount: f64) -> RentalResult<Payment> {
        let now = Utc::now();
        let payment = Payment {
            id: ObjectId::new().to_hex(),
            booking_id: booking_id.to_string(),
            total_amount,
            created_at: now,
            updated_at: now,
        };

        self.payments()
            .insert_one(&payment)
            .await
            .map_err(db_err)?;

        Ok(payment)
    }

    #[instrument(skip(self))]
    async fn mark_booking_paid(&self, booking_id: &str) -> RentalResult<Option<Booking>> {
        let update = doc! {
            "$set": {
                "status": BookingStatus::Confirmed.as_str(),
                "payment_status": PaymentState::Paid.as_str(),
                "updated_at": datetime::format(&Utc::now()),
            }
        };

        self.bookings()
            .find_one_and_update(doc! { "_id": booking_id }, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_conflict_filter_shape() {
        let range = DateRange::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 4, 0, 0, 0).unwrap(),
        )
        .unwrap();

        let filter = conflict_filter("boat-1", &range);

        assert_eq!(filter.get_str("boat_id").unwrap(), "boat-1");

        let statuses = filter
            .get_document("status")
            .unwrap()
            .get_array("$in")
            .unwrap();
        assert_eq!(statuses.len(), 2);

        // Overlap is inclusive on both bounds
        assert_eq!(
            filter
                .get_document("start_date")
                .unwrap()
                .get_str("$lte")
                .unwrap(),
            "2025-06-04T00:00:00.000Z"
        );
        assert_eq!(
            filter
                .get_document("end_date")
                .unwrap()
                .get_str("$gte")
                .unwrap(),
            "2025-06-01T00:00:00.000Z"
        );
    }

    #[test]
    fn test_filter_bounds_match_stored_documents() {
        // An active booking starting the instant the requested range ends.
        // The server compares strings bytewise, so the filter bounds must
        // render identically to what insert_one wrote.
        let booking = Booking {
            id: "b1".into(),
            user_id: "u1".into(),
            boat_id: "boat-1".into(),
            start_date: Utc.with_ymd_and_hms(2025, 6, 4, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2025, 6, 7, 0, 0, 0).unwrap(),
            total_price: 450.0,
            status: BookingStatus::Pending,
            payment_status: PaymentState::Pending,
            number_of_guests: 4,
            special_requests: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let stored = mongodb::bson::to_document(&booking).unwrap();
        let stored_start = stored.get_str("start_date").unwrap();
        let stored_end = stored.get_str("end_date").unwrap();

        let range = DateRange::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 4, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let filter = conflict_filter("boat-1", &range);
        let lte = filter
            .get_document("start_date")
            .unwrap()
            .get_str("$lte")
            .unwrap();
        let gte = filter
            .get_document("end_date")
            .unwrap()
            .get_str("$gte")
            .unwrap();

        // Touching boundary must satisfy both clauses
        assert!(
            stored_start <= lte,
            "stored start {stored_start} escapes $lte bound {lte}"
        );
        assert!(
            stored_end >= gte,
            "stored end {stored_end} escapes $gte bound {gte}"
        );
    }
}

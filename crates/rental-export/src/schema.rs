//! # Destination Schema
//!
//! Fixed relational schema the export targets: seven tables mirroring the
//! document collections, with foreign keys and the index set the platform
//! queries rely on.

/// Table creation statements, in dependency order
pub const CREATE_TABLES: &str = r#"-- =============================================
-- TABLES
-- =============================================

CREATE TABLE IF NOT EXISTS users (
    _id VARCHAR(24) PRIMARY KEY,
    last_name VARCHAR(100) NOT NULL,
    first_name VARCHAR(100) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    password VARCHAR(255) NOT NULL,
    phone VARCHAR(20),
    role ENUM('admin', 'client', 'owner') DEFAULT 'client',
    is_professional BOOLEAN DEFAULT FALSE,
    siret VARCHAR(14),
    siren VARCHAR(9),
    status ENUM('active', 'inactive', 'suspended') DEFAULT 'active',
    created_at DATETIME,
    updated_at DATETIME
);

CREATE TABLE IF NOT EXISTS boats (
    _id VARCHAR(24) PRIMARY KEY,
    name VARCHAR(100) NOT NULL UNIQUE,
    kind ENUM('sailboat', 'yacht', 'catamaran') NOT NULL,
    length DECIMAL(5,2) NOT NULL,
    day_rate DECIMAL(10,2) NOT NULL,
    capacity INT NOT NULL,
    image TEXT NOT NULL,
    destination VARCHAR(100) NOT NULL,
    description TEXT,
    equipment JSON,
    available BOOLEAN DEFAULT TRUE,
    owner_id VARCHAR(24) NOT NULL,
    created_at DATETIME,
    updated_at DATETIME,
    FOREIGN KEY (owner_id) REFERENCES users(_id)
);

CREATE TABLE IF NOT EXISTS bookings (
    _id VARCHAR(24) PRIMARY KEY,
    user_id VARCHAR(24) NOT NULL,
    boat_id VARCHAR(24) NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    total_price DECIMAL(10,2) NOT NULL,
    status ENUM('pending', 'confirmed', 'cancelled', 'completed') DEFAULT 'pending',
    payment_status ENUM('pending', 'paid', 'refunded') DEFAULT 'pending',
    number_of_guests INT NOT NULL,
    special_requests TEXT,
    created_at DATETIME,
    updated_at DATETIME,
    FOREIGN KEY (user_id) REFERENCES users(_id),
    FOREIGN KEY (boat_id) REFERENCES boats(_id)
);

CREATE TABLE IF NOT EXISTS reviews (
    _id VARCHAR(24) PRIMARY KEY,
    user_id VARCHAR(24) NOT NULL,
    boat_id VARCHAR(24) NOT NULL,
    booking_id VARCHAR(24),
    rating INT NOT NULL CHECK (rating >= 1 AND rating <= 5),
    comment TEXT NOT NULL,
    helpful INT DEFAULT 0,
    created_at DATETIME,
    updated_at DATETIME,
    FOREIGN KEY (user_id) REFERENCES users(_id),
    FOREIGN KEY (boat_id) REFERENCES boats(_id),
    FOREIGN KEY (booking_id) REFERENCES bookings(_id)
);

CREATE TABLE IF NOT EXISTS payments (
    _id VARCHAR(24) PRIMARY KEY,
    booking_id VARCHAR(24) NOT NULL,
    total_amount DECIMAL(10,2) NOT NULL,
    created_at DATETIME,
    updated_at DATETIME,
    FOREIGN KEY (booking_id) REFERENCES bookings(_id)
);

CREATE TABLE IF NOT EXISTS favorites (
    _id VARCHAR(24) PRIMARY KEY,
    user_id VARCHAR(24) NOT NULL,
    boat_id VARCHAR(24) NOT NULL,
    created_at DATETIME,
    updated_at DATETIME,
    FOREIGN KEY (user_id) REFERENCES users(_id),
    FOREIGN KEY (boat_id) REFERENCES boats(_id),
    UNIQUE KEY unique_user_boat (user_id, boat_id)
);

CREATE TABLE IF NOT EXISTS availabilities (
    _id VARCHAR(24) PRIMARY KEY,
    boat_id VARCHAR(24) NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    price DECIMAL(10,2),
    notes TEXT,
    is_active BOOLEAN DEFAULT TRUE,
    created_at DATETIME,
    updated_at DATETIME,
    FOREIGN KEY (boat_id) REFERENCES boats(_id)
);
"#;

/// Index creation statements, appended after the data blocks
pub const CREATE_INDEXES: &str = r#"-- =============================================
-- INDEXES
-- =============================================

CREATE INDEX idx_users_email ON users(email);
CREATE INDEX idx_users_role ON users(role);
CREATE INDEX idx_users_status ON users(status);

CREATE INDEX idx_boats_owner_id ON boats(owner_id);
CREATE INDEX idx_boats_kind ON boats(kind);
CREATE INDEX idx_boats_destination ON boats(destination);
CREATE INDEX idx_boats_available ON boats(available);

CREATE INDEX idx_bookings_user_id ON bookings(user_id);
CREATE INDEX idx_bookings_boat_id ON bookings(boat_id);
CREATE INDEX idx_bookings_dates ON bookings(start_date, end_date);
CREATE INDEX idx_bookings_status ON bookings(status);

CREATE INDEX idx_reviews_boat_id ON reviews(boat_id);
CREATE INDEX idx_reviews_user_id ON reviews(user_id);
CREATE INDEX idx_reviews_rating ON reviews(rating);

CREATE INDEX idx_payments_booking_id ON payments(booking_id);

CREATE INDEX idx_favorites_user_id ON favorites(user_id);
CREATE INDEX idx_favorites_boat_id ON favorites(boat_id);

CREATE INDEX idx_availabilities_boat_id ON availabilities(boat_id);
CREATE INDEX idx_availabilities_dates ON availabilities(start_date, end_date);
"#;

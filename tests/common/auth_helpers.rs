//! Authentication test helpers
//!
//! Provides utilities for creating test users and generating tokens.

use uuid::Uuid;

use taskboard::backend::auth::sessions::create_token;
use taskboard::backend::auth::users::create_user;

use super::database::{TestDatabase, TEST_JWT_SECRET};

/// Test user credentials
pub struct TestUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Create a test user in the database
pub async fn create_test_user(db: &TestDatabase, name: &str, email: &str, password: &str) -> TestUser {
    let password_hash = bcrypt::hash(password, 4).expect("Failed to hash password");
    let user = create_user(db.pool(), name, email, &password_hash)
        .await
        .expect("Failed to create user");

    TestUser {
        id: user.id,
        name: user.name,
        token: generate_test_token(user.id, &user.email),
        email: user.email,
        password: password.to_string(),
    }
}

/// Create a test user with a unique email
pub async fn create_unique_test_user(db: &TestDatabase) -> TestUser {
    let email = format!("test_{}@example.com", Uuid::new_v4().simple());
    create_test_user(db, "Test User", &email, "test_password_123").await
}

/// Generate a test JWT token
pub fn generate_test_token(user_id: Uuid, email: &str) -> String {
    create_token(user_id, email, TEST_JWT_SECRET, 1).expect("Failed to generate test token")
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

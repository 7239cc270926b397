//! Authentication test helpers
//!
//! Create users directly in the database and mint tokens for them with the
//! fixture's secret.

use sqlx::SqlitePool;
use uuid::Uuid;
use taskboard::backend::auth::sessions::create_token;
use taskboard::backend::auth::users::create_user;

use super::database::{TEST_BCRYPT_COST, TEST_JWT_SECRET};

/// Test user credentials
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Create a test user in the database
pub async fn create_test_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<TestUser, Box<dyn std::error::Error>> {
    let password_hash = bcrypt::hash(password, TEST_BCRYPT_COST)?;
    let user = create_user(pool, name.to_string(), email.to_string(), password_hash).await?;
    let token = generate_test_token(user.id, &user.email);

    Ok(TestUser {
        id: user.id,
        name: user.name,
        email: user.email,
        password: password.to_string(),
        token,
    })
}

/// Create a test user with a unique email
pub async fn create_unique_test_user(pool: &SqlitePool) -> TestUser {
    let email = format!("test_{}@example.com", Uuid::new_v4().simple());
    create_test_user(pool, "Test User", &email, "test_password_123")
        .await
        .expect("Failed to create test user")
}

/// Generate a test JWT token
pub fn generate_test_token(user_id: Uuid, email: &str) -> String {
    create_token(user_id, email, TEST_JWT_SECRET, 1).expect("Failed to generate test token")
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

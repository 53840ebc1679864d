//! Authentication test helpers
//!
//! Provides utilities for minting test identities and tokens without a
//! running identity provider.

use uuid::Uuid;

use boardsync::backend::auth::create_token;
use boardsync::backend::middleware::auth::AuthenticatedUser;
use boardsync::backend::middleware::AuthUser;

/// Secret the test app state verifies tokens against
pub const TEST_SECRET: &str = "test-secret";

/// A test identity with a valid signed token
pub struct TestUser {
    pub user_id: Uuid,
    pub token: String,
}

/// Mint a fresh user with a token signed by [`TEST_SECRET`]
pub fn test_user() -> TestUser {
    let user_id = Uuid::new_v4();
    let token = create_token(user_id, TEST_SECRET).expect("Failed to create test token");
    TestUser { user_id, token }
}

/// Build the extractor value handlers receive after auth middleware
pub fn auth(user_id: Uuid) -> AuthUser {
    AuthUser(AuthenticatedUser { user_id })
}

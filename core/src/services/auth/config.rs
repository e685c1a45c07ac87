//! Configuration for the authentication service

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Minimum accepted password length
    pub min_password_length: usize,
    /// Bcrypt cost factor for password hashing
    pub bcrypt_cost: u32,
    /// Base URL the verification link points at
    pub frontend_base_url: String,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            min_password_length: 8,
            bcrypt_cost: 10,
            frontend_base_url: "http://localhost:3000".to_string(),
        }
    }
}

use bcrypt::DEFAULT_COST;

use crate::error::AppError;

/// Seam over password hashing so the signup workflow can be exercised with a
/// test double and so the cost factor stays configurable.
pub trait PasswordHasher: Send + Sync {
    /// Produces a salted one-way hash of the plaintext.
    fn hash(&self, plaintext: &str) -> Result<String, AppError>;

    /// Checks the plaintext against a stored hash. bcrypt compares digests
    /// in constant time.
    fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool, AppError>;
}

pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Lower costs keep test suites fast; production wiring uses `new`.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }

    fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool, AppError> {
        Ok(bcrypt::verify(plaintext, stored_hash)?)
    }
}

//! Password hashing via bcrypt.

use super::AuthError;

/// Default bcrypt cost factor.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// Lowest cost bcrypt accepts. Only suitable for tests.
pub const MIN_COST: u32 = 4;

/// Highest cost bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Salts, hashes and verifies passwords with a fixed bcrypt cost.
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    cost: u32,
}

impl CredentialHasher {
    /// Creates a hasher with the given cost, rejecting values bcrypt refuses.
    pub fn new(cost: u32) -> Result<Self, AuthError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(AuthError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
    }

    /// Verify a password against a bcrypt hash.
    ///
    /// A malformed hash counts as a mismatch.
    pub fn verify(&self, hash: &str, password: &str) -> bool {
        match bcrypt::verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::debug!("bcrypt verify failed: {e}");
                false
            }
        }
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> CredentialHasher {
        CredentialHasher::new(MIN_COST).unwrap()
    }

    #[test]
    fn hash_is_salted() {
        let h = hasher();
        let a = h.hash("Secr3tPass").unwrap();
        let b = h.hash("Secr3tPass").unwrap();
        assert_ne!(a, b);
        assert!(h.verify(&a, "Secr3tPass"));
        assert!(h.verify(&b, "Secr3tPass"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let h = hasher();
        let hash = h.hash("Secr3tPass").unwrap();
        assert!(!h.verify(&hash, "Secr3tPassx"));
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        let h = hasher();
        assert!(!h.verify("not-a-bcrypt-hash", "Secr3tPass"));
        assert!(!h.verify("", "Secr3tPass"));
    }

    #[test]
    fn cost_out_of_range_is_rejected() {
        assert!(matches!(
            CredentialHasher::new(2),
            Err(AuthError::InvalidCost(2))
        ));
        assert!(CredentialHasher::new(40).is_err());
    }

    #[test]
    fn default_cost_is_production_grade() {
        assert_eq!(CredentialHasher::default().cost(), 12);
    }
}

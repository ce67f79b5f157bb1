use anyhow::{anyhow, bail};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use pbkdf2::Pbkdf2;
use tracing::info;

/// Hashing scheme for new credentials. Picked once from configuration at
/// process start, never probed or silently swapped per call. Both schemes
/// accept arbitrarily long passwords, which rules out plain bcrypt and its
/// 72-byte ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialScheme {
    Argon2id,
    Pbkdf2Sha256,
}

impl CredentialScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            CredentialScheme::Argon2id => "argon2id",
            CredentialScheme::Pbkdf2Sha256 => "pbkdf2-sha256",
        }
    }
}

impl std::str::FromStr for CredentialScheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "argon2id" => Ok(CredentialScheme::Argon2id),
            "pbkdf2-sha256" => Ok(CredentialScheme::Pbkdf2Sha256),
            other => bail!("unknown password scheme '{}' (expected argon2id or pbkdf2-sha256)", other),
        }
    }
}

/// Turns plaintext passwords into self-describing PHC credential strings and
/// verifies plaintext against them. Verification accepts credentials from any
/// supported scheme regardless of which one is configured for hashing, so a
/// store can hold a mix after a scheme change.
#[derive(Debug, Clone, Copy)]
pub struct PasswordManager {
    scheme: CredentialScheme,
}

impl PasswordManager {
    pub fn new(scheme: CredentialScheme) -> Self {
        info!("password hashing scheme: {}", scheme.as_str());
        Self { scheme }
    }

    pub fn scheme(&self) -> CredentialScheme {
        self.scheme
    }

    /// Salted one-way hash. The output embeds algorithm id, parameters and
    /// salt, so verification needs no external state. Fails only on RNG or
    /// parameter failure, never on password content or length.
    pub fn hash(&self, plaintext: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = match self.scheme {
            CredentialScheme::Argon2id => Argon2::default()
                .hash_password(plaintext.as_bytes(), &salt)
                .map_err(|e| anyhow!("argon2 hashing failed: {}", e))?,
            CredentialScheme::Pbkdf2Sha256 => Pbkdf2
                .hash_password(plaintext.as_bytes(), &salt)
                .map_err(|e| anyhow!("pbkdf2 hashing failed: {}", e))?,
        };

        Ok(hash.to_string())
    }

    /// Constant-time check of `plaintext` against a stored credential.
    /// Mismatches and malformed credentials are both a normal `false`.
    pub fn verify(&self, plaintext: &str, credential: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(credential) else {
            return false;
        };

        parsed
            .verify_password(&[&Argon2::default(), &Pbkdf2], plaintext)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argon2_roundtrip() {
        let manager = PasswordManager::new(CredentialScheme::Argon2id);
        let credential = manager.hash("mysecretpassword").unwrap();

        assert!(credential.starts_with("$argon2id$"));
        assert!(manager.verify("mysecretpassword", &credential));
        assert!(!manager.verify("notmypassword", &credential));
    }

    #[test]
    fn pbkdf2_roundtrip() {
        let manager = PasswordManager::new(CredentialScheme::Pbkdf2Sha256);
        let credential = manager.hash("mysecretpassword").unwrap();

        assert!(credential.starts_with("$pbkdf2-sha256$"));
        assert!(manager.verify("mysecretpassword", &credential));
        assert!(!manager.verify("notmypassword", &credential));
    }

    #[test]
    fn long_passwords_survive_both_schemes() {
        let long = "p".repeat(200);
        for scheme in [CredentialScheme::Argon2id, CredentialScheme::Pbkdf2Sha256] {
            let manager = PasswordManager::new(scheme);
            let credential = manager.hash(&long).unwrap();
            assert!(manager.verify(&long, &credential));
            // A truncating scheme would accept this prefix too.
            assert!(!manager.verify(&long[..72], &credential));
        }
    }

    #[test]
    fn single_char_password_roundtrip() {
        let manager = PasswordManager::new(CredentialScheme::Argon2id);
        let credential = manager.hash("x").unwrap();
        assert!(manager.verify("x", &credential));
    }

    #[test]
    fn verify_crosses_schemes() {
        let argon = PasswordManager::new(CredentialScheme::Argon2id);
        let pbkdf2 = PasswordManager::new(CredentialScheme::Pbkdf2Sha256);

        let credential = argon.hash("supersecret").unwrap();
        assert!(pbkdf2.verify("supersecret", &credential));

        let credential = pbkdf2.hash("supersecret").unwrap();
        assert!(argon.verify("supersecret", &credential));
    }

    #[test]
    fn malformed_credential_is_false_not_error() {
        let manager = PasswordManager::new(CredentialScheme::Argon2id);
        assert!(!manager.verify("whatever", ""));
        assert!(!manager.verify("whatever", "not-a-phc-string"));
        assert!(!manager.verify("whatever", "$unknown$v=1$abc"));
    }

    #[test]
    fn scheme_names_parse() {
        assert_eq!("argon2id".parse::<CredentialScheme>().unwrap(), CredentialScheme::Argon2id);
        assert_eq!(
            "pbkdf2-sha256".parse::<CredentialScheme>().unwrap(),
            CredentialScheme::Pbkdf2Sha256
        );
        assert!("bcrypt".parse::<CredentialScheme>().is_err());
    }
}

use anyhow::{anyhow, Result};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::local_crypto::{constant_eq, hash_256};

/// How passwords are stored in the students file and in the config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PasswordDigest {
    Plaintext,
    #[default]
    Sha256,
}

impl PasswordDigest {
    pub fn apply<T: AsRef<str>>(&self, password: T) -> String {
        match self {
            PasswordDigest::Plaintext => password.as_ref().to_string(),
            PasswordDigest::Sha256 => hash_256(password),
        }
    }

    /// Digests `password` and compares it with an already stored value.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        constant_eq(self.apply(password).as_str(), stored)
    }
}

impl Display for PasswordDigest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordDigest::Plaintext => f.write_str("plaintext"),
            PasswordDigest::Sha256 => f.write_str("sha256"),
        }
    }
}

impl FromStr for PasswordDigest {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_ascii_lowercase();
        match s.as_str() {
            "plaintext" | "plain" => Ok(PasswordDigest::Plaintext),
            "sha256" => Ok(PasswordDigest::Sha256),
            _ => Err(anyhow!("Unknown password storage: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdminCredentials {
    email: String,
    password: String,
    digest: PasswordDigest,
}

impl AdminCredentials {
    /// `password` is expected in its stored form, i.e. already digested.
    pub fn init(email: String, password: String, digest: PasswordDigest) -> Result<Self> {
        if email.is_empty() {
            return Err(anyhow!("Admin email must not be empty"));
        }
        if password.is_empty() {
            return Err(anyhow!("Admin password must not be empty"));
        }
        Ok(Self {
            email,
            password,
            digest,
        })
    }

    pub fn authenticate(&self, email: &str, password: &str) -> bool {
        // evaluate both so a wrong email costs the same as a wrong password
        let email_ok = self.email.eq_ignore_ascii_case(email.trim());
        let password_ok = self.digest.verify(password, &self.password);
        email_ok && password_ok
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn digest(&self) -> PasswordDigest {
        self.digest
    }
}

use regman_auth::auth::PasswordDigest;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum PasswordStorage {
    Plaintext,
    #[default]
    Sha256,
}

impl PasswordStorage {
    pub fn into_digest(self) -> PasswordDigest {
        match self {
            PasswordStorage::Plaintext => PasswordDigest::Plaintext,
            PasswordStorage::Sha256 => PasswordDigest::Sha256,
        }
    }
}

impl From<PasswordDigest> for PasswordStorage {
    fn from(value: PasswordDigest) -> Self {
        match value {
            PasswordDigest::Plaintext => PasswordStorage::Plaintext,
            PasswordDigest::Sha256 => PasswordStorage::Sha256,
        }
    }
}

impl FromStr for PasswordStorage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PasswordDigest::from_str(s)?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_digest_plaintext() {
        let storage = PasswordStorage::Plaintext;
        assert_eq!(storage.into_digest(), PasswordDigest::Plaintext);
    }

    #[test]
    fn test_into_digest_sha256() {
        let storage = PasswordStorage::Sha256;
        assert_eq!(storage.into_digest(), PasswordDigest::Sha256);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "plaintext".parse::<PasswordStorage>().unwrap(),
            PasswordStorage::Plaintext
        );
        assert_eq!(
            "Sha256".parse::<PasswordStorage>().unwrap(),
            PasswordStorage::Sha256
        );
        assert!("bcrypt".parse::<PasswordStorage>().is_err());
    }
}

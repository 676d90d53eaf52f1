use std::collections::HashMap;
use std::env;
use std::fmt;

pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> Result<(), AuthError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    UnknownUser,
    WrongPassword,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::UnknownUser => write!(f, "unknown user"),
            AuthError::WrongPassword => write!(f, "incorrect password"),
        }
    }
}

#[derive(Debug, Default)]
pub struct StaticCredentials {
    users: HashMap<String, String>,
}

impl StaticCredentials {
    pub fn from_env() -> Self {
        Self::parse(&env::var("APP_USERS").unwrap_or_default())
    }

    // Accepts "name:password,name:password"; malformed entries are skipped.
    pub fn parse(spec: &str) -> Self {
        let users = spec
            .split(',')
            .filter_map(|entry| {
                let (name, password) = entry.split_once(':')?;
                let name = name.trim();
                let password = password.trim();
                if name.is_empty() || password.is_empty() {
                    return None;
                }
                Some((name.to_string(), password.to_string()))
            })
            .collect();
        Self { users }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> Result<(), AuthError> {
        match self.users.get(username) {
            None => Err(AuthError::UnknownUser),
            Some(expected) if expected != password => Err(AuthError::WrongPassword),
            Some(_) => Ok(()),
        }
    }
}

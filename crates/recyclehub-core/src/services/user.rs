use std::sync::Arc;

use crate::domain::{EMAIL_MAX_LEN, NewUser, USERNAME_MAX_LEN, User};
use crate::error::DomainError;
use crate::ports::{PasswordService, TokenService, UserRepository};

/// Signup form. Fields are optional so absence can be reported together.
#[derive(Debug, Clone, Default)]
pub struct SignupInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A freshly issued access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// Account creation, lookup and credential checks.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

fn required<'a>(fields: &[(&'static str, &'a Option<String>)]) -> Result<Vec<&'a str>, DomainError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect();

    if !missing.is_empty() {
        return Err(DomainError::missing_fields(&missing));
    }

    Ok(fields
        .iter()
        .filter_map(|(_, value)| value.as_deref())
        .collect())
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Register a new account. Username and email must both be unused.
    pub async fn signup(&self, input: SignupInput) -> Result<User, DomainError> {
        let values = required(&[
            ("username", &input.username),
            ("email", &input.email),
            ("password", &input.password),
        ])?;
        let (username, email, password) = (values[0].trim(), values[1].trim(), values[2]);
        for (name, value, max) in [
            ("username", username, USERNAME_MAX_LEN),
            ("email", email, EMAIL_MAX_LEN),
        ] {
            if value.chars().count() > max {
                return Err(DomainError::Validation(format!(
                    "Field '{name}' must be at most {max} characters"
                )));
            }
        }

        if self.users.find_by_username(username).await?.is_some() {
            return Err(DomainError::Conflict("Username already exists".to_string()));
        }
        if self.users.find_by_email(email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".to_string()));
        }

        let password_hash = self.passwords.hash(password)?;
        let user = self
            .users
            .create(NewUser::new(
                username.to_string(),
                email.to_string(),
                password_hash,
            ))
            .await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.find_all().await?)
    }

    /// Check credentials and issue an access token.
    pub async fn login(
        &self,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<IssuedToken, DomainError> {
        let values = required(&[("username", &username), ("password", &password)])?;
        let (username, password) = (values[0].trim(), values[1]);

        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !self.passwords.verify(password, &user.password_hash)? {
            tracing::debug!(user_id = user.id, "Password mismatch");
            return Err(DomainError::InvalidCredentials);
        }

        let access_token = self.tokens.generate_token(user.id, &user.username)?;
        Ok(IssuedToken {
            access_token,
            expires_in: self.tokens.expiration_seconds(),
        })
    }
}

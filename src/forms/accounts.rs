use serde::Deserialize;

use crate::domain::account::{Credentials, NewAccount, ProfileUpdate};
use crate::forms::FormError;

#[derive(Default, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn to_credentials(&self) -> Result<Credentials, FormError> {
        if self.email.trim().is_empty() {
            return Err(FormError::MissingField("email"));
        }
        if self.password.is_empty() {
            return Err(FormError::MissingField("password"));
        }
        Ok(Credentials::new(&self.email, &self.password))
    }
}

#[derive(Default, Clone, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_num: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn to_new_account(&self) -> Result<NewAccount, FormError> {
        let credentials = LoginForm {
            email: self.email.clone(),
            password: self.password.clone(),
        }
        .to_credentials()?;
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(NewAccount {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone_num: self.phone_num.trim().to_string(),
            email: credentials.email,
            password: credentials.password,
        })
    }
}

/// Profile edit form; leave `new_password` empty to keep the current one.
#[derive(Default, Clone, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_num: String,
    pub email: String,
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_new_password: String,
}

impl ProfileForm {
    pub fn to_update(&self) -> Result<ProfileUpdate, FormError> {
        let email = self.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(FormError::MissingField("email"));
        }

        let (old_password, new_password) = if self.new_password.is_empty() {
            (None, None)
        } else {
            if self.new_password != self.confirm_new_password {
                return Err(FormError::PasswordMismatch);
            }
            if self.old_password.is_empty() {
                return Err(FormError::MissingField("old_password"));
            }
            (
                Some(self.old_password.clone()),
                Some(self.new_password.clone()),
            )
        };

        Ok(ProfileUpdate {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone_num: self.phone_num.trim().to_string(),
            email,
            old_password,
            new_password,
        })
    }
}

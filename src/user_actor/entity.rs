use super::error::UserError;
use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserPatch};

fn validate_email(email: &str) -> Result<(), UserError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(UserError::ValidationError(format!("invalid email: {}", email))),
    }
}

impl Entity for User {
    const KIND: &'static str = "user";
    type Id = String;
    type CreateParams = UserCreate;
    type Patch = UserPatch;
    type Action = ();
    type ActionResult = ();
    type Error = UserError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: UserCreate) -> Result<Self, UserError> {
        if params.name.trim().is_empty() {
            return Err(UserError::ValidationError("name must not be empty".to_string()));
        }
        validate_email(&params.email)?;
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            phone: params.phone,
            line_user_id: params.line_user_id,
        })
    }

    fn on_update(&mut self, patch: UserPatch) -> Result<(), UserError> {
        if let Some(email) = &patch.email {
            validate_email(email)?;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(line_user_id) = patch.line_user_id {
            self.line_user_id = Some(line_user_id);
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), UserError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(User::from_create_params("user_1".into(), UserCreate::new("Ploy", "ploy@example.co.th")).is_ok());
        assert!(User::from_create_params("user_2".into(), UserCreate::new("Ploy", "ploy.example.com")).is_err());

        let mut user = User::from_create_params("user_3".into(), UserCreate::new("Ploy", "ploy@example.com")).unwrap();
        let patch = UserPatch { email: Some("@nowhere".into()), ..Default::default() };
        assert!(user.on_update(patch).is_err());
        assert_eq!(user.email, "ploy@example.com");
    }
}

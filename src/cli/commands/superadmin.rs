use anyhow::{bail, Context};
use serde_json::json;

use crate::access::Role;
use crate::auth::password::{hash_password_async, MIN_PASSWORD_LENGTH};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::models::NewUser;
use crate::database::Database;
use crate::handlers::validate::validate_email_format;
use crate::services::UserService;

#[derive(Debug)]
pub struct SuperadminRequest {
    pub email: String,
    pub name: String,
    pub password: Option<String>,
}

/// Registration only ever creates students, so the first superadmin is
/// bootstrapped here.
pub async fn handle(
    db: &Database,
    config: &AppConfig,
    request: SuperadminRequest,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    validate_email_format(&request.email).map_err(anyhow::Error::msg)?;
    let users = UserService::new(db.clone());

    if let Some(existing) = users.find_by_email(&request.email).await? {
        if existing.role() == Role::Superadmin {
            return output_success(
                output_format,
                &format!("{} is already a superadmin", existing.email),
                Some(json!({ "id": existing.id, "email": existing.email })),
            );
        }
        let promoted = users.update_role(existing.id, Role::Superadmin).await?;
        tracing::info!("Promoted user {} to superadmin", promoted.id);
        return output_success(
            output_format,
            &format!("Promoted {} to superadmin", promoted.email),
            Some(json!({ "id": promoted.id, "email": promoted.email })),
        );
    }

    let Some(password) = request.password else {
        bail!("--password is required when creating a new account");
    };
    if password.len() < MIN_PASSWORD_LENGTH {
        bail!("Password must be at least {} characters", MIN_PASSWORD_LENGTH);
    }

    let password_hash = hash_password_async(password, config.security.bcrypt_cost)
        .await
        .context("failed to hash password")?;

    let created = users
        .create(&NewUser {
            email: request.email,
            password_hash,
            name: request.name,
            role: Role::Superadmin,
            phone: None,
        })
        .await?;

    tracing::info!("Created superadmin {}", created.id);
    output_success(
        output_format,
        &format!("Created superadmin {}", created.email),
        Some(json!({ "id": created.id, "email": created.email })),
    )
}

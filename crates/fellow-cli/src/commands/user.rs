use anyhow::Context;
use fellow_core::entities::UserRecord;
use fellow_core::errors::CoreError;
use fellow_db::error::DatabaseError;
use fellow_db::local::LocalDirectory;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fellow user`.
pub async fn handle(
    action: &UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        UserCommands::Add {
            id,
            username,
            first_name,
            last_name,
            email,
        } => {
            let user = UserRecord {
                id: id.trim().to_string(),
                username: username.trim().to_string(),
                first_name: first_name.clone().unwrap_or_default(),
                last_name: last_name.clone().unwrap_or_default(),
                email: email.clone().unwrap_or_default(),
            };
            let user = ctx
                .directory
                .register(&user)
                .await
                .with_context(|| format!("failed to register user '{id}'"))?;
            output(&user, flags.format)
        }
        UserCommands::Get { id } => {
            let user = fetch_user(&ctx.directory, id).await?;
            output(&user, flags.format)
        }
    }
}

/// Directory lookup where absence is a `NotFound` error.
async fn fetch_user(directory: &LocalDirectory, id: &str) -> Result<UserRecord, DatabaseError> {
    directory
        .get(id)
        .await?
        .ok_or_else(|| CoreError::user_not_found(id).into())
}

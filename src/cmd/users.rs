//! User management — `archivo users`.

use anyhow::{Context, Result, bail};
use dialoguer::{Password, theme::ColorfulTheme};

use archivo::models::UserDraft;
use archivo::resources::UsersManager;
use archivo::router::{AdminSection, Route};
use archivo::ui;
use archivo::views::users_table;

use super::super::UsersCommands;
use super::App;

pub async fn cmd_users(app: &mut App, command: UsersCommands) -> Result<()> {
    app.enter(Route::Admin(Some(AdminSection::Users))).await?;
    let users = UsersManager::new(app.client.clone());

    match command {
        UsersCommands::List => list(&users).await?,
        UsersCommands::Create {
            address,
            name,
            company,
            phone,
            perfil,
            password,
            inactive,
        } => {
            let password = match password {
                Some(p) => p,
                None if app.interactive() => Password::with_theme(&ColorfulTheme::default())
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()?,
                None => bail!("A password is required for new users. Pass --password"),
            };
            let draft = UserDraft {
                email: address,
                nombre_completo: name.unwrap_or_default(),
                compania: company.unwrap_or_default(),
                telefono: phone,
                perfil,
                is_active: !inactive,
                password: Some(password),
            };
            let user = users.create(&draft).await.context("Failed to create user")?;
            ui::success(format!("Created user {} (id {})", user.email, user.id));
        }
        UsersCommands::Edit {
            id,
            new_email,
            name,
            company,
            phone,
            perfil,
            password,
        } => {
            let current = users.get(id).await.context("Failed to load user")?;
            let mut draft = UserDraft::from_user(&current);
            if let Some(email) = new_email {
                draft.email = email;
            }
            if let Some(name) = name {
                draft.nombre_completo = name;
            }
            if let Some(company) = company {
                draft.compania = company;
            }
            if phone.is_some() {
                draft.telefono = phone;
            }
            if perfil.is_some() {
                draft.perfil = perfil;
            }
            draft.password = password;
            let user = users
                .update(id, &draft)
                .await
                .context("Failed to update user")?;
            ui::success(format!("Updated user {}", user.email));
        }
        UsersCommands::Delete { id } => {
            let user = users.get(id).await.context("Failed to load user")?;
            if !app.confirm(&format!("Delete user {}?", user.email)) {
                println!("Cancelled.");
                return Ok(());
            }
            users.delete(&user).await?;
            ui::success(format!("Deleted user {}", user.email));
        }
        UsersCommands::ToggleActive { id } => {
            let user = users.get(id).await.context("Failed to load user")?;
            let updated = users.toggle_active(&user).await?;
            ui::success(format!(
                "{} is now {}",
                updated.email,
                if updated.is_active { "active" } else { "inactive" }
            ));
        }
    }
    Ok(())
}

pub async fn list(users: &UsersManager) -> Result<()> {
    let all = users.list().await.context("Failed to load users")?;
    if all.is_empty() {
        println!("No users found.");
    } else {
        println!("{}", users_table(&all));
        println!();
        println!("{} user(s)", all.len());
    }
    Ok(())
}

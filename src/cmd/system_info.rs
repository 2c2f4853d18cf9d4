//! Release notes — `archivo system-info`.

use anyhow::{Context, Result};
use console::style;

use archivo::models::ReleaseDraft;
use archivo::resources::SystemInfoManager;
use archivo::router::{AdminSection, Route};
use archivo::ui;
use archivo::views::releases_table;

use super::super::SystemInfoCommands;
use super::App;

const NOTES_WIDTH: usize = 72;

pub async fn cmd_system_info(app: &mut App, command: SystemInfoCommands) -> Result<()> {
    app.enter(Route::Admin(Some(AdminSection::SystemInfo))).await?;
    let releases = SystemInfoManager::new(app.client.clone());

    match command {
        SystemInfoCommands::List => list(&releases).await?,
        SystemInfoCommands::Create {
            version,
            date,
            updates,
            current,
        } => {
            let draft = ReleaseDraft {
                version,
                release_date: date,
                updates,
                is_current: current,
            };
            let release = releases
                .create(&draft)
                .await
                .context("Failed to create release")?;
            ui::success(format!("Created release {}", release.version));
        }
        SystemInfoCommands::Edit {
            id,
            version,
            date,
            updates,
            current,
        } => {
            let release = releases.get(id).await.context("Failed to load release")?;
            let mut editor = releases.edit(release);
            {
                let draft = editor.draft_mut();
                if let Some(version) = version {
                    draft.version = version;
                }
                if let Some(date) = date {
                    draft.release_date = date;
                }
                if let Some(updates) = updates {
                    draft.updates = updates;
                }
                if let Some(current) = current {
                    draft.is_current = current;
                }
            }
            if !editor.is_dirty() {
                println!("Nothing to change.");
                return Ok(());
            }
            print_draft(editor.draft());
            if app.confirm("Save changes?") {
                let saved = editor.save(&releases).await.context("Failed to update release")?;
                ui::success(format!("Updated release {}", saved.version));
            } else {
                let original = editor.cancel();
                println!("Discarded changes to {}.", original.version);
            }
        }
        SystemInfoCommands::Delete { id } => {
            let release = releases.get(id).await.context("Failed to load release")?;
            if !app.confirm(&format!("Delete release {}?", release.version)) {
                println!("Cancelled.");
                return Ok(());
            }
            releases.delete(id).await.context("Failed to delete release")?;
            ui::success(format!("Deleted release {}", release.version));
        }
    }
    Ok(())
}

pub async fn list(releases: &SystemInfoManager) -> Result<()> {
    let all = releases.list().await.context("Failed to load system info")?;
    if all.is_empty() {
        println!("No releases recorded.");
        return Ok(());
    }
    println!("{}", releases_table(&all));
    for release in &all {
        println!();
        println!(
            "{} {}",
            style(format!("v{}", release.version)).bold(),
            style(&release.release_date).dim()
        );
        println!("{}", ui::bullet_list(&release.bullets(), NOTES_WIDTH));
    }
    Ok(())
}

fn print_draft(draft: &ReleaseDraft) {
    println!();
    println!("{} {}", style("Version:").bold(), draft.version);
    println!("{} {}", style("Date:").bold(), draft.release_date);
    println!("{} {}", style("Current:").bold(), ui::flag(draft.is_current));
    println!("{}", ui::bullet_list(&archivo::models::release::parse_bullets(&draft.updates), NOTES_WIDTH));
    println!();
}

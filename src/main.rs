use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use archivo::config::{ArchivoConfig, CliOverrides};
use archivo::logging::{LogFormat, init_tracing};
use archivo::models::PermisoField;
use archivo::ui;

mod cmd;

#[derive(Parser)]
#[command(name = "archivo")]
#[command(version, about = "Console client for the Archivo+ asset management API")]
pub struct Cli {
    /// API base URL (overrides ARCHIVO_API_BASE and archivo.toml)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Email used when a command needs to log in
    #[arg(long, global = true)]
    pub email: Option<String>,

    /// Path to archivo.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[arg(long, global = true)]
    pub no_color: bool,

    /// Answer yes to confirmation prompts
    #[arg(long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and check the credentials
    Login,
    /// End the server session
    Logout,
    /// Show who the current session belongs to
    Whoami,
    /// Summary of the signed-in user
    Dashboard,
    /// Request a password reset email
    ForgotPassword {
        #[arg(value_name = "EMAIL")]
        address: String,
    },
    /// Set a new password from a reset link
    ResetPassword {
        /// User id segment of the reset link
        uid: String,
        /// Token segment of the reset link
        #[arg(value_name = "TOKEN")]
        reset_token: String,
        /// Prompted (twice) when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Manage users
    Users {
        #[command(subcommand)]
        command: UsersCommands,
    },
    /// Manage profiles and their capabilities
    Profiles {
        #[command(subcommand)]
        command: ProfilesCommands,
    },
    /// List or manage repositories
    Repos {
        #[command(subcommand)]
        command: ReposCommands,
    },
    /// Per-repository access of users
    Access {
        #[command(subcommand)]
        command: AccessCommands,
    },
    /// Manage content modules
    Modules {
        #[command(subcommand)]
        command: ModulesCommands,
    },
    /// Manage release notes
    SystemInfo {
        #[command(subcommand)]
        command: SystemInfoCommands,
    },
    /// Interactive session
    Shell,
    /// View configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum UsersCommands {
    List,
    Create {
        #[arg(value_name = "EMAIL")]
        address: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Profile id
        #[arg(long)]
        perfil: Option<i64>,
        /// Prompted when omitted
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        inactive: bool,
    },
    Edit {
        id: i64,
        #[arg(long)]
        new_email: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        perfil: Option<i64>,
        /// Leave out to keep the current password
        #[arg(long)]
        password: Option<String>,
    },
    Delete { id: i64 },
    ToggleActive { id: i64 },
}

#[derive(Subcommand, Clone)]
pub enum ProfilesCommands {
    List,
    /// Show a profile with its capability checklist
    Show { id: i64 },
    Create {
        #[arg(long)]
        clave: String,
        #[arg(long)]
        nombre: String,
        #[arg(long)]
        descripcion: Option<String>,
        #[arg(long)]
        color: Option<String>,
        /// Capability key to grant (repeatable)
        #[arg(long)]
        grant: Vec<String>,
    },
    /// Set one capability flag; toggles when no value is given
    Set {
        #[arg(long, conflicts_with = "user", required_unless_present = "user")]
        perfil: Option<i64>,
        /// Edit the profile assigned to this user
        #[arg(long)]
        user: Option<i64>,
        capability: String,
        #[arg(value_parser = cmd::parse_switch)]
        value: Option<bool>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ReposCommands {
    List,
    Create {
        #[arg(long)]
        nombre: String,
        /// Four-letter key, e.g. CANC
        #[arg(long)]
        clave: String,
        /// Module id (repeatable)
        #[arg(long)]
        modulo: Vec<i64>,
        /// Assigned user id (repeatable)
        #[arg(long)]
        user: Vec<i64>,
        #[arg(long)]
        inactive: bool,
    },
    Edit {
        id: i64,
        #[arg(long)]
        nombre: Option<String>,
        #[arg(long)]
        clave: Option<String>,
        #[arg(long)]
        modulo: Vec<i64>,
        #[arg(long)]
        user: Vec<i64>,
    },
    Delete { id: i64 },
    ToggleActive { id: i64 },
}

#[derive(Subcommand, Clone)]
pub enum AccessCommands {
    /// List permission records of a user or of a repository
    List {
        #[arg(long, conflicts_with = "repo", required_unless_present = "repo")]
        user: Option<i64>,
        #[arg(long)]
        repo: Option<i64>,
    },
    /// Grant view access, or revoke it when already granted
    ToggleRepo {
        #[arg(long)]
        user: i64,
        #[arg(long)]
        repo: i64,
    },
    /// Flip one of ver/editar/borrar on a permission record
    Toggle {
        #[arg(long)]
        permission: i64,
        #[arg(long)]
        field: PermisoField,
    },
    /// Add or remove one allowed module
    ToggleModule {
        #[arg(long)]
        permission: i64,
        #[arg(long)]
        module: i64,
    },
}

#[derive(Subcommand, Clone)]
pub enum ModulesCommands {
    List,
    ToggleActive { id: i64 },
}

#[derive(Subcommand, Clone)]
pub enum SystemInfoCommands {
    List,
    Create {
        #[arg(long)]
        version: String,
        /// Release date, e.g. 2025-06-01
        #[arg(long)]
        date: String,
        /// Newline-separated notes
        #[arg(long)]
        updates: String,
        #[arg(long)]
        current: bool,
    },
    Edit {
        id: i64,
        #[arg(long)]
        version: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        updates: Option<String>,
        #[arg(long, value_parser = cmd::parse_switch)]
        current: Option<bool>,
    },
    Delete { id: i64 },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(
        cli.verbose,
        if cli.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        },
    );

    if let Err(e) = run(cli).await {
        ui::error(format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ArchivoConfig::resolve(CliOverrides {
        config_path: cli.config.clone(),
        api_base: cli.api_base.clone(),
        token: cli.token.clone(),
        email: cli.email.clone(),
        no_color: cli.no_color,
    })?;
    if !config.color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    tracing::debug!(api_base = %config.api_base, "configuration resolved");

    if let Commands::Config { command } = &cli.command {
        return cmd::cmd_config(&config, command.clone());
    }

    let mut app = cmd::App::new(config, cli.yes)?;
    match cli.command {
        Commands::Login => cmd::cmd_login(&mut app, cli.email).await?,
        Commands::Logout => cmd::cmd_logout(&mut app).await?,
        Commands::Whoami => cmd::cmd_whoami(&mut app).await?,
        Commands::Dashboard => cmd::cmd_dashboard(&mut app).await?,
        Commands::ForgotPassword { address } => cmd::cmd_forgot_password(&app, &address).await?,
        Commands::ResetPassword {
            uid,
            reset_token,
            password,
        } => cmd::cmd_reset_password(&app, &uid, &reset_token, password).await?,
        Commands::Users { command } => cmd::cmd_users(&mut app, command).await?,
        Commands::Profiles { command } => cmd::cmd_profiles(&mut app, command).await?,
        Commands::Repos { command } => cmd::cmd_repos(&mut app, command).await?,
        Commands::Access { command } => cmd::cmd_access(&mut app, command).await?,
        Commands::Modules { command } => cmd::cmd_modules(&mut app, command).await?,
        Commands::SystemInfo { command } => cmd::cmd_system_info(&mut app, command).await?,
        Commands::Shell => cmd::cmd_shell(&mut app).await?,
        Commands::Config { .. } => {}
    }

    Ok(())
}

//! Command-line definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "appu", version, about = "Order Appu developer panel")]
pub struct Cli {
    /// Panel backend base URL
    #[arg(long, global = true, env = "APPU_API_URL")]
    pub api_url: Option<String>,

    /// Directory holding the session file
    #[arg(long, global = true, env = "APPU_SESSION_DIR")]
    pub session_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "APPU_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long, short, env = "APPU_USERNAME")]
        username: Option<String>,
        /// Read from stdin when omitted
        #[arg(long, env = "APPU_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and wipe the stored session
    Logout,

    /// Show the signed-in developer
    Whoami,

    /// Client records
    #[command(subcommand)]
    Clients(ClientsCommand),

    /// Database management
    #[command(subcommand)]
    Db(DbCommand),

    /// Per-client app update settings
    #[command(subcommand)]
    AppUpdate(AppUpdateCommand),

    /// Rotate the password; signs out on success
    ChangePassword {
        #[arg(long, hide_env_values = true, env = "APPU_CURRENT_PASSWORD")]
        current: Option<String>,
        #[arg(long = "new", hide_env_values = true, env = "APPU_NEW_PASSWORD")]
        new_password: Option<String>,
        #[arg(long, hide_env_values = true, env = "APPU_CONFIRM_PASSWORD")]
        confirm: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClientsCommand {
    /// List all clients
    List,

    /// Show one client
    Show { client_id: String },

    /// Create a client
    Add(RecordArgs),

    /// Edit a client
    Edit {
        client_id: String,
        #[command(flatten)]
        record: RecordArgs,
    },

    /// Replace a client's image
    Image {
        client_id: String,
        #[arg(long)]
        file: PathBuf,
    },

    /// Save a client's image to disk
    DownloadImage {
        client_id: String,
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Field assignment, e.g. `--set client_name=Acme` (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub fields: Vec<String>,

    /// Image file to attach
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum DbCommand {
    /// Client data overview
    Overview,
}

#[derive(Subcommand, Debug)]
pub enum AppUpdateCommand {
    /// Show a client's setting
    Get { client_id: String },

    /// Change a client's setting
    Set {
        client_id: String,
        /// Yes or No
        #[arg(long)]
        value: String,
        /// Download link, required with Yes
        #[arg(long, default_value = "")]
        link: String,
    },
}

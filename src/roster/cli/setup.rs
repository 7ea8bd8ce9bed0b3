use clap::{Parser, Subcommand};
use roster::model::Scope;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "roster", bin_name = "roster", version = get_version())]
#[command(about = "Browse and administer platform user accounts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Server to talk to (overrides the base-url config key)
    #[arg(long, global = true, value_name = "URL", help_heading = "Options")]
    pub base_url: Option<String>,

    /// Scope the list to one agency (overrides the agency-id config key)
    #[arg(long, global = true, value_name = "ID", help_heading = "Options")]
    pub agency: Option<String>,

    /// Rows per page (overrides the page-size config key)
    #[arg(long, global = true, value_name = "N", help_heading = "Options")]
    pub limit: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List one page of users
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only users whose name or username matches
        #[arg(short, long)]
        filter: Option<String>,

        /// Page to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Page through users interactively
    #[command(alias = "b", display_order = 2)]
    Browse {
        /// Initial filter
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Enable a user account
    #[command(display_order = 10)]
    Enable {
        /// User id
        id: i64,
    },

    /// Disable a user account
    #[command(display_order = 11)]
    Disable {
        /// User id
        id: i64,
    },

    /// Assign or remove an administrator role
    #[command(display_order = 12)]
    Admin {
        /// User id
        id: i64,

        /// Remove the role instead of assigning it
        #[arg(long)]
        remove: bool,

        /// Which administrator role (sitewide, agencies, community).
        /// Defaults to agencies when an agency is configured, else sitewide
        #[arg(long)]
        scope: Option<Scope>,

        /// Name shown in the confirmation prompt
        #[arg(long)]
        name: Option<String>,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Send a password reset email
    #[command(name = "reset-password", display_order = 13)]
    ResetPassword {
        /// Account email (username)
        email: String,

        /// Name shown in the confirmation prompt
        #[arg(long)]
        name: Option<String>,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Get or set configuration
    #[command(display_order = 20)]
    Config {
        /// Configuration key (base-url, page-size, agency-id, current-user)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,

        /// Clear the key instead of setting it
        #[arg(long, conflicts_with = "value")]
        unset: bool,
    },
}

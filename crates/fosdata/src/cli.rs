//! Clap derive structures for the `fosdata` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fosdata -- read FortiOS configuration objects as typed attributes
#[derive(Debug, Parser)]
#[command(
    name = "fosdata",
    version,
    about = "Read FortiOS configuration objects as typed attributes",
    long_about = "Reads configuration objects from a FortiOS appliance over its REST API,\n\
        flattens them through a declared field schema, and prints the\n\
        resulting attributes.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Appliance profile to use
    #[arg(long, short = 'p', env = "FOSDATA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Appliance host or URL (overrides profile)
    #[arg(long, short = 'H', env = "FOSDATA_HOST", global = true)]
    pub host: Option<String>,

    /// VDOM to read from (overrides profile)
    #[arg(long, env = "FOSDATA_VDOM", global = true)]
    pub vdom: Option<String>,

    /// REST API token
    #[arg(long, env = "FOSDATA_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FOSDATA_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "FOSDATA_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "FOSDATA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Retries after transient transport failures (overrides profile)
    #[arg(long, global = true)]
    pub retries: Option<u32>,
}

// ── Output Format ────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read one configuration object
    #[command(alias = "get")]
    Read(ReadArgs),

    /// List the object kinds that can be read
    #[command(alias = "ls")]
    Kinds,

    /// Show the declared field schema of an object kind
    Schema(SchemaArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  READ / SCHEMA
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Object kind (e.g. RouterStatic, fortios_router_static, router/static)
    pub kind: String,

    /// Lookup key; omit for singleton kinds such as RouterBfd
    pub key: Option<String>,
}

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Object kind
    pub kind: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display the resolved active profile
    Show,

    /// Set a field on the active profile
    Set {
        /// Profile field (host, vdom, token, token_env, ca_cert, insecure, timeout, retries)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store an API token in the system keyring
    SetToken {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

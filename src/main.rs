use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use towerctl::awx::{http::format_api_error, AwxClient};
use towerctl::config::{Config, Overrides};
use towerctl::credential::{all_kinds, Credential, CredentialResource};
use towerctl::resource::{
    get_credential_type_id, Attr, CallInfo, Callee, Outcome, Source, Transport,
    CREDENTIAL_TYPES_ENDPOINT,
};
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Manage AWX / Ansible Tower credentials
#[derive(Parser, Debug)]
#[command(name = "towerctl", version = towerctl::VERSION, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// API host (overrides TOWER_HOST and the config file)
    #[arg(long, global = true)]
    host: Option<String>,

    #[arg(long, global = true)]
    username: Option<String>,

    #[arg(long, global = true)]
    password: Option<String>,

    /// OAuth2 token, instead of username/password
    #[arg(long, global = true)]
    token: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    insecure: bool,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the supported credential kinds and their inputs
    Kinds,
    /// Create a credential
    Create {
        kind: String,
        #[command(flatten)]
        fields: CredentialArgs,
    },
    /// Show a credential
    Read {
        kind: String,
        id: i64,
        /// Read as a lookup: secret inputs are reported as null
        #[arg(long)]
        data_source: bool,
    },
    /// Change a credential; secret inputs not given keep their stored value
    Update {
        kind: String,
        id: i64,
        #[command(flatten)]
        fields: CredentialArgs,
    },
    /// Delete a credential
    Delete { kind: String, id: i64 },
    /// Look up a credential type id by name
    TypeId { name: String },
    /// Save host, username and TLS settings to the config file
    Configure {
        #[arg(long)]
        verify_ssl: Option<bool>,
    },
}

#[derive(clap::Args, Debug)]
struct CredentialArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// Owning organization id; without it the credential belongs to you
    #[arg(long)]
    organization: Option<i64>,

    /// Input value, e.g. --input username=alice (repeatable)
    #[arg(long = "input", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    inputs: Vec<(String, String)>,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{}`", s))?;
    Ok((key.trim().to_string(), value.to_string()))
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("towerctl {} started with log level: {:?}", towerctl::VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("towerctl").join("towerctl.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".towerctl").join("towerctl.log");
    }
    PathBuf::from("towerctl.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let overrides = Overrides {
        hostname: args.host.clone(),
        username: args.username.clone(),
        password: args.password.clone(),
        token: args.token.clone(),
        verify_ssl: args.insecure.then_some(false),
    };

    match args.command {
        Command::Kinds => {
            print_kinds();
            Ok(())
        }
        Command::Configure { verify_ssl } => {
            let mut config = Config::load();
            if let Some(host) = overrides.hostname {
                config.hostname = Some(host);
            }
            if let Some(username) = overrides.username {
                config.username = Some(username);
            }
            if let Some(verify) = verify_ssl.or(overrides.verify_ssl) {
                config.verify_ssl = Some(verify);
            }
            let path = config.save()?;
            println!("Saved configuration to {}", path.display());
            Ok(())
        }
        Command::Create { kind, fields } => {
            let client = connect(&overrides)?;
            let resource = lookup(&kind)?;

            let mut credential = resource.new_credential();
            if fields.name.is_none() {
                bail!("--name is required to create a credential");
            }
            apply_fields(&mut credential, &fields)?;

            check(resource.create(Some(&client as &dyn Transport), &mut credential).await)?;
            print_state(&credential)
        }
        Command::Read {
            kind,
            id,
            data_source,
        } => {
            let client = connect(&overrides)?;
            let resource = lookup(&kind)?;
            let source = if data_source {
                Source::DataSource
            } else {
                Source::Resource
            };

            let mut credential = Credential::with_id(resource.kind(), id);
            check(
                resource
                    .read(Some(&client as &dyn Transport), source, id, &mut credential)
                    .await,
            )?;
            print_state(&credential)
        }
        Command::Update { kind, id, fields } => {
            let client = connect(&overrides)?;
            let resource = lookup(&kind)?;
            let transport: &dyn Transport = &client;

            let mut credential = Credential::with_id(resource.kind(), id);
            check(
                resource
                    .read(Some(transport), Source::Resource, id, &mut credential)
                    .await,
            )?;
            apply_fields(&mut credential, &fields)?;

            check(resource.update(Some(transport), &mut credential).await)?;
            print_state(&credential)
        }
        Command::Delete { kind, id } => {
            let client = connect(&overrides)?;
            let resource = lookup(&kind)?;

            let credential = Credential::with_id(resource.kind(), id);
            check(resource.delete(Some(&client as &dyn Transport), &credential).await)?;
            println!("Deleted {} credential {}", resource.kind().name, id);
            Ok(())
        }
        Command::TypeId { name } => {
            let client = connect(&overrides)?;
            let rci = CallInfo::new("Credential Type", CREDENTIAL_TYPES_ENDPOINT, "credential_type")
                .with(Source::DataSource, Callee::Read);

            let id = check(get_credential_type_id(Some(&client as &dyn Transport), &rci, &name).await)?;
            println!("{}", id);
            Ok(())
        }
    }
}

fn connect(overrides: &Overrides) -> Result<AwxClient> {
    let connection = Config::load().resolve(overrides)?;
    AwxClient::new(&connection.hostname, connection.auth, connection.verify_ssl)
        .context("Failed to create HTTP client")
}

fn lookup(kind: &str) -> Result<CredentialResource> {
    CredentialResource::from_type_name(kind)
        .with_context(|| format!("unknown credential kind `{}` (see `towerctl kinds`)", kind))
}

fn apply_fields(credential: &mut Credential, fields: &CredentialArgs) -> Result<()> {
    if let Some(name) = &fields.name {
        credential.name = Attr::from(name.as_str());
    }
    if let Some(description) = &fields.description {
        credential.description = Attr::from(description.as_str());
    }
    if let Some(organization) = fields.organization {
        credential.organization = Attr::Value(organization);
    }
    for (key, value) in &fields.inputs {
        credential
            .set_input_str(key, value)
            .with_context(|| format!("invalid --input {}", key))?;
    }
    Ok(())
}

/// Print diagnostics and turn the outcome into a CLI result
fn check<T>(outcome: Outcome<T>) -> Result<T> {
    let (diagnostics, result) = outcome.into_parts();
    if !diagnostics.is_empty() {
        eprintln!("{}", diagnostics);
    }

    let value = result.map_err(|e| anyhow!(format_api_error(&e)))?;
    if diagnostics.has_error() {
        bail!("completed with {} error(s)", diagnostics.errors().count());
    }
    Ok(value)
}

fn print_state(credential: &Credential) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&credential.to_state_json())?);
    Ok(())
}

fn print_kinds() {
    for kind in all_kinds() {
        println!(
            "{:<6} {} (credential type {})",
            kind.type_name, kind.name, kind.credential_type_id
        );
        for input in &kind.inputs {
            let mut flags = Vec::new();
            if input.required {
                flags.push("required");
            }
            if input.secret {
                flags.push("secret");
            }
            println!(
                "         {:<20} {:<24} {:?}{}",
                input.id,
                input.label,
                input.input_type,
                if flags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", flags.join(", "))
                }
            );
        }
    }
}

use clap::{Arg, ArgAction, Command, ValueHint};
use std::path::PathBuf;

/// CLI arguments for noteapp-server
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub allow_signup: Option<bool>,
    pub seed_demo_users: Option<bool>,
    pub jwt_secret: Option<String>,
    pub jwt_expiration_hours: Option<u64>,
    pub config_file: Option<PathBuf>,
    pub max_request_size: Option<usize>,
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse() -> Self {
        let matches = Self::command().get_matches();

        if matches.get_flag("help_env") {
            Self::print_env_help();
            std::process::exit(0);
        }

        Self::from_matches(&matches)
    }

    fn command() -> Command {
        Command::new("noteapp-server")
            .version(noteapp::VERSION)
            .author("NoteApp Contributors")
            .about("HTTP API server for the NoteApp note-sharing network")
            .long_about(
                r#"NoteApp Server exposes posts, comments, profiles and friend lists over a
JSON REST API with JWT authentication. Data is kept in SurrealDB, either
in memory or embedded on disk.

The server can be configured through command line arguments or environment
variables. Command line arguments take precedence over environment variables.

Examples:
  noteapp-server --port 8080
  noteapp-server --config noteapp.toml --allow-signup=false
  noteapp-server --seed-demo-users --log-level debug"#,
            )
            .arg(
                Arg::new("port")
                    .short('p')
                    .long("port")
                    .value_name("PORT")
                    .help("Port to listen on")
                    .long_help(
                        "Port number for the HTTP server to listen on.
Environment variable: NOTEAPP_PORT",
                    )
                    .value_hint(ValueHint::Other)
                    .value_parser(clap::value_parser!(u16)),
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .long_help(
                        "Path to a TOML, YAML or JSON file with the NoteApp library
configuration (storage, logging, friends, posts, users). NOTEAPP_* variables
are merged on top of it.
Environment variable: NOTEAPP_CONFIG_FILE",
                    )
                    .value_hint(ValueHint::FilePath)
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("allow_signup")
                    .long("allow-signup")
                    .value_name("BOOL")
                    .help("Allow user registration")
                    .long_help(
                        "Allow new users to register accounts via the signup API.
Environment variable: NOTEAPP_ALLOW_SIGNUP",
                    )
                    .value_parser(clap::value_parser!(bool)),
            )
            .arg(
                Arg::new("seed_demo_users")
                    .long("seed-demo-users")
                    .help("Create the user1 and user2 demo accounts")
                    .long_help(
                        "Create the demo accounts user1 and user2 (password
Password123!) on startup if they do not exist yet.
Environment variable: NOTEAPP_SEED_DEMO_USERS",
                    )
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("jwt_secret")
                    .long("jwt-secret")
                    .value_name("SECRET")
                    .help("JWT signing secret")
                    .long_help(
                        "Secret key used for signing JWT tokens. Should be a
long, random string. If not provided, one will be generated automatically
and tokens will not survive a restart.
Environment variable: NOTEAPP_JWT_SECRET",
                    )
                    .value_hint(ValueHint::Other),
            )
            .arg(
                Arg::new("jwt_expiration")
                    .long("jwt-expiration")
                    .value_name("HOURS")
                    .help("JWT token expiration time in hours")
                    .long_help(
                        "How long JWT tokens remain valid before expiring.
Default is 24 hours.
Environment variable: NOTEAPP_JWT_EXPIRATION_HOURS",
                    )
                    .value_parser(clap::value_parser!(u64)),
            )
            .arg(
                Arg::new("max_request_size")
                    .long("max-request-size")
                    .value_name("BYTES")
                    .help("Maximum request body size in bytes")
                    .long_help(
                        "Maximum size allowed for HTTP request bodies, including
image uploads. Larger requests will be rejected.
Environment variable: NOTEAPP_MAX_REQUEST_SIZE",
                    )
                    .value_parser(clap::value_parser!(usize)),
            )
            .arg(
                Arg::new("log_level")
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Logging level")
                    .long_help(
                        "Set the logging level. Valid values: error, warn, info, debug, trace
Environment variable: RUST_LOG",
                    )
                    .value_parser(["error", "warn", "info", "debug", "trace"]),
            )
            .arg(
                Arg::new("help_env")
                    .long("help-env")
                    .help("Show all environment variables")
                    .action(ArgAction::SetTrue),
            )
    }

    fn from_matches(matches: &clap::ArgMatches) -> Self {
        Self {
            port: matches.get_one::<u16>("port").copied(),
            allow_signup: matches.get_one::<bool>("allow_signup").copied(),
            seed_demo_users: matches.get_flag("seed_demo_users").then_some(true),
            jwt_secret: matches.get_one::<String>("jwt_secret").cloned(),
            jwt_expiration_hours: matches.get_one::<u64>("jwt_expiration").copied(),
            config_file: matches.get_one::<PathBuf>("config").cloned(),
            max_request_size: matches.get_one::<usize>("max_request_size").copied(),
            log_level: matches.get_one::<String>("log_level").cloned(),
        }
    }

    /// Print comprehensive environment variable help
    fn print_env_help() {
        println!("NoteApp Server Environment Variables");
        println!("====================================");
        println!();
        println!("Server Configuration:");
        println!("  NOTEAPP_PORT                  - Server port (default: 3000)");
        println!("  NOTEAPP_MAX_REQUEST_SIZE      - Max request body size in bytes (default: 8MB)");
        println!("  NOTEAPP_CONFIG_FILE           - Path to the library config file");
        println!();
        println!("Authentication:");
        println!("  NOTEAPP_JWT_SECRET            - JWT signing secret (auto-generated if not set)");
        println!("  NOTEAPP_JWT_EXPIRATION_HOURS  - JWT expiration in hours (default: 24)");
        println!("  NOTEAPP_ALLOW_SIGNUP          - Allow user registration (default: true)");
        println!("  NOTEAPP_SEED_DEMO_USERS       - Create user1/user2 on startup (default: false)");
        println!("  NOTEAPP_PASSWORD_COST         - bcrypt cost (default: 12)");
        println!();
        println!("Library (nested keys use a double underscore):");
        println!("  NOTEAPP_STORAGE__DATA_DIR                  - Data directory");
        println!("  NOTEAPP_STORAGE__SURREALDB__ENGINE         - Memory | RocksDB");
        println!("  NOTEAPP_STORAGE__SURREALDB__CONNECTION     - Path or URL for the engine");
        println!("  NOTEAPP_FRIENDS__EXCLUDE_SELF_FROM_SEARCH  - Hide the caller in search (default: true)");
        println!("  NOTEAPP_POSTS__MAX_IMAGE_BYTES             - Image size limit (default: 5MB)");
        println!("  NOTEAPP_USERS__DELETE_POLICY               - restrict | cascade (default: restrict)");
        println!();
        println!("Logging:");
        println!(
            "  RUST_LOG                      - Logging level (error, warn, info, debug, trace)"
        );
        println!();
        println!("Note: Command line arguments take precedence over environment variables.");
        println!("Use --help for CLI argument documentation.");
    }
}

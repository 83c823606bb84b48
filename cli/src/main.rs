use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use blogboard::auth::{self, LoginFlow};
use blogboard::config::{ApiConfig, DEFAULT_BASE_URL};
use blogboard::error::ApiError;
use blogboard::net::api::BlogApi;
use blogboard::net::types::{Post, PostDraft};
use blogboard::policy;
use blogboard::session::SessionStore;
use blogboard::storage::FileStorage;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("cannot determine a session file path; pass --session-file or set BLOG_SESSION_FILE")]
    NoSessionPath,
    #[error("output encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "blogboard", about = "Blog API client")]
struct Cli {
    #[arg(long, env = "BLOG_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Where the logged-in session is persisted between invocations.
    #[arg(long, env = "BLOG_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and persist the session.
    Login { username: String, password: String },
    /// Drop the persisted session.
    Logout,
    /// Show the logged-in username, if any.
    Whoami,
    Blog(BlogCommand),
}

#[derive(Args, Debug)]
struct BlogCommand {
    #[command(subcommand)]
    command: BlogSubcommand,
}

#[derive(Subcommand, Debug)]
enum BlogSubcommand {
    /// List all posts; owned posts are marked with `*`.
    List,
    Read {
        id: i64,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    Delete {
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        match &error {
            CliError::Api(api) => {
                tracing::debug!(detail = %api, code = api.code(), "command failed");
                eprintln!("{}", api.user_message());
            }
            other => eprintln!("{other}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ApiConfig::new(&cli.base_url);
    let path = session_file_path(cli.session_file)?;
    let mut store = SessionStore::new(Box::new(FileStorage::open(path)));

    match cli.command {
        Command::Login { username, password } => {
            let mut flow = LoginFlow::new(&config)?;
            flow.login(&mut store, &username, &password).await?;
            println!("logged in as {username}");
            Ok(())
        }
        Command::Logout => {
            auth::logout(&mut store);
            println!("logged out");
            Ok(())
        }
        Command::Whoami => {
            match store.current_username() {
                Some(username) => println!("{username}"),
                None => println!("not logged in"),
            }
            Ok(())
        }
        Command::Blog(blog) => run_blog(&config, &store, blog.command).await,
    }
}

async fn run_blog(
    config: &ApiConfig,
    store: &SessionStore,
    command: BlogSubcommand,
) -> Result<(), CliError> {
    let api = BlogApi::new(config)?;
    match command {
        BlogSubcommand::List => {
            for post in api.list().await? {
                print_summary(store, &post);
            }
            Ok(())
        }
        BlogSubcommand::Read { id } => {
            let post = api.get(id).await?;
            print_json(&post)
        }
        BlogSubcommand::Create { title, content } => {
            let post = api.create(store, &PostDraft::new(title, content)).await?;
            print_json(&post)
        }
        BlogSubcommand::Update { id, title, content } => {
            let post = api.update(store, id, &PostDraft::new(title, content)).await?;
            print_json(&post)
        }
        BlogSubcommand::Delete { id } => {
            api.delete(store, id).await?;
            println!("deleted {id}");
            Ok(())
        }
    }
}

fn print_summary(store: &SessionStore, post: &Post) {
    let marker = if policy::can_edit(store, post) { "*" } else { " " };
    println!("{marker} [{}] {} by {} ({})", post.id, post.title, post.created_by, post.date);
}

fn print_json(post: &Post) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(post)?);
    Ok(())
}

fn session_file_path(flag: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = flag {
        return Ok(path);
    }
    dirs::config_dir()
        .map(|dir| dir.join("blogboard").join("session.json"))
        .ok_or(CliError::NoSessionPath)
}

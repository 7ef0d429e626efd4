use clap::{Parser, Subcommand};
use ghclip::clipboard::SystemClipboard;
use ghclip::commands::{run_in_session, Command, ShowOptions};
use ghclip::config::Config;
use ghclip::errors::GhClipError;
use ghclip::github::{GitHubClient, DEFAULT_API_BASE};
use ghclip::logger::initialize_logger;
use ghclip::render::RenderRequest;
use ghclip::session::{default_session_path, Session};
use ghclip::update::default_source_dir;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// GitHub user whose repositories are browsed
    #[arg(short = 'u', long, env = "GHCLIP_USER", global = true)]
    user: Option<String>,
    /// Token sent as a bearer credential; requests are unauthenticated without it
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,
    #[arg(long, env = "GHCLIP_API_BASE", default_value = DEFAULT_API_BASE, global = true)]
    api_base: String,
    /// Session file holding selections and view toggles
    #[arg(long, env = "GHCLIP_SESSION", global = true)]
    session: Option<PathBuf>,
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: SubCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum SubCommands {
    /// List the user's repositories
    Repos,
    /// List one directory of a repository
    Ls(LsArgs),
    /// List every file path in a repository
    Tree(TreeArgs),
    /// Toggle files and folders, then show the current selection
    Select(SelectArgs),
    /// Print the selected file paths
    Paths(PathsArgs),
    /// Fetch the selected files and print them as one document
    Show(ShowArgs),
    /// Print the intro prompt
    Intro(IntroArgs),
    /// Pull the latest source of this tool
    Update(UpdateArgs),
    /// Forget all selections and toggles
    Reset,
}

#[derive(Parser, Debug, Clone)]
struct LsArgs {
    repo: String,
    #[arg(default_value = "")]
    path: String,
}

#[derive(Parser, Debug, Clone)]
struct TreeArgs {
    repo: String,
    #[arg(short = 'c', long)]
    copy: bool,
}

#[derive(Parser, Debug, Clone)]
struct SelectArgs {
    repo: String,
    #[arg(long, conflicts_with = "hide_folders")]
    show_folders: bool,
    #[arg(long)]
    hide_folders: bool,
    #[arg(short = 'e', long = "expand")]
    expand: Vec<String>,
    #[arg(long = "collapse")]
    collapse: Vec<String>,
    #[arg(short = 'a', long = "check")]
    check: Vec<String>,
    #[arg(short = 'r', long = "uncheck")]
    uncheck: Vec<String>,
    #[arg(long)]
    clear: bool,
}

#[derive(Parser, Debug, Clone)]
struct PathsArgs {
    repo: String,
    #[arg(short = 'c', long)]
    copy: bool,
}

#[derive(Parser, Debug, Clone)]
struct ShowArgs {
    repo: String,
    #[arg(short = 'c', long)]
    copy: bool,
    #[arg(short = 's', long, help = "Print per-file token counts")]
    stats: bool,
    #[arg(short = 'M', long, default_value = "gpt-4o")]
    model: String,
    #[arg(long, help = "Flip whether select also prints the contents")]
    toggle: bool,
}

#[derive(Parser, Debug, Clone)]
struct IntroArgs {
    #[arg(short = 'c', long)]
    copy: bool,
    #[arg(long, help = "Flip whether select also prints the intro")]
    toggle: bool,
}

#[derive(Parser, Debug, Clone)]
struct UpdateArgs {
    #[arg(long)]
    source_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli_args = CliArgs::parse();
    initialize_logger(cli_args.verbose);

    if let Err(e) = run(cli_args).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli_args: CliArgs) -> Result<(), GhClipError> {
    let config = Config {
        user: cli_args.user,
        token: cli_args.token,
        api_base: cli_args.api_base,
        session_path: cli_args.session.unwrap_or_else(default_session_path),
    };

    let command = match cli_args.cmd {
        SubCommands::Repos => Command::Repos,
        SubCommands::Ls(args) => Command::Ls {
            repo: args.repo,
            path: args.path,
        },
        SubCommands::Tree(args) => Command::Tree {
            repo: args.repo,
            copy: args.copy,
        },
        SubCommands::Select(args) => Command::Select {
            repo: args.repo,
            request: RenderRequest {
                show_folders: match (args.show_folders, args.hide_folders) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
                expand: args.expand,
                collapse: args.collapse,
                check: args.check,
                uncheck: args.uncheck,
                clear: args.clear,
            },
        },
        SubCommands::Paths(args) => Command::Paths {
            repo: args.repo,
            copy: args.copy,
        },
        SubCommands::Show(args) => Command::Show {
            repo: args.repo,
            options: ShowOptions {
                copy: args.copy,
                stats: args.stats,
                model: args.model,
                toggle: args.toggle,
            },
        },
        SubCommands::Intro(args) => Command::Intro {
            copy: args.copy,
            toggle: args.toggle,
        },
        SubCommands::Update(args) => Command::Update {
            source_dir: args.source_dir.unwrap_or_else(default_source_dir),
        },
        SubCommands::Reset => return Session::reset(&config.session_path).await,
    };

    let client = GitHubClient::new(&config.api_base, config.token.clone())?;
    run_in_session(
        &config,
        &client,
        &SystemClipboard,
        command,
        std::io::stdout().lock(),
    )
    .await
}

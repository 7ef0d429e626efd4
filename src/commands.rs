use crate::aggregate::{aggregate, AggregateDocument};
use crate::clipboard::{copy_block, ClipboardCopier};
use crate::config::Config;
use crate::errors::GhClipError;
use crate::github::{RemoteSource, RepoRef};
use crate::intro::INTRO_TEXT;
use crate::render::{render_pass, RenderRequest, RepoView, VisibleFile};
use crate::reporting::{count_tokens, write_stats};
use crate::session::Session;
use crate::tree::list_all_files;
use crate::update::pull_latest;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct ShowOptions {
    pub copy: bool,
    pub stats: bool,
    pub model: String,
    pub toggle: bool,
}

/// A user action against one session.
#[derive(Debug, Clone)]
pub enum Command {
    Repos,
    Ls { repo: String, path: String },
    Tree { repo: String, copy: bool },
    Select { repo: String, request: RenderRequest },
    Paths { repo: String, copy: bool },
    Show { repo: String, options: ShowOptions },
    Intro { copy: bool, toggle: bool },
    Update { source_dir: PathBuf },
}

/// Loads the session, runs `command` and saves the session back. The save
/// happens even when the command fails, so toggles flipped before the failure
/// are kept.
pub async fn run_in_session<W: Write>(
    config: &Config,
    source: &dyn RemoteSource,
    clipboard: &dyn ClipboardCopier,
    command: Command,
    out: W,
) -> Result<(), GhClipError> {
    let mut session = Session::load(&config.session_path).await?;
    let outcome = Runner {
        config,
        source,
        clipboard,
        session: &mut session,
        out,
    }
    .execute(command)
    .await;

    let saved = session.save(&config.session_path).await;
    if let (Err(_), Err(e)) = (&outcome, &saved) {
        error!("Failed to save session: {}", e);
    }
    outcome?;
    saved
}

/// Executes one command against a session, writing user-facing output to
/// `out`. Remote failures are logged and degrade to empty output.
pub struct Runner<'a, W: Write> {
    pub config: &'a Config,
    pub source: &'a dyn RemoteSource,
    pub clipboard: &'a dyn ClipboardCopier,
    pub session: &'a mut Session,
    pub out: W,
}

impl<'a, W: Write> Runner<'a, W> {
    pub async fn execute(&mut self, command: Command) -> Result<(), GhClipError> {
        match command {
            Command::Repos => self.repos(None).await,
            Command::Ls { repo, path } => self.ls(&repo, &path).await,
            Command::Tree { repo, copy } => self.tree(&repo, copy).await,
            Command::Select { repo, request } => self.select(&repo, &request).await,
            Command::Paths { repo, copy } => self.paths(&repo, copy).await,
            Command::Show { repo, options } => self.show(&repo, &options).await,
            Command::Intro { copy, toggle } => self.intro(copy, toggle).await,
            Command::Update { source_dir } => self.update(&source_dir).await,
        }
    }

    pub async fn repos(&mut self, user: Option<&str>) -> Result<(), GhClipError> {
        let user = match user {
            Some(user) => user,
            None => self.config.require_user()?,
        };
        match self.source.list_repos(user).await {
            Ok(repos) if repos.is_empty() => warn!("No repositories found for {}", user),
            Ok(repos) => {
                for repo in repos {
                    writeln!(self.out, "{}", repo.name)?;
                }
            }
            Err(e) => error!("Failed to fetch repositories: {}", e),
        }
        Ok(())
    }

    pub async fn ls(&mut self, repo: &str, path: &str) -> Result<(), GhClipError> {
        let repo = self.config.repo_ref(repo)?;
        match self.source.list_directory(&repo.owner, &repo.repo, path).await {
            Ok(nodes) => {
                for node in nodes {
                    let marker = if node.is_directory() { "/" } else { "" };
                    writeln!(self.out, "{}{}", node.path, marker)?;
                }
            }
            Err(e) => error!("Failed to fetch repository contents: {}", e),
        }
        Ok(())
    }

    pub async fn tree(&mut self, repo: &str, copy: bool) -> Result<(), GhClipError> {
        let repo = self.config.repo_ref(repo)?;
        info!("Fetching every file in {}, this may take a while", repo.key());
        let files = list_all_files(self.source, &repo.owner, &repo.repo, "").await;
        if files.is_empty() {
            warn!("No files found in the repository");
            return Ok(());
        }
        let listing = files.join("\n");
        writeln!(self.out, "{}", listing)?;
        if copy {
            copy_block(self.clipboard, &listing, "File paths").await?;
        }
        Ok(())
    }

    pub async fn select(&mut self, repo: &str, request: &RenderRequest) -> Result<(), GhClipError> {
        let repo = self.config.repo_ref(repo)?;
        if self.session.show_intro {
            writeln!(self.out, "{}", INTRO_TEXT)?;
        }

        let view = render_pass(self.source, &repo, self.session, request).await;
        if let Some(e) = &view.fetch_error {
            error!("Failed to fetch repository contents: {}", e);
            return Ok(());
        }
        self.write_view(&view)?;

        if self.session.show_content {
            let document = self.aggregate_view(&repo, &view).await;
            if document.is_empty() {
                warn!("Select one or more files first");
            } else {
                write!(self.out, "{}", document)?;
            }
        }
        Ok(())
    }

    pub async fn paths(&mut self, repo: &str, copy: bool) -> Result<(), GhClipError> {
        let repo = self.config.repo_ref(repo)?;
        let paths: Vec<&str> = self
            .session
            .selection(&repo.key())
            .map(|s| s.iter().collect())
            .unwrap_or_default();
        if paths.is_empty() {
            info!("No files selected");
            return Ok(());
        }
        let listing = paths.join("\n");
        writeln!(self.out, "{}", listing)?;
        if copy {
            copy_block(self.clipboard, &listing, "Selected paths").await?;
        }
        Ok(())
    }

    pub async fn show(&mut self, repo: &str, options: &ShowOptions) -> Result<(), GhClipError> {
        let repo = self.config.repo_ref(repo)?;
        if options.toggle {
            self.session.show_content = !self.session.show_content;
            if !self.session.show_content {
                info!("Content panel hidden");
                return Ok(());
            }
        }

        let has_selection = self
            .session
            .selection(&repo.key())
            .is_some_and(|s| !s.is_empty());
        if !has_selection {
            warn!("Select one or more files first");
            return Ok(());
        }

        let view = match self.source.list_directory(&repo.owner, &repo.repo, "").await {
            Ok(root_nodes) => RepoView {
                root_nodes,
                ..RepoView::default()
            },
            Err(e) => {
                error!("Failed to fetch repository contents: {}", e);
                return Ok(());
            }
        };
        let document = self.aggregate_view(&repo, &view).await;
        if document.is_empty() {
            warn!("None of the selected files could be found");
            return Ok(());
        }

        write!(self.out, "{}", document)?;
        if options.stats {
            let counts = count_tokens(&document, &options.model)?;
            write_stats(&mut self.out, &counts)?;
        }
        if options.copy {
            copy_block(self.clipboard, &document.render(), "Selected contents").await?;
        }
        Ok(())
    }

    pub async fn intro(&mut self, copy: bool, toggle: bool) -> Result<(), GhClipError> {
        if toggle {
            self.session.show_intro = !self.session.show_intro;
            info!(
                "Intro {} on select",
                if self.session.show_intro { "shown" } else { "hidden" }
            );
        }
        writeln!(self.out, "{}", INTRO_TEXT)?;
        if copy {
            copy_block(self.clipboard, INTRO_TEXT, "Intro text").await?;
        }
        Ok(())
    }

    pub async fn update(&mut self, source_dir: &Path) -> Result<(), GhClipError> {
        match pull_latest(source_dir).await {
            Ok(summary) => {
                writeln!(self.out, "{}", summary)?;
                writeln!(self.out, "Rebuild ghclip to run the updated code.")?;
            }
            Err(e) => error!("{}", e),
        }
        Ok(())
    }

    async fn aggregate_view(&self, repo: &RepoRef, view: &RepoView) -> AggregateDocument {
        let Some(selection) = self.session.selection(&repo.key()) else {
            return AggregateDocument::default();
        };
        aggregate(
            self.source,
            &repo.owner,
            &repo.repo,
            selection,
            &view.root_nodes,
            &view.known_folders(),
        )
        .await
    }

    fn write_view(&mut self, view: &RepoView) -> Result<(), GhClipError> {
        writeln!(self.out, "Files:")?;
        for file in &view.root_files {
            write_checkbox(&mut self.out, file, "  ")?;
        }

        if view.folders.is_empty() {
            return Ok(());
        }
        if !view.show_folders {
            writeln!(
                self.out,
                "Folders: {} hidden (use --show-folders)",
                view.folders.len()
            )?;
            return Ok(());
        }
        writeln!(self.out, "Folders:")?;
        for folder in &view.folders {
            let marker = if folder.expanded { "▾" } else { "▸" };
            writeln!(self.out, "  {} {}", marker, folder.folder.name)?;
            for file in &folder.files {
                write_checkbox(&mut self.out, file, "      ")?;
            }
        }
        Ok(())
    }
}

fn write_checkbox<W: Write>(out: &mut W, file: &VisibleFile, indent: &str) -> Result<(), GhClipError> {
    let mark = if file.checked { "x" } else { " " };
    writeln!(out, "{}[{}] {}", indent, mark, file.label)?;
    Ok(())
}

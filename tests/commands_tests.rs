mod common;

use common::{FakeClipboard, FakeRemote, UnavailableClipboard};
use ghclip::commands::{run_in_session, Command, Runner, ShowOptions};
use ghclip::config::Config;
use ghclip::errors::GhClipError;
use ghclip::intro::INTRO_TEXT;
use ghclip::render::RenderRequest;
use ghclip::session::Session;
use tempfile::tempdir;
use tracing_test::traced_test;

fn config() -> Config {
    Config {
        user: Some("me".to_owned()),
        ..Config::default()
    }
}

fn remote() -> FakeRemote {
    FakeRemote::new()
        .with_repo("demo")
        .with_repo("tools")
        .with_file("app.py", "import streamlit")
        .with_file("pages/home.py", "home")
}

fn show_options(copy: bool) -> ShowOptions {
    ShowOptions {
        copy,
        stats: false,
        model: "gpt-4o".to_owned(),
        toggle: false,
    }
}

#[tokio::test]
async fn test_repos_lists_names() {
    let config = config();
    let remote = remote();
    let clipboard = FakeClipboard::default();
    let mut session = Session::default();
    let mut out = Vec::new();

    let mut runner = Runner {
        config: &config,
        source: &remote,
        clipboard: &clipboard,
        session: &mut session,
        out: &mut out,
    };
    runner.repos(None).await.unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "demo\ntools\n");
}

#[tokio::test]
async fn test_select_then_show_copies_aggregate() {
    let config = config();
    let remote = remote();
    let clipboard = FakeClipboard::default();
    let mut session = Session::default();
    let mut out = Vec::new();

    let mut runner = Runner {
        config: &config,
        source: &remote,
        clipboard: &clipboard,
        session: &mut session,
        out: &mut out,
    };
    let request = RenderRequest {
        show_folders: Some(true),
        expand: vec!["pages".to_owned()],
        check: vec!["pages/home.py".to_owned(), "app.py".to_owned()],
        ..RenderRequest::default()
    };
    runner.select("demo", &request).await.unwrap();
    runner.show("demo", &show_options(true)).await.unwrap();

    let expected = "===== app.py =====\nimport streamlit\n\n===== pages/home.py =====\nhome\n\n";
    assert_eq!(clipboard.copied.lock().unwrap().as_slice(), [expected.to_owned()]);

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("  [x] app.py\n"));
    assert!(printed.contains("  ▾ pages\n"));
    assert!(printed.contains("      [x] pages/home.py\n"));
    assert!(printed.ends_with(expected));
}

#[tokio::test]
#[traced_test]
async fn test_show_without_selection_warns() {
    let config = config();
    let remote = remote();
    let clipboard = FakeClipboard::default();
    let mut session = Session::default();
    let mut out = Vec::new();

    let mut runner = Runner {
        config: &config,
        source: &remote,
        clipboard: &clipboard,
        session: &mut session,
        out: &mut out,
    };
    runner.show("demo", &show_options(true)).await.unwrap();

    assert!(out.is_empty());
    assert!(clipboard.copied.lock().unwrap().is_empty());
    assert!(logs_contain("Select one or more files first"));
}

#[tokio::test]
async fn test_paths_and_tree_copy() {
    let config = config();
    let remote = remote();
    let clipboard = FakeClipboard::default();
    let mut session = Session::default();
    session.selection_mut("me/demo").insert("pages/home.py");
    let mut out = Vec::new();

    let mut runner = Runner {
        config: &config,
        source: &remote,
        clipboard: &clipboard,
        session: &mut session,
        out: &mut out,
    };
    runner.paths("demo", true).await.unwrap();
    runner.tree("demo", true).await.unwrap();

    assert_eq!(
        clipboard.copied.lock().unwrap().as_slice(),
        ["pages/home.py".to_owned(), "app.py\npages/home.py".to_owned()]
    );
}

#[tokio::test]
async fn test_toggles_persist_in_session() {
    let config = config();
    let remote = remote();
    let clipboard = FakeClipboard::default();
    let mut session = Session::default();
    session.selection_mut("me/demo").insert("app.py");
    let mut out = Vec::new();

    let mut runner = Runner {
        config: &config,
        source: &remote,
        clipboard: &clipboard,
        session: &mut session,
        out: &mut out,
    };
    runner.intro(false, true).await.unwrap();
    let toggle = ShowOptions {
        toggle: true,
        ..show_options(false)
    };
    runner.show("demo", &toggle).await.unwrap();
    runner.select("demo", &RenderRequest::default()).await.unwrap();

    assert!(session.show_intro);
    assert!(session.show_content);
    let printed = String::from_utf8(out).unwrap();
    assert_eq!(printed.matches(INTRO_TEXT).count(), 2);
    assert_eq!(printed.matches("===== app.py =====").count(), 2);
    assert!(printed.contains("Folders: 1 hidden"));
}

#[tokio::test]
async fn test_bare_repo_without_user_is_config_error() {
    let config = Config::default();
    let remote = remote();
    let clipboard = FakeClipboard::default();
    let mut session = Session::default();
    let mut out = Vec::new();

    let mut runner = Runner {
        config: &config,
        source: &remote,
        clipboard: &clipboard,
        session: &mut session,
        out: &mut out,
    };

    assert!(runner.paths("demo", false).await.is_err());
    assert!(runner.repos(None).await.is_err());
    assert!(runner.paths("me/demo", false).await.is_ok());
}

#[tokio::test]
async fn test_session_saved_when_command_fails() {
    let dir = tempdir().unwrap();
    let config = Config {
        user: Some("me".to_owned()),
        session_path: dir.path().join("session.json"),
        ..Config::default()
    };
    let mut session = Session::default();
    session.selection_mut("me/demo").insert("app.py");
    session.save(&config.session_path).await.unwrap();

    let command = Command::Show {
        repo: "demo".to_owned(),
        options: ShowOptions {
            toggle: true,
            ..show_options(true)
        },
    };
    let mut out = Vec::new();
    let result = run_in_session(&config, &remote(), &UnavailableClipboard, command, &mut out).await;

    assert!(matches!(result, Err(GhClipError::ClipboardInitError(_))));
    let reloaded = Session::load(&config.session_path).await.unwrap();
    assert!(reloaded.show_content);
    assert!(String::from_utf8(out).unwrap().contains("===== app.py ====="));
}

#[tokio::test]
async fn test_run_in_session_persists_selection() {
    let dir = tempdir().unwrap();
    let config = Config {
        user: Some("me".to_owned()),
        session_path: dir.path().join("nested").join("session.json"),
        ..Config::default()
    };
    let command = Command::Select {
        repo: "demo".to_owned(),
        request: RenderRequest {
            check: vec!["app.py".to_owned()],
            ..RenderRequest::default()
        },
    };

    run_in_session(&config, &remote(), &FakeClipboard::default(), command, Vec::new())
        .await
        .unwrap();

    let reloaded = Session::load(&config.session_path).await.unwrap();
    assert!(reloaded.selection("me/demo").unwrap().contains("app.py"));
}

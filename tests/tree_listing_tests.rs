mod common;

use common::FakeRemote;
use ghclip::list_all_files;

#[tokio::test]
async fn test_lists_every_file_depth_first() {
    let remote = FakeRemote::new()
        .with_file("README.md", "# demo")
        .with_file("src/main.py", "print()")
        .with_file("src/utils/io.py", "def read(): ...")
        .with_file("setup.py", "")
        .with_file("docs/guide.md", "guide");

    let files = list_all_files(&remote, "me", "demo", "").await;

    assert_eq!(
        files,
        vec![
            "README.md",
            "src/main.py",
            "src/utils/io.py",
            "setup.py",
            "docs/guide.md",
        ]
    );
}

#[tokio::test]
async fn test_directory_paths_are_not_emitted() {
    let remote = FakeRemote::new()
        .with_file("a/b/c/deep.rs", "")
        .with_file("a/top.rs", "");

    let files = list_all_files(&remote, "me", "demo", "").await;

    assert_eq!(files, vec!["a/b/c/deep.rs", "a/top.rs"]);
    assert!(!files.iter().any(|f| f == "a" || f == "a/b" || f == "a/b/c"));
}

#[tokio::test]
async fn test_failed_subdirectory_keeps_siblings() {
    let remote = FakeRemote::new()
        .with_file("ok1/one.py", "")
        .with_failing_dir("broken", 500)
        .with_file("broken/lost.py", "")
        .with_file("ok2/two.py", "")
        .with_file("root.py", "");

    let files = list_all_files(&remote, "me", "demo", "").await;

    assert_eq!(files, vec!["ok1/one.py", "ok2/two.py", "root.py"]);
}

#[tokio::test]
async fn test_failed_root_yields_nothing() {
    let remote = FakeRemote::new().with_failing_dir("sub", 403);

    let files = list_all_files(&remote, "me", "demo", "sub").await;

    assert!(files.is_empty());
}

#[tokio::test]
async fn test_lists_from_subdirectory() {
    let remote = FakeRemote::new()
        .with_file("src/lib.rs", "")
        .with_file("src/bin/tool.rs", "")
        .with_file("other.rs", "");

    let files = list_all_files(&remote, "me", "demo", "src").await;

    assert_eq!(files, vec!["src/lib.rs", "src/bin/tool.rs"]);
}

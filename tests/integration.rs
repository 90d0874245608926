//! End-to-end tests: scripted command streams against a full shell, plus
//! image round trips through the public codec API.

use std::fs;
use std::path::{Path, PathBuf};

use memshell::codec;
use memshell::config::ShellConfig;
use memshell::fs::DirectoryTree;
use memshell::protocol::{handle_command, parse_command};
use memshell::shell::Shell;

// Helper to run a command script against a tree, collecting response text
fn run_script(tree: &mut DirectoryTree, script: &str) -> Vec<String> {
    script
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            handle_command(tree, &parse_command(line))
                .message
                .unwrap_or_default()
        })
        .collect()
}

// Helper to set up a scratch directory unique to one test
fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("memshell_{}_{}", tag, std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn test_config(dir: &Path, workers: usize) -> ShellConfig {
    ShellConfig {
        workers,
        image_path: dir.join("image.dat").to_string_lossy().into_owned(),
        stream_dir: dir.to_string_lossy().into_owned(),
        ..ShellConfig::default()
    }
}

#[test]
fn test_scripted_session_and_image_round_trip() {
    let dir = temp_dir("round_trip");
    let image = dir.join("image.dat");

    let mut tree = DirectoryTree::new();
    run_script(
        &mut tree,
        "create r.txt\n\
         write r.txt root data\n\
         mkdir docs\n\
         chdir docs\n\
         create a.txt\n\
         write a.txt alpha\n\
         chdir ..",
    );

    codec::save_to_path(&tree, &image).unwrap();
    let mut loaded = codec::load_from_path(&image).unwrap().unwrap();

    // Same names, same contents, same ordering.
    let listing = loaded.list();
    assert_eq!(listing.subdirs, vec!["docs"]);
    assert_eq!(listing.files, vec!["r.txt"]);
    assert_eq!(loaded.file("r.txt").unwrap().read_all(), b"root data");
    loaded.chdir("docs").unwrap();
    assert_eq!(loaded.file("a.txt").unwrap().read_all(), b"alpha");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_load_from_missing_image_is_none() {
    let dir = temp_dir("missing_image");
    let absent = dir.join("never_written.dat");
    assert!(codec::load_from_path(&absent).unwrap().is_none());
    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_worker_stream_end_to_end() {
    let dir = temp_dir("end_to_end");

    fs::write(
        dir.join("input_worker1.txt"),
        "mkdir docs\n\
         chdir docs\n\
         create a.txt\n\
         write a.txt hello\n\
         read a.txt\n\
         chdir ..\n\
         ls\n\
         memory_mapp\n\
         exit\n",
    )
    .unwrap();

    let config = test_config(&dir, 1);
    Shell::new(config).run().await;

    let output = fs::read_to_string(dir.join("output_worker1.txt")).unwrap();
    assert!(output.contains("Worker 1: Directory created: docs"));
    assert!(output.contains("Worker 1: Current directory: root/docs"));
    assert!(output.contains("Worker 1: File created: a.txt"));
    assert!(output.contains("Worker 1: Wrote 5 bytes to 'a.txt'"));
    assert!(output.contains("Worker 1: hello"));
    assert!(output.contains("[DIR] docs"));
    assert!(output.contains("Unknown command 'memory_mapp'. Did you mean 'memory_map'?"));
    assert!(output.contains("Worker 1: Saving file system and exiting..."));

    // The image on disk is the whole tree in save order.
    let image = fs::read_to_string(dir.join("image.dat")).unwrap();
    assert_eq!(image, "DIR docs\nFILE a.txt hello\nENDDIR\n");

    let mut reloaded = codec::load_from_path(&dir.join("image.dat")).unwrap().unwrap();
    reloaded.chdir("docs").unwrap();
    assert_eq!(reloaded.file("a.txt").unwrap().read_all(), b"hello");

    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_concurrent_workers_preserve_per_stream_order() {
    let dir = temp_dir("concurrent");

    // Each worker appends its own alphabet to its own file. The global
    // interleaving is arbitrary, but each stream is FIFO, so every file must
    // come out in its own order.
    let mut script1 = String::from("create one.txt\n");
    let mut script2 = String::from("create two.txt\n");
    for i in 0..10 {
        script1.push_str(&format!("write one.txt a{}\n", i));
        script2.push_str(&format!("write two.txt b{}\n", i));
    }
    fs::write(dir.join("input_worker1.txt"), &script1).unwrap();
    fs::write(dir.join("input_worker2.txt"), &script2).unwrap();

    let config = test_config(&dir, 2);
    let shell = Shell::new(config);
    shell.run().await;

    let expected1: String = (0..10).map(|i| format!("a{}", i)).collect();
    let expected2: String = (0..10).map(|i| format!("b{}", i)).collect();

    let contents = shell
        .gate()
        .with(|tree| {
            (
                tree.file("one.txt").unwrap().read_all().to_vec(),
                tree.file("two.txt").unwrap().read_all().to_vec(),
            )
        })
        .await;
    assert_eq!(contents.0, expected1.as_bytes());
    assert_eq!(contents.1, expected2.as_bytes());

    // Both files made it into the saved image too.
    let image = fs::read_to_string(dir.join("image.dat")).unwrap();
    assert!(image.contains(&format!("FILE one.txt {}", expected1)));
    assert!(image.contains(&format!("FILE two.txt {}", expected2)));

    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_shell_reloads_prior_image_on_startup() {
    let dir = temp_dir("reload");

    // First run builds state and exits.
    fs::write(
        dir.join("input_worker1.txt"),
        "create keep.txt\nwrite keep.txt persisted\nexit\n",
    )
    .unwrap();
    Shell::new(test_config(&dir, 1)).run().await;

    // Second run sees the saved tree.
    fs::write(dir.join("input_worker1.txt"), "read keep.txt\n").unwrap();
    Shell::new(test_config(&dir, 1)).run().await;

    let output = fs::read_to_string(dir.join("output_worker1.txt")).unwrap();
    assert!(output.contains("Worker 1: persisted"));

    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_worker_without_stream_is_harmless() {
    let dir = temp_dir("no_stream");

    // Worker 2 has no input file; worker 1 still runs to completion.
    fs::write(dir.join("input_worker1.txt"), "mkdir docs\n").unwrap();
    let shell = Shell::new(test_config(&dir, 2));
    shell.run().await;

    let dirs = shell.gate().with(|tree| tree.list().subdirs).await;
    assert_eq!(dirs, vec!["docs"]);
    assert!(!dir.join("output_worker2.txt").exists());

    fs::remove_dir_all(&dir).ok();
}

use std::path::Path;
use std::process::Command;

use handoff::snapshot::{self, SNAPSHOT_FILE};
use speculate2::speculate;

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .arg("-c")
        .arg("commit.gpgsign=false")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("failed to run git");
    assert!(status.success(), "git {:?} failed", args);
}

fn init_repo(dir: &Path) {
    git(dir, &["init", "-q"]);
    git(dir, &["config", "user.email", "dev@example.com"]);
    git(dir, &["config", "user.name", "Dev"]);
}

fn commit_all(dir: &Path, message: &str) {
    git(dir, &["add", "."]);
    git(dir, &["commit", "-q", "-m", message]);
}

fn generate(dir: &Path) -> String {
    tokio_test::block_on(snapshot::generate(dir)).expect("snapshot write failed");
    std::fs::read_to_string(dir.join(SNAPSHOT_FILE)).expect("snapshot missing")
}

speculate! {
    before {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = tmp.path();
    }

    describe "snapshot generator" {
        describe "without version control" {
            it "omits the git section entirely" {
                std::fs::write(dir.join("notes.txt"), "hello").expect("write");

                let doc = generate(dir);
                assert!(doc.contains("### Project Information"));
                assert!(!doc.contains("### Git Status"));
            }
        }

        describe "with a clean repository" {
            it "reports no uncommitted changes and emits no changes block" {
                init_repo(dir);
                std::fs::write(dir.join("README.md"), "# demo").expect("write");
                commit_all(dir, "initial");

                let doc = generate(dir);
                assert!(doc.contains("- **Has Uncommitted Changes**: No"));
                assert!(!doc.contains("#### Uncommitted Changes"));
                assert!(doc.contains("#### Recent Commits"));
                assert!(doc.contains("initial"));
            }
        }

        describe "with uncommitted changes" {
            it "reports yes and embeds the short status" {
                init_repo(dir);
                std::fs::write(dir.join("README.md"), "# demo").expect("write");
                commit_all(dir, "initial");
                std::fs::write(dir.join("README.md"), "# changed").expect("write");

                let doc = generate(dir);
                assert!(doc.contains("- **Has Uncommitted Changes**: Yes"));
                assert!(doc.contains("#### Uncommitted Changes"));
                assert!(doc.contains("README.md"));
            }
        }

        describe "project markers" {
            it "lists detected marker files" {
                std::fs::write(dir.join("Cargo.toml"), "[package]").expect("write");
                std::fs::write(dir.join("Makefile"), "all:").expect("write");

                let doc = generate(dir);
                assert!(doc.contains("### Project Structure"));
                assert!(doc.contains("- `Cargo.toml`"));
                assert!(doc.contains("- `Makefile`"));
            }

            it "omits the section when no markers exist" {
                let doc = generate(dir);
                assert!(!doc.contains("### Project Structure"));
            }
        }

        describe "project index" {
            it "summarizes a valid PROJECT_INDEX.json" {
                std::fs::write(
                    dir.join("PROJECT_INDEX.json"),
                    r#"{"files": ["a", "b"], "metadata": {"updated": "2026-08-01"}}"#,
                )
                .expect("write");

                let doc = generate(dir);
                assert!(doc.contains("- **Files Indexed**: 2"));
                assert!(doc.contains("- **Last Updated**: 2026-08-01"));
            }

            it "omits the section when the index is malformed" {
                std::fs::write(dir.join("PROJECT_INDEX.json"), "{broken").expect("write");

                let doc = generate(dir);
                assert!(!doc.contains("### Project Index"));
            }
        }

        describe "recent file activity" {
            it "never lists more than ten entries" {
                for i in 0..15 {
                    std::fs::write(dir.join(format!("f{:02}.txt", i)), "x").expect("write");
                }

                let doc = generate(dir);
                let listed = doc
                    .lines()
                    .filter(|line| line.starts_with("- `f") && line.ends_with(".txt`"))
                    .count();
                assert_eq!(listed, 10);
            }
        }

        describe "run-to-run stability" {
            it "produces identical documents apart from timestamps" {
                init_repo(dir);
                std::fs::write(dir.join(".gitignore"), "CONTEXT_STATE.md\n").expect("write");
                std::fs::write(dir.join("README.md"), "# demo").expect("write");
                commit_all(dir, "initial");

                let first = generate(dir);
                let second = generate(dir);

                let strip = |doc: &str| -> Vec<String> {
                    doc.lines()
                        .filter(|line| {
                            !line.starts_with("**Auto-generated**")
                                && !line.starts_with("*Generated by")
                        })
                        .map(str::to_string)
                        .collect()
                };
                assert_eq!(strip(&first), strip(&second));
            }

            it "keeps a full ten-entry file listing on the second run" {
                init_repo(dir);
                std::fs::write(dir.join(".gitignore"), "CONTEXT_STATE.md\n").expect("write");
                for i in 0..12 {
                    std::fs::write(dir.join(format!("f{:02}.txt", i)), "x").expect("write");
                }
                commit_all(dir, "initial");

                let first = generate(dir);
                let second = generate(dir);

                let listed = |doc: &str| -> Vec<String> {
                    doc.lines()
                        .filter(|line| line.starts_with("- `") && line.ends_with("`"))
                        .map(str::to_string)
                        .collect()
                };
                assert_eq!(listed(&first).len(), 10);
                assert_eq!(listed(&first), listed(&second));
                assert!(!second.contains("CONTEXT_STATE.md`"));
            }
        }
    }
}

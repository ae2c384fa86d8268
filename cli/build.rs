//! Build script for chromemark-cli
//!
//! Records the commit the binary was built from so `--version` can print it.
//! `CHROMEMARK_COMMIT` from the environment wins; otherwise git is asked,
//! and `?` is used when neither is available.

use std::env;
use std::process::Command;

fn main() {
    let commit = env::var("CHROMEMARK_COMMIT")
        .ok()
        .filter(|c| !c.is_empty())
        .or_else(git_commit)
        .unwrap_or_else(|| "?".to_string());

    println!("cargo:rustc-env=CHROMEMARK_COMMIT={}", commit);

    // Tell Cargo to rerun if the commit override or HEAD changes
    println!("cargo:rerun-if-env-changed=CHROMEMARK_COMMIT");
    println!("cargo:rerun-if-changed=../.git/HEAD");
}

fn git_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let commit = String::from_utf8(output.stdout).ok()?.trim().to_string();
    if commit.is_empty() {
        None
    } else {
        Some(commit)
    }
}

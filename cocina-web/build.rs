//! Embeds build identification for the startup log line
//! (`GIT_HASH`, `BUILD_TIMESTAMP`, `BUILD_PROFILE`).

use std::process::Command;

const UNKNOWN: &str = "unknown";

/// Short commit hash, suffixed with `-dirty` when the tree has local edits
fn git_revision() -> Option<String> {
    let run = |args: &[&str]| {
        Command::new("git")
            .args(args)
            .output()
            .ok()
            .filter(|out| out.status.success())
            .and_then(|out| String::from_utf8(out.stdout).ok())
    };

    let hash = run(&["rev-parse", "--short=8", "HEAD"])?.trim().to_string();
    let dirty = run(&["status", "--porcelain", "--untracked-files=no"])
        .map(|s| !s.trim().is_empty())
        .unwrap_or(false);

    Some(if dirty { format!("{hash}-dirty") } else { hash })
}

fn main() {
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=build.rs");

    let revision = git_revision().unwrap_or_else(|| UNKNOWN.to_string());
    let built_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.to_string());

    println!("cargo:rustc-env=GIT_HASH={revision}");
    println!("cargo:rustc-env=BUILD_TIMESTAMP={built_at}");
    println!("cargo:rustc-env=BUILD_PROFILE={profile}");
}

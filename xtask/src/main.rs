//! Custom cargo commands for sitekit.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests
//!   cargo xtask wasm      - Build the browser bundle target
//!   cargo xtask check     - Quick check (no wasm build)

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

const WASM_TARGET: &str = "wasm32-unknown-unknown";

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("wasm") => wasm()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (features, tests, clippy, wasm)
  test      Run all Rust tests
  wasm      Build the library for {WASM_TARGET} with the wasm feature
  check     Quick check (cargo test + clippy, no wasm)
  bench     Run benchmarks
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("sitekit Verification Suite");
    println!("==========================================\n");

    println!("[1/5] Checking invariant markers...");
    check_invariant_markers()?;
    check_manifest_paths()?;
    println!("✓ Invariant markers and manifest paths present\n");

    println!("[2/5] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    // The browser build drops rayon and the CLI stack; the index must still
    // build and answer the same way.
    println!("[3/5] Running tests without default features...");
    run_cargo(&["test", "--quiet", "--lib", "--no-default-features"])?;
    println!("✓ Sequential build passed\n");

    println!("[4/5] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[5/5] Building for {WASM_TARGET}...");
    wasm()?;
    println!("✓ wasm build passed\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Build the wasm-bindgen surface
fn wasm() -> Result<()> {
    run_cargo(&[
        "build",
        "--release",
        "--lib",
        "--target",
        WASM_TARGET,
        "--no-default-features",
        "--features",
        "wasm,unicode-normalization",
    ])
}

/// Quick check (no wasm)
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

/// Invariant notes must stay next to the code that enforces them.
fn check_invariant_markers() -> Result<()> {
    let root = project_root()?;
    let required = [
        ("src/search/client.rs", "NotLoaded → Loading"),
        ("src/search/dedup.rs", "**Invariant**"),
        ("src/controller.rs", "INVARIANTS"),
        ("src/search/render.rs", "Rendering implies showing"),
    ];

    for (file, marker) in required {
        let source = std::fs::read_to_string(root.join(file)).with_context(|| format!("Failed to read {file}"))?;
        if !source.contains(marker) {
            bail!("{file} lost its `{marker}` note. Someone may have removed safety comments!");
        }
    }

    Ok(())
}

/// Files named by the root manifest must exist.
fn check_manifest_paths() -> Result<()> {
    let root = project_root()?;
    let manifest = std::fs::read_to_string(root.join("Cargo.toml")).context("Failed to read Cargo.toml")?;

    for line in manifest.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        if !matches!(key.trim(), "readme" | "path") {
            continue;
        }
        let file = value.trim().trim_matches('"');
        if !root.join(file).exists() {
            bail!("Cargo.toml names {file}, which does not exist");
        }
    }

    Ok(())
}

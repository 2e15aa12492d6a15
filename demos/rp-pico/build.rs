//! Build script for the rp-pico heater demo
//!
//! Runs heatctl-tunegen to generate tuning.rs from tuning.toml and puts
//! memory.x on the linker search path.

use std::env;
use std::path::PathBuf;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=tuning.toml");
    println!("cargo:rerun-if-changed=memory.x");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));

    // Build for host target, not embedded target
    let host = env::var("HOST").unwrap_or_else(|_| "x86_64-unknown-linux-gnu".into());

    let output = Command::new("cargo")
        .args([
            "run",
            "--manifest-path",
            "../../Cargo.toml",
            "--bin",
            "heatctl-tunegen",
            "--features",
            "tunegen",
            "--target",
            &host,
            "--",
            "tuning.toml",
            "TunedConfig",
        ])
        .output()
        .expect("Failed to run heatctl-tunegen");

    if !output.status.success() {
        eprintln!("heatctl-tunegen failed:");
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        panic!("Tuning generation failed");
    }

    std::fs::write(out_dir.join("tuning.rs"), output.stdout).expect("Failed to write tuning.rs");

    std::fs::copy("memory.x", out_dir.join("memory.x")).expect("Failed to copy memory.x");
    println!("cargo:rustc-link-search={}", out_dir.display());
}

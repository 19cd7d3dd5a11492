//! Build script for dongle-screen-simulator
//!
//! On Windows, points the linker at a vendored SDL2 and places SDL2.dll next
//! to the built binary. Other platforms use the system SDL2.

use std::path::{Path, PathBuf};
use std::{env, fs};

fn main() {
    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows" {
        return;
    }

    let Some(vendor_sdl2) = env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .and_then(|dir| dir.parent().map(|root| root.join("vendor").join("sdl2")))
    else {
        return;
    };
    println!("cargo:rerun-if-changed={}", vendor_sdl2.display());

    if !vendor_sdl2.exists() {
        println!("cargo:warning=SDL2 not found at {}", vendor_sdl2.display());
        println!("cargo:warning=Put SDL2.lib and SDL2.dll in vendor/sdl2/ at the repository root");
        return;
    }

    println!("cargo:rustc-link-search=native={}", vendor_sdl2.display());
    let out_dir = env::var_os("OUT_DIR").map(PathBuf::from);
    if let Some(target_dir) = out_dir.as_deref().and_then(profile_dir) {
        copy_dll(&vendor_sdl2, target_dir);
    }
}

/// `OUT_DIR` is `target/<profile>/build/<pkg>-<hash>/out`; the binary lands in `target/<profile>`.
fn profile_dir(out_dir: &Path) -> Option<&Path> {
    out_dir
        .ancestors()
        .find(|p| p.file_name().is_some_and(|n| n == "release" || n == "debug"))
}

fn copy_dll(
    vendor_sdl2: &Path,
    profile_dir: &Path,
) {
    let src = vendor_sdl2.join("SDL2.dll");
    let dst = profile_dir.join("SDL2.dll");
    if !src.exists() || dst.exists() {
        return;
    }
    if let Err(e) = fs::copy(&src, &dst) {
        println!("cargo:warning=Failed to copy SDL2.dll: {e}");
    }
}

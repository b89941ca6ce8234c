// Build script that mirrors `static/` into `dist/` so the demo can be
// deployed as a plain static site.
use std::path::Path;
use std::{env, fs};

use fs_extra::dir::CopyOptions;

fn main() {
    // The wasm bundle itself is produced by wasm-pack (see src/main.rs);
    // nothing heavy happens for host builds.
    let target = env::var("TARGET").unwrap_or_default();
    if target == "wasm32-unknown-unknown" {
        return;
    }

    let out_dir = Path::new("dist");
    if out_dir.exists() {
        fs::remove_dir_all(out_dir).ok();
    }
    fs::create_dir_all(out_dir).ok();

    let static_dir = Path::new("static");
    if static_dir.exists() {
        let mut options = CopyOptions::new();
        options.content_only = true;
        options.overwrite = true;
        if let Err(err) = fs_extra::dir::copy(static_dir, out_dir, &options) {
            println!("cargo:warning=failed to copy static assets: {err}");
        }
    }

    println!("cargo:rerun-if-changed=static");
}

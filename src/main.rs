//! Host-side helper: `cargo run` rebuilds the WASM bundle and serves the
//! demo page locally so it can be opened in a browser.

use std::process::{Command, Stdio};
use std::{env, thread, time::Duration};

const SERVE_PORT: &str = "8000";

fn main() {
    // Only meaningful on non-wasm targets.
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return;
    }

    // 1. Compile the wasm bundle into static/pkg so index.html can load it.
    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args([
            "build",
            "--release",
            "--target",
            "web",
            "--out-dir",
            "static/pkg",
        ])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Serving whatever artifacts are already in static/pkg.");
        }
    }

    // 2. Serve `static/` so the demo is reachable at localhost.
    println!("Launching local server at http://127.0.0.1:{SERVE_PORT} …");
    let _server = Command::new("python3")
        .args(["-m", "http.server", SERVE_PORT, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start http server");

    // Keep process alive while the child server runs.
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg`
//! and serves `static/` locally. `PORT` overrides the default port 8000.

use std::io;
use std::process::{Command, Stdio};
use std::{env, thread, time::Duration};

const DEFAULT_PORT: &str = "8000";

fn build_wasm() -> io::Result<bool> {
    println!("Building WASM pkg …");
    let status = Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()?;
    Ok(status.success())
}

fn serve(port: &str) -> io::Result<()> {
    println!("Launching local server at http://127.0.0.1:{port} …");
    let mut server = Command::new("python3")
        .args(["-m", "http.server", port, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    // Keep process alive while the server runs
    loop {
        if let Some(status) = server.try_wait()? {
            eprintln!("http server exited: {status}");
            return Ok(());
        }
        thread::sleep(Duration::from_secs(1));
    }
}

fn main() {
    match build_wasm() {
        Ok(true) => {}
        Ok(false) => {
            eprintln!("wasm-pack finished with errors.");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/). Serving existing artifacts.");
        }
    }

    let port = env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
    if let Err(err) = serve(&port) {
        eprintln!("failed to start http server: {err}");
        std::process::exit(1);
    }
}

// Sets GEOCLIMATE_VERSION for `geoclimate --version`.
//
// A clean `vX.Y.Z` tag gives `X.Y.Z`; anything else gives the crate version
// suffixed with the short commit (and `-dirty`). Without git the crate version is used.

use std::process::Command;

fn main() {
    let crate_version = env!("CARGO_PKG_VERSION");
    let version = describe()
        .map(|described| version_from_describe(crate_version, &described))
        .unwrap_or_else(|| crate_version.to_string());

    println!("cargo:rustc-env=GEOCLIMATE_VERSION={}", version);
    for watched in [".git/HEAD", ".git/refs/heads", ".git/refs/tags"] {
        println!("cargo:rerun-if-changed={}", watched);
    }
}

fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string())
}

fn version_from_describe(crate_version: &str, described: &str) -> String {
    match described.strip_prefix('v') {
        // "v0.2.0" or "v0.2.0-4-gabc123[-dirty]": keep the tag's version
        Some(tagged) => tagged.split('-').next().unwrap_or(tagged).to_string(),
        // bare commit "abc123" or "abc123-dirty"
        None => format!("{}-{}", crate_version, described),
    }
}

use std::env;

fn main() {
    let version =
        env::var("CTSCAN_VERSION").unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").unwrap());
    println!("cargo:rerun-if-env-changed=CTSCAN_VERSION");
    println!("cargo:rustc-env=CTSCAN_VERSION={version}");
}

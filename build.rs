//! Build script for the test payload library
//!
//! Compiles `test/fixture/payload.c` into a shared library with the host C
//! compiler so the integration tests and benches have a real module to load.
//! The resulting path is handed to the crate through the `DYNLOAD_FIXTURE`
//! environment variable; an empty value means the payload could not be built
//! and fixture-backed tests skip themselves.

use std::env;
use std::path::{Path, PathBuf};

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=test/fixture/payload.c");

    let source = Path::new("test").join("fixture").join("payload.c");

    match build_payload(&out_dir, &source) {
        Some(lib) => {
            println!("cargo:rustc-env=DYNLOAD_FIXTURE={}", lib.display());
        }
        None => {
            println!("cargo:warning=payload library not built; fixture-backed tests will be skipped");
            println!("cargo:rustc-env=DYNLOAD_FIXTURE=");
        }
    }
}

/// Compile the payload into a shared library, returning its path on success.
fn build_payload(out_dir: &Path, source: &Path) -> Option<PathBuf> {
    let compiler = cc::Build::new()
        .opt_level(2)
        .pic(true)
        .cargo_metadata(false)
        .get_compiler();

    let out = out_dir.join(payload_filename());
    let mut cmd = compiler.to_command();

    if compiler.is_like_msvc() {
        cmd.arg(source)
            .arg("/LD")
            .arg(format!("/Fe:{}", out.display()))
            .arg(format!("/Fo{}\\", out_dir.display()));
    } else {
        cmd.arg("-shared")
            .arg("-fPIC")
            .arg("-O2")
            .arg(source)
            .arg("-o")
            .arg(&out);
    }

    let status = cmd.status().ok()?;
    if status.success() && out.exists() {
        Some(out)
    } else {
        None
    }
}

fn payload_filename() -> &'static str {
    match env::var("CARGO_CFG_TARGET_OS").as_deref() {
        Ok("windows") => "payload.dll",
        Ok("macos") => "libpayload.dylib",
        _ => "libpayload.so",
    }
}

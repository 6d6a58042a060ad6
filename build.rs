fn main() {
    // Linking is declared on the extern block in src/ffi.rs so the crate's own
    // unit tests can supply the symbols themselves. This script only makes
    // sure the linker can find libzbar.

    println!("cargo:rerun-if-env-changed=ZBAR_LIB_DIR");

    if let Ok(dir) = std::env::var("ZBAR_LIB_DIR") {
        println!("cargo:rustc-link-search=native={dir}");
        return;
    }

    match pkg_config::Config::new()
        .cargo_metadata(false)
        .probe("zbar")
    {
        Ok(lib) => {
            for path in lib.link_paths {
                println!("cargo:rustc-link-search=native={}", path.display());
            }
        }
        Err(err) => {
            let reason = err.to_string();
            let reason = reason.lines().next().unwrap_or_default();
            println!(
                "cargo:warning=zbar not found via pkg-config ({reason}); using the default linker search path"
            );
        }
    }
}

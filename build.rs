fn main() {
    println!("cargo:rerun-if-changed=src/ffi.rs");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    let crate_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => dir,
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {e}");
            return;
        }
    };
    let out_dir = std::path::Path::new(&crate_dir).join("include");

    // Ensure the include directory exists
    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        println!("cargo:warning=Failed to create include directory: {e}");
        return;
    }

    let header_path = out_dir.join("rpn_rs.h");
    let config_path = std::path::Path::new(&crate_dir).join("cbindgen.toml");

    let config = match cbindgen::Config::from_file(&config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("cargo:warning=Failed to load cbindgen.toml: {e}");
            return;
        }
    };

    // A missing header must not break library builds, so only warn.
    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(header_path);
        }
        Err(e) => {
            println!("cargo:warning=Unable to generate bindings: {e}");
        }
    }
}

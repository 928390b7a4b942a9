use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=STEAMWORKS_SDK_LIB_DIR");

    if env::var_os("CARGO_FEATURE_STEAMWORKS").is_none() {
        return;
    }

    // e.g. steamworks_sdk/redistributable_bin/win64 or .../linux64
    if let Ok(dir) = env::var("STEAMWORKS_SDK_LIB_DIR") {
        println!("cargo:rustc-link-search=native={dir}");
    }
}

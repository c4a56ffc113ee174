use std::env;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let Ok(crate_dir) = env::var("CARGO_MANIFEST_DIR") else {
        return;
    };
    let generated = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("BRAND_FFI_H")
        .generate();
    match generated {
        Ok(bindings) => {
            bindings.write_to_file(format!("{crate_dir}/include/brand_ffi.h"));
        }
        Err(e) => println!("cargo:warning=header generation skipped: {e}"),
    }
}

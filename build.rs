// build.rs for redocup
//
// rust_embed requires the embedded folder to exist at compile time.
// The ReDoc bundle is vendored separately (see README); when it is
// absent we create a placeholder so the crate always compiles.

use std::path::Path;

fn main() {
    let bundle = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/redoc");

    if !bundle.join("redoc.standalone.js").exists() {
        std::fs::create_dir_all(&bundle).expect("failed to create placeholder assets/redoc");
        std::fs::write(
            bundle.join("redoc.standalone.js"),
            "/* placeholder: vendor the ReDoc bundle here (see README) */\n",
        )
        .expect("failed to write placeholder redoc.standalone.js");
    }

    println!("cargo:rerun-if-changed=assets/redoc");
    println!("cargo:rerun-if-changed=assets/index.html");
    println!("cargo:rerun-if-changed=assets/reload-client.js");
}

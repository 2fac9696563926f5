#[cfg(feature = "desktop")]
fn main() {
    // Rebuild when the shell config or capabilities change
    println!("cargo:rerun-if-changed=tauri.conf.json");
    println!("cargo:rerun-if-changed=capabilities");

    tauri_build::build();
}

// Headless builds (library + tests) do not need the Tauri context.
#[cfg(not(feature = "desktop"))]
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
}

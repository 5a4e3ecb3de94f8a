//! Build script which records build-time information for the run metadata.

fn main() {
    built::write_built_file().expect("Failed to acquire build-time information");
}

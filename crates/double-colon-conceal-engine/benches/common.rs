// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_field_notes(size: usize) -> String {
    let base = "# Meeting\n\nStatus:: Done\n**Owner**:: Sam\nDue:: `2024-01-01`\n\n- Tags (work):: planning\n- [draft:: not a field\n\n```rust\nlet path = std::env::args();\n```\n\nPlain paragraph with C++ :: scope text.\n\n";
    base.repeat(size)
}

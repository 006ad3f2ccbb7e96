// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_numbered_list(items: usize, start: u64) -> String {
    let mut content = String::from("# Tasks\n\n");
    for i in 0..items {
        content.push_str(&format!("{}. item {i}\n", start + i as u64));
        if i % 5 == 0 {
            content.push_str("   - nested note\n");
        }
    }
    content
}

/// A flat list where every item is written as `1.`
#[allow(dead_code)]
pub fn generate_repeated_ones(items: usize) -> String {
    let mut content = String::new();
    for i in 0..items {
        content.push_str(&format!("1. item {i}\n"));
    }
    content
}

#[allow(dead_code)]
pub fn generate_checklist(items: usize) -> String {
    let mut content = String::new();
    for i in 0..items {
        let mark = if i < items / 2 { " " } else { "x" };
        content.push_str(&format!("- [{mark}] task {i}\n"));
    }
    content
}

#[allow(dead_code)]
pub fn generate_document(sections: usize, items: usize) -> String {
    let mut content = String::new();
    for section in 0..sections {
        content.push_str(&format!("## Section {section}\n\nSome paragraph text.\n\n"));
        content.push_str(&generate_numbered_list(items, 1));
        content.push_str(&generate_checklist(items));
        content.push('\n');
    }
    content
}

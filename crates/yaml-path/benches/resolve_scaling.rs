//! Scaling analysis: parse and resolve cost against document size
//!
//! The resolver stops scanning siblings at the first one past the cursor, so
//! resolving near the top of a document should cost the same at every size
//! while resolving near the bottom grows with the number of siblings.
//!
//! Run with: cargo bench --bench resolve_scaling

use std::time::{Duration, Instant};
use yaml_path::{parse, resolve};

const RESOLVE_ROUNDS: u32 = 200;

/// Generate a flat hash with N key-value pairs
fn generate_flat_hash(n: usize) -> String {
    let mut yaml = String::new();
    for i in 0..n {
        yaml.push_str(&format!("key_{}: \"value_{}\"\n", i, i));
    }
    yaml
}

/// Generate a top-level hash with N sections, each with a small nested structure
fn generate_mixed_structure(n: usize) -> String {
    let mut yaml = String::new();
    for i in 0..n {
        yaml.push_str(&format!(
            "section_{}:\n  title: \"Section {}\"\n  enabled: true\n  items:\n    - item1\n    - item2\n    - item3\n",
            i, i
        ));
    }
    yaml
}

/// Generate the same data as a JSON document
fn generate_json_array(n: usize) -> String {
    let mut json = String::from("[\n");
    for i in 0..n {
        json.push_str(&format!("  {{\"id\": {}, \"tags\": [\"a\", \"b\"]}},\n", i));
    }
    json.push_str("]\n");
    json
}

fn time_resolve(docs: &[yaml_path::YamlNode], line: usize) -> Duration {
    let start = Instant::now();
    for _ in 0..RESOLVE_ROUNDS {
        std::hint::black_box(resolve(docs, line, 0));
    }
    start.elapsed() / RESOLVE_ROUNDS
}

fn test_scaling(name: &str, generator: impl Fn(usize) -> String, sizes: &[usize]) {
    println!("\n{}", "=".repeat(70));
    println!("Scaling Test: {}", name);
    println!("{}", "=".repeat(70));
    println!(
        "{:>6} {:>8} {:>12} {:>12} {:>12}",
        "Size", "Lines", "Parse", "Top", "Bottom"
    );
    println!("{}", "-".repeat(70));

    let mut bottoms = Vec::new();

    for &size in sizes {
        let content = generator(size);
        let lines = content.lines().count();

        let start = Instant::now();
        let docs = parse(&content).expect("Failed to parse generated YAML");
        let parse_time = start.elapsed();

        let top = time_resolve(&docs, 0);
        let bottom = time_resolve(&docs, lines.saturating_sub(2));

        println!(
            "{:>6} {:>8} {:>12?} {:>12?} {:>12?}",
            size, lines, parse_time, top, bottom
        );
        bottoms.push((size, bottom));
    }

    if let (Some(first), Some(last)) = (bottoms.first(), bottoms.last()) {
        let size_ratio = last.0 as f64 / first.0 as f64;
        let time_ratio = last.1.as_secs_f64() / first.1.as_secs_f64().max(f64::EPSILON);
        println!("\nScaling Analysis:");
        println!("  Size increased:           {:.1}x", size_ratio);
        println!("  Bottom resolve increased: {:.1}x", time_ratio);
    }
}

fn main() {
    let sizes = [100, 1_000, 10_000];

    test_scaling("flat hash", generate_flat_hash, &sizes);
    test_scaling("mixed structure", generate_mixed_structure, &sizes);
    test_scaling("json array", generate_json_array, &sizes);
}

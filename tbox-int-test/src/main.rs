use std::time::Instant;
use tbox_gist::{BoxExtractor, GistResult, Strategy, TBox};
use tbox_int_test::test_util::{brute_force, random_sequences, MemoryGist, TFloatSeq};

fn main() -> GistResult<()> {
    colog::init();
    println!("Starting stress test...");

    let series = random_sequences(2024, 200_000);
    let keys: Vec<TBox> = series.iter().map(|s| s.extract_box()).collect();

    let start = Instant::now();
    let mut tree: MemoryGist<tbox_gist::TBoxOpClass<TFloatSeq>> =
        MemoryGist::with_default_opclass(64);
    for (id, s) in series.iter().enumerate() {
        tree.insert(s, id)?;
    }
    println!(
        "Inserted {} sequences in {:?} ({} nodes, depth {})",
        tree.len(),
        start.elapsed(),
        tree.node_count(),
        tree.depth()
    );
    tree.check_invariants()?;

    let queries: Vec<TBox> = keys.iter().step_by(10_000).copied().collect();
    for strategy in Strategy::ALL {
        let start = Instant::now();
        let mut matches = 0;
        let mut visited = 0;
        for target in &queries {
            let found = tree.search(Some(target), strategy);
            if found.ids != brute_force(&keys, target, strategy) {
                eprintln!("Mismatch for {} with target {}", strategy, target);
                std::process::exit(1);
            }
            matches += found.ids.len();
            visited += found.nodes_visited;
        }
        println!(
            "{:<24} {:>8} matches, {:>8} nodes visited, {:?}",
            strategy.to_string(),
            matches,
            visited,
            start.elapsed()
        );
    }

    println!("Stress test completed");
    Ok(())
}

use lfukit::builder::StoreBuilder;
use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=lfukit=trace shows every policy event
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let store = StoreBuilder::new().max_size(2).build::<&str, String>();

    store.write("a", "alpha".to_string());
    store.write("b", "beta".to_string());

    let _ = store.read(&"a");
    store.write("c", "gamma".to_string());

    println!("contains a? {}", store.contains(&"a"));
    println!("contains b? {}", store.contains(&"b"));
    println!("frequency of a: {:?}", store.frequency(&"a"));
    println!("{:?}", store.metrics());
}

// Expected output:
// contains a? true
// contains b? false
// frequency of a: Some(3)
// StoreMetrics { hits: 1, misses: 0, inserts: 3, updates: 0, evictions: 1, stale_skips: 0, deletes: 0 }
//
// Explanation: max_size=2; "a" is read before writing "c", so "b" (count 2)
// is the least frequently used key and is evicted.

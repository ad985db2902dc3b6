use request_cache::{RequestCache, SurfFetcher};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let cache = RequestCache::new(Arc::new(SurfFetcher::new()));
    let url = "https://api.tvmaze.com/shows/82/episodes";

    // First fetch goes to the network
    let start = std::time::Instant::now();
    let episodes = cache.get(url).await?;
    let first = start.elapsed();
    println!("First fetch took: {:?}", first);
    println!(
        "Fetched {} episodes",
        episodes.as_array().map_or(0, |list| list.len())
    );

    // Second fetch is served from the cache
    let start = std::time::Instant::now();
    cache.get(url).await?;
    let second = start.elapsed();
    println!("Cached fetch took: {:?}", second);

    if second.as_millis() > 0 {
        println!(
            "Cache speedup: {:.2}x",
            first.as_millis() as f64 / second.as_millis() as f64
        );
    } else {
        println!("Cache speedup: Very fast (cached result)");
    }

    println!("Cache stats: {:?}", cache.stats());

    cache.clear();
    println!("Cache stats after clear: {:?}", cache.stats());

    Ok(())
}

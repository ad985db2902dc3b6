use show_info::filter;
use show_info::ShowInfoClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let query = std::env::args().nth(1).unwrap_or_default();
    let client = ShowInfoClient::new();

    let shows = client.shows().await?;
    println!("Loaded {} shows", shows.len());

    let Some(show) = shows.first() else {
        println!("No shows available");
        return Ok(());
    };
    println!("Browsing: {}\n", show.name());

    let episodes = client.episodes(*show.id()).await?;
    let matches = filter::filter_episodes(&episodes, &query);

    for episode in &matches {
        println!("{}", episode.display_title());

        let airdate = match episode.airdate() {
            Some(date) => date.to_string(),
            None => "Unknown".to_string(),
        };
        let runtime = match episode.runtime() {
            Some(minutes) => format!("{} min", minutes),
            None => "Unknown".to_string(),
        };
        println!("  Airdate: {} | Runtime: {}", airdate, runtime);

        let summary = filter::summary_text(episode.summary().as_deref());
        if !summary.is_empty() {
            println!("  {}", summary);
        }
    }

    println!("\nShowing {} episode(s)", matches.len());
    println!("Cache stats: {:?}", client.cache_stats());

    Ok(())
}

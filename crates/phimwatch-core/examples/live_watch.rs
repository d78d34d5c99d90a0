use phimwatch_core::query_params::{query_value, QueryParam};
use phimwatch_core::{
    render_watch_link, ClientConfig, ContentApi, PageBody, PageTitle, PlayerEndpoint, WatchView,
};
use tracing_subscriber::EnvFilter;

struct PrintTitle;

impl PageTitle for PrintTitle {
    fn set_page_title(&mut self, title: &str) {
        println!("📄 {}", title);
    }
}

/// Usage: `cargo run --example live_watch -- "watch?movie=<id>"`
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let location = std::env::args().nth(1).unwrap_or_default();
    let query = location.split_once('?').map(|(_, q)| q).unwrap_or(&location);
    let movie_id = query_value(query, QueryParam::Movie);

    let config = ClientConfig::from_env();
    let api = ContentApi::with_config(&config)?;
    let mut view = WatchView::new(PlayerEndpoint::from_config(&config)?, Box::new(PrintTitle));

    if let Some(id) = movie_id.as_deref() {
        println!("🔗 {}", render_watch_link(Some(id)));
    }

    view.navigate(&api, movie_id).await;

    let servers = match view.render().body {
        PageBody::Idle => {
            println!("No movie identifier given, nothing to watch.");
            return Ok(());
        }
        PageBody::Loading => unreachable!("navigate runs the fetch to completion"),
        PageBody::Error { message } => {
            println!("❌ Error: {}", message);
            return Ok(());
        }
        PageBody::Player(player) => {
            println!("🎬 {} -> {}", player.frame.title, player.frame.src);
            if let Some(episodes) = &player.episodes {
                println!("Episodes: {}", episodes.len());
            }
            player.servers
        }
    };

    for server in servers {
        view.select_server(server.value.as_str().into());
        let src = view.player_src();
        println!(
            "  {} -> {}",
            server.label,
            if src.is_empty() { "—" } else { src.as_str() }
        );
    }

    Ok(())
}

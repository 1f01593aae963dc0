use anyhow::Context;
use clap::Parser;
use fortuna_core::Stream;
use fortuna_watch::{render_view, ApiClient, PanelPoller};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Segue da terminale i partecipanti di uno stream.
#[derive(Debug, Parser)]
#[command(name = "fortuna-watch", version)]
struct Args {
    /// Indirizzo del server (es. http://127.0.0.1:3000)
    #[arg(long, env = "FORTUNA_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Token di sessione (valore del cookie `user`)
    #[arg(long, env = "FORTUNA_TOKEN")]
    token: String,

    /// Stream da seguire; senza, elenca gli stream in corso
    #[arg(long)]
    stream: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = ApiClient::new(&args.base_url, &args.token).context("build http client")?;

    let Some(stream_id) = args.stream else {
        let streams = client.running_streams().await.context("fetch running streams")?;
        if streams.is_empty() {
            println!("No running streams");
        }
        for rs in streams {
            let mark = if rs.joined { "*" } else { " " };
            println!("{mark} {}  {}  ({} participants)", rs.stream.id, rs.stream.title, rs.stream.participants.len());
        }
        return Ok(());
    };

    // metadati dello stream (titolo e stato) dalla stessa rotta dei partecipanti
    let meta = client.fetch_stream(&stream_id).await.context("fetch stream")?;
    let stream = Stream {
        id: meta.id,
        title: meta.title,
        status: meta.status,
        participants: meta.participants.into_iter().map(|p| p.id).collect(),
        created_at: String::new(),
    };

    let mut poller = PanelPoller::new(client);
    let mut views = poller.subscribe();
    poller.select(Some(stream.clone())).await;

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                print!("\x1b[2J\x1b[H{}", render_view(&view));
            }
            line = stdin.next_line() => {
                match line.context("read stdin")?.as_deref().map(str::trim) {
                    Some("d") => {
                        let view = poller.view().await;
                        if matches!(view, fortuna_core::PanelView::Open { show_lucky_draw: true, .. }) {
                            // l'estrazione è gestita altrove: qui si registra solo la richiesta
                            info!(stream = %stream.id, "lucky draw requested");
                        }
                    }
                    Some("q") | None => break,
                    _ => {}
                }
            }
        }
    }

    poller.close().await;
    Ok(())
}

use anyhow::{bail, Context, Result};
use itertools::Itertools;
use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::sync::{Arc, Mutex};
use swu_cards::assets::{art_assets, ArtAsset};
use swu_cards::cards;
use tokio::task::JoinSet;

pub(crate) mod args {
    use bpaf::*;
    use std::path::PathBuf;
    use swu_cards_cli_tools::cli_helpers;

    #[derive(Debug, Clone)]
    pub(crate) struct Options {
        pub(crate) input: PathBuf,
        pub(crate) output: PathBuf,
        pub(crate) concurrency: usize,
    }

    pub fn options() -> OptionParser<Options> {
        let input = cli_helpers::cards_input_parser();
        let output = cli_helpers::art_output_parser();
        let concurrency = cli_helpers::concurrency_parser();
        construct!(Options {
            input,
            output,
            concurrency
        })
        .to_options()
        .descr("A tool to download every card image into a local asset tree.")
        .header("Images land under <output>/<front|back|thumb>/<style>/.")
    }

    #[test]
    fn swu_fetch_art_check_options() {
        options().check_invariants(false)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = args::options().run();

    let cards = cards::read_cards(BufReader::new(File::open(&args.input)?))?;
    let assets = art_assets(&cards, &args.output);
    println!("{} images to fetch for {} cards", assets.len(), cards.len());

    // Create the whole directory tree up front; workers only write files.
    for dir in assets
        .iter()
        .filter_map(|asset| asset.path.parent())
        .unique()
    {
        std::fs::create_dir_all(dir)?;
    }

    let queue = Arc::new(Mutex::new(VecDeque::from(assets)));
    let client = reqwest::Client::new();

    let mut workers = JoinSet::new();
    for _ in 0..args.concurrency.max(1) {
        let queue = Arc::clone(&queue);
        let client = client.clone();
        workers.spawn(async move {
            loop {
                // The guard is dropped before the fetch, so the queue is
                // never held across an await point.
                let next = queue.lock().unwrap().pop_front();
                let Some(asset) = next else {
                    return anyhow::Ok(());
                };
                fetch_asset(&client, &asset).await?;
            }
        });
    }

    while let Some(worker) = workers.join_next().await {
        worker??;
    }

    println!("Done, art under {}", args.output.display());
    Ok(())
}

async fn fetch_asset(client: &reqwest::Client, asset: &ArtAsset) -> Result<()> {
    let response = client.get(&asset.url).send().await?;
    if !response.status().is_success() {
        bail!("request for {} failed: {}", asset.url, response.status());
    }
    let bytes = response.bytes().await?;
    tokio::fs::write(&asset.path, &bytes)
        .await
        .with_context(|| format!("writing {}", asset.path.display()))?;
    Ok(())
}

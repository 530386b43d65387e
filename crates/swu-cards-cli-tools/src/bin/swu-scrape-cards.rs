use jsonxf::Formatter;
use std::{error::Error, fs};
use swu_cards::cards::{self, CardsBuilder};

pub(crate) mod args {
    use bpaf::*;
    use std::path::PathBuf;
    use swu_cards_cli_tools::cli_helpers;

    #[derive(Debug, Clone)]
    pub(crate) struct Options {
        pub(crate) endpoint: Option<String>,
        pub(crate) cache: Option<PathBuf>,
        pub(crate) output: PathBuf,
    }

    pub fn options() -> OptionParser<Options> {
        let endpoint = cli_helpers::endpoint_parser();
        let cache = cli_helpers::cache_dir_parser();
        let output = cli_helpers::cards_output_parser();
        construct!(Options {
            endpoint,
            cache,
            output
        })
        .to_options()
        .descr("A tool to scrape the full card database into one flat JSON file.")
        .header("Variant rows are folded into their parent card's art list.")
    }

    #[test]
    fn swu_scrape_cards_check_options() {
        options().check_invariants(false)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = args::options().run();

    let mut builder = CardsBuilder::new();
    if let Some(endpoint) = args.endpoint {
        builder = builder.endpoint(endpoint);
    }
    if let Some(cache) = args.cache {
        builder = builder.cache_dir(cache);
    }

    let catalog = builder.build().await?;
    println!(
        "Normalized {} cards ({} upstream rows folded or skipped)",
        catalog.len(),
        catalog.skipped()
    );

    let mut formatter = Formatter::pretty_printer();
    formatter.indent = "    ".to_string();
    formatter.trailing_output = "\n".to_string();
    let json = formatter.format(&cards::write_cards(&catalog)?)?;
    fs::write(&args.output, json.trim_start())?;
    println!("Wrote {}", args.output.display());

    Ok(())
}

use bpaf::*;
use std::path::PathBuf;

pub fn endpoint_parser() -> impl Parser<Option<String>> {
    long("endpoint")
        .help("Base URL of the card data API, for mirrors or fixture servers")
        .argument::<String>("ENDPOINT")
        .optional()
}

pub fn cache_dir_parser() -> impl Parser<Option<PathBuf>> {
    long("cache")
        .help("Directory to keep raw API pages in; reused instead of refetching on later runs")
        .argument::<PathBuf>("CACHE")
        .optional()
}

pub fn cards_output_parser() -> impl Parser<PathBuf> {
    long("output")
        .help("Path to write the flat card list to")
        .argument::<PathBuf>("OUTPUT")
        .fallback(PathBuf::from("cards.json"))
}

pub fn cards_input_parser() -> impl Parser<PathBuf> {
    long("input")
        .help("A flat card list produced by swu-scrape-cards")
        .argument::<PathBuf>("INPUT")
        .fallback(PathBuf::from("cards.json"))
}

pub fn art_output_parser() -> impl Parser<PathBuf> {
    long("output")
        .help("Directory to download card art into")
        .argument::<PathBuf>("OUTPUT")
        .fallback(PathBuf::from("art"))
}

pub fn concurrency_parser() -> impl Parser<usize> {
    long("concurrency")
        .help("Number of concurrent image downloads")
        .argument::<usize>("CONCURRENCY")
        .fallback(16)
        .display_fallback()
}

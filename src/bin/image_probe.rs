//! Query the configured image service for each argument and print what comes back.
//!
//! ```text
//! PIXABAY_API_KEY=... cargo run --bin image-probe -- cat "red apple"
//! ```

use anyhow::{bail, Context, Result};
use tokio::runtime::Runtime;

use memory_match::images::{ImageSearch, PixabayClient, SearchConfig};
use memory_match::logging;

fn main() -> Result<()> {
    logging::init_from_env()?;

    let words: Vec<String> = std::env::args().skip(1).collect();
    if words.is_empty() {
        bail!("usage: image-probe <word>...");
    }

    let config = SearchConfig::from_env();
    println!(
        "endpoint {} (per_page {}, timeout {:?}, key {})",
        config.endpoint,
        config.per_page,
        config.timeout,
        if config.api_key.is_some() { "set" } else { "missing" }
    );
    let client = PixabayClient::new(config)?;
    let rt = Runtime::new().context("creating tokio runtime")?;

    let mut failures = 0;
    for word in &words {
        match rt.block_on(client.search(word)) {
            Ok(candidates) if candidates.is_empty() => {
                println!("{}: no images found", word);
            }
            Ok(candidates) => {
                println!("{}:", word);
                for c in &candidates {
                    println!("  #{} {}", c.id, c.image_url);
                    println!("     by {} ({}) tags: {}", c.user, c.page_url, c.tags);
                }
            }
            Err(e) => {
                failures += 1;
                println!("{}: error: {}", word, e);
            }
        }
    }

    if failures == words.len() {
        bail!("every query failed");
    }
    Ok(())
}

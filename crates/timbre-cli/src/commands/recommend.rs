use anyhow::Result;
use timbre_search::{Recommendation, SimilarityIndex};

use crate::config::Config;

const SUGGESTION_LIMIT: usize = 5;

pub fn run_recommend(
    config: &Config,
    title: &str,
    k: Option<usize>,
    show_scores: bool,
    json: bool,
) -> Result<()> {
    let index = super::open_index(config)?;
    let k = k.unwrap_or(config.default_k);

    match index.recommend_scored(title, k) {
        Ok(recs) if json => {
            println!("{}", serde_json::to_string_pretty(&recs)?);
        }
        Ok(recs) => print_recommendations(title, &recs, show_scores),
        Err(e) if e.is_not_found() => {
            log::debug!("No catalog entry for {:?}", title);
            print_not_found(&index, title);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

fn print_recommendations(title: &str, recs: &[Recommendation], show_scores: bool) {
    println!("\n🎧 Songs like \"{}\":\n", title.trim());

    if recs.is_empty() {
        println!("  (no other songs in the catalog)");
        return;
    }

    for (i, rec) in recs.iter().enumerate() {
        let artist = rec
            .artist
            .as_deref()
            .map(|artist| format!(" - {}", artist))
            .unwrap_or_default();
        let score = if show_scores {
            format!("  ({:.3})", rec.score)
        } else {
            String::new()
        };
        println!("  {}. 🎶 {}{}{}", i + 1, rec.title, artist, score);
    }
}

fn print_not_found(index: &SimilarityIndex, title: &str) {
    println!("❌ Song not found in catalog: {}", title.trim());

    let suggestions: Vec<&str> = index
        .search(title)
        .take(SUGGESTION_LIMIT)
        .map(|song| song.title.as_str())
        .collect();

    if suggestions.is_empty() {
        println!("\n  Run `timbre list` to browse available songs");
    } else {
        println!("\n  Did you mean:");
        for suggestion in suggestions {
            println!("    - {}", suggestion);
        }
    }
}

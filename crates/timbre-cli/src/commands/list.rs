use anyhow::Result;

use crate::config::Config;

pub fn run_list(config: &Config, filter: Option<String>, limit: Option<usize>) -> Result<()> {
    let index = super::open_index(config)?;
    let limit = limit.unwrap_or(usize::MAX);

    let mut shown = 0;
    let mut matched = 0;
    for song in index.search(filter.as_deref().unwrap_or_default()) {
        matched += 1;
        if shown < limit {
            match &song.artist {
                Some(artist) => println!("{:>6}  {} - {}", song.row_index, song.title, artist),
                None => println!("{:>6}  {}", song.row_index, song.title),
            }
            shown += 1;
        }
    }

    if matched > shown {
        println!("\n  ... {} more (use --limit to show more)", matched - shown);
    } else if matched == 0 {
        println!("No songs match {:?}", filter.unwrap_or_default());
    }

    Ok(())
}

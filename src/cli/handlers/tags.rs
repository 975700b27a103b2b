//! Tags command handler.

use anyhow::{Context, Result};

use crate::cli::TagsArgs;
use crate::cli::output::{OutputFormat, TagListing, print_json};
use crate::graph::NoteGraphService;

pub fn handle_tags(args: &TagsArgs, service: &NoteGraphService) -> Result<()> {
    let listings: Vec<TagListing> = if args.counts {
        service
            .tag_counts()
            .context("failed to count tags")?
            .into_iter()
            .map(|t| TagListing {
                name: t.tag.name,
                count: Some(t.count),
            })
            .collect()
    } else {
        service
            .list_tags()
            .context("failed to list tags")?
            .into_iter()
            .map(|t| TagListing {
                name: t.name,
                count: None,
            })
            .collect()
    };

    match args.format {
        OutputFormat::Human => {
            if listings.is_empty() {
                println!("No tags found.");
            }
            for listing in &listings {
                match listing.count {
                    Some(count) => println!("#{:<30} {:>5}", listing.name, count),
                    None => println!("#{}", listing.name),
                }
            }
        }
        OutputFormat::Json => print_json(listings)?,
    }
    Ok(())
}

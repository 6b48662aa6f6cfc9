use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use edugame_catalog::{
    CategoryEntry, CategoryRegistry, GameContent, Resolution, ResolutionKind, ResolveRequest,
};

/// One request together with what the resolver made of it.
#[derive(Debug, Serialize)]
pub struct ResolutionRecord<'a> {
    pub request: ResolveRequest,
    pub outcome: ResolutionKind,
    pub message: String,
    pub resolution: Resolution<'a>,
}

impl<'a> ResolutionRecord<'a> {
    pub fn new(request: ResolveRequest, resolution: Resolution<'a>) -> Self {
        Self {
            request,
            outcome: resolution.kind(),
            message: resolution.to_string(),
            resolution,
        }
    }
}

/// Games of one category bucket or dedicated table, as shown by `list`.
#[derive(Debug, Serialize)]
pub struct BucketListing<'a> {
    pub category: &'a str,
    pub bucket: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub dedicated: bool,
    pub games: Vec<GameListing<'a>>,
}

#[derive(Debug, Serialize)]
pub struct GameListing<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub component: &'a str,
}

/// One row of the `categories` overview.
#[derive(Debug, Serialize)]
pub struct CategorySummary<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub icon: &'a str,
    pub strategy: &'static str,
    pub buckets: Vec<&'a str>,
    pub games: usize,
    pub aliases: Vec<&'a str>,
}

impl<'a> CategorySummary<'a> {
    pub fn collect(registry: &'a CategoryRegistry) -> Vec<Self> {
        registry
            .categories()
            .map(|entry| Self {
                id: entry.id(),
                title: &entry.meta().title,
                icon: &entry.meta().icon,
                strategy: entry.strategy_kind().key(),
                buckets: entry.buckets().collect(),
                games: entry.game_count(),
                aliases: registry
                    .aliases()
                    .filter(|(_, target)| *target == entry.id())
                    .map(|(alias, _)| alias)
                    .collect(),
            })
            .collect()
    }
}

/// Listing for `entry`. With an `age_group`, the dedicated table the
/// category consults for it (if any) comes first, then the bucket it
/// normalizes to. Without one, every bucket and then every dedicated table.
pub fn bucket_listings<'a>(
    entry: &'a CategoryEntry,
    age_group: Option<&str>,
) -> Vec<BucketListing<'a>> {
    let mut listings = Vec::new();
    match age_group {
        Some(age) => {
            if let Some(table) = entry.dedicated_table_for(age) {
                listings.push(dedicated_listing(entry, table));
            }
            let bucket = entry.normalize_age(age);
            let games = entry.games_in(&bucket);
            listings.push(listing(entry, bucket, false, games));
        }
        None => {
            for bucket in entry.buckets() {
                listings.push(listing(entry, bucket.to_string(), false, entry.games_in(bucket)));
            }
            for table in entry.dedicated_tables() {
                listings.push(dedicated_listing(entry, table));
            }
        }
    }
    listings
}

fn dedicated_listing<'a>(entry: &'a CategoryEntry, table: &str) -> BucketListing<'a> {
    listing(entry, table.to_string(), true, entry.dedicated_games(table))
}

fn listing<'a>(
    entry: &'a CategoryEntry,
    bucket: String,
    dedicated: bool,
    games: impl Iterator<Item = (&'a str, &'a GameContent)>,
) -> BucketListing<'a> {
    BucketListing {
        category: entry.id(),
        bucket,
        dedicated,
        games: games
            .map(|(id, content)| GameListing {
                id,
                title: &content.title,
                component: &content.component,
            })
            .collect(),
    }
}

pub fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    let json_output = serde_json::to_string_pretty(value)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn write_resolution_console(out: &mut dyn Write, record: &ResolutionRecord<'_>) -> Result<()> {
    let triple = format!(
        "{}/{}/{}",
        record.request.category.as_deref().unwrap_or("-"),
        record.request.age_group.as_deref().unwrap_or("-"),
        record.request.game_id.as_deref().unwrap_or("-"),
    );
    let label = record.outcome.label().to_uppercase();
    match &record.resolution {
        Resolution::Found(game) => {
            writeln!(out, "{} {} {}", "✅".green(), label.green().bold(), triple.bold())?;
            writeln!(out, "   Title: {}", game.content.title)?;
            writeln!(out, "   Component: {}", game.content.component)?;
            writeln!(
                out,
                "   Category: {} {} ({}/{})",
                game.meta.icon, game.meta.title, game.category, game.bucket
            )?;
            if let Some(hint) = &game.context_hint {
                writeln!(out, "   Context hint: {hint}")?;
            }
        }
        _ => {
            writeln!(out, "{} {} {}", "❌".red(), label.red().bold(), triple.bold())?;
            writeln!(out, "   {}", record.message.yellow())?;
        }
    }
    Ok(())
}

pub fn write_batch_console(out: &mut dyn Write, records: &[ResolutionRecord<'_>]) -> Result<()> {
    writeln!(out, "{}", "📊 Resolution Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "=====================".cyan())?;
    for record in records {
        write_resolution_console(out, record)?;
    }
    let found = records
        .iter()
        .filter(|record| record.outcome == ResolutionKind::Found)
        .count();
    writeln!(out)?;
    writeln!(out, "Resolved: {found}/{}", records.len())?;
    Ok(())
}

pub fn write_listings_console(out: &mut dyn Write, listings: &[BucketListing<'_>]) -> Result<()> {
    for listing in listings {
        let label = if listing.dedicated {
            format!("[dedicated {}]", listing.bucket)
        } else {
            format!("[{}]", listing.bucket)
        };
        writeln!(
            out,
            "{} {}",
            listing.category.bright_cyan().bold(),
            label.cyan()
        )?;
        if listing.games.is_empty() {
            writeln!(out, "   (no games)")?;
        }
        for game in &listing.games {
            writeln!(out, "   {:32} {}", game.id, game.title)?;
        }
    }
    Ok(())
}

pub fn write_categories_console(out: &mut dyn Write, summaries: &[CategorySummary<'_>]) -> Result<()> {
    writeln!(out, "Available categories:")?;
    for summary in summaries {
        write!(
            out,
            "  {} {:22} - {} ({} games, {} strategy)",
            summary.icon,
            summary.id,
            summary.title,
            summary.games,
            summary.strategy
        )?;
        if !summary.aliases.is_empty() {
            write!(out, " aka {}", summary.aliases.join(", "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

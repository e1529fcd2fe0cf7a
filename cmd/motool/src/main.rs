use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gmo::{LookupStrategy, MappedCatalog, Translator};
use gmo_locale::{LocaleEntry, locale_name_combinations};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod render;

#[derive(Parser, Debug)]
#[command(
    name = "motool",
    version,
    about = "Inspect and query compiled gettext catalogs"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print header fields and the lookup strategy
    Info {
        /// Path to a .mo file
        catalog: PathBuf,
    },

    /// Print every original/translated pair in table order
    Dump {
        /// Path to a .mo file
        catalog: PathBuf,

        /// Render every string as hex
        #[arg(long, default_value_t = false)]
        hex: bool,
    },

    /// Translate messages with a single catalog
    Lookup {
        /// Path to a .mo file
        catalog: PathBuf,

        /// Ignore the hash table and scan linearly
        #[arg(long, default_value_t = false)]
        scan: bool,

        /// Messages to translate
        #[arg(required = true)]
        msgids: Vec<String>,
    },

    /// Pick the best catalog for a locale and translate messages with it
    Translate {
        /// Candidate catalog as LOCALE=PATH (repeatable)
        #[arg(long = "catalog", value_parser = parse_catalog_arg, required = true)]
        catalogs: Vec<(String, PathBuf)>,

        /// Requested locale, e.g. de_AT.UTF-8
        #[arg(long)]
        locale: String,

        /// Messages to translate
        #[arg(required = true)]
        msgids: Vec<String>,
    },

    /// Print the fallback names tried for a locale, most specific first
    Locales {
        /// Locale name, e.g. en_US.UTF-8@euro
        locale: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.command {
        Command::Info { catalog } => info_cmd(&catalog, &mut out),
        Command::Dump { catalog, hex } => dump_cmd(&catalog, hex, &mut out),
        Command::Lookup {
            catalog,
            scan,
            msgids,
        } => lookup_cmd(&catalog, scan, &msgids, &mut out),
        Command::Translate {
            catalogs,
            locale,
            msgids,
        } => translate_cmd(&catalogs, &locale, &msgids, &mut out),
        Command::Locales { locale } => {
            for name in locale_name_combinations(&locale) {
                writeln!(out, "{name}")?;
            }
            Ok(())
        }
    }
}

fn open(path: &Path) -> Result<MappedCatalog> {
    let mapped =
        MappedCatalog::open(path).with_context(|| format!("open catalog {}", path.display()))?;
    info!(path = %path.display(), bytes = mapped.len(), "opened catalog");
    Ok(mapped)
}

fn info_cmd(path: &Path, out: &mut impl Write) -> Result<()> {
    let mapped = open(path)?;
    let catalog = mapped.catalog();

    writeln!(out, "endian:   {}", render::endian_label(catalog.endian()))?;
    writeln!(out, "revision: {}", catalog.revision().context("read revision")?)?;
    writeln!(out, "strings:  {}", catalog.string_count().context("read string count")?)?;
    writeln!(out, "hash size: {}", catalog.hash_table_size().context("read hash table size")?)?;
    writeln!(out, "strategy: {}", render::strategy_label(catalog.strategy()))?;
    if let Some(header) = catalog.metadata() {
        writeln!(out, "header:")?;
        for line in render::text_or_hex(header, false).lines() {
            writeln!(out, "  {line}")?;
        }
    }
    Ok(())
}

fn dump_cmd(path: &Path, hex: bool, out: &mut impl Write) -> Result<()> {
    let mapped = open(path)?;
    for (index, entry) in mapped.catalog().entries().enumerate() {
        let entry = entry.with_context(|| format!("read entry {index}"))?;
        writeln!(out, "{}", render::entry_line(&entry, hex))?;
    }
    Ok(())
}

fn lookup_cmd(path: &Path, scan: bool, msgids: &[String], out: &mut impl Write) -> Result<()> {
    let mapped = open(path)?;
    let mut catalog = mapped.catalog();
    if scan {
        catalog = catalog.with_strategy(LookupStrategy::Scan);
    }
    for msgid in msgids {
        let translated = catalog.find_translation(msgid.as_bytes());
        writeln!(out, "{}", render::text_or_hex(translated, false))?;
    }
    Ok(())
}

fn translate_cmd(
    catalogs: &[(String, PathBuf)],
    locale: &str,
    msgids: &[String],
    out: &mut impl Write,
) -> Result<()> {
    let mut mapped = Vec::with_capacity(catalogs.len());
    for (name, path) in catalogs {
        mapped.push((name.as_str(), open(path)?));
    }
    let entries: Vec<LocaleEntry<'_, &[u8]>> = mapped
        .iter()
        .map(|(name, catalog)| LocaleEntry::new(*name, catalog.catalog().as_bytes()))
        .collect();

    let translator = Translator::for_locale(&entries, locale);
    match translator.locale() {
        Some(matched) => info!(requested = locale, matched, "selected catalog"),
        None => warn!(requested = locale, "no catalog matched; messages stay untranslated"),
    }
    for msgid in msgids {
        writeln!(out, "{}", translator.translate(msgid))?;
    }
    Ok(())
}

fn parse_catalog_arg(raw: &str) -> Result<(String, PathBuf), String> {
    let (name, path) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected LOCALE=PATH, got {raw:?}"))?;
    if name.is_empty() || path.is_empty() {
        return Err(format!("expected LOCALE=PATH, got {raw:?}"));
    }
    Ok((name.to_string(), PathBuf::from(path)))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

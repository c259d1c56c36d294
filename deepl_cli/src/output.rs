use anyhow::Result;
use deepl_api::types::{Glossary, GlossaryEntry, Language, LanguagePair, Translation, Usage};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unrecognized names fall back to a table.
    pub fn from_name(name: &str) -> Self {
        match name {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct UsageRow {
    #[tabled(rename = "Quota")]
    #[serde(rename = "Quota")]
    quota: String,
    #[tabled(rename = "Used")]
    #[serde(rename = "Used")]
    used: u64,
    #[tabled(rename = "Limit")]
    #[serde(rename = "Limit")]
    limit: u64,
    #[tabled(rename = "Used %")]
    #[serde(rename = "Used %")]
    percent: String,
}

#[derive(Tabled, Serialize)]
struct LanguageRow {
    #[tabled(rename = "Code")]
    #[serde(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Formality")]
    #[serde(rename = "Formality")]
    formality: String,
}

#[derive(Tabled, Serialize)]
struct LanguagePairRow {
    #[tabled(rename = "Source")]
    #[serde(rename = "Source")]
    source: String,
    #[tabled(rename = "Target")]
    #[serde(rename = "Target")]
    target: String,
}

#[derive(Tabled, Serialize)]
struct TranslationRow {
    #[tabled(rename = "Detected")]
    #[serde(rename = "Detected")]
    detected: String,
    #[tabled(rename = "Text")]
    #[serde(rename = "Text")]
    text: String,
}

#[derive(Tabled, Serialize)]
struct GlossaryRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Languages")]
    #[serde(rename = "Languages")]
    languages: String,
    #[tabled(rename = "Entries")]
    #[serde(rename = "Entries")]
    entries: u64,
    #[tabled(rename = "Ready")]
    #[serde(rename = "Ready")]
    ready: String,
    #[tabled(rename = "Created")]
    #[serde(rename = "Created")]
    created: String,
}

#[derive(Tabled, Serialize)]
struct EntryRow {
    #[tabled(rename = "Source")]
    #[serde(rename = "Source")]
    source: String,
    #[tabled(rename = "Target")]
    #[serde(rename = "Target")]
    target: String,
}

// -- Row builders --

fn build_usage_rows(usage: &Usage) -> Vec<UsageRow> {
    let mut rows = vec![usage_row("characters", usage.character_count, usage.character_limit)];
    if let (Some(used), Some(limit)) = (usage.document_count, usage.document_limit) {
        rows.push(usage_row("documents", used, limit));
    }
    if let (Some(used), Some(limit)) = (usage.team_document_count, usage.team_document_limit) {
        rows.push(usage_row("team documents", used, limit));
    }
    rows
}

fn usage_row(quota: &str, used: u64, limit: u64) -> UsageRow {
    UsageRow {
        quota: quota.to_string(),
        used,
        limit,
        percent: format_percent(used, limit),
    }
}

fn build_language_rows(languages: &[Language]) -> Vec<LanguageRow> {
    languages
        .iter()
        .map(|l| LanguageRow {
            code: l.language.clone(),
            name: l.name.clone(),
            formality: match l.supports_formality {
                Some(true) => "yes".to_string(),
                Some(false) => "no".to_string(),
                None => "-".to_string(),
            },
        })
        .collect()
}

fn build_language_pair_rows(pairs: &[LanguagePair]) -> Vec<LanguagePairRow> {
    pairs
        .iter()
        .map(|p| LanguagePairRow {
            source: p.source_lang.clone(),
            target: p.target_lang.clone(),
        })
        .collect()
}

fn build_translation_rows(translations: &[Translation]) -> Vec<TranslationRow> {
    translations
        .iter()
        .map(|t| TranslationRow {
            detected: t.detected_source_language.clone(),
            text: t.text.clone(),
        })
        .collect()
}

fn build_glossary_rows(glossaries: &[Glossary]) -> Vec<GlossaryRow> {
    glossaries
        .iter()
        .map(|g| GlossaryRow {
            id: g.glossary_id.to_string(),
            name: g.name.clone(),
            languages: format!("{} -> {}", g.source_lang, g.target_lang),
            entries: g.entry_count,
            ready: if g.ready { "yes" } else { "no" }.to_string(),
            created: g
                .creation_time
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        })
        .collect()
}

fn build_entry_rows(entries: &[GlossaryEntry]) -> Vec<EntryRow> {
    entries
        .iter()
        .map(|e| EntryRow {
            source: e.source.clone(),
            target: e.target.clone(),
        })
        .collect()
}

// -- Rendering --

fn print_rows<R: Tabled + Serialize>(rows: Vec<R>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

pub fn print_usage(usage: &Usage, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(usage);
            Ok(())
        }
        _ => print_rows(build_usage_rows(usage), format),
    }
}

pub fn print_languages(languages: &[Language], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&languages);
            Ok(())
        }
        _ => print_rows(build_language_rows(languages), format),
    }
}

pub fn print_language_pairs(pairs: &[LanguagePair], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&pairs);
            Ok(())
        }
        _ => print_rows(build_language_pair_rows(pairs), format),
    }
}

/// Table output prints the bare texts, one per line, so the command composes
/// with pipes.
pub fn print_translations(translations: &[Translation], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            for t in translations {
                println!("{}", t.text);
            }
            Ok(())
        }
        OutputFormat::Json => {
            print_json(&translations);
            Ok(())
        }
        _ => print_rows(build_translation_rows(translations), format),
    }
}

pub fn print_glossaries(glossaries: &[Glossary], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&glossaries);
            Ok(())
        }
        _ => print_rows(build_glossary_rows(glossaries), format),
    }
}

pub fn print_entries(entries: &[GlossaryEntry], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&entries);
            Ok(())
        }
        _ => print_rows(build_entry_rows(entries), format),
    }
}

pub fn print_json<T: serde::Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_percent(used: u64, limit: u64) -> String {
    if limit == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", used as f64 * 100.0 / limit as f64)
}

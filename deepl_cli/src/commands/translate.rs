//! The `translate` subcommand: translates texts given as arguments or read from stdin.

use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::Args;
use deepl_api::types::{Formality, GlossaryId, SplitSentences, TagHandling, TranslateRequest};
use deepl_api::Client;

use crate::output::{print_translations, OutputFormat};

#[derive(Args)]
pub struct TranslateArgs {
    /// Texts to translate. Reads stdin when none are given.
    pub text: Vec<String>,

    /// Target language code (e.g. DE, EN-GB, PT-BR)
    #[arg(long, short = 't')]
    pub target_lang: String,

    /// Source language code. Detected when omitted.
    #[arg(long, short = 's')]
    pub source_lang: Option<String>,

    /// Formality: default, more, less, prefer_more, prefer_less
    #[arg(long)]
    pub formality: Option<Formality>,

    /// Sentence splitting: 0 (none), 1 (all), nonewlines
    #[arg(long)]
    pub split_sentences: Option<String>,

    /// Keep original punctuation and casing
    #[arg(long)]
    pub preserve_formatting: bool,

    /// Treat input as markup: xml or html
    #[arg(long)]
    pub tag_handling: Option<String>,

    /// Glossary ID to apply (requires --source-lang)
    #[arg(long)]
    pub glossary: Option<String>,

    /// Extra context that influences the translation but is not translated
    #[arg(long)]
    pub context: Option<String>,
}

pub async fn run(args: &TranslateArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let texts = if args.text.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read text from stdin")?;
        vec![input.trim_end().to_string()]
    } else {
        args.text.clone()
    };
    if texts.iter().all(|t| t.trim().is_empty()) {
        bail!("nothing to translate");
    }

    let request = build_request(args, &texts)?;
    let resp = client.translate(&request).await?;
    print_translations(&resp.translations, format)
}

fn build_request(args: &TranslateArgs, texts: &[String]) -> Result<TranslateRequest> {
    if args.glossary.is_some() && args.source_lang.is_none() {
        bail!("--glossary requires --source-lang");
    }

    let mut request = TranslateRequest::new(&args.target_lang).with_texts(texts);
    if let Some(source_lang) = &args.source_lang {
        request = request.with_source_lang(source_lang);
    }
    if let Some(formality) = args.formality {
        request = request.with_formality(formality);
    }
    if let Some(value) = &args.split_sentences {
        request = request.with_split_sentences(parse_split_sentences(value)?);
    }
    if args.preserve_formatting {
        request = request.with_preserve_formatting(true);
    }
    if let Some(value) = &args.tag_handling {
        request = request.with_tag_handling(parse_tag_handling(value)?);
    }
    if let Some(id) = &args.glossary {
        request = request.with_glossary_id(GlossaryId::from(id.as_str()));
    }
    if let Some(context) = &args.context {
        request = request.with_context(context);
    }
    Ok(request)
}

fn parse_split_sentences(value: &str) -> Result<SplitSentences> {
    match value.to_lowercase().as_str() {
        "0" | "none" => Ok(SplitSentences::None),
        "1" | "all" => Ok(SplitSentences::All),
        "nonewlines" => Ok(SplitSentences::NoNewlines),
        other => bail!("unknown split-sentences value '{}': expected 0, 1 or nonewlines", other),
    }
}

fn parse_tag_handling(value: &str) -> Result<TagHandling> {
    match value.to_lowercase().as_str() {
        "xml" => Ok(TagHandling::Xml),
        "html" => Ok(TagHandling::Html),
        other => bail!("unknown tag handling '{}': expected xml or html", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(target: &str) -> TranslateArgs {
        TranslateArgs {
            text: vec![],
            target_lang: target.to_string(),
            source_lang: None,
            formality: None,
            split_sentences: None,
            preserve_formatting: false,
            tag_handling: None,
            glossary: None,
            context: None,
        }
    }

    #[test]
    fn test_build_minimal_request() {
        let request = build_request(&args("DE"), &["Hello".to_string()]).unwrap();
        assert_eq!(request.text, vec!["Hello"]);
        assert_eq!(request.target_lang, "DE");
        assert_eq!(request.source_lang, None);
        assert_eq!(request.preserve_formatting, None);
    }

    #[test]
    fn test_build_full_request() {
        let mut a = args("EN-GB");
        a.source_lang = Some("DE".to_string());
        a.formality = Some(Formality::PreferMore);
        a.split_sentences = Some("nonewlines".to_string());
        a.preserve_formatting = true;
        a.tag_handling = Some("HTML".to_string());
        a.glossary = Some("abc".to_string());
        a.context = Some("A museum".to_string());

        let request = build_request(&a, &["Maler".to_string()]).unwrap();
        assert_eq!(request.formality, Some(Formality::PreferMore));
        assert_eq!(request.split_sentences, Some(SplitSentences::NoNewlines));
        assert_eq!(request.preserve_formatting, Some(true));
        assert_eq!(request.tag_handling, Some(TagHandling::Html));
        assert_eq!(request.glossary_id, Some(GlossaryId::from("abc")));
        assert_eq!(request.context.as_deref(), Some("A museum"));
    }

    #[test]
    fn test_glossary_requires_source_lang() {
        let mut a = args("DE");
        a.glossary = Some("abc".to_string());
        assert!(build_request(&a, &["x".to_string()]).is_err());
    }

    #[test]
    fn test_parse_split_sentences() {
        assert_eq!(parse_split_sentences("0").unwrap(), SplitSentences::None);
        assert_eq!(parse_split_sentences("ALL").unwrap(), SplitSentences::All);
        assert!(parse_split_sentences("2").is_err());
    }

    #[test]
    fn test_parse_tag_handling() {
        assert_eq!(parse_tag_handling("xml").unwrap(), TagHandling::Xml);
        assert!(parse_tag_handling("markdown").is_err());
    }
}

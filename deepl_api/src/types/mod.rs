mod usage;
pub use self::usage::Usage;

mod language;
pub use self::language::Language;

mod translation;
pub use self::translation::{
    Formality, SplitSentences, TagHandling, TranslateRequest, TranslateResponse, Translation,
};

mod glossary;
pub use self::glossary::{
    CreateGlossary, Glossaries, Glossary, GlossaryEntries, GlossaryEntry, GlossaryId,
    GlossaryLanguagePairs, LanguagePair,
};

mod document;
pub use self::document::{DocumentHandle, DocumentState, DocumentStatus, DocumentUpload};

pub mod document;
pub mod glossaries;
pub mod languages;
pub mod translate;
pub mod usage;

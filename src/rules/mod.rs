//! Rule detectors.
//!
//! `chars` and `cursor` are the shared vocabulary (what a character is, how to
//! move around a verse). Each `rules_*` module holds one rule family, and
//! `rules::get` lists them in the order the scheduler consults them.

pub mod chars;
pub mod cursor;
#[allow(clippy::module_inception)]
pub mod rules;

pub mod rules_article;
pub mod rules_letters;
pub mod rules_madd;
pub mod rules_marks;
pub mod rules_muqattaat;
pub mod rules_nun;
pub mod rules_silat_ha;

//! Crate-local macros, in textual scope through `#[macro_use]` in `lib.rs`.

macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

macro_rules! detector {
    (
        name: $name:expr,
        detect: $detect:expr
        $(, buckets: $buckets:expr)?
        $(,)?
    ) => {{
        $crate::Detector {
            name: $name,
            detect: $detect,
            buckets: { 0 $(| $buckets)? },
        }
    }};
}
